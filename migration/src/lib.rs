pub use sea_orm_migration::prelude::*;

mod m20260115_000001_district;
mod m20260115_000002_dossier;
mod m20260115_000003_property;
mod m20260115_000004_applicant;
mod m20260115_000005_claim;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260115_000001_district::Migration),
            Box::new(m20260115_000002_dossier::Migration),
            Box::new(m20260115_000003_property::Migration),
            Box::new(m20260115_000004_applicant::Migration),
            Box::new(m20260115_000005_claim::Migration),
        ]
    }
}
