use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260115_000001_district::District;

static IDX_APPLICANT_DISTRICT_ID: &str = "idx-applicant-district_id";
static FK_APPLICANT_DISTRICT_ID: &str = "fk-applicant-district_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Applicant::Table)
                    .if_not_exists()
                    .col(pk_auto(Applicant::Id))
                    .col(integer(Applicant::DistrictId))
                    .col(string_null(Applicant::FirstName))
                    .col(string(Applicant::LastName))
                    .col(string_null(Applicant::Gender))
                    .col(date_null(Applicant::BirthDate))
                    .col(string_null(Applicant::NationalId))
                    .col(timestamp(Applicant::CreatedAt))
                    .col(timestamp(Applicant::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_APPLICANT_DISTRICT_ID)
                    .table(Applicant::Table)
                    .col(Applicant::DistrictId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_APPLICANT_DISTRICT_ID)
                    .from_tbl(Applicant::Table)
                    .from_col(Applicant::DistrictId)
                    .to_tbl(District::Table)
                    .to_col(District::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_APPLICANT_DISTRICT_ID)
                    .table(Applicant::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_APPLICANT_DISTRICT_ID)
                    .table(Applicant::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Applicant::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Applicant {
    Table,
    Id,
    DistrictId,
    FirstName,
    LastName,
    Gender,
    BirthDate,
    NationalId,
    CreatedAt,
    UpdatedAt,
}
