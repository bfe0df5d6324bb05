use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260115_000002_dossier::Dossier;

static IDX_PROPERTY_DOSSIER_ID: &str = "idx-property-dossier_id";
static FK_PROPERTY_DOSSIER_ID: &str = "fk-property-dossier_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Property::Table)
                    .if_not_exists()
                    .col(pk_auto(Property::Id))
                    .col(integer(Property::DossierId))
                    .col(string_null(Property::Nature))
                    .col(string_null(Property::Vocation))
                    .col(string_null(Property::Reference))
                    .col(double_null(Property::AreaSqm))
                    .col(timestamp(Property::CreatedAt))
                    .col(timestamp(Property::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PROPERTY_DOSSIER_ID)
                    .table(Property::Table)
                    .col(Property::DossierId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PROPERTY_DOSSIER_ID)
                    .from_tbl(Property::Table)
                    .from_col(Property::DossierId)
                    .to_tbl(Dossier::Table)
                    .to_col(Dossier::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PROPERTY_DOSSIER_ID)
                    .table(Property::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PROPERTY_DOSSIER_ID)
                    .table(Property::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Property::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Property {
    Table,
    Id,
    DossierId,
    Nature,
    Vocation,
    Reference,
    AreaSqm,
    CreatedAt,
    UpdatedAt,
}
