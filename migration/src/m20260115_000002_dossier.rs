use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260115_000001_district::District;

static IDX_DOSSIER_DISTRICT_ID: &str = "idx-dossier-district_id";
static IDX_DOSSIER_COMMUNE: &str = "idx-dossier-commune";
static IDX_DOSSIER_OPENED_AT: &str = "idx-dossier-opened_at";
static FK_DOSSIER_DISTRICT_ID: &str = "fk-dossier-district_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dossier::Table)
                    .if_not_exists()
                    .col(pk_auto(Dossier::Id))
                    .col(integer(Dossier::DistrictId))
                    .col(string_uniq(Dossier::Reference))
                    .col(string(Dossier::Commune))
                    .col(string_null(Dossier::Locality))
                    .col(timestamp(Dossier::OpenedAt))
                    .col(timestamp_null(Dossier::ClosedAt))
                    .col(timestamp(Dossier::CreatedAt))
                    .col(timestamp(Dossier::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DOSSIER_DISTRICT_ID)
                    .table(Dossier::Table)
                    .col(Dossier::DistrictId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DOSSIER_COMMUNE)
                    .table(Dossier::Table)
                    .col(Dossier::Commune)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DOSSIER_OPENED_AT)
                    .table(Dossier::Table)
                    .col(Dossier::OpenedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DOSSIER_DISTRICT_ID)
                    .from_tbl(Dossier::Table)
                    .from_col(Dossier::DistrictId)
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
                    .name(FK_DOSSIER_DISTRICT_ID)
                    .table(Dossier::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DOSSIER_OPENED_AT)
                    .table(Dossier::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DOSSIER_COMMUNE)
                    .table(Dossier::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DOSSIER_DISTRICT_ID)
                    .table(Dossier::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Dossier::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Dossier {
    Table,
    Id,
    DistrictId,
    Reference,
    Commune,
    Locality,
    OpenedAt,
    ClosedAt,
    CreatedAt,
    UpdatedAt,
}
