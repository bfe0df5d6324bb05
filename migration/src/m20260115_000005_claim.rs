use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20260115_000003_property::Property, m20260115_000004_applicant::Applicant};

static IDX_CLAIM_APPLICANT_PROPERTY: &str = "idx-claim-applicant_id-property_id";
static IDX_CLAIM_PROPERTY_ID: &str = "idx-claim-property_id";
static IDX_CLAIM_STATUS: &str = "idx-claim-status";
static FK_CLAIM_APPLICANT_ID: &str = "fk-claim-applicant_id";
static FK_CLAIM_PROPERTY_ID: &str = "fk-claim-property_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Claim::Table)
                    .if_not_exists()
                    .col(pk_auto(Claim::Id))
                    .col(integer(Claim::ApplicantId))
                    .col(integer(Claim::PropertyId))
                    .col(string_len(Claim::Status, 16))
                    .col(integer(Claim::Rank))
                    .col(double(Claim::Amount))
                    .col(timestamp(Claim::CreatedAt))
                    .col(timestamp(Claim::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CLAIM_APPLICANT_PROPERTY)
                    .table(Claim::Table)
                    .col(Claim::ApplicantId)
                    .col(Claim::PropertyId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CLAIM_PROPERTY_ID)
                    .table(Claim::Table)
                    .col(Claim::PropertyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CLAIM_STATUS)
                    .table(Claim::Table)
                    .col(Claim::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_CLAIM_APPLICANT_ID)
                    .from_tbl(Claim::Table)
                    .from_col(Claim::ApplicantId)
                    .to_tbl(Applicant::Table)
                    .to_col(Applicant::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_CLAIM_PROPERTY_ID)
                    .from_tbl(Claim::Table)
                    .from_col(Claim::PropertyId)
                    .to_tbl(Property::Table)
                    .to_col(Property::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_CLAIM_PROPERTY_ID)
                    .table(Claim::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_CLAIM_APPLICANT_ID)
                    .table(Claim::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CLAIM_STATUS)
                    .table(Claim::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CLAIM_PROPERTY_ID)
                    .table(Claim::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CLAIM_APPLICANT_PROPERTY)
                    .table(Claim::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Claim::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Claim {
    Table,
    Id,
    ApplicantId,
    PropertyId,
    Status,
    Rank,
    Amount,
    CreatedAt,
    UpdatedAt,
}
