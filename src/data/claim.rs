use chrono::NaiveDateTime;
use migration::{Alias, Asterisk, Expr, ExprTrait, Func, Query, SelectStatement};
use sea_orm::{ActiveEnum, ConnectionTrait, DbErr};

use entity::claim::ClaimStatus;

use crate::data::dossier_scope_expr;
use crate::model::scope::Scope;

/// Monetary aggregates over every visible claim. Min and max cover the
/// union of active and archived claims.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClaimAmountSummary {
    pub active_total: f64,
    pub archived_total: f64,
    pub overall_total: f64,
    pub min_amount: f64,
    pub max_amount: f64,
    pub count: i64,
}

pub struct ClaimRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ClaimRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Status totals, overall total and amount extremes in one statement.
    pub async fn amount_summary(&self, scope: &Scope) -> Result<ClaimAmountSummary, DbErr> {
        let amount = || Expr::col((entity::claim::Entity, entity::claim::Column::Amount));
        let status = || Expr::col((entity::claim::Entity, entity::claim::Column::Status));

        let mut select = scoped_claims(scope);
        select
            .expr_as(
                Func::sum(
                    Expr::case(status().eq(ClaimStatus::Active.to_value()), amount())
                        .finally(Expr::val(0.0)),
                ),
                Alias::new("active_total"),
            )
            .expr_as(
                Func::sum(
                    Expr::case(status().eq(ClaimStatus::Archived.to_value()), amount())
                        .finally(Expr::val(0.0)),
                ),
                Alias::new("archived_total"),
            )
            .expr_as(Func::sum(amount()), Alias::new("overall_total"))
            .expr_as(Func::min(amount()), Alias::new("min_amount"))
            .expr_as(Func::max(amount()), Alias::new("max_amount"))
            .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("claim_count"));

        let stmt = self.db.get_database_backend().build(&select);
        let row = self.db.query_one_raw(stmt).await?;

        let Some(row) = row else {
            return Ok(ClaimAmountSummary::default());
        };

        Ok(ClaimAmountSummary {
            active_total: row
                .try_get::<Option<f64>>("", "active_total")?
                .unwrap_or(0.0),
            archived_total: row
                .try_get::<Option<f64>>("", "archived_total")?
                .unwrap_or(0.0),
            overall_total: row
                .try_get::<Option<f64>>("", "overall_total")?
                .unwrap_or(0.0),
            min_amount: row.try_get::<Option<f64>>("", "min_amount")?.unwrap_or(0.0),
            max_amount: row.try_get::<Option<f64>>("", "max_amount")?.unwrap_or(0.0),
            count: row.try_get::<i64>("", "claim_count")?,
        })
    }

    /// Claim amounts summed per vocation of the claimed property, active
    /// and archived alike. Properties without a vocation come back as
    /// `None`.
    pub async fn amounts_by_vocation(
        &self,
        scope: &Scope,
    ) -> Result<Vec<(Option<String>, f64)>, DbErr> {
        let mut select = scoped_claims(scope);
        select
            .column((
                entity::property::Entity,
                entity::property::Column::Vocation,
            ))
            .expr_as(
                Func::sum(Expr::col((
                    entity::claim::Entity,
                    entity::claim::Column::Amount,
                ))),
                Alias::new("total"),
            )
            .group_by_col((
                entity::property::Entity,
                entity::property::Column::Vocation,
            ));

        let stmt = self.db.get_database_backend().build(&select);
        let rows = self.db.query_all_raw(stmt).await?;

        rows.iter()
            .map(|row| {
                Ok((
                    row.try_get::<Option<String>>("", "vocation")?,
                    row.try_get::<f64>("", "total")?,
                ))
            })
            .collect()
    }

    /// `(created_at, amount)` pairs from `from` onwards, for chart
    /// bucketing.
    pub async fn amounts_since(
        &self,
        scope: &Scope,
        from: NaiveDateTime,
    ) -> Result<Vec<(NaiveDateTime, f64)>, DbErr> {
        let mut select = scoped_claims(scope);
        select
            .column((entity::claim::Entity, entity::claim::Column::CreatedAt))
            .column((entity::claim::Entity, entity::claim::Column::Amount))
            .and_where(
                Expr::col((entity::claim::Entity, entity::claim::Column::CreatedAt)).gte(from),
            );

        let stmt = self.db.get_database_backend().build(&select);
        let rows = self.db.query_all_raw(stmt).await?;

        rows.iter()
            .map(|row| {
                Ok((
                    row.try_get::<NaiveDateTime>("", "created_at")?,
                    row.try_get::<f64>("", "amount")?,
                ))
            })
            .collect()
    }
}

/// Claims joined up to their dossier so the district filter can apply.
fn scoped_claims(scope: &Scope) -> SelectStatement {
    let mut select = Query::select();
    select
        .from(entity::claim::Entity)
        .inner_join(
            entity::property::Entity,
            Expr::col((entity::property::Entity, entity::property::Column::Id)).equals((
                entity::claim::Entity,
                entity::claim::Column::PropertyId,
            )),
        )
        .inner_join(
            entity::dossier::Entity,
            Expr::col((entity::dossier::Entity, entity::dossier::Column::Id)).equals((
                entity::property::Entity,
                entity::property::Column::DossierId,
            )),
        );
    if let Some(expr) = dossier_scope_expr(scope) {
        select.and_where(expr);
    }

    select
}
