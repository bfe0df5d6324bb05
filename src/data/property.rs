use migration::{Alias, Asterisk, Cond, Expr, ExprTrait, Func, Query};
use sea_orm::{
    ActiveEnum, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
};

use entity::claim::ClaimStatus;

use crate::data::{dossier::DossierRepository, dossier_scope_expr, rollup_col};
use crate::model::scope::Scope;
use crate::service::classifier::{classify_property, PropertyState};

/// Property split by claim-derived state, with areas in square meters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyStateCounts {
    pub total: i64,
    pub total_area: f64,
    pub available: i64,
    pub available_area: f64,
    pub acquired: i64,
    pub acquired_area: f64,
    pub unlinked: i64,
}

/// A property is complete when its nature, vocation and reference are all
/// filled in and its surface is a positive number.
pub(crate) fn incomplete_condition() -> Cond {
    let nature = || {
        Expr::col((
            entity::property::Entity,
            entity::property::Column::Nature,
        ))
    };
    let vocation = || {
        Expr::col((
            entity::property::Entity,
            entity::property::Column::Vocation,
        ))
    };
    let reference = || {
        Expr::col((
            entity::property::Entity,
            entity::property::Column::Reference,
        ))
    };
    let area = || {
        Expr::col((
            entity::property::Entity,
            entity::property::Column::AreaSqm,
        ))
    };

    Cond::any()
        .add(nature().is_null())
        .add(nature().eq(""))
        .add(vocation().is_null())
        .add(vocation().eq(""))
        .add(reference().is_null())
        .add(reference().eq(""))
        .add(area().is_null())
        .add(area().lte(0.0))
}

pub struct PropertyRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PropertyRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Properties visible to the scope.
    pub async fn count_all(&self, scope: &Scope) -> Result<i64, DbErr> {
        let mut select = Query::select();
        select
            .from(entity::property::Entity)
            .inner_join(
                entity::dossier::Entity,
                Expr::col((entity::dossier::Entity, entity::dossier::Column::Id)).equals((
                    entity::property::Entity,
                    entity::property::Column::DossierId,
                )),
            )
            .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("total"));
        if let Some(expr) = dossier_scope_expr(scope) {
            select.and_where(expr);
        }

        let stmt = self.db.get_database_backend().build(&select);
        let row = self.db.query_one_raw(stmt).await?;

        match row {
            Some(row) => row.try_get::<i64>("", "total"),
            None => Ok(0),
        }
    }

    /// State split of every visible property in a single statement.
    ///
    /// An inner query counts each property's active and total claims, the
    /// outer query folds those per-property rows into state buckets with
    /// conditional sums. Missing surfaces count as zero area.
    pub async fn classification(&self, scope: &Scope) -> Result<PropertyStateCounts, DbErr> {
        let mut per_property = Query::select();
        per_property
            .from(entity::property::Entity)
            .inner_join(
                entity::dossier::Entity,
                Expr::col((entity::dossier::Entity, entity::dossier::Column::Id)).equals((
                    entity::property::Entity,
                    entity::property::Column::DossierId,
                )),
            )
            .left_join(
                entity::claim::Entity,
                Expr::col((entity::claim::Entity, entity::claim::Column::PropertyId)).equals((
                    entity::property::Entity,
                    entity::property::Column::Id,
                )),
            )
            .expr_as(
                Func::coalesce::<[_; 2], Expr>([
                    Expr::col((
                        entity::property::Entity,
                        entity::property::Column::AreaSqm,
                    ))
                    .into(),
                    Expr::val(0.0).into(),
                ]),
                Alias::new("area"),
            )
            .expr_as(
                Func::count(Expr::case(
                    Expr::col((entity::claim::Entity, entity::claim::Column::Status))
                        .eq(ClaimStatus::Active.to_value()),
                    Expr::val(1),
                )),
                Alias::new("active_claims"),
            )
            .expr_as(
                Func::count(Expr::col((
                    entity::claim::Entity,
                    entity::claim::Column::Id,
                ))),
                Alias::new("total_claims"),
            )
            .group_by_col((entity::property::Entity, entity::property::Column::Id));
        if let Some(expr) = dossier_scope_expr(scope) {
            per_property.and_where(expr);
        }

        let mut rollup = Query::select();
        rollup
            .from_subquery(per_property, Alias::new("t"))
            .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("total"))
            .expr_as(Func::sum(rollup_col("area")), Alias::new("total_area"))
            .expr_as(
                Func::sum(
                    Expr::case(rollup_col("active_claims").gt(0), Expr::val(1))
                        .finally(Expr::val(0)),
                ),
                Alias::new("available"),
            )
            .expr_as(
                Func::sum(
                    Expr::case(rollup_col("active_claims").gt(0), rollup_col("area"))
                        .finally(Expr::val(0.0)),
                ),
                Alias::new("available_area"),
            )
            .expr_as(
                Func::sum(
                    Expr::case(
                        rollup_col("active_claims")
                            .eq(0)
                            .and(rollup_col("total_claims").gt(0)),
                        Expr::val(1),
                    )
                    .finally(Expr::val(0)),
                ),
                Alias::new("acquired"),
            )
            .expr_as(
                Func::sum(
                    Expr::case(
                        rollup_col("active_claims")
                            .eq(0)
                            .and(rollup_col("total_claims").gt(0)),
                        rollup_col("area"),
                    )
                    .finally(Expr::val(0.0)),
                ),
                Alias::new("acquired_area"),
            )
            .expr_as(
                Func::sum(
                    Expr::case(rollup_col("total_claims").eq(0), Expr::val(1))
                        .finally(Expr::val(0)),
                ),
                Alias::new("unlinked"),
            );

        let stmt = self.db.get_database_backend().build(&rollup);
        let row = self.db.query_one_raw(stmt).await?;

        let Some(row) = row else {
            return Ok(PropertyStateCounts::default());
        };

        Ok(PropertyStateCounts {
            total: row.try_get::<i64>("", "total")?,
            total_area: row.try_get::<Option<f64>>("", "total_area")?.unwrap_or(0.0),
            available: row.try_get::<Option<i64>>("", "available")?.unwrap_or(0),
            available_area: row
                .try_get::<Option<f64>>("", "available_area")?
                .unwrap_or(0.0),
            acquired: row.try_get::<Option<i64>>("", "acquired")?.unwrap_or(0),
            acquired_area: row
                .try_get::<Option<f64>>("", "acquired_area")?
                .unwrap_or(0.0),
            unlinked: row.try_get::<Option<i64>>("", "unlinked")?.unwrap_or(0),
        })
    }

    /// Same split computed one property at a time.
    ///
    /// Kept as a reference path to cross-check [`Self::classification`];
    /// issues one claim lookup per property, so never call it on real data.
    pub async fn classification_scan(&self, scope: &Scope) -> Result<PropertyStateCounts, DbErr> {
        let dossier_ids = DossierRepository::new(self.db).ids(scope).await?;
        let properties = entity::prelude::Property::find()
            .filter(entity::property::Column::DossierId.is_in(dossier_ids))
            .all(self.db)
            .await?;

        let mut counts = PropertyStateCounts::default();
        for property in properties {
            let active = entity::prelude::Claim::find()
                .filter(entity::claim::Column::PropertyId.eq(property.id))
                .filter(entity::claim::Column::Status.eq(ClaimStatus::Active))
                .count(self.db)
                .await? as i64;
            let linked = entity::prelude::Claim::find()
                .filter(entity::claim::Column::PropertyId.eq(property.id))
                .count(self.db)
                .await? as i64;

            let area = property.area_sqm.unwrap_or(0.0);
            counts.total += 1;
            counts.total_area += area;
            match classify_property(active, linked) {
                PropertyState::Available => {
                    counts.available += 1;
                    counts.available_area += area;
                }
                PropertyState::Acquired => {
                    counts.acquired += 1;
                    counts.acquired_area += area;
                }
                PropertyState::Unlinked => counts.unlinked += 1,
            }
        }

        Ok(counts)
    }
}
