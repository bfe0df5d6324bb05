use std::collections::BTreeMap;

use chrono::NaiveDate;
use migration::{Alias, Cond, Expr, ExprTrait, Func, Query};
use sea_orm::{
    ActiveEnum, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect,
};

use entity::claim::ClaimStatus;

use crate::data::{applicant_scope_expr, rollup_col};
use crate::model::scope::Scope;
use crate::service::classifier::{classify_applicant, ApplicantState};

/// Applicant state counts within one normalized gender group. `gender` is
/// `None` when the applicant record carries no gender at all.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApplicantGenderRow {
    pub gender: Option<String>,
    pub active: i64,
    pub acquired: i64,
    pub unlinked: i64,
}

/// An applicant is complete when both names are filled in and the birth
/// date and national id are present.
pub(crate) fn incomplete_condition() -> Cond {
    let first_name = || {
        Expr::col((
            entity::applicant::Entity,
            entity::applicant::Column::FirstName,
        ))
    };
    let last_name = || {
        Expr::col((
            entity::applicant::Entity,
            entity::applicant::Column::LastName,
        ))
    };
    let birth_date = || {
        Expr::col((
            entity::applicant::Entity,
            entity::applicant::Column::BirthDate,
        ))
    };
    let national_id = || {
        Expr::col((
            entity::applicant::Entity,
            entity::applicant::Column::NationalId,
        ))
    };

    Cond::any()
        .add(first_name().is_null())
        .add(first_name().eq(""))
        .add(last_name().eq(""))
        .add(birth_date().is_null())
        .add(national_id().is_null())
        .add(national_id().eq(""))
}

pub struct ApplicantRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ApplicantRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Applicants visible to the scope.
    pub async fn count_all(&self, scope: &Scope) -> Result<i64, DbErr> {
        let mut query = entity::prelude::Applicant::find();
        if let Some(expr) = applicant_scope_expr(scope) {
            query = query.filter(expr);
        }

        let count = query.count(self.db).await?;
        Ok(count as i64)
    }

    /// State split per gender in a single statement.
    ///
    /// An applicant's state follows their claims across every property. The
    /// inner query counts claims per applicant, the outer query folds those
    /// rows per lowercased gender, keeping a row for applicants without one.
    pub async fn classification(&self, scope: &Scope) -> Result<Vec<ApplicantGenderRow>, DbErr> {
        let mut per_applicant = Query::select();
        per_applicant
            .from(entity::applicant::Entity)
            .left_join(
                entity::claim::Entity,
                Expr::col((entity::claim::Entity, entity::claim::Column::ApplicantId)).equals((
                    entity::applicant::Entity,
                    entity::applicant::Column::Id,
                )),
            )
            .expr_as(
                Func::lower(Expr::col((
                    entity::applicant::Entity,
                    entity::applicant::Column::Gender,
                ))),
                Alias::new("gender"),
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
            .group_by_col((
                entity::applicant::Entity,
                entity::applicant::Column::Id,
            ));
        if let Some(expr) = applicant_scope_expr(scope) {
            per_applicant.and_where(expr);
        }

        let mut rollup = Query::select();
        rollup
            .from_subquery(per_applicant, Alias::new("t"))
            .column((Alias::new("t"), Alias::new("gender")))
            .expr_as(
                Func::sum(
                    Expr::case(rollup_col("active_claims").gt(0), Expr::val(1))
                        .finally(Expr::val(0)),
                ),
                Alias::new("active"),
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
                    Expr::case(rollup_col("total_claims").eq(0), Expr::val(1))
                        .finally(Expr::val(0)),
                ),
                Alias::new("unlinked"),
            )
            .group_by_col((Alias::new("t"), Alias::new("gender")));

        let stmt = self.db.get_database_backend().build(&rollup);
        let result = self.db.query_all_raw(stmt).await?;

        let mut rows = result
            .iter()
            .map(|row| {
                Ok(ApplicantGenderRow {
                    gender: row.try_get::<Option<String>>("", "gender")?,
                    active: row.try_get::<i64>("", "active")?,
                    acquired: row.try_get::<i64>("", "acquired")?,
                    unlinked: row.try_get::<i64>("", "unlinked")?,
                })
            })
            .collect::<Result<Vec<_>, DbErr>>()?;
        rows.sort_by(|a, b| a.gender.cmp(&b.gender));

        Ok(rows)
    }

    /// Same split computed one applicant at a time.
    ///
    /// Reference path for cross-checking [`Self::classification`]; issues a
    /// claim lookup per applicant, so never call it on real data.
    pub async fn classification_scan(
        &self,
        scope: &Scope,
    ) -> Result<Vec<ApplicantGenderRow>, DbErr> {
        let mut query = entity::prelude::Applicant::find();
        if let Some(expr) = applicant_scope_expr(scope) {
            query = query.filter(expr);
        }
        let applicants = query.all(self.db).await?;

        let mut buckets: BTreeMap<Option<String>, (i64, i64, i64)> = BTreeMap::new();
        for applicant in applicants {
            let active = entity::prelude::Claim::find()
                .filter(entity::claim::Column::ApplicantId.eq(applicant.id))
                .filter(entity::claim::Column::Status.eq(ClaimStatus::Active))
                .count(self.db)
                .await? as i64;
            let linked = entity::prelude::Claim::find()
                .filter(entity::claim::Column::ApplicantId.eq(applicant.id))
                .count(self.db)
                .await? as i64;

            let gender = applicant.gender.map(|g| g.to_lowercase());
            let bucket = buckets.entry(gender).or_default();
            match classify_applicant(active, linked) {
                ApplicantState::Active => bucket.0 += 1,
                ApplicantState::Acquired => bucket.1 += 1,
                ApplicantState::Unlinked => bucket.2 += 1,
            }
        }

        Ok(buckets
            .into_iter()
            .map(|(gender, (active, acquired, unlinked))| ApplicantGenderRow {
                gender,
                active,
                acquired,
                unlinked,
            })
            .collect())
    }

    /// Birth dates of visible applicants that have one.
    pub async fn birth_dates(&self, scope: &Scope) -> Result<Vec<NaiveDate>, DbErr> {
        let mut query = entity::prelude::Applicant::find()
            .select_only()
            .column(entity::applicant::Column::BirthDate)
            .filter(entity::applicant::Column::BirthDate.is_not_null());
        if let Some(expr) = applicant_scope_expr(scope) {
            query = query.filter(expr);
        }

        query.into_tuple::<NaiveDate>().all(self.db).await
    }
}
