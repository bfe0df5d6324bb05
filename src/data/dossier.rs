use chrono::NaiveDateTime;
use migration::{Alias, Asterisk, Expr, ExprTrait, Func, Query};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::data::{applicant, dossier_scope_expr, property};
use crate::model::{period::Window, scope::Scope};

/// Open and closed dossier counters over the whole scope.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DossierStatusCounts {
    pub total: i64,
    pub open: i64,
    pub closed: i64,
}

pub struct DossierRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DossierRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Total, open and closed dossier counts in one statement.
    pub async fn status_counts(&self, scope: &Scope) -> Result<DossierStatusCounts, DbErr> {
        let mut select = Query::select();
        select
            .from(entity::dossier::Entity)
            .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("total"))
            .expr_as(
                Func::count(Expr::col((
                    entity::dossier::Entity,
                    entity::dossier::Column::ClosedAt,
                ))),
                Alias::new("closed"),
            );
        if let Some(expr) = dossier_scope_expr(scope) {
            select.and_where(expr);
        }

        let stmt = self.db.get_database_backend().build(&select);
        let row = self.db.query_one_raw(stmt).await?;

        let (total, closed) = match row {
            Some(row) => (
                row.try_get::<i64>("", "total")?,
                row.try_get::<i64>("", "closed")?,
            ),
            None => (0, 0),
        };

        Ok(DossierStatusCounts {
            total,
            open: total - closed,
            closed,
        })
    }

    /// Dossiers opened inside the inclusive `[from, to]` range.
    pub async fn count_opened_between(
        &self,
        scope: &Scope,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<i64, DbErr> {
        let mut query = entity::prelude::Dossier::find()
            .filter(entity::dossier::Column::OpenedAt.between(from, to));
        if let Some(expr) = dossier_scope_expr(scope) {
            query = query.filter(expr);
        }

        let count = query.count(self.db).await?;
        Ok(count as i64)
    }

    /// Dossiers still open that were opened before `cutoff`.
    ///
    /// The cutoff is supplied by the caller (now minus the overdue
    /// threshold) so this count never depends on the reporting window.
    pub async fn count_overdue(&self, scope: &Scope, cutoff: NaiveDateTime) -> Result<i64, DbErr> {
        let mut query = entity::prelude::Dossier::find()
            .filter(entity::dossier::Column::ClosedAt.is_null())
            .filter(entity::dossier::Column::OpenedAt.lt(cutoff));
        if let Some(expr) = dossier_scope_expr(scope) {
            query = query.filter(expr);
        }

        let count = query.count(self.db).await?;
        Ok(count as i64)
    }

    /// `(opened_at, closed_at)` pairs of dossiers closed inside the window.
    pub async fn closed_durations(
        &self,
        scope: &Scope,
        window: &Window,
    ) -> Result<Vec<(NaiveDateTime, NaiveDateTime)>, DbErr> {
        let mut query = entity::prelude::Dossier::find()
            .select_only()
            .column(entity::dossier::Column::OpenedAt)
            .column(entity::dossier::Column::ClosedAt)
            .filter(entity::dossier::Column::ClosedAt.between(window.from, window.to));
        if let Some(expr) = dossier_scope_expr(scope) {
            query = query.filter(expr);
        }

        query
            .into_tuple::<(NaiveDateTime, NaiveDateTime)>()
            .all(self.db)
            .await
    }

    /// Opening timestamp of the oldest visible dossier, if any.
    pub async fn earliest_opened_at(&self, scope: &Scope) -> Result<Option<NaiveDateTime>, DbErr> {
        let mut select = Query::select();
        select.from(entity::dossier::Entity).expr_as(
            Func::min(Expr::col((
                entity::dossier::Entity,
                entity::dossier::Column::OpenedAt,
            ))),
            Alias::new("earliest"),
        );
        if let Some(expr) = dossier_scope_expr(scope) {
            select.and_where(expr);
        }

        let stmt = self.db.get_database_backend().build(&select);
        let row = self.db.query_one_raw(stmt).await?;

        match row {
            Some(row) => row.try_get::<Option<NaiveDateTime>>("", "earliest"),
            None => Ok(None),
        }
    }

    /// Communes ranked by dossiers opened inside the window, busiest first.
    /// Ties break alphabetically so the ranking is stable.
    pub async fn top_communes(
        &self,
        scope: &Scope,
        window: &Window,
        limit: u64,
    ) -> Result<Vec<(String, i64)>, DbErr> {
        let mut query = entity::prelude::Dossier::find()
            .select_only()
            .column(entity::dossier::Column::Commune)
            .expr_as(Func::count(Expr::col(Asterisk)), "dossiers")
            .filter(entity::dossier::Column::OpenedAt.between(window.from, window.to))
            .group_by(entity::dossier::Column::Commune)
            .order_by_desc(Expr::col(Alias::new("dossiers")))
            .order_by_asc(entity::dossier::Column::Commune)
            .limit(limit);
        if let Some(expr) = dossier_scope_expr(scope) {
            query = query.filter(expr);
        }

        query.into_tuple::<(String, i64)>().all(self.db).await
    }

    /// Opening timestamps from `from` onwards, for chart bucketing.
    pub async fn opened_since(
        &self,
        scope: &Scope,
        from: NaiveDateTime,
    ) -> Result<Vec<NaiveDateTime>, DbErr> {
        let mut query = entity::prelude::Dossier::find()
            .select_only()
            .column(entity::dossier::Column::OpenedAt)
            .filter(entity::dossier::Column::OpenedAt.gte(from));
        if let Some(expr) = dossier_scope_expr(scope) {
            query = query.filter(expr);
        }

        query.into_tuple::<NaiveDateTime>().all(self.db).await
    }

    /// Closing timestamps from `from` onwards, for chart bucketing.
    pub async fn closed_since(
        &self,
        scope: &Scope,
        from: NaiveDateTime,
    ) -> Result<Vec<NaiveDateTime>, DbErr> {
        let mut query = entity::prelude::Dossier::find()
            .select_only()
            .column(entity::dossier::Column::ClosedAt)
            .filter(entity::dossier::Column::ClosedAt.gte(from));
        if let Some(expr) = dossier_scope_expr(scope) {
            query = query.filter(expr);
        }

        query.into_tuple::<NaiveDateTime>().all(self.db).await
    }

    /// Ids of every dossier visible to the scope.
    pub async fn ids(&self, scope: &Scope) -> Result<Vec<i32>, DbErr> {
        let mut query = entity::prelude::Dossier::find()
            .select_only()
            .column(entity::dossier::Column::Id);
        if let Some(expr) = dossier_scope_expr(scope) {
            query = query.filter(expr);
        }

        query.into_tuple::<i32>().all(self.db).await
    }

    /// Dossiers with at least one property missing a required field.
    pub async fn ids_with_incomplete_property(&self, scope: &Scope) -> Result<Vec<i32>, DbErr> {
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
            .column((
                entity::property::Entity,
                entity::property::Column::DossierId,
            ))
            .distinct()
            .cond_where(property::incomplete_condition());
        if let Some(expr) = dossier_scope_expr(scope) {
            select.and_where(expr);
        }

        self.collect_ids(&select, "dossier_id").await
    }

    /// Dossiers with at least one linked applicant missing a required
    /// field. Applicants link to a dossier through their claims.
    pub async fn ids_with_incomplete_applicant(&self, scope: &Scope) -> Result<Vec<i32>, DbErr> {
        let mut select = Query::select();
        select
            .from(entity::claim::Entity)
            .inner_join(
                entity::applicant::Entity,
                Expr::col((entity::applicant::Entity, entity::applicant::Column::Id)).equals((
                    entity::claim::Entity,
                    entity::claim::Column::ApplicantId,
                )),
            )
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
            )
            .column((
                entity::property::Entity,
                entity::property::Column::DossierId,
            ))
            .distinct()
            .cond_where(applicant::incomplete_condition());
        if let Some(expr) = dossier_scope_expr(scope) {
            select.and_where(expr);
        }

        self.collect_ids(&select, "dossier_id").await
    }

    /// Dossiers without a single property.
    pub async fn ids_without_property(&self, scope: &Scope) -> Result<Vec<i32>, DbErr> {
        let mut linked = Query::select();
        linked.from(entity::property::Entity).column((
            entity::property::Entity,
            entity::property::Column::DossierId,
        ));

        let mut select = Query::select();
        select
            .from(entity::dossier::Entity)
            .column((entity::dossier::Entity, entity::dossier::Column::Id))
            .and_where(
                Expr::col((entity::dossier::Entity, entity::dossier::Column::Id))
                    .not_in_subquery(linked),
            );
        if let Some(expr) = dossier_scope_expr(scope) {
            select.and_where(expr);
        }

        self.collect_ids(&select, "id").await
    }

    /// Dossiers where no applicant holds a claim on any property.
    pub async fn ids_without_applicant(&self, scope: &Scope) -> Result<Vec<i32>, DbErr> {
        let mut linked = Query::select();
        linked
            .from(entity::claim::Entity)
            .inner_join(
                entity::property::Entity,
                Expr::col((entity::property::Entity, entity::property::Column::Id)).equals((
                    entity::claim::Entity,
                    entity::claim::Column::PropertyId,
                )),
            )
            .column((
                entity::property::Entity,
                entity::property::Column::DossierId,
            ));

        let mut select = Query::select();
        select
            .from(entity::dossier::Entity)
            .column((entity::dossier::Entity, entity::dossier::Column::Id))
            .and_where(
                Expr::col((entity::dossier::Entity, entity::dossier::Column::Id))
                    .not_in_subquery(linked),
            );
        if let Some(expr) = dossier_scope_expr(scope) {
            select.and_where(expr);
        }

        self.collect_ids(&select, "id").await
    }

    async fn collect_ids(
        &self,
        select: &migration::SelectStatement,
        column: &str,
    ) -> Result<Vec<i32>, DbErr> {
        let stmt = self.db.get_database_backend().build(select);
        let rows = self.db.query_all_raw(stmt).await?;

        rows.iter()
            .map(|row| row.try_get::<i32>("", column))
            .collect()
    }
}
