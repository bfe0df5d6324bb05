//! Read repositories behind the statistics engine.
//!
//! Every repository method takes the caller's resolved [`Scope`] and applies
//! it inside the query, so tenancy is enforced at the data layer rather than
//! in whatever service happens to call it. Aggregations run as single
//! grouped statements; the handful of `*_scan` methods are deliberately
//! naive per-row rewrites kept around to cross-check the grouped queries.

pub mod applicant;
pub mod claim;
pub mod district;
pub mod dossier;
pub mod property;


use migration::{Alias, Expr, ExprTrait, SimpleExpr};

use crate::model::scope::Scope;

/// Column of the per-entity rollup subquery, conventionally aliased `t`.
pub(crate) fn rollup_col(name: &str) -> Expr {
    Expr::col((Alias::new("t"), Alias::new(name)))
}

/// District filter against `dossier.district_id`.
pub(crate) fn dossier_scope_expr(scope: &Scope) -> Option<SimpleExpr> {
    district_filter(
        scope,
        Expr::col((
            entity::dossier::Entity,
            entity::dossier::Column::DistrictId,
        )),
    )
}

/// District filter against `applicant.district_id`.
pub(crate) fn applicant_scope_expr(scope: &Scope) -> Option<SimpleExpr> {
    district_filter(
        scope,
        Expr::col((
            entity::applicant::Entity,
            entity::applicant::Column::DistrictId,
        )),
    )
}

fn district_filter(scope: &Scope, column: Expr) -> Option<SimpleExpr> {
    if scope.is_unrestricted() {
        return None;
    }
    // A restricted scope without a district must match nothing. The
    // district_id columns are NOT NULL, so the null comparison returns an
    // empty set instead of leaking other tenants' rows.
    Some(match scope.district_id() {
        Some(id) => column.eq(id),
        None => column.is_null(),
    })
}
