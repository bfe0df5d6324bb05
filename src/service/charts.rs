//! Time-bucketed chart series.
//!
//! The charts deliberately ignore the caller's reporting window: a fixed
//! lookback ending at the current month and quarter keeps the dashboard
//! graphs comparable no matter which period is selected.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, Utc};
use sea_orm::ConnectionTrait;

use crate::data::{claim::ClaimRepository, dossier::DossierRepository};
use crate::error::Error;
use crate::model::{
    scope::Scope,
    stats::{ChartPoint, ChartSeries, DossierFlowPoint},
};

/// Months covered by the dossier flow series, current month included.
const FLOW_MONTHS: u32 = 12;
/// Quarters covered by the claim amount series, current quarter included.
const AMOUNT_QUARTERS: u32 = 8;

pub struct ChartService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ChartService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn compute(&self, scope: &Scope) -> Result<ChartSeries, Error> {
        self.compute_at(scope, Utc::now().naive_utc()).await
    }

    /// Series ending at the month and quarter containing `now`.
    pub async fn compute_at(
        &self,
        scope: &Scope,
        now: NaiveDateTime,
    ) -> Result<ChartSeries, Error> {
        let dossier_flow = self.dossier_flow(scope, now).await?;
        let claim_amounts = self.claim_amounts(scope, now).await?;

        Ok(ChartSeries {
            dossier_flow,
            claim_amounts,
        })
    }

    /// Dossiers opened and closed per month over the last year.
    ///
    /// Every month appears even when empty so the series length and label
    /// positions are stable for the consuming chart.
    async fn dossier_flow(
        &self,
        scope: &Scope,
        now: NaiveDateTime,
    ) -> Result<Vec<DossierFlowPoint>, Error> {
        let start = now
            .date()
            .with_day(1)
            .and_then(|first| first.checked_sub_months(Months::new(FLOW_MONTHS - 1)))
            .ok_or_else(|| internal("flow series start"))?;

        let mut buckets: BTreeMap<String, (i64, i64)> = BTreeMap::new();
        let mut cursor = start;
        for _ in 0..FLOW_MONTHS {
            buckets.insert(month_label(cursor), (0, 0));
            cursor = cursor
                .checked_add_months(Months::new(1))
                .ok_or_else(|| internal("next month"))?;
        }

        let floor = start
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| internal("start of day"))?;
        let repo = DossierRepository::new(self.db);

        for opened_at in repo.opened_since(scope, floor).await? {
            if let Some(counts) = buckets.get_mut(&month_label(opened_at.date())) {
                counts.0 += 1;
            }
        }
        for closed_at in repo.closed_since(scope, floor).await? {
            if let Some(counts) = buckets.get_mut(&month_label(closed_at.date())) {
                counts.1 += 1;
            }
        }

        // Zero-padded labels sort chronologically.
        Ok(buckets
            .into_iter()
            .map(|(label, (opened, closed))| DossierFlowPoint {
                label,
                opened,
                closed,
            })
            .collect())
    }

    /// Claim amounts summed per quarter over the last two years.
    async fn claim_amounts(
        &self,
        scope: &Scope,
        now: NaiveDateTime,
    ) -> Result<Vec<ChartPoint>, Error> {
        let start = quarter_start(now.date())
            .and_then(|quarter| quarter.checked_sub_months(Months::new((AMOUNT_QUARTERS - 1) * 3)))
            .ok_or_else(|| internal("amount series start"))?;

        let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
        let mut cursor = start;
        for _ in 0..AMOUNT_QUARTERS {
            buckets.insert(quarter_label(cursor), 0.0);
            cursor = cursor
                .checked_add_months(Months::new(3))
                .ok_or_else(|| internal("next quarter"))?;
        }

        let floor = start
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| internal("start of day"))?;

        for (created_at, amount) in ClaimRepository::new(self.db)
            .amounts_since(scope, floor)
            .await?
        {
            if let Some(total) = buckets.get_mut(&quarter_label(created_at.date())) {
                *total += amount;
            }
        }

        Ok(buckets
            .into_iter()
            .map(|(label, value)| ChartPoint { label, value })
            .collect())
    }
}

fn month_label(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

fn quarter_label(date: NaiveDate) -> String {
    format!("{:04}-Q{}", date.year(), date.month0() / 3 + 1)
}

fn quarter_start(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?.with_month(date.month0() / 3 * 3 + 1)
}

fn internal(operation: &str) -> Error {
    Error::InternalError(format!("Date arithmetic failed computing {operation}"))
}
