//! Reporting window resolution.
//!
//! Turns a caller's period selection into an inclusive datetime window.
//! Day-based windows run from 00:00:00 on the first day to 23:59:59 on the
//! last. Irregular input degrades to a documented fallback; the only error
//! a caller can see is an inverted custom range.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, Utc};
use sea_orm::ConnectionTrait;

use crate::data::dossier::DossierRepository;
use crate::error::{period::PeriodError, Error};
use crate::model::{
    period::{PeriodRequest, PeriodToken, Window},
    scope::Scope,
};

/// Lookback for `all` when the scope has no dossiers yet: ten years.
const FALLBACK_LOOKBACK_DAYS: i64 = 3650;

pub struct PeriodResolver<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PeriodResolver<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Resolves the request against the current clock.
    pub async fn resolve(&self, scope: &Scope, request: &PeriodRequest) -> Result<Window, Error> {
        self.resolve_at(scope, request, Utc::now().naive_utc()).await
    }

    /// Clock-injected variant backing [`Self::resolve`].
    pub async fn resolve_at(
        &self,
        scope: &Scope,
        request: &PeriodRequest,
        now: NaiveDateTime,
    ) -> Result<Window, Error> {
        let today = now.date();
        match request.token {
            PeriodToken::Today => day_window(today, today),
            PeriodToken::Week => {
                // ISO week, Monday through Sunday.
                let monday =
                    today - Duration::days(today.weekday().num_days_from_monday() as i64);
                day_window(monday, monday + Duration::days(6))
            }
            PeriodToken::Month => {
                let first = today
                    .with_day(1)
                    .ok_or_else(|| internal("first day of month"))?;
                day_window(first, last_day_of_month(today)?)
            }
            PeriodToken::Year => {
                let first = NaiveDate::from_ymd_opt(today.year(), 1, 1)
                    .ok_or_else(|| internal("first day of year"))?;
                let last = NaiveDate::from_ymd_opt(today.year(), 12, 31)
                    .ok_or_else(|| internal("last day of year"))?;
                day_window(first, last)
            }
            PeriodToken::All => {
                let earliest = DossierRepository::new(self.db)
                    .earliest_opened_at(scope)
                    .await?;
                let from =
                    earliest.unwrap_or(now - Duration::days(FALLBACK_LOOKBACK_DAYS));
                Ok(Window { from, to: now })
            }
            PeriodToken::Custom => custom_window(request, now),
        }
    }
}

fn custom_window(request: &PeriodRequest, now: NaiveDateTime) -> Result<Window, Error> {
    let from = match request.from.as_deref().and_then(parse_client_date) {
        Some(date) => date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| internal("start of day"))?,
        None => now
            .checked_sub_months(Months::new(1))
            .ok_or_else(|| internal("previous month"))?,
    };
    let to = match request.to.as_deref().and_then(parse_client_date) {
        Some(date) => date
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| internal("end of day"))?,
        None => now,
    };

    if from > to {
        return Err(PeriodError::InvertedRange { from, to }.into());
    }

    Ok(Window { from, to })
}

/// Accepts plain ISO dates plus the common datetime spellings clients
/// send; anything else reads as absent so the defaults apply.
fn parse_client_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .map(|datetime| datetime.date())
}

fn day_window(from: NaiveDate, to: NaiveDate) -> Result<Window, Error> {
    let from = from
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| internal("start of day"))?;
    let to = to
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| internal("end of day"))?;
    Ok(Window { from, to })
}

fn last_day_of_month(date: NaiveDate) -> Result<NaiveDate, Error> {
    let first = date
        .with_day(1)
        .ok_or_else(|| internal("first day of month"))?;
    let next = first
        .checked_add_months(Months::new(1))
        .ok_or_else(|| internal("next month"))?;
    next.pred_opt().ok_or_else(|| internal("previous day"))
}

fn internal(operation: &str) -> Error {
    Error::InternalError(format!("Date arithmetic failed computing {operation}"))
}
