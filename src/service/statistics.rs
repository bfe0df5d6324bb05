//! Aggregate statistics groups.
//!
//! Each group is computed independently so one failing aggregate degrades
//! to an unavailable marker instead of taking the whole dashboard down.
//! Window-driven groups receive the resolved [`Window`]; classification,
//! demographic, financial and completion groups describe current state and
//! ignore it.

use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, NaiveDate, Utc};
use sea_orm::ConnectionTrait;

use crate::data::{
    applicant::ApplicantRepository, claim::ClaimRepository, dossier::DossierRepository,
    property::PropertyRepository,
};
use crate::error::Error;
use crate::model::{
    period::Window,
    scope::Scope,
    stats::{
        AgeBrackets, CommuneCount, CompletionStats, DashboardStatistics, DemographicStats,
        DossierStats, FinancialStats, GeographicStats, GroupResult, OverviewStats, PropertyStats,
        StateCounts,
    },
};
use crate::service::{growth, round1};

/// Dossiers still open past this many days count as overdue.
const OVERDUE_DAYS: i64 = 90;
/// Communes shown in the geographic ranking.
const TOP_COMMUNES: u64 = 5;
/// Gender values that get their own demographic row. Anything else still
/// counts toward the state totals.
const RECOGNIZED_GENDERS: [&str; 2] = ["female", "male"];
/// Vocation bucket for claims on properties without one.
const UNSPECIFIED_VOCATION: &str = "unspecified";

pub struct StatisticsService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StatisticsService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Headline counters plus window growth.
    pub async fn overview(&self, scope: &Scope, window: &Window) -> Result<OverviewStats, Error> {
        let dossiers = DossierRepository::new(self.db);
        let status = dossiers.status_counts(scope).await?;
        let total_properties = PropertyRepository::new(self.db).count_all(scope).await?;
        let total_applicants = ApplicantRepository::new(self.db).count_all(scope).await?;

        let new_dossiers = dossiers
            .count_opened_between(scope, window.from, window.to)
            .await?;
        let previous = growth::preceding_window(window);
        let previous_new = dossiers
            .count_opened_between(scope, previous.from, previous.to)
            .await?;

        Ok(OverviewStats {
            total_dossiers: status.total,
            open_dossiers: status.open,
            closed_dossiers: status.closed,
            total_properties,
            total_applicants,
            new_dossiers,
            growth_rate: growth::growth_rate(new_dossiers, previous_new),
        })
    }

    /// Dossier movement inside the window plus the overdue backlog.
    pub async fn dossiers(&self, scope: &Scope, window: &Window) -> Result<DossierStats, Error> {
        let repo = DossierRepository::new(self.db);

        let opened = repo
            .count_opened_between(scope, window.from, window.to)
            .await?;
        let durations = repo.closed_durations(scope, window).await?;
        let closed = durations.len() as i64;
        let average_processing_days = if closed > 0 {
            let total_days: f64 = durations
                .iter()
                .map(|(opened_at, closed_at)| {
                    (*closed_at - *opened_at).num_seconds() as f64 / 86_400.0
                })
                .sum();
            round1(total_days / closed as f64)
        } else {
            0.0
        };

        let cutoff = Utc::now().naive_utc() - Duration::days(OVERDUE_DAYS);
        let overdue = repo.count_overdue(scope, cutoff).await?;

        Ok(DossierStats {
            opened,
            closed,
            average_processing_days,
            overdue,
        })
    }

    /// Property state split with share-of-total percentages.
    pub async fn properties(&self, scope: &Scope) -> Result<PropertyStats, Error> {
        let counts = PropertyRepository::new(self.db).classification(scope).await?;

        Ok(PropertyStats {
            total: counts.total,
            total_area: counts.total_area,
            available: counts.available,
            available_area: counts.available_area,
            acquired: counts.acquired,
            acquired_area: counts.acquired_area,
            unlinked: counts.unlinked,
            available_pct: pct(counts.available, counts.total),
            acquired_pct: pct(counts.acquired, counts.total),
            unlinked_pct: pct(counts.unlinked, counts.total),
        })
    }

    /// Applicant states, gender rows and age distribution.
    pub async fn demographics(&self, scope: &Scope) -> Result<DemographicStats, Error> {
        let repo = ApplicantRepository::new(self.db);

        let mut stats = DemographicStats {
            total: 0,
            active: 0,
            acquired: 0,
            unlinked: 0,
            by_gender: BTreeMap::new(),
            average_age: 0.0,
            age_brackets: AgeBrackets::default(),
        };

        for row in repo.classification(scope).await? {
            stats.total += row.active + row.acquired + row.unlinked;
            stats.active += row.active;
            stats.acquired += row.acquired;
            stats.unlinked += row.unlinked;
            if let Some(gender) = row.gender {
                if RECOGNIZED_GENDERS.contains(&gender.as_str()) {
                    stats.by_gender.insert(
                        gender,
                        StateCounts {
                            active: row.active,
                            acquired: row.acquired,
                            unlinked: row.unlinked,
                        },
                    );
                }
            }
        }

        let birth_dates = repo.birth_dates(scope).await?;
        if !birth_dates.is_empty() {
            let today = Utc::now().date_naive();
            let ages: Vec<i64> = birth_dates
                .iter()
                .map(|birth| age_on(*birth, today))
                .collect();
            stats.average_age = round1(ages.iter().sum::<i64>() as f64 / ages.len() as f64);
            for age in ages {
                match age {
                    a if a < 25 => stats.age_brackets.under_25 += 1,
                    25..=39 => stats.age_brackets.age_25_39 += 1,
                    40..=59 => stats.age_brackets.age_40_59 += 1,
                    _ => stats.age_brackets.age_60_plus += 1,
                }
            }
        }

        Ok(stats)
    }

    /// Claim amount totals by status and vocation.
    pub async fn financial(&self, scope: &Scope) -> Result<FinancialStats, Error> {
        let repo = ClaimRepository::new(self.db);
        let summary = repo.amount_summary(scope).await?;

        let mut by_vocation = BTreeMap::new();
        for (vocation, total) in repo.amounts_by_vocation(scope).await? {
            let key = vocation
                .filter(|vocation| !vocation.is_empty())
                .unwrap_or_else(|| UNSPECIFIED_VOCATION.to_string());
            *by_vocation.entry(key).or_insert(0.0) += total;
        }

        // Averages come from the sum and count; the database never
        // computes them so the decimal behavior stays in one place.
        let average_amount = if summary.count > 0 {
            summary.overall_total / summary.count as f64
        } else {
            0.0
        };

        Ok(FinancialStats {
            active_total: summary.active_total,
            archived_total: summary.archived_total,
            overall_total: summary.overall_total,
            min_amount: summary.min_amount,
            max_amount: summary.max_amount,
            average_amount,
            by_vocation,
        })
    }

    /// Busiest communes inside the window.
    pub async fn geography(&self, scope: &Scope, window: &Window) -> Result<GeographicStats, Error> {
        let rows = DossierRepository::new(self.db)
            .top_communes(scope, window, TOP_COMMUNES)
            .await?;

        Ok(GeographicStats {
            top_communes: rows
                .into_iter()
                .map(|(commune, dossiers)| CommuneCount { commune, dossiers })
                .collect(),
        })
    }

    /// Data quality: dossiers whose linked records are fully filled in.
    ///
    /// A dossier is incomplete when any linked property or applicant
    /// misses a required field, or when it has no properties or no
    /// applicants at all.
    pub async fn completion(&self, scope: &Scope) -> Result<CompletionStats, Error> {
        let repo = DossierRepository::new(self.db);
        let status = repo.status_counts(scope).await?;

        let mut incomplete: HashSet<i32> = HashSet::new();
        incomplete.extend(repo.ids_with_incomplete_property(scope).await?);
        incomplete.extend(repo.ids_with_incomplete_applicant(scope).await?);
        incomplete.extend(repo.ids_without_property(scope).await?);
        incomplete.extend(repo.ids_without_applicant(scope).await?);

        let incomplete_dossiers = incomplete.len() as i64;
        let complete_dossiers = status.total - incomplete_dossiers;

        Ok(CompletionStats {
            total_dossiers: status.total,
            complete_dossiers,
            incomplete_dossiers,
            completion_rate: pct(complete_dossiers, status.total),
        })
    }

    /// Every group at once, concurrently. Failures degrade per group.
    pub async fn compute_bundle(&self, scope: &Scope, window: &Window) -> DashboardStatistics {
        let (overview, dossiers, properties, demographics, financial, geography, completion) = tokio::join!(
            self.overview(scope, window),
            self.dossiers(scope, window),
            self.properties(scope),
            self.demographics(scope),
            self.financial(scope),
            self.geography(scope, window),
            self.completion(scope),
        );

        DashboardStatistics {
            window: *window,
            overview: into_group("overview", overview),
            dossiers: into_group("dossier", dossiers),
            properties: into_group("property", properties),
            demographics: into_group("demographic", demographics),
            financial: into_group("financial", financial),
            geography: into_group("geographic", geography),
            completion: into_group("completion", completion),
        }
    }
}

/// Folds a group outcome into the bundle, logging the failure it absorbs.
pub(crate) fn into_group<T>(name: &str, result: Result<T, Error>) -> GroupResult<T> {
    match result {
        Ok(value) => GroupResult::Ready(value),
        Err(error) => {
            tracing::error!("Error computing {} statistics: {:?}", name, error);
            GroupResult::Unavailable
        }
    }
}

fn pct(part: i64, total: i64) -> f64 {
    if total > 0 {
        round1(part as f64 / total as f64 * 100.0)
    } else {
        0.0
    }
}

fn age_on(birth: NaiveDate, today: NaiveDate) -> i64 {
    today.years_since(birth).unwrap_or(0) as i64
}
