use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::period::Window;

/// Headline counters for the dashboard landing view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverviewStats {
    pub total_dossiers: i64,
    pub open_dossiers: i64,
    pub closed_dossiers: i64,
    pub total_properties: i64,
    pub total_applicants: i64,
    /// Dossiers opened inside the reporting window.
    pub new_dossiers: i64,
    /// Percent change of `new_dossiers` against the preceding window of the
    /// same length, rounded to one decimal.
    pub growth_rate: f64,
}

/// Dossier activity inside the reporting window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DossierStats {
    pub opened: i64,
    pub closed: i64,
    /// Mean days between opening and closing, over dossiers closed inside
    /// the window.
    pub average_processing_days: f64,
    /// Dossiers still open after 90 days, regardless of the window.
    pub overdue: i64,
}

/// Property split by claim-derived state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyStats {
    pub total: i64,
    pub total_area: f64,
    pub available: i64,
    pub available_area: f64,
    pub acquired: i64,
    pub acquired_area: f64,
    pub unlinked: i64,
    pub available_pct: f64,
    pub acquired_pct: f64,
    pub unlinked_pct: f64,
}

/// Applicant state counts within one gender.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StateCounts {
    pub active: i64,
    pub acquired: i64,
    pub unlinked: i64,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AgeBrackets {
    pub under_25: i64,
    pub age_25_39: i64,
    pub age_40_59: i64,
    pub age_60_plus: i64,
}

/// Applicant population split by state, gender and age.
///
/// Applicants with an unrecognized or missing gender are part of the state
/// totals but absent from `by_gender`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DemographicStats {
    pub total: i64,
    pub active: i64,
    pub acquired: i64,
    pub unlinked: i64,
    pub by_gender: BTreeMap<String, StateCounts>,
    /// Mean age over applicants with a birth date, in years.
    pub average_age: f64,
    pub age_brackets: AgeBrackets,
}

/// Monetary totals over claims, split by lifecycle status and by the
/// vocation of the claimed property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialStats {
    pub active_total: f64,
    pub archived_total: f64,
    pub overall_total: f64,
    /// Min, max and mean are taken over the union of all claims.
    pub min_amount: f64,
    pub max_amount: f64,
    pub average_amount: f64,
    pub by_vocation: BTreeMap<String, f64>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CommuneCount {
    pub commune: String,
    pub dossiers: i64,
}

/// Communes ranked by dossier volume inside the window.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GeographicStats {
    pub top_communes: Vec<CommuneCount>,
}

/// Share of dossiers whose linked properties and applicants carry every
/// required field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletionStats {
    pub total_dossiers: i64,
    pub complete_dossiers: i64,
    pub incomplete_dossiers: i64,
    pub completion_rate: f64,
}

/// One month of dossier movement, labeled `YYYY-MM`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DossierFlowPoint {
    pub label: String,
    pub opened: i64,
    pub closed: i64,
}

/// Generic labeled value for single-series charts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Fixed-lookback chart data, independent of the reporting period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Last twelve months of opened and closed dossiers.
    pub dossier_flow: Vec<DossierFlowPoint>,
    /// Last eight quarters of claim amounts, labeled `YYYY-Qn`.
    pub claim_amounts: Vec<ChartPoint>,
}

/// Outcome of one aggregate group. A failed group degrades to
/// `Unavailable` instead of failing the whole dashboard response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum GroupResult<T> {
    Ready(T),
    Unavailable,
}

impl<T> GroupResult<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Unavailable => None,
        }
    }
}

/// Full statistics bundle for one scope and reporting window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardStatistics {
    pub window: Window,
    pub overview: GroupResult<OverviewStats>,
    pub dossiers: GroupResult<DossierStats>,
    pub properties: GroupResult<PropertyStats>,
    pub demographics: GroupResult<DemographicStats>,
    pub financial: GroupResult<FinancialStats>,
    pub geography: GroupResult<GeographicStats>,
    pub completion: GroupResult<CompletionStats>,
}
