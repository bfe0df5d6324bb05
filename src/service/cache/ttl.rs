//! Expiry tiers for cached statistics.

use std::time::Duration;

/// How long a cached entry stays fresh.
///
/// Headline numbers managers watch refresh fastest; heavy distribution
/// queries and charts move slowly and can stay cached the longest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TtlTier {
    /// 5 minutes.
    Short,
    /// 15 minutes.
    Medium,
    /// 30 minutes.
    Long,
}

impl TtlTier {
    /// Default tier for a statistics kind.
    pub fn for_kind(kind: &str) -> Self {
        match kind {
            "overview" => Self::Short,
            "demographics" | "financial" | "charts" => Self::Long,
            _ => Self::Medium,
        }
    }

    pub fn duration(self) -> Duration {
        match self {
            Self::Short => Duration::from_secs(5 * 60),
            Self::Medium => Duration::from_secs(15 * 60),
            Self::Long => Duration::from_secs(30 * 60),
        }
    }
}
