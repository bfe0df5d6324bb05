//! Dashboard orchestration.
//!
//! Resolves the caller's visibility and reporting window, then serves each
//! statistics group through the cache. Window-independent groups share one
//! cache entry per scope; window-driven groups key on the window's calendar
//! days. The only failure a caller sees is an invalid custom period, every
//! group failure degrades to an unavailable marker.

use std::collections::BTreeMap;

use futures::future::join_all;
use sea_orm::DatabaseConnection;

use crate::data::district::DistrictRepository;
use crate::error::Error;
use crate::model::{
    period::{PeriodRequest, PeriodToken, Window},
    scope::{Caller, Scope},
    stats::{ChartSeries, DashboardStatistics},
};
use crate::service::cache::{store::CacheStore, ttl::TtlTier, StatisticsCache};
use crate::service::charts::ChartService;
use crate::service::period::PeriodResolver;
use crate::service::statistics::{into_group, StatisticsService};

/// Periods kept warm for every tenant between scheduler runs.
const WARM_PERIODS: [PeriodToken; 4] = [
    PeriodToken::Today,
    PeriodToken::Week,
    PeriodToken::Month,
    PeriodToken::Year,
];

pub struct DashboardService<S: CacheStore> {
    db: DatabaseConnection,
    cache: StatisticsCache<S>,
}

impl<S: CacheStore> DashboardService<S> {
    pub fn new(db: DatabaseConnection, cache: StatisticsCache<S>) -> Self {
        Self { db, cache }
    }

    /// The full statistics bundle for what the caller may see.
    pub async fn statistics(
        &self,
        caller: &Caller,
        period: &PeriodRequest,
    ) -> Result<DashboardStatistics, Error> {
        self.statistics_for_scope(&Scope::resolve(caller), period)
            .await
    }

    pub async fn statistics_for_scope(
        &self,
        scope: &Scope,
        period: &PeriodRequest,
    ) -> Result<DashboardStatistics, Error> {
        self.cached_statistics(scope, period, None).await
    }

    /// Chart series for what the caller may see.
    pub async fn charts(&self, caller: &Caller) -> Result<ChartSeries, Error> {
        self.charts_for_scope(&Scope::resolve(caller)).await
    }

    pub async fn charts_for_scope(&self, scope: &Scope) -> Result<ChartSeries, Error> {
        self.cached_charts(scope, None).await
    }

    /// Precomputes the standard periods for the global view and every
    /// district, pinning the entries at the long tier.
    ///
    /// Failures are logged per scope and do not stop the sweep. Returns
    /// how many groups computed successfully.
    pub async fn warm_up(&self) -> Result<u64, Error> {
        let mut scopes = vec![Scope::unrestricted()];
        for district_id in DistrictRepository::new(&self.db).ids().await? {
            scopes.push(Scope::district(district_id));
        }

        // Periods of one scope warm concurrently; scopes go one at a time
        // so a deployment with many districts does not stampede the
        // database.
        let mut warmed = 0;
        for scope in &scopes {
            let sweeps = WARM_PERIODS.map(|token| self.warm_period(scope, token));
            warmed += join_all(sweeps).await.into_iter().sum::<u64>();

            match self.cached_charts(scope, Some(TtlTier::Long)).await {
                Ok(_) => warmed += 1,
                Err(error) => {
                    tracing::warn!(
                        "Error warming charts for {}: {:?}",
                        scope.key_segment(),
                        error
                    );
                }
            }
        }

        Ok(warmed)
    }

    async fn warm_period(&self, scope: &Scope, token: PeriodToken) -> u64 {
        match self
            .cached_statistics(scope, &PeriodRequest::new(token), Some(TtlTier::Long))
            .await
        {
            Ok(bundle) => count_ready(&bundle),
            Err(error) => {
                tracing::warn!(
                    "Error warming {} statistics for {}: {:?}",
                    token.as_str(),
                    scope.key_segment(),
                    error
                );
                0
            }
        }
    }

    /// Drops cached statistics for a district after its data changes.
    ///
    /// Global rollups include every district, so the unrestricted scope is
    /// invalidated alongside the district's own entries. Returns how many
    /// entries went.
    pub async fn invalidate_district(&self, district_id: i32) -> u64 {
        let district = self.cache.forget_scope(&Scope::district(district_id)).await;
        let global = self.cache.forget_scope(&Scope::unrestricted()).await;
        district + global
    }

    /// Drops every cached statistics entry.
    pub async fn invalidate_all(&self) -> u64 {
        self.cache.forget_all().await
    }

    async fn cached_statistics(
        &self,
        scope: &Scope,
        period: &PeriodRequest,
        tier_override: Option<TtlTier>,
    ) -> Result<DashboardStatistics, Error> {
        let window = PeriodResolver::new(&self.db).resolve(scope, period).await?;
        let params = window_params(&window);
        let state_params = BTreeMap::new();
        let service = StatisticsService::new(&self.db);
        let tier = |kind: &str| tier_override.unwrap_or_else(|| TtlTier::for_kind(kind));

        // State-describing groups ignore the window, so they share one
        // entry per scope instead of fragmenting across periods.
        let (overview, dossiers, properties, demographics, financial, geography, completion) = tokio::join!(
            self.cache
                .remember(scope, "overview", &params, tier("overview"), || async {
                    service.overview(scope, &window).await
                }),
            self.cache
                .remember(scope, "dossiers", &params, tier("dossiers"), || async {
                    service.dossiers(scope, &window).await
                }),
            self.cache.remember(
                scope,
                "properties",
                &state_params,
                tier("properties"),
                || async { service.properties(scope).await }
            ),
            self.cache.remember(
                scope,
                "demographics",
                &state_params,
                tier("demographics"),
                || async { service.demographics(scope).await }
            ),
            self.cache.remember(
                scope,
                "financial",
                &state_params,
                tier("financial"),
                || async { service.financial(scope).await }
            ),
            self.cache
                .remember(scope, "geography", &params, tier("geography"), || async {
                    service.geography(scope, &window).await
                }),
            self.cache.remember(
                scope,
                "completion",
                &state_params,
                tier("completion"),
                || async { service.completion(scope).await }
            ),
        );

        Ok(DashboardStatistics {
            window,
            overview: into_group("overview", overview),
            dossiers: into_group("dossier", dossiers),
            properties: into_group("property", properties),
            demographics: into_group("demographic", demographics),
            financial: into_group("financial", financial),
            geography: into_group("geographic", geography),
            completion: into_group("completion", completion),
        })
    }

    async fn cached_charts(
        &self,
        scope: &Scope,
        tier_override: Option<TtlTier>,
    ) -> Result<ChartSeries, Error> {
        let tier = tier_override.unwrap_or_else(|| TtlTier::for_kind("charts"));
        self.cache
            .remember(scope, "charts", &BTreeMap::new(), tier, || async {
                ChartService::new(&self.db).compute(scope).await
            })
            .await
    }
}

fn window_params(window: &Window) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    params.insert("from".to_string(), window.from.date().to_string());
    params.insert("to".to_string(), window.to.date().to_string());
    params
}

fn count_ready(bundle: &DashboardStatistics) -> u64 {
    [
        bundle.overview.is_ready(),
        bundle.dossiers.is_ready(),
        bundle.properties.is_ready(),
        bundle.demographics.is_ready(),
        bundle.financial.is_ready(),
        bundle.geography.is_ready(),
        bundle.completion.is_ready(),
    ]
    .iter()
    .filter(|ready| **ready)
    .count() as u64
}
