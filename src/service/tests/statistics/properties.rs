//! Tests for StatisticsService::properties method.
//!
//! This module verifies the property group: the state split decorated
//! with share-of-total percentages.

use super::*;

/// Tests the state split with its percentages.
///
/// Verifies that each state's share of the total is rounded to one decimal
/// and that areas follow their property into the matching bucket.
///
/// Expected: Ok(stats) with one property per state at 33.3% each
#[tokio::test]
async fn splits_states_with_percentages() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_dossier(1, 1, "Rufisque", factory::midnight(2024, 1, 10), None)
        .with_property(1, 1, Some(1000.0))
        .with_property(2, 1, Some(250.5))
        .with_property(3, 1, None)
        .with_applicant(1, 1, Some("female"), None)
        .with_applicant(2, 1, Some("male"), None)
        .with_claim(1, 1, 1, ClaimStatus::Active, 5000.0)
        .with_claim(2, 2, 2, ClaimStatus::Archived, 200.0)
        .build()
        .await?;

    let service = StatisticsService::new(&test.db);
    let result = service.properties(&Scope::unrestricted()).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(
        result.unwrap(),
        PropertyStats {
            total: 3,
            total_area: 1250.5,
            available: 1,
            available_area: 1000.0,
            acquired: 1,
            acquired_area: 250.5,
            unlinked: 1,
            available_pct: 33.3,
            acquired_pct: 33.3,
            unlinked_pct: 33.3,
        }
    );

    Ok(())
}

/// Tests the group on an empty database.
///
/// Verifies that the percentages stay at zero instead of dividing by an
/// empty total.
///
/// Expected: Ok(stats) with every figure at zero
#[tokio::test]
async fn defaults_to_zero_without_properties() -> Result<(), TestError> {
    let test = TestBuilder::new().with_registry_tables().build().await?;

    let service = StatisticsService::new(&test.db);
    let stats = service.properties(&Scope::unrestricted()).await?;

    assert_eq!(stats.total, 0);
    assert_eq!(stats.available_pct, 0.0);
    assert_eq!(stats.acquired_pct, 0.0);
    assert_eq!(stats.unlinked_pct, 0.0);

    Ok(())
}
