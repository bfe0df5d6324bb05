//! Tests for ClaimRepository::amounts_since method.
//!
//! This module verifies the `(created_at, amount)` pairs feeding the
//! quarterly amount chart.

use super::*;

/// Tests collecting claim amounts from a floor onwards.
///
/// Verifies that a claim created exactly at the floor is included, that
/// older claims are dropped, and that archived claims contribute alongside
/// active ones.
///
/// Expected: Ok(pairs) with the two claims at or after the floor
#[tokio::test]
async fn returns_amounts_from_the_floor_onwards() -> Result<(), TestError> {
    let floor = factory::midnight(2025, 1, 1);
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_dossier(1, 1, "Rufisque", factory::midnight(2024, 1, 10), None)
        .with_property(1, 1, Some(500.0))
        .with_property(2, 1, Some(300.0))
        .with_property(3, 1, None)
        .with_applicant(1, 1, Some("female"), None)
        .with_applicant(2, 1, Some("male"), None)
        .with_applicant(3, 1, None, None)
        .with_claim_at(1, 1, 1, ClaimStatus::Active, 1000.0, factory::midnight(2026, 2, 1))
        .with_claim_at(2, 2, 2, ClaimStatus::Archived, 250.5, factory::midnight(2024, 5, 10))
        .with_claim_at(3, 3, 3, ClaimStatus::Archived, 100.0, floor)
        .build()
        .await?;

    let claim_repo = ClaimRepository::new(&test.db);
    let result = claim_repo.amounts_since(&Scope::unrestricted(), floor).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let mut pairs = result.unwrap();
    pairs.sort_by_key(|(created_at, _)| *created_at);
    assert_eq!(
        pairs,
        vec![
            (floor, 100.0),
            (factory::midnight(2026, 2, 1), 1000.0),
        ]
    );

    Ok(())
}

/// Tests that the pairs only cover the caller's district.
///
/// Expected: Ok(pairs) with only the district 1 claim
#[tokio::test]
async fn scopes_pairs_to_the_district() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_district(2, "TH")
        .with_dossier(1, 1, "Rufisque", factory::midnight(2024, 1, 10), None)
        .with_dossier(2, 2, "Thies", factory::midnight(2024, 1, 11), None)
        .with_property(1, 1, Some(500.0))
        .with_property(2, 2, Some(300.0))
        .with_applicant(1, 1, None, None)
        .with_applicant(2, 2, None, None)
        .with_claim_at(1, 1, 1, ClaimStatus::Active, 1000.0, factory::midnight(2026, 2, 1))
        .with_claim_at(2, 2, 2, ClaimStatus::Active, 400.0, factory::midnight(2026, 2, 2))
        .build()
        .await?;

    let claim_repo = ClaimRepository::new(&test.db);
    let pairs = claim_repo
        .amounts_since(&Scope::district(1), factory::midnight(2025, 1, 1))
        .await?;

    assert_eq!(pairs, vec![(factory::midnight(2026, 2, 1), 1000.0)]);

    Ok(())
}
