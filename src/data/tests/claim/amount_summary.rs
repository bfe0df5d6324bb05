//! Tests for ClaimRepository::amount_summary method.
//!
//! This module verifies the monetary aggregates behind the financial
//! group: totals per status, the overall total and the amount extremes.

use super::*;

/// Tests the summary over a mix of claim states.
///
/// Verifies that the per-status totals only sum their own claims while the
/// overall total, the extremes and the count span all of them.
///
/// Expected: Ok(summary) splitting 1500 active from 250 archived
#[tokio::test]
async fn splits_totals_by_claim_status() -> Result<(), TestError> {
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
        .with_claim(1, 1, 1, ClaimStatus::Active, 1000.0)
        .with_claim(2, 2, 2, ClaimStatus::Active, 500.0)
        .with_claim(3, 3, 3, ClaimStatus::Archived, 250.0)
        .build()
        .await?;

    let claim_repo = ClaimRepository::new(&test.db);
    let result = claim_repo.amount_summary(&Scope::unrestricted()).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(
        result.unwrap(),
        ClaimAmountSummary {
            active_total: 1500.0,
            archived_total: 250.0,
            overall_total: 1750.0,
            min_amount: 250.0,
            max_amount: 1000.0,
            count: 3,
        }
    );

    Ok(())
}

/// Tests the summary on an empty database.
///
/// Verifies that null sums and extremes decode as zeros instead of failing.
///
/// Expected: Ok(summary) with every field at zero
#[tokio::test]
async fn defaults_to_zero_without_claims() -> Result<(), TestError> {
    let test = TestBuilder::new().with_registry_tables().build().await?;

    let claim_repo = ClaimRepository::new(&test.db);
    let summary = claim_repo.amount_summary(&Scope::unrestricted()).await?;

    assert_eq!(summary, ClaimAmountSummary::default());

    Ok(())
}

/// Tests that the summary only covers the caller's district.
///
/// Verifies that the scope reaches the claim through its property's
/// dossier.
///
/// Expected: Ok(summary) with only the district 1 claim
#[tokio::test]
async fn scopes_totals_to_the_district() -> Result<(), TestError> {
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
        .with_claim(1, 1, 1, ClaimStatus::Active, 1000.0)
        .with_claim(2, 2, 2, ClaimStatus::Active, 400.0)
        .build()
        .await?;

    let claim_repo = ClaimRepository::new(&test.db);
    let summary = claim_repo.amount_summary(&Scope::district(1)).await?;

    assert_eq!(
        summary,
        ClaimAmountSummary {
            active_total: 1000.0,
            archived_total: 0.0,
            overall_total: 1000.0,
            min_amount: 1000.0,
            max_amount: 1000.0,
            count: 1,
        }
    );

    Ok(())
}
