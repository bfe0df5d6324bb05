//! Tests for ApplicantRepository::classification_scan method.
//!
//! The scan is the naive per-applicant rewrite of the grouped statement, so
//! these tests pin the two paths to each other on the same data.

use super::*;

/// Tests the scan against the grouped statement.
///
/// Verifies that both paths agree on mixed genders, casings and claim
/// states, under the unrestricted scope and a district one. Both return
/// their rows ordered with the `None` gender first.
///
/// Expected: identical rows from both paths for both scopes
#[tokio::test]
async fn agrees_with_the_grouped_statement() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_district(2, "TH")
        .with_dossier(1, 1, "Rufisque", factory::midnight(2024, 1, 1), None)
        .with_property(1, 1, None)
        .with_property(2, 1, None)
        .with_property(3, 1, None)
        .with_applicant(1, 1, Some("female"), Some(factory::date(1990, 5, 1)))
        .with_applicant(2, 1, Some("Female"), None)
        .with_applicant(3, 1, Some("male"), None)
        .with_applicant(4, 1, None, None)
        .with_applicant(5, 2, Some("male"), None)
        .with_claim(1, 1, 1, ClaimStatus::Active, 1000.0)
        .with_claim(2, 2, 2, ClaimStatus::Archived, 500.0)
        .with_claim(3, 5, 3, ClaimStatus::Active, 750.0)
        .build()
        .await?;

    let applicant_repo = ApplicantRepository::new(&test.db);
    for scope in [Scope::unrestricted(), Scope::district(1)] {
        let grouped = applicant_repo.classification(&scope).await?;
        let scanned = applicant_repo.classification_scan(&scope).await?;
        assert_eq!(grouped, scanned);
    }

    Ok(())
}

/// Tests both paths on an empty database.
///
/// Expected: no rows from either path
#[tokio::test]
async fn both_paths_agree_without_applicants() -> Result<(), TestError> {
    let test = TestBuilder::new().with_registry_tables().build().await?;

    let applicant_repo = ApplicantRepository::new(&test.db);
    let grouped = applicant_repo.classification(&Scope::unrestricted()).await?;
    let scanned = applicant_repo
        .classification_scan(&Scope::unrestricted())
        .await?;

    assert!(grouped.is_empty());
    assert_eq!(grouped, scanned);

    Ok(())
}
