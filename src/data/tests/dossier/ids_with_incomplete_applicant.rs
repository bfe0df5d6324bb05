//! Tests for DossierRepository::ids_with_incomplete_applicant method.
//!
//! This module verifies which dossiers the completion group flags for an
//! applicant missing identity fields. Applicants reach a dossier through
//! their claims on its properties.

use super::*;

/// Tests flagging dossiers claimed by an incomplete applicant.
///
/// Verifies that a dossier whose only claimant is fully described is not
/// flagged while one claimed by an applicant without identity fields is.
///
/// Expected: Ok(ids) holding only dossier 2
#[tokio::test]
async fn flags_dossiers_claimed_by_an_incomplete_applicant() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_dossier(1, 1, "Rufisque", factory::midnight(2024, 1, 10), None)
        .with_dossier(2, 1, "Pikine", factory::midnight(2024, 1, 11), None)
        .with_property(1, 1, Some(500.0))
        .with_property(2, 2, Some(300.0))
        .with_applicant(1, 1, Some("female"), Some(factory::date(1990, 5, 1)))
        .with_incomplete_applicant(2, 1)
        .with_claim(1, 1, 1, ClaimStatus::Active, 1000.0)
        .with_claim(2, 2, 2, ClaimStatus::Active, 800.0)
        .build()
        .await?;

    let dossier_repo = DossierRepository::new(&test.db);
    let result = dossier_repo
        .ids_with_incomplete_applicant(&Scope::unrestricted())
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap(), vec![2]);

    Ok(())
}

/// Tests an applicant missing only their birth date.
///
/// Verifies that a single absent identity field is enough to flag the
/// claimed dossier.
///
/// Expected: Ok(ids) holding dossier 1
#[tokio::test]
async fn a_missing_birth_date_flags_the_dossier() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_dossier(1, 1, "Rufisque", factory::midnight(2024, 1, 10), None)
        .with_property(1, 1, Some(500.0))
        .with_applicant(1, 1, Some("male"), None)
        .with_claim(1, 1, 1, ClaimStatus::Archived, 600.0)
        .build()
        .await?;

    let dossier_repo = DossierRepository::new(&test.db);
    let ids = dossier_repo
        .ids_with_incomplete_applicant(&Scope::unrestricted())
        .await?;

    assert_eq!(ids, vec![1]);

    Ok(())
}

/// Tests that the flags only cover the caller's district.
///
/// Verifies that an incomplete applicant claiming in another district does
/// not flag anything inside the scope. The filter follows the dossier's
/// district, not the applicant's.
///
/// Expected: Ok(ids) empty for district 1
#[tokio::test]
async fn scopes_flags_to_the_dossier_district() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_district(2, "TH")
        .with_dossier(1, 2, "Thies", factory::midnight(2024, 1, 10), None)
        .with_property(1, 1, Some(500.0))
        .with_incomplete_applicant(1, 1)
        .with_claim(1, 1, 1, ClaimStatus::Active, 1000.0)
        .build()
        .await?;

    let dossier_repo = DossierRepository::new(&test.db);
    let ids = dossier_repo
        .ids_with_incomplete_applicant(&Scope::district(1))
        .await?;

    assert!(ids.is_empty());

    Ok(())
}
