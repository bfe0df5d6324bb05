//! Tests for ApplicantRepository::birth_dates method.
//!
//! This module verifies the birth date listing the average age and the age
//! brackets are computed from.

use super::*;

/// Tests collecting recorded birth dates.
///
/// Verifies that applicants without a birth date are skipped rather than
/// surfacing as a null to the age arithmetic.
///
/// Expected: Ok(dates) with only the two recorded dates
#[tokio::test]
async fn returns_only_recorded_birth_dates() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_applicant(1, 1, Some("female"), Some(factory::date(1990, 5, 1)))
        .with_applicant(2, 1, Some("male"), Some(factory::date(2001, 12, 31)))
        .with_applicant(3, 1, None, None)
        .build()
        .await?;

    let applicant_repo = ApplicantRepository::new(&test.db);
    let result = applicant_repo.birth_dates(&Scope::unrestricted()).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let mut dates = result.unwrap();
    dates.sort();
    assert_eq!(
        dates,
        vec![factory::date(1990, 5, 1), factory::date(2001, 12, 31)]
    );

    Ok(())
}

/// Tests that the dates only cover the caller's district.
///
/// Expected: Ok(dates) with only the district 1 birth date
#[tokio::test]
async fn scopes_dates_to_the_district() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_district(2, "TH")
        .with_applicant(1, 1, Some("female"), Some(factory::date(1990, 5, 1)))
        .with_applicant(2, 2, Some("male"), Some(factory::date(1975, 8, 15)))
        .build()
        .await?;

    let applicant_repo = ApplicantRepository::new(&test.db);
    let dates = applicant_repo.birth_dates(&Scope::district(1)).await?;

    assert_eq!(dates, vec![factory::date(1990, 5, 1)]);

    Ok(())
}
