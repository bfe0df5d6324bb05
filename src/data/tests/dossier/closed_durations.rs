//! Tests for DossierRepository::closed_durations method.
//!
//! This module verifies the `(opened_at, closed_at)` pairs the average
//! processing time is computed from.

use super::*;

/// Tests collecting the durations of dossiers closed inside the window.
///
/// Verifies that dossiers still open and dossiers closed outside the window
/// are left out, and that the returned pair carries the original opening
/// timestamp.
///
/// Expected: Ok(pairs) holding the single closure inside the window
#[tokio::test]
async fn returns_pairs_for_dossiers_closed_in_the_window() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_dossier(
            1,
            1,
            "Rufisque",
            factory::midnight(2024, 1, 1),
            Some(factory::midnight(2024, 1, 31)),
        )
        .with_dossier(2, 1, "Pikine", factory::midnight(2024, 1, 1), None)
        .with_dossier(
            3,
            1,
            "Thies",
            factory::midnight(2024, 1, 1),
            Some(factory::midnight(2024, 3, 1)),
        )
        .build()
        .await?;

    let window = Window {
        from: factory::midnight(2024, 1, 15),
        to: factory::midnight(2024, 2, 15),
    };
    let dossier_repo = DossierRepository::new(&test.db);
    let result = dossier_repo
        .closed_durations(&Scope::unrestricted(), &window)
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(
        result.unwrap(),
        vec![(factory::midnight(2024, 1, 1), factory::midnight(2024, 1, 31))]
    );

    Ok(())
}

/// Tests that the pairs only cover the caller's district.
///
/// Verifies that a closure in another district inside the same window does
/// not leak into the result.
///
/// Expected: Ok(pairs) with only the district 1 closure
#[tokio::test]
async fn scopes_pairs_to_the_district() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_district(2, "TH")
        .with_dossier(
            1,
            1,
            "Rufisque",
            factory::midnight(2024, 1, 1),
            Some(factory::midnight(2024, 1, 20)),
        )
        .with_dossier(
            2,
            2,
            "Thies",
            factory::midnight(2024, 1, 1),
            Some(factory::midnight(2024, 1, 25)),
        )
        .build()
        .await?;

    let window = Window {
        from: factory::midnight(2024, 1, 1),
        to: factory::midnight(2024, 1, 31),
    };
    let dossier_repo = DossierRepository::new(&test.db);
    let pairs = dossier_repo
        .closed_durations(&Scope::district(1), &window)
        .await?;

    assert_eq!(
        pairs,
        vec![(factory::midnight(2024, 1, 1), factory::midnight(2024, 1, 20))]
    );

    Ok(())
}
