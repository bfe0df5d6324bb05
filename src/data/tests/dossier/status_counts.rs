//! Tests for DossierRepository::status_counts method.
//!
//! This module verifies the open/closed dossier counters, including the
//! district scoping applied to them and the empty-database defaults.

use super::*;

/// Tests counting dossiers across open and closed states.
///
/// Verifies that the total covers every dossier while the open and closed
/// counters split on the presence of a closing timestamp.
///
/// Expected: Ok(counts) with total 3, open 2, closed 1
#[tokio::test]
async fn splits_open_and_closed_dossiers() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_dossier(1, 1, "Rufisque", factory::midnight(2024, 1, 10), None)
        .with_dossier(
            2,
            1,
            "Rufisque",
            factory::midnight(2024, 2, 5),
            Some(factory::midnight(2024, 3, 1)),
        )
        .with_dossier(3, 1, "Pikine", factory::midnight(2024, 4, 2), None)
        .build()
        .await?;

    let dossier_repo = DossierRepository::new(&test.db);
    let result = dossier_repo.status_counts(&Scope::unrestricted()).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(
        result.unwrap(),
        DossierStatusCounts {
            total: 3,
            open: 2,
            closed: 1,
        }
    );

    Ok(())
}

/// Tests that the counters only cover the caller's district.
///
/// Verifies that a district scope hides dossiers registered under another
/// district from every counter.
///
/// Expected: Ok(counts) covering only the two district 1 dossiers
#[tokio::test]
async fn scopes_counts_to_the_district() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_district(2, "TH")
        .with_dossier(1, 1, "Rufisque", factory::midnight(2024, 1, 10), None)
        .with_dossier(
            2,
            1,
            "Pikine",
            factory::midnight(2024, 2, 5),
            Some(factory::midnight(2024, 3, 1)),
        )
        .with_dossier(3, 2, "Thies", factory::midnight(2024, 4, 2), None)
        .build()
        .await?;

    let dossier_repo = DossierRepository::new(&test.db);
    let result = dossier_repo.status_counts(&Scope::district(1)).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(
        result.unwrap(),
        DossierStatusCounts {
            total: 2,
            open: 1,
            closed: 1,
        }
    );

    Ok(())
}

/// Tests the counters on an empty database.
///
/// Verifies that an aggregate over zero dossiers decodes cleanly instead of
/// failing on missing rows.
///
/// Expected: Ok(counts) with every counter at zero
#[tokio::test]
async fn defaults_to_zero_without_dossiers() -> Result<(), TestError> {
    let test = TestBuilder::new().with_registry_tables().build().await?;

    let dossier_repo = DossierRepository::new(&test.db);
    let result = dossier_repo.status_counts(&Scope::unrestricted()).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap(), DossierStatusCounts::default());

    Ok(())
}
