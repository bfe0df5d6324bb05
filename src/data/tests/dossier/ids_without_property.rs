//! Tests for DossierRepository::ids_without_property method.
//!
//! This module verifies which dossiers the completion group flags for
//! having no property at all.

use super::*;

/// Tests flagging dossiers with no property.
///
/// Verifies that a dossier with any property row, complete or not, is left
/// alone while a bare dossier is flagged.
///
/// Expected: Ok(ids) holding only dossier 3
#[tokio::test]
async fn flags_dossiers_with_no_property() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_dossier(1, 1, "Rufisque", factory::midnight(2024, 1, 10), None)
        .with_dossier(2, 1, "Pikine", factory::midnight(2024, 1, 11), None)
        .with_dossier(3, 1, "Thies", factory::midnight(2024, 1, 12), None)
        .with_property(1, 1, Some(500.0))
        .with_incomplete_property(2, 2)
        .build()
        .await?;

    let dossier_repo = DossierRepository::new(&test.db);
    let result = dossier_repo
        .ids_without_property(&Scope::unrestricted())
        .await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap(), vec![3]);

    Ok(())
}

/// Tests that the flags only cover the caller's district.
///
/// Verifies that a bare dossier in another district stays invisible to the
/// scoped completion figures.
///
/// Expected: Ok(ids) empty for district 1
#[tokio::test]
async fn scopes_flags_to_the_district() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_district(2, "TH")
        .with_dossier(1, 1, "Rufisque", factory::midnight(2024, 1, 10), None)
        .with_dossier(2, 2, "Thies", factory::midnight(2024, 1, 11), None)
        .with_property(1, 1, Some(500.0))
        .build()
        .await?;

    let dossier_repo = DossierRepository::new(&test.db);
    let ids = dossier_repo.ids_without_property(&Scope::district(1)).await?;

    assert!(ids.is_empty());

    Ok(())
}
