//! Tests for PropertyRepository::count_all method.
//!
//! This module verifies the property headcount and the district scoping
//! applied through the parent dossier.

use super::*;

/// Tests counting every visible property.
///
/// Verifies that properties are counted across dossiers and districts under
/// the unrestricted scope.
///
/// Expected: Ok(3)
#[tokio::test]
async fn counts_every_property() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_district(2, "TH")
        .with_dossier(1, 1, "Rufisque", factory::midnight(2024, 1, 10), None)
        .with_dossier(2, 2, "Thies", factory::midnight(2024, 1, 11), None)
        .with_property(1, 1, Some(500.0))
        .with_property(2, 1, Some(300.0))
        .with_incomplete_property(3, 2)
        .build()
        .await?;

    let property_repo = PropertyRepository::new(&test.db);
    let result = property_repo.count_all(&Scope::unrestricted()).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap(), 3);

    Ok(())
}

/// Tests that the count only covers the caller's district.
///
/// Verifies that the scope follows the property's dossier into its
/// district.
///
/// Expected: Ok(2) for the district 1 properties
#[tokio::test]
async fn scopes_the_count_to_the_district() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_district(2, "TH")
        .with_dossier(1, 1, "Rufisque", factory::midnight(2024, 1, 10), None)
        .with_dossier(2, 2, "Thies", factory::midnight(2024, 1, 11), None)
        .with_property(1, 1, Some(500.0))
        .with_property(2, 1, Some(300.0))
        .with_property(3, 2, Some(700.0))
        .build()
        .await?;

    let property_repo = PropertyRepository::new(&test.db);
    let count = property_repo.count_all(&Scope::district(1)).await?;

    assert_eq!(count, 2);

    Ok(())
}

/// Tests the count on an empty database.
///
/// Expected: Ok(0)
#[tokio::test]
async fn defaults_to_zero_without_properties() -> Result<(), TestError> {
    let test = TestBuilder::new().with_registry_tables().build().await?;

    let property_repo = PropertyRepository::new(&test.db);
    let count = property_repo.count_all(&Scope::unrestricted()).await?;

    assert_eq!(count, 0);

    Ok(())
}
