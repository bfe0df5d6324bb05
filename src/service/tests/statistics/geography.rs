//! Tests for StatisticsService::geography method.
//!
//! This module verifies the commune ranking: five communes at most,
//! busiest first, ties broken alphabetically.

use super::*;

/// Tests the ranking over more communes than it shows.
///
/// Verifies that the sixth commune is cut, that the busiest leads and that
/// communes tied on volume keep alphabetical order.
///
/// Expected: Ok(stats) with five communes, Yene cut by the tie-break
#[tokio::test]
async fn ranks_the_five_busiest_communes() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_registry_tables()
        .with_district(1, "DK")
        .with_dossier(1, 1, "Pikine", factory::midnight(2024, 1, 5), None)
        .with_dossier(2, 1, "Pikine", factory::midnight(2024, 1, 6), None)
        .with_dossier(3, 1, "Pikine", factory::midnight(2024, 1, 7), None)
        .with_dossier(4, 1, "Rufisque", factory::midnight(2024, 1, 8), None)
        .with_dossier(5, 1, "Rufisque", factory::midnight(2024, 1, 9), None)
        .with_dossier(6, 1, "Thies", factory::midnight(2024, 1, 10), None)
        .with_dossier(7, 1, "Thies", factory::midnight(2024, 1, 11), None)
        .with_dossier(8, 1, "Bargny", factory::midnight(2024, 1, 12), None)
        .with_dossier(9, 1, "Diamniadio", factory::midnight(2024, 1, 13), None)
        .with_dossier(10, 1, "Yene", factory::midnight(2024, 1, 14), None)
        .build()
        .await?;

    let window = Window {
        from: factory::midnight(2024, 1, 1),
        to: factory::midnight(2024, 1, 31),
    };
    let service = StatisticsService::new(&test.db);
    let result = service.geography(&Scope::unrestricted(), &window).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let ranking = |commune: &str, dossiers: i64| CommuneCount {
        commune: commune.to_string(),
        dossiers,
    };
    assert_eq!(
        result.unwrap().top_communes,
        vec![
            ranking("Pikine", 3),
            ranking("Rufisque", 2),
            ranking("Thies", 2),
            ranking("Bargny", 1),
            ranking("Diamniadio", 1),
        ]
    );

    Ok(())
}
