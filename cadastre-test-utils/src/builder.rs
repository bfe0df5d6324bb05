//! Declarative test builder for test environment setup.
//!
//! This module provides the `TestBuilder` API for configuring test databases
//! before execution. The builder pattern allows chaining fixture methods
//! together, with all operations queued and executed during the final
//! `build()` call.

use chrono::{NaiveDate, NaiveDateTime};
use entity::claim::ClaimStatus;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, fixtures::registry::factory, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database
/// tables and registry fixtures. Methods can be chained together and
/// finalized with `build()` to create a complete test setup.
///
/// Fixtures take explicit primary keys so rows can reference each other
/// before anything has been inserted.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_registry_tables: bool,

    // Database fixtures to insert
    districts: Vec<(i32, String)>, // (district_id, code)
    dossiers: Vec<(i32, i32, String, NaiveDateTime, Option<NaiveDateTime>)>, // (dossier_id, district_id, commune, opened_at, closed_at)
    properties: Vec<(i32, i32, Option<f64>, bool)>, // (property_id, dossier_id, area_sqm, complete)
    applicants: Vec<(i32, i32, Option<String>, Option<NaiveDate>, bool)>, // (applicant_id, district_id, gender, birth_date, complete)
    claims: Vec<(i32, i32, i32, ClaimStatus, f64, Option<NaiveDateTime>)>, // (claim_id, applicant_id, property_id, status, amount, created_at)
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_registry_tables: false,
            districts: Vec::new(),
            dossiers: Vec::new(),
            properties: Vec::new(),
            applicants: Vec::new(),
            claims: Vec::new(),
        }
    }

    /// Add the standard registry tables to the test database.
    ///
    /// Creates all tables the statistics queries read: District, Dossier,
    /// Property, Applicant, and Claim.
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_registry_tables(mut self) -> Self {
        self.include_registry_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be
    /// executed during `build()`. Chain multiple calls to add multiple tables.
    ///
    /// # Arguments
    /// - `entity` - Entity type implementing `EntityTrait`
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Queue a district fixture to be inserted during `build()`.
    ///
    /// # Arguments
    /// - `district_id` - Explicit primary key
    /// - `code` - Unique short code for the district
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_district(mut self, district_id: i32, code: &str) -> Self {
        self.districts.push((district_id, code.to_string()));
        self
    }

    /// Queue a dossier fixture to be inserted during `build()`.
    ///
    /// # Arguments
    /// - `dossier_id` - Explicit primary key
    /// - `district_id` - District the dossier belongs to
    /// - `commune` - Commune name used by the geographic aggregations
    /// - `opened_at` - Opening timestamp the period filters match on
    /// - `closed_at` - Closing timestamp, `None` for dossiers still open
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_dossier(
        mut self,
        dossier_id: i32,
        district_id: i32,
        commune: &str,
        opened_at: NaiveDateTime,
        closed_at: Option<NaiveDateTime>,
    ) -> Self {
        self.dossiers.push((
            dossier_id,
            district_id,
            commune.to_string(),
            opened_at,
            closed_at,
        ));
        self
    }

    /// Queue a fully described property fixture to be inserted during `build()`.
    ///
    /// # Arguments
    /// - `property_id` - Explicit primary key
    /// - `dossier_id` - Dossier the property belongs to
    /// - `area_sqm` - Surface area, `None` to leave the area unrecorded
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_property(mut self, property_id: i32, dossier_id: i32, area_sqm: Option<f64>) -> Self {
        self.properties.push((property_id, dossier_id, area_sqm, true));
        self
    }

    /// Queue a property fixture with every optional field empty.
    pub fn with_incomplete_property(mut self, property_id: i32, dossier_id: i32) -> Self {
        self.properties.push((property_id, dossier_id, None, false));
        self
    }

    /// Queue an applicant fixture to be inserted during `build()`.
    ///
    /// # Arguments
    /// - `applicant_id` - Explicit primary key
    /// - `district_id` - District the applicant is registered in
    /// - `gender` - Reported gender, `None` when undeclared
    /// - `birth_date` - Birth date, `None` when unrecorded
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_applicant(
        mut self,
        applicant_id: i32,
        district_id: i32,
        gender: Option<&str>,
        birth_date: Option<NaiveDate>,
    ) -> Self {
        self.applicants.push((
            applicant_id,
            district_id,
            gender.map(str::to_string),
            birth_date,
            true,
        ));
        self
    }

    /// Queue an applicant fixture with every optional identity field empty.
    pub fn with_incomplete_applicant(mut self, applicant_id: i32, district_id: i32) -> Self {
        self.applicants
            .push((applicant_id, district_id, None, None, false));
        self
    }

    /// Queue a claim fixture to be inserted during `build()`.
    ///
    /// The claim is inserted with rank 1, marking the applicant as the
    /// principal claimant on the property, and a fixed creation timestamp.
    /// Tests that bucket claims by date should use `with_claim_at`.
    ///
    /// # Arguments
    /// - `claim_id` - Explicit primary key
    /// - `applicant_id` - Claiming applicant
    /// - `property_id` - Claimed property
    /// - `status` - Claim lifecycle state
    /// - `amount` - Monetary amount attached to the claim
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_claim(
        mut self,
        claim_id: i32,
        applicant_id: i32,
        property_id: i32,
        status: ClaimStatus,
        amount: f64,
    ) -> Self {
        self.claims
            .push((claim_id, applicant_id, property_id, status, amount, None));
        self
    }

    /// Queue a claim fixture with an explicit creation timestamp.
    ///
    /// # Arguments
    /// - `claim_id` - Explicit primary key
    /// - `applicant_id` - Claiming applicant
    /// - `property_id` - Claimed property
    /// - `status` - Claim lifecycle state
    /// - `amount` - Monetary amount attached to the claim
    /// - `created_at` - Creation timestamp the quarterly chart buckets on
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_claim_at(
        mut self,
        claim_id: i32,
        applicant_id: i32,
        property_id: i32,
        status: ClaimStatus,
        amount: f64,
        created_at: NaiveDateTime,
    ) -> Self {
        self.claims.push((
            claim_id,
            applicant_id,
            property_id,
            status,
            amount,
            Some(created_at),
        ));
        self
    }

    /// Execute all queued operations and create the test context.
    ///
    /// Creates tables first, then inserts fixtures in dependency order so
    /// foreign keys resolve: districts, dossiers, properties, applicants,
    /// claims.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test environment
    /// - `Err(TestError::DbErr)` - Table creation or fixture insert failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_registry_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::District),
                schema.create_table_from_entity(entity::prelude::Dossier),
                schema.create_table_from_entity(entity::prelude::Property),
                schema.create_table_from_entity(entity::prelude::Applicant),
                schema.create_table_from_entity(entity::prelude::Claim),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures (using existing fixture methods)
        for (district_id, code) in self.districts {
            setup.registry().insert_mock_district(district_id, &code).await?;
        }

        for (dossier_id, district_id, commune, opened_at, closed_at) in self.dossiers {
            setup
                .registry()
                .insert_mock_dossier(dossier_id, district_id, &commune, opened_at, closed_at)
                .await?;
        }

        for (property_id, dossier_id, area_sqm, complete) in self.properties {
            if complete {
                setup
                    .registry()
                    .insert_mock_property(property_id, dossier_id, area_sqm)
                    .await?;
            } else {
                setup
                    .registry()
                    .insert_incomplete_property(property_id, dossier_id)
                    .await?;
            }
        }

        for (applicant_id, district_id, gender, birth_date, complete) in self.applicants {
            if complete {
                setup
                    .registry()
                    .insert_mock_applicant(applicant_id, district_id, gender.as_deref(), birth_date)
                    .await?;
            } else {
                setup
                    .registry()
                    .insert_incomplete_applicant(applicant_id, district_id)
                    .await?;
            }
        }

        for (claim_id, applicant_id, property_id, status, amount, created_at) in self.claims {
            setup
                .registry()
                .insert_mock_claim(
                    claim_id,
                    applicant_id,
                    property_id,
                    status,
                    1,
                    amount,
                    created_at.unwrap_or_else(|| factory::midnight(2024, 1, 1)),
                )
                .await?;
        }

        Ok(setup)
    }
}
