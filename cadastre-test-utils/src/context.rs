//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder` for test
//! execution. The context wraps an in-memory SQLite database seeded with the
//! registry tables and fixtures configured on the builder.

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

/// Test context structure returned by `TestBuilder`.
///
/// This struct is the result of calling `TestBuilder::build()` and provides
/// access to the test environment:
/// - Database connection to an in-memory SQLite database
/// - Fixture helpers for inserting registry records mid-test
///
/// # Usage
///
/// Most users should create this via [`TestBuilder`](crate::TestBuilder) rather
/// than constructing it directly.
///
/// ```ignore
/// let mut test = TestBuilder::new().with_registry_tables().build().await?;
///
/// // Access the database
/// let db = &test.db;
///
/// // Access fixture helpers
/// test.registry().insert_mock_district(1, "NRD").await?;
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
}

impl TestContext {
    /// Create a new test context backed by a fresh in-memory SQLite database.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context
    /// - `Err(TestError::DbErr)` - Database connection failed
    pub(crate) async fn new() -> Result<Self, TestError> {
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext { db })
    }

    /// Create database tables from schema statements.
    ///
    /// Executes CREATE TABLE statements for all provided table schemas. Used
    /// internally by `TestBuilder` to set up the database schema during test
    /// initialization.
    ///
    /// # Arguments
    /// - `stmts` - Vector of CREATE TABLE statements to execute
    ///
    /// # Returns
    /// - `Ok(())` - All tables created successfully
    /// - `Err(TestError::DbErr)` - Table creation failed
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }
}
