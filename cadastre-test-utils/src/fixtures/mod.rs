//! Test fixture modules for database record creation.
//!
//! Fixtures run against the `TestContext` database after `TestBuilder::build()`
//! has created the schema. The `registry` submodule covers the land-registry
//! tables: districts, dossiers, properties, applicants, and claims.

pub mod registry;
