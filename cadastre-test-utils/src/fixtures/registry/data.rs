//! Registry database insertion utilities.
//!
//! This module provides methods for inserting land-registry records into the
//! test database with automatic parent record creation. If a parent record is
//! referenced but doesn't exist, it is created with factory defaults to
//! maintain referential integrity.

use chrono::{NaiveDate, NaiveDateTime};
use entity::claim::ClaimStatus;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::{error::TestError, fixtures::registry::factory, fixtures::registry::RegistryFixtures};

impl<'a> RegistryFixtures<'a> {
    /// Insert a mock district into the database.
    ///
    /// If a district with the given id already exists, returns the existing
    /// record instead of creating a duplicate.
    ///
    /// # Arguments
    /// - `district_id` - Explicit primary key
    /// - `code` - Unique short code for the district
    ///
    /// # Returns
    /// - `Ok(Model)` - The created or existing district record
    /// - `Err(TestError::DbErr)` - Database query or insert operation failed
    pub async fn insert_mock_district(
        &self,
        district_id: i32,
        code: &str,
    ) -> Result<entity::district::Model, TestError> {
        if let Some(existing_district) = entity::prelude::District::find()
            .filter(entity::district::Column::Id.eq(district_id))
            .one(&self.context.db)
            .await?
        {
            return Ok(existing_district);
        }

        Ok(
            entity::prelude::District::insert(factory::mock_district(district_id, code))
                .exec_with_returning(&self.context.db)
                .await?,
        )
    }

    /// Insert a mock dossier into the database.
    ///
    /// The parent district is created automatically if it doesn't exist. If a
    /// dossier with the given id already exists, returns the existing record.
    ///
    /// # Arguments
    /// - `dossier_id` - Explicit primary key
    /// - `district_id` - District the dossier belongs to
    /// - `commune` - Commune name used by the geographic aggregations
    /// - `opened_at` - Opening timestamp the period filters match on
    /// - `closed_at` - Closing timestamp, `None` for dossiers still open
    ///
    /// # Returns
    /// - `Ok(Model)` - The created or existing dossier record
    /// - `Err(TestError::DbErr)` - Database query or insert operation failed
    pub async fn insert_mock_dossier(
        &self,
        dossier_id: i32,
        district_id: i32,
        commune: &str,
        opened_at: NaiveDateTime,
        closed_at: Option<NaiveDateTime>,
    ) -> Result<entity::dossier::Model, TestError> {
        if let Some(existing_dossier) = entity::prelude::Dossier::find()
            .filter(entity::dossier::Column::Id.eq(dossier_id))
            .one(&self.context.db)
            .await?
        {
            return Ok(existing_dossier);
        }

        self.insert_mock_district(district_id, &format!("D{district_id:02}"))
            .await?;

        Ok(entity::prelude::Dossier::insert(factory::mock_dossier(
            dossier_id,
            district_id,
            commune,
            opened_at,
            closed_at,
        ))
        .exec_with_returning(&self.context.db)
        .await?)
    }

    /// Insert a mock property with populated descriptive fields.
    ///
    /// The parent dossier is created automatically with factory defaults if it
    /// doesn't exist. Tests that assert on dossier dates should insert the
    /// dossier explicitly first.
    ///
    /// # Arguments
    /// - `property_id` - Explicit primary key
    /// - `dossier_id` - Dossier the property belongs to
    /// - `area_sqm` - Surface area, `None` to leave the area unrecorded
    ///
    /// # Returns
    /// - `Ok(Model)` - The created or existing property record
    /// - `Err(TestError::DbErr)` - Database query or insert operation failed
    pub async fn insert_mock_property(
        &self,
        property_id: i32,
        dossier_id: i32,
        area_sqm: Option<f64>,
    ) -> Result<entity::property::Model, TestError> {
        if let Some(existing_property) = entity::prelude::Property::find()
            .filter(entity::property::Column::Id.eq(property_id))
            .one(&self.context.db)
            .await?
        {
            return Ok(existing_property);
        }

        self.insert_mock_dossier(dossier_id, 1, "Rufisque", factory::midnight(2024, 1, 15), None)
            .await?;

        Ok(entity::prelude::Property::insert(factory::mock_property(
            property_id,
            dossier_id,
            area_sqm,
        ))
        .exec_with_returning(&self.context.db)
        .await?)
    }

    /// Insert a mock property with every optional descriptive field left empty.
    pub async fn insert_incomplete_property(
        &self,
        property_id: i32,
        dossier_id: i32,
    ) -> Result<entity::property::Model, TestError> {
        if let Some(existing_property) = entity::prelude::Property::find()
            .filter(entity::property::Column::Id.eq(property_id))
            .one(&self.context.db)
            .await?
        {
            return Ok(existing_property);
        }

        self.insert_mock_dossier(dossier_id, 1, "Rufisque", factory::midnight(2024, 1, 15), None)
            .await?;

        Ok(
            entity::prelude::Property::insert(factory::mock_incomplete_property(
                property_id,
                dossier_id,
            ))
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    /// Insert a mock applicant with populated identity fields.
    ///
    /// The parent district is created automatically if it doesn't exist.
    ///
    /// # Arguments
    /// - `applicant_id` - Explicit primary key
    /// - `district_id` - District the applicant is registered in
    /// - `gender` - Reported gender, `None` when undeclared
    /// - `birth_date` - Birth date, `None` when unrecorded
    ///
    /// # Returns
    /// - `Ok(Model)` - The created or existing applicant record
    /// - `Err(TestError::DbErr)` - Database query or insert operation failed
    pub async fn insert_mock_applicant(
        &self,
        applicant_id: i32,
        district_id: i32,
        gender: Option<&str>,
        birth_date: Option<NaiveDate>,
    ) -> Result<entity::applicant::Model, TestError> {
        if let Some(existing_applicant) = entity::prelude::Applicant::find()
            .filter(entity::applicant::Column::Id.eq(applicant_id))
            .one(&self.context.db)
            .await?
        {
            return Ok(existing_applicant);
        }

        self.insert_mock_district(district_id, &format!("D{district_id:02}"))
            .await?;

        Ok(entity::prelude::Applicant::insert(factory::mock_applicant(
            applicant_id,
            district_id,
            gender,
            birth_date,
        ))
        .exec_with_returning(&self.context.db)
        .await?)
    }

    /// Insert a mock applicant with every optional identity field left empty.
    pub async fn insert_incomplete_applicant(
        &self,
        applicant_id: i32,
        district_id: i32,
    ) -> Result<entity::applicant::Model, TestError> {
        if let Some(existing_applicant) = entity::prelude::Applicant::find()
            .filter(entity::applicant::Column::Id.eq(applicant_id))
            .one(&self.context.db)
            .await?
        {
            return Ok(existing_applicant);
        }

        self.insert_mock_district(district_id, &format!("D{district_id:02}"))
            .await?;

        Ok(
            entity::prelude::Applicant::insert(factory::mock_incomplete_applicant(
                applicant_id,
                district_id,
            ))
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    /// Insert a mock claim linking an applicant to a property.
    ///
    /// Parent records are created automatically with factory defaults if they
    /// don't exist. If a claim with the given id already exists, returns the
    /// existing record.
    ///
    /// # Arguments
    /// - `claim_id` - Explicit primary key
    /// - `applicant_id` - Claiming applicant
    /// - `property_id` - Claimed property
    /// - `status` - Claim lifecycle state
    /// - `rank` - Claim rank, `1` for the principal claimant
    /// - `amount` - Monetary amount attached to the claim
    /// - `created_at` - Creation timestamp the quarterly chart buckets on
    ///
    /// # Returns
    /// - `Ok(Model)` - The created or existing claim record
    /// - `Err(TestError::DbErr)` - Database query or insert operation failed
    pub async fn insert_mock_claim(
        &self,
        claim_id: i32,
        applicant_id: i32,
        property_id: i32,
        status: ClaimStatus,
        rank: i32,
        amount: f64,
        created_at: NaiveDateTime,
    ) -> Result<entity::claim::Model, TestError> {
        if let Some(existing_claim) = entity::prelude::Claim::find()
            .filter(entity::claim::Column::Id.eq(claim_id))
            .one(&self.context.db)
            .await?
        {
            return Ok(existing_claim);
        }

        self.insert_mock_applicant(applicant_id, 1, None, None)
            .await?;
        self.insert_mock_property(property_id, 1, None).await?;

        Ok(entity::prelude::Claim::insert(factory::mock_claim(
            claim_id,
            applicant_id,
            property_id,
            status,
            rank,
            amount,
            created_at,
        ))
        .exec_with_returning(&self.context.db)
        .await?)
    }
}
