//! Factories producing `ActiveModel` values with default test data.
//!
//! Factories are pure and never touch the database. The insert helpers in
//! [`data`](super::data) and the `TestBuilder` both go through these so tests
//! that only care about one field get stable defaults for everything else.

use chrono::{NaiveDate, NaiveDateTime};
use entity::claim::ClaimStatus;
use sea_orm::ActiveValue;

/// Midnight timestamp for the given calendar day.
pub fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Calendar date helper, used mostly for applicant birth dates.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Fixed timestamp for audit columns the statistics queries never read.
fn audit_timestamp() -> NaiveDateTime {
    midnight(2024, 1, 1)
}

/// Create a mock district with default test values.
///
/// # Arguments
/// - `district_id` - Explicit primary key so fixtures can cross-reference it
/// - `code` - Unique short code for the district
pub fn mock_district(district_id: i32, code: &str) -> entity::district::ActiveModel {
    entity::district::ActiveModel {
        id: ActiveValue::Set(district_id),
        code: ActiveValue::Set(code.to_string()),
        name: ActiveValue::Set(format!("District {code}")),
        created_at: ActiveValue::Set(audit_timestamp()),
    }
}

/// Create a mock dossier with default test values.
///
/// The reference is derived from the id, so explicit ids keep the unique
/// constraint satisfied across fixtures.
///
/// # Arguments
/// - `dossier_id` - Explicit primary key
/// - `district_id` - District the dossier belongs to
/// - `commune` - Commune name used by the geographic aggregations
/// - `opened_at` - Opening timestamp the period filters match on
/// - `closed_at` - Closing timestamp, `None` for dossiers still open
pub fn mock_dossier(
    dossier_id: i32,
    district_id: i32,
    commune: &str,
    opened_at: NaiveDateTime,
    closed_at: Option<NaiveDateTime>,
) -> entity::dossier::ActiveModel {
    entity::dossier::ActiveModel {
        id: ActiveValue::Set(dossier_id),
        district_id: ActiveValue::Set(district_id),
        reference: ActiveValue::Set(format!("DOS-{dossier_id:04}")),
        commune: ActiveValue::Set(commune.to_string()),
        locality: ActiveValue::Set(None),
        opened_at: ActiveValue::Set(opened_at),
        closed_at: ActiveValue::Set(closed_at),
        created_at: ActiveValue::Set(opened_at),
        updated_at: ActiveValue::Set(closed_at.unwrap_or(opened_at)),
    }
}

/// Create a mock property with all descriptive fields populated.
///
/// # Arguments
/// - `property_id` - Explicit primary key
/// - `dossier_id` - Dossier the property belongs to
/// - `area_sqm` - Surface area, `None` to leave the area unrecorded
pub fn mock_property(
    property_id: i32,
    dossier_id: i32,
    area_sqm: Option<f64>,
) -> entity::property::ActiveModel {
    entity::property::ActiveModel {
        id: ActiveValue::Set(property_id),
        dossier_id: ActiveValue::Set(dossier_id),
        nature: ActiveValue::Set(Some("agricole".to_string())),
        vocation: ActiveValue::Set(Some("habitation".to_string())),
        reference: ActiveValue::Set(Some(format!("TF-{property_id:05}"))),
        area_sqm: ActiveValue::Set(area_sqm),
        created_at: ActiveValue::Set(audit_timestamp()),
        updated_at: ActiveValue::Set(audit_timestamp()),
    }
}

/// Create a mock property with every optional descriptive field left empty.
pub fn mock_incomplete_property(
    property_id: i32,
    dossier_id: i32,
) -> entity::property::ActiveModel {
    entity::property::ActiveModel {
        id: ActiveValue::Set(property_id),
        dossier_id: ActiveValue::Set(dossier_id),
        nature: ActiveValue::Set(None),
        vocation: ActiveValue::Set(None),
        reference: ActiveValue::Set(None),
        area_sqm: ActiveValue::Set(None),
        created_at: ActiveValue::Set(audit_timestamp()),
        updated_at: ActiveValue::Set(audit_timestamp()),
    }
}

/// Create a mock applicant with identity fields populated.
///
/// # Arguments
/// - `applicant_id` - Explicit primary key
/// - `district_id` - District the applicant is registered in
/// - `gender` - Reported gender, `None` when undeclared
/// - `birth_date` - Birth date, `None` when unrecorded
pub fn mock_applicant(
    applicant_id: i32,
    district_id: i32,
    gender: Option<&str>,
    birth_date: Option<NaiveDate>,
) -> entity::applicant::ActiveModel {
    entity::applicant::ActiveModel {
        id: ActiveValue::Set(applicant_id),
        district_id: ActiveValue::Set(district_id),
        first_name: ActiveValue::Set(Some("Awa".to_string())),
        last_name: ActiveValue::Set(format!("Applicant {applicant_id}")),
        gender: ActiveValue::Set(gender.map(str::to_string)),
        birth_date: ActiveValue::Set(birth_date),
        national_id: ActiveValue::Set(Some(format!("ID-{applicant_id:06}"))),
        created_at: ActiveValue::Set(audit_timestamp()),
        updated_at: ActiveValue::Set(audit_timestamp()),
    }
}

/// Create a mock applicant with every optional identity field left empty.
pub fn mock_incomplete_applicant(
    applicant_id: i32,
    district_id: i32,
) -> entity::applicant::ActiveModel {
    entity::applicant::ActiveModel {
        id: ActiveValue::Set(applicant_id),
        district_id: ActiveValue::Set(district_id),
        first_name: ActiveValue::Set(None),
        last_name: ActiveValue::Set(format!("Applicant {applicant_id}")),
        gender: ActiveValue::Set(None),
        birth_date: ActiveValue::Set(None),
        national_id: ActiveValue::Set(None),
        created_at: ActiveValue::Set(audit_timestamp()),
        updated_at: ActiveValue::Set(audit_timestamp()),
    }
}

/// Create a mock claim linking an applicant to a property.
///
/// Unlike the other audit columns, claim `created_at` is read by the
/// quarterly amount chart, so it is an explicit argument here.
///
/// # Arguments
/// - `claim_id` - Explicit primary key
/// - `applicant_id` - Claiming applicant
/// - `property_id` - Claimed property
/// - `status` - Claim lifecycle state
/// - `rank` - Claim rank, `1` for the principal claimant
/// - `amount` - Monetary amount attached to the claim
/// - `created_at` - Creation timestamp the quarterly chart buckets on
pub fn mock_claim(
    claim_id: i32,
    applicant_id: i32,
    property_id: i32,
    status: ClaimStatus,
    rank: i32,
    amount: f64,
    created_at: NaiveDateTime,
) -> entity::claim::ActiveModel {
    entity::claim::ActiveModel {
        id: ActiveValue::Set(claim_id),
        applicant_id: ActiveValue::Set(applicant_id),
        property_id: ActiveValue::Set(property_id),
        status: ActiveValue::Set(status),
        rank: ActiveValue::Set(rank),
        amount: ActiveValue::Set(amount),
        created_at: ActiveValue::Set(created_at),
        updated_at: ActiveValue::Set(created_at),
    }
}
