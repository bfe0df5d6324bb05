//! Claim-derived state rules.
//!
//! A property or applicant is never stored with a state; it is always
//! derived from the claims attached to it. These rules are shared between
//! the grouped classification queries and their per-row reference scans so
//! both paths cannot drift apart.

/// Market state of a property.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PropertyState {
    /// At least one active claim.
    Available,
    /// Only archived claims remain.
    Acquired,
    /// No claims at all.
    Unlinked,
}

/// Engagement state of an applicant across every property they claimed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ApplicantState {
    Active,
    Acquired,
    Unlinked,
}

pub fn classify_property(active_claims: i64, total_claims: i64) -> PropertyState {
    if active_claims > 0 {
        PropertyState::Available
    } else if total_claims > 0 {
        PropertyState::Acquired
    } else {
        PropertyState::Unlinked
    }
}

pub fn classify_applicant(active_claims: i64, total_claims: i64) -> ApplicantState {
    if active_claims > 0 {
        ApplicantState::Active
    } else if total_claims > 0 {
        ApplicantState::Acquired
    } else {
        ApplicantState::Unlinked
    }
}
