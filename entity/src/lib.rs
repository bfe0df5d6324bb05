pub mod prelude;

pub mod applicant;
pub mod claim;
pub mod district;
pub mod dossier;
pub mod property;
