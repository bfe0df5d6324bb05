pub use super::applicant::Entity as Applicant;
pub use super::claim::Entity as Claim;
pub use super::district::Entity as District;
pub use super::dossier::Entity as Dossier;
pub use super::property::Entity as Property;
