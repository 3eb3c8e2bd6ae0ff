//! Domain layer - Signup entities, rules and the dependent-field resolver.
//!
//! This crate contains pure domain logic with no I/O. Reference entities
//! mirror the wire format of the signup API.

pub mod constants;
pub mod error;
pub mod field;
pub mod login;
pub mod reference;
pub mod registration;
pub mod resolver;
pub mod validation;
pub mod verification;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use field::{Field, FieldKind};
pub use login::LoginRequest;
pub use reference::{
    Country, CountryState, Currency, Industry, Language, OptionLabel, Plan, PlanPrice, RefId,
    ReferenceLists, Timezone,
};
pub use registration::RegistrationForm;
pub use resolver::{resolve, DerivedFields, OptionSets, Resolution, Selections};
pub use validation::FieldErrors;
pub use verification::{EmailVerification, VerificationState};
