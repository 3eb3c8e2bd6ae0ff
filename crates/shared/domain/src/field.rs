//! Registration form field names.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A field of the registration form. The string form is the wire name used
/// in the submission payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    IndustryId,
    Language,
    OrganizationNameEn,
    OrganizationNameAr,
    Email,
    Password,
    CountryId,
    CountryStateId,
    CurrencyId,
    TimeZoneId,
    RegisteredForVat,
    TaxRegistrationNumberLabel,
    TaxRegistrationNumber,
    VatRegisteredOn,
    PlanId,
    PlanPriceId,
    PlanType,
    Street1,
    Street2,
    City,
    PostalCode,
}

/// What kind of input a field takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text typed by the user
    Text,
    /// Identifier picked from a reference list
    Select,
    /// Boolean switch
    Flag,
    /// Computed from another field, never edited
    Derived,
}

impl Field {
    /// Every field in form order. Governing fields come before the fields
    /// that depend on them.
    pub const ALL: [Field; 21] = [
        Field::IndustryId,
        Field::Language,
        Field::OrganizationNameEn,
        Field::OrganizationNameAr,
        Field::Email,
        Field::Password,
        Field::CountryId,
        Field::CountryStateId,
        Field::CurrencyId,
        Field::TimeZoneId,
        Field::RegisteredForVat,
        Field::TaxRegistrationNumberLabel,
        Field::TaxRegistrationNumber,
        Field::VatRegisteredOn,
        Field::PlanId,
        Field::PlanPriceId,
        Field::PlanType,
        Field::Street1,
        Field::Street2,
        Field::City,
        Field::PostalCode,
    ];

    /// Fields shown only while the VAT switch is on
    pub const VAT: [Field; 3] = [
        Field::TaxRegistrationNumberLabel,
        Field::TaxRegistrationNumber,
        Field::VatRegisteredOn,
    ];

    /// Optional address fields behind the "Add Address Fields" toggle
    pub const ADDRESS: [Field; 3] = [Field::Street1, Field::Street2, Field::City];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::IndustryId => "industry_id",
            Field::Language => "language",
            Field::OrganizationNameEn => "organization_name_en",
            Field::OrganizationNameAr => "organization_name_ar",
            Field::Email => "email",
            Field::Password => "password",
            Field::CountryId => "country_id",
            Field::CountryStateId => "country_state_id",
            Field::CurrencyId => "currency_id",
            Field::TimeZoneId => "time_zone_id",
            Field::RegisteredForVat => "registered_for_vat",
            Field::TaxRegistrationNumberLabel => "tax_registration_number_label",
            Field::TaxRegistrationNumber => "tax_registration_number",
            Field::VatRegisteredOn => "vat_registered_on",
            Field::PlanId => "plan_id",
            Field::PlanPriceId => "plan_price_id",
            Field::PlanType => "plan_type",
            Field::Street1 => "street1",
            Field::Street2 => "street2",
            Field::City => "city",
            Field::PostalCode => "postal_code",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Field::IndustryId => "Industry",
            Field::Language => "Language",
            Field::OrganizationNameEn => "Organization name (English)",
            Field::OrganizationNameAr => "Organization name (Arabic)",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::CountryId => "Country",
            Field::CountryStateId => "State",
            Field::CurrencyId => "Currency",
            Field::TimeZoneId => "Timezone",
            Field::RegisteredForVat => "Registered for VAT",
            Field::TaxRegistrationNumberLabel => "Tax Registration Number Label",
            Field::TaxRegistrationNumber => "Tax Registration Number",
            Field::VatRegisteredOn => "VAT Registered On",
            Field::PlanId => "Plan",
            Field::PlanPriceId => "Plan Price",
            Field::PlanType => "Plan Type",
            Field::Street1 => "Street 1",
            Field::Street2 => "Street 2",
            Field::City => "City",
            Field::PostalCode => "Postal Code",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::IndustryId
            | Field::CountryId
            | Field::CountryStateId
            | Field::TimeZoneId
            | Field::PlanId
            | Field::PlanPriceId => FieldKind::Select,
            Field::CurrencyId | Field::PostalCode => FieldKind::Derived,
            Field::RegisteredForVat => FieldKind::Flag,
            _ => FieldKind::Text,
        }
    }

    pub fn is_derived(&self) -> bool {
        self.kind() == FieldKind::Derived
    }

    pub fn is_vat(&self) -> bool {
        Self::VAT.contains(self)
    }

    pub fn is_address(&self) -> bool {
        Self::ADDRESS.contains(self)
    }
}

impl FromStr for Field {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| DomainError::UnknownField(s.to_string()))
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
