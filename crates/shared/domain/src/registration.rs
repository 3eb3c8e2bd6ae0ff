//! Registration form record.

use serde::Serialize;
use validator::Validate;

use crate::constants::MSG_REQUIRED;
use crate::error::{DomainError, DomainResult};
use crate::field::{Field, FieldKind};
use crate::reference::{Language, RefId};
use crate::validation::{self, FieldErrors};

/// The organization signup form. Serializes to the `/auth/register` payload.
///
/// `currency_id` and `postal_code` are derived from the country and state
/// selections; they have no setter and are written only by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct RegistrationForm {
    #[validate(required(message = "This field is required"))]
    pub industry_id: Option<RefId>,
    #[validate(custom(function = "validation::language"))]
    pub language: String,
    #[validate(custom(function = "validation::required_text"))]
    pub organization_name_en: String,
    #[validate(custom(function = "validation::required_text"))]
    pub organization_name_ar: String,
    #[validate(custom(function = "validation::email"))]
    pub email: String,
    #[validate(custom(function = "validation::password"))]
    pub password: String,
    #[validate(required(message = "This field is required"))]
    pub country_id: Option<RefId>,
    #[validate(required(message = "This field is required"))]
    pub country_state_id: Option<RefId>,
    #[validate(required(message = "This field is required"))]
    pub(crate) currency_id: Option<RefId>,
    #[validate(required(message = "This field is required"))]
    pub time_zone_id: Option<RefId>,
    pub registered_for_vat: bool,
    pub tax_registration_number_label: String,
    pub tax_registration_number: String,
    pub vat_registered_on: String,
    #[validate(required(message = "This field is required"))]
    pub plan_id: Option<RefId>,
    #[validate(required(message = "This field is required"))]
    pub plan_price_id: Option<RefId>,
    #[validate(custom(function = "validation::plan_type"))]
    pub plan_type: String,
    pub street1: String,
    pub street2: String,
    pub city: String,
    pub(crate) postal_code: String,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currency implied by the selected country
    pub fn currency_id(&self) -> Option<&RefId> {
        self.currency_id.as_ref()
    }

    /// Postal code implied by the selected state (empty when unset)
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    /// Language picked for option labels
    pub fn display_language(&self) -> Language {
        Language::from_code(self.language.trim())
    }

    /// Write a user-entered value. Select fields take an identifier, the
    /// VAT switch takes `true`/`false`, derived fields are rejected.
    pub fn set(&mut self, field: Field, value: &str) -> DomainResult<()> {
        match field.kind() {
            FieldKind::Derived => return Err(DomainError::ReadOnlyField(field)),
            FieldKind::Flag => {
                self.registered_for_vat = parse_flag(value)
                    .ok_or_else(|| DomainError::invalid_value(field, "expected true or false"))?;
                return Ok(());
            }
            FieldKind::Select => {
                *self.selection_mut(field) = RefId::parse(value);
                return Ok(());
            }
            FieldKind::Text => {}
        }

        let slot = match field {
            Field::Language => &mut self.language,
            Field::OrganizationNameEn => &mut self.organization_name_en,
            Field::OrganizationNameAr => &mut self.organization_name_ar,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::TaxRegistrationNumberLabel => &mut self.tax_registration_number_label,
            Field::TaxRegistrationNumber => &mut self.tax_registration_number,
            Field::VatRegisteredOn => &mut self.vat_registered_on,
            Field::PlanType => &mut self.plan_type,
            Field::Street1 => &mut self.street1,
            Field::Street2 => &mut self.street2,
            Field::City => &mut self.city,
            _ => return Err(DomainError::invalid_value(field, "not a text field")),
        };
        // The address is stored as it is validated and submitted
        *slot = if field == Field::Email {
            value.trim().to_string()
        } else {
            value.to_string()
        };
        Ok(())
    }

    /// Current value rendered as text (empty when unset)
    pub fn value(&self, field: Field) -> String {
        match field.kind() {
            FieldKind::Select => self
                .selection(field)
                .map(ToString::to_string)
                .unwrap_or_default(),
            FieldKind::Flag => self.registered_for_vat.to_string(),
            FieldKind::Derived if field == Field::CurrencyId => self
                .currency_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            FieldKind::Derived => self.postal_code.clone(),
            FieldKind::Text => self.text(field).to_string(),
        }
    }

    pub fn selection(&self, field: Field) -> Option<&RefId> {
        match field {
            Field::IndustryId => self.industry_id.as_ref(),
            Field::CountryId => self.country_id.as_ref(),
            Field::CountryStateId => self.country_state_id.as_ref(),
            Field::TimeZoneId => self.time_zone_id.as_ref(),
            Field::PlanId => self.plan_id.as_ref(),
            Field::PlanPriceId => self.plan_price_id.as_ref(),
            Field::CurrencyId => self.currency_id.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn selection_mut(&mut self, field: Field) -> &mut Option<RefId> {
        match field {
            Field::IndustryId => &mut self.industry_id,
            Field::CountryId => &mut self.country_id,
            Field::CountryStateId => &mut self.country_state_id,
            Field::TimeZoneId => &mut self.time_zone_id,
            Field::PlanId => &mut self.plan_id,
            Field::PlanPriceId => &mut self.plan_price_id,
            _ => &mut self.currency_id,
        }
    }

    fn text(&self, field: Field) -> &str {
        match field {
            Field::Language => &self.language,
            Field::OrganizationNameEn => &self.organization_name_en,
            Field::OrganizationNameAr => &self.organization_name_ar,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::TaxRegistrationNumberLabel => &self.tax_registration_number_label,
            Field::TaxRegistrationNumber => &self.tax_registration_number,
            Field::VatRegisteredOn => &self.vat_registered_on,
            Field::PlanType => &self.plan_type,
            Field::Street1 => &self.street1,
            Field::Street2 => &self.street2,
            Field::City => &self.city,
            _ => "",
        }
    }

    /// Whether the VAT sub-fields are shown and required
    pub fn vat_required(&self) -> bool {
        self.registered_for_vat
    }

    /// Run every rule against the form.
    ///
    /// VAT sub-fields are checked only while the VAT switch is on; their
    /// text is kept either way.
    pub fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        if self.vat_required() {
            for (field, value) in [
                (Field::TaxRegistrationNumberLabel, &self.tax_registration_number_label),
                (Field::TaxRegistrationNumber, &self.tax_registration_number),
            ] {
                if value.trim().is_empty() {
                    errors.add(field, MSG_REQUIRED);
                }
            }
            if let Err(e) = validation::iso_date(&self.vat_registered_on) {
                let message = e.message.map(|m| m.to_string()).unwrap_or_default();
                errors.add(Field::VatRegisteredOn, message);
            }
        }

        errors.into_result()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
