//! Organization registration session.
//!
//! Holds the form, the reference lists fetched on mount and the last
//! resolution. Every write re-runs the resolver before returning, so the
//! derived fields and option sets are always consistent with the
//! selections.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use common::{AppError, AppResult};
use domain::reference::labels;
use domain::{resolve, Field, FieldErrors, RefId, ReferenceLists, RegistrationForm, Resolution};
use signup_client::{load_reference_lists, ReferenceKind, SignupApi};

use crate::feedback::Feedback;

pub const REGISTER_SUCCESS_TITLE: &str = "Success!";
pub const REGISTER_SUCCESS_MESSAGE: &str = "Registration successful!";
pub const REGISTER_ERROR_TITLE: &str = "Error!";
pub const REGISTER_FAILURE_MESSAGE: &str = "Registration failed. Please try again.";

pub struct RegistrationSession {
    api: Arc<dyn SignupApi>,
    lists: ReferenceLists,
    load_failures: Vec<ReferenceKind>,
    form: RegistrationForm,
    resolution: Resolution,
    touched: BTreeSet<Field>,
    show_address_fields: bool,
    feedback: Option<Feedback>,
}

impl RegistrationSession {
    /// Fetch the reference lists concurrently and start an empty form.
    ///
    /// A list that fails to load stays empty; the session is usable anyway.
    pub async fn mount(api: Arc<dyn SignupApi>) -> Self {
        let load = load_reference_lists(api.as_ref()).await;
        let failures = load.failures.iter().map(|(kind, _)| *kind).collect();
        let mut session = Self::with_lists(api, load.lists);
        session.load_failures = failures;
        session
    }

    /// Start a session over lists that are already loaded.
    pub fn with_lists(api: Arc<dyn SignupApi>, lists: ReferenceLists) -> Self {
        let mut session = Self {
            api,
            lists,
            load_failures: Vec::new(),
            form: RegistrationForm::new(),
            resolution: Resolution::default(),
            touched: BTreeSet::new(),
            show_address_fields: false,
            feedback: None,
        };
        session.refresh();
        session
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn lists(&self) -> &ReferenceLists {
        &self.lists
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Reference lists that could not be fetched on mount
    pub fn load_failures(&self) -> &[ReferenceKind] {
        &self.load_failures
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn show_address_fields(&self) -> bool {
        self.show_address_fields
    }

    fn refresh(&mut self) {
        let resolution = resolve(&self.form, &self.lists);
        if !resolution.cleared.is_empty() {
            debug!(cleared = ?resolution.cleared, "Stale selections cleared");
        }
        resolution.apply(&mut self.form);
        self.resolution = resolution;
    }

    /// Write a user value and re-derive the dependent fields.
    pub fn set_field(&mut self, field: Field, value: &str) -> AppResult<()> {
        self.form.set(field, value)?;
        self.refresh();
        Ok(())
    }

    /// Mark a field as visited so its error becomes visible.
    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Flip the VAT switch. The VAT sub-fields keep their text either way.
    pub fn set_registered_for_vat(&mut self, registered: bool) {
        self.form.registered_for_vat = registered;
        self.refresh();
    }

    /// Show or hide the optional address fields; values are retained.
    pub fn toggle_address_fields(&mut self) -> bool {
        self.show_address_fields = !self.show_address_fields;
        self.show_address_fields
    }

    /// Fields currently rendered, in form order.
    pub fn visible_fields(&self) -> Vec<Field> {
        Field::ALL
            .iter()
            .copied()
            .filter(|field| !field.is_vat() || self.form.vat_required())
            .filter(|field| !field.is_address() || self.show_address_fields)
            .collect()
    }

    /// Options of a select field, labelled in the form's language.
    pub fn option_labels(&self, field: Field) -> Vec<(RefId, String)> {
        let language = self.form.display_language();
        match field {
            Field::IndustryId => labels(&self.lists.industries, language),
            Field::CountryId => labels(&self.lists.countries, language),
            Field::CountryStateId => labels(&self.resolution.options.states, language),
            Field::CurrencyId => labels(&self.lists.currencies, language),
            Field::TimeZoneId => labels(&self.lists.time_zones, language),
            Field::PlanId => labels(&self.lists.plans, language),
            Field::PlanPriceId => labels(&self.resolution.options.prices, language),
            _ => Vec::new(),
        }
    }

    /// Errors of touched fields only
    pub fn visible_errors(&self) -> FieldErrors {
        let mut errors = self.resolution.field_errors.clone();
        errors.retain(|field| self.touched.contains(&field));
        errors
    }

    /// Mark every field touched, validate, then post the payload.
    ///
    /// Field errors block the call and come back as `AppError::Validation`.
    /// Once posted, both outcomes are reported as feedback.
    pub async fn submit(&mut self) -> AppResult<Feedback> {
        self.touched.extend(Field::ALL);
        self.refresh();

        if let Err(errors) = self.form.check() {
            debug!(errors = errors.len(), "Registration blocked by field errors");
            return Err(AppError::Validation(errors));
        }

        let feedback = match self.api.register(&self.form).await {
            Ok(reply) => {
                info!("Registration accepted for {}", self.form.email);
                Feedback::success(
                    REGISTER_SUCCESS_TITLE,
                    reply
                        .message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| REGISTER_SUCCESS_MESSAGE.to_string()),
                )
            }
            Err(e) => {
                warn!(code = e.code(), "Registration failed: {}", e);
                Feedback::error(REGISTER_ERROR_TITLE, e.user_message_or(REGISTER_FAILURE_MESSAGE))
            }
        };

        self.feedback = Some(feedback.clone());
        Ok(feedback)
    }
}
