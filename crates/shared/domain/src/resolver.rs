//! Dependent-field resolver.
//!
//! A pure function from (form selections, reference lists) to (derived
//! values, option sets, field errors). It is re-run after every change so
//! the cascade country → state → currency/postal code and plan → price is
//! never maintained by hand.
//!
//! Rules, in priority order:
//! 1. No country: no state options, no currency, no postal code.
//! 2. A country id missing from the list counts as no country.
//! 3. Currency follows the matched country.
//! 4. Postal code follows the selected state when it belongs to the
//!    country; otherwise the state selection is dropped.
//! 5. Price options follow the matched plan; an unknown plan yields none.
//!
//! Stale selections are cleared silently and never reported as errors.

use crate::field::Field;
use crate::reference::{find_by_id, CountryState, OptionLabel, PlanPrice, RefId, ReferenceLists};
use crate::registration::RegistrationForm;
use crate::validation::FieldErrors;

/// Values computed from other selections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedFields {
    pub currency_id: Option<RefId>,
    /// Empty when no state is selected or the state has no postal code
    pub postal_code: String,
}

/// Option sets of the dependent selects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSets {
    pub states: Vec<CountryState>,
    pub prices: Vec<PlanPrice>,
}

/// Selections after stale ids were dropped. Surviving ids take the shape
/// the API sent them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selections {
    pub industry_id: Option<RefId>,
    pub country_id: Option<RefId>,
    pub country_state_id: Option<RefId>,
    pub time_zone_id: Option<RefId>,
    pub plan_id: Option<RefId>,
    pub plan_price_id: Option<RefId>,
}

/// Outcome of one resolver pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub derived: DerivedFields,
    pub options: OptionSets,
    pub selections: Selections,
    /// Fields whose stale selection was dropped by this pass
    pub cleared: Vec<Field>,
    /// Every validation error of the resolved form
    pub field_errors: FieldErrors,
}

impl Resolution {
    /// Write the canonical selections and derived values onto a form.
    pub fn apply(&self, form: &mut RegistrationForm) {
        let selections = self.selections.clone();
        form.industry_id = selections.industry_id;
        form.country_id = selections.country_id;
        form.country_state_id = selections.country_state_id;
        form.time_zone_id = selections.time_zone_id;
        form.plan_id = selections.plan_id;
        form.plan_price_id = selections.plan_price_id;
        form.currency_id = self.derived.currency_id.clone();
        form.postal_code = self.derived.postal_code.clone();
    }
}

/// Keep a selection only if it names an item of the list.
fn canonical<T: OptionLabel>(
    items: &[T],
    selected: Option<&RefId>,
    field: Field,
    cleared: &mut Vec<Field>,
) -> Option<RefId> {
    let id = selected?;
    match find_by_id(items, id) {
        Some(item) => Some(item.id().clone()),
        None => {
            cleared.push(field);
            None
        }
    }
}

/// Resolve the dependent fields of `form` against `lists`.
pub fn resolve(form: &RegistrationForm, lists: &ReferenceLists) -> Resolution {
    let mut cleared = Vec::new();
    let mut selections = Selections::default();
    let mut derived = DerivedFields::default();
    let mut options = OptionSets::default();

    // Country → states, currency
    selections.country_id = canonical(
        &lists.countries,
        form.country_id.as_ref(),
        Field::CountryId,
        &mut cleared,
    );
    let country = selections
        .country_id
        .as_ref()
        .and_then(|id| lists.find_country(id));
    if let Some(country) = country {
        options.states = country.states.clone();
        derived.currency_id = country.currency_id.clone();
    }

    // State → postal code
    selections.country_state_id = canonical(
        &options.states,
        form.country_state_id.as_ref(),
        Field::CountryStateId,
        &mut cleared,
    );
    if let Some(state) = selections
        .country_state_id
        .as_ref()
        .and_then(|id| find_by_id(&options.states, id))
    {
        derived.postal_code = state.postal_code.clone().unwrap_or_default();
    }

    // Plan → prices
    selections.plan_id = canonical(
        &lists.plans,
        form.plan_id.as_ref(),
        Field::PlanId,
        &mut cleared,
    );
    if let Some(plan) = selections.plan_id.as_ref().and_then(|id| lists.find_plan(id)) {
        options.prices = plan.prices.clone();
    }
    selections.plan_price_id = canonical(
        &options.prices,
        form.plan_price_id.as_ref(),
        Field::PlanPriceId,
        &mut cleared,
    );

    // Independent selects
    selections.industry_id = canonical(
        &lists.industries,
        form.industry_id.as_ref(),
        Field::IndustryId,
        &mut cleared,
    );
    selections.time_zone_id = canonical(
        &lists.time_zones,
        form.time_zone_id.as_ref(),
        Field::TimeZoneId,
        &mut cleared,
    );

    let mut resolution = Resolution {
        derived,
        options,
        selections,
        cleared,
        field_errors: FieldErrors::new(),
    };

    let mut resolved = form.clone();
    resolution.apply(&mut resolved);
    resolution.field_errors = resolved.check().err().unwrap_or_default();
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{Country, Industry, Plan, Timezone};

    fn state(id: i64, zip: Option<&str>) -> CountryState {
        CountryState {
            id: RefId::Number(id),
            name_en: format!("State {}", id),
            name_ar: format!("ولاية {}", id),
            postal_code: zip.map(str::to_string),
        }
    }

    fn price(id: i64) -> PlanPrice {
        PlanPrice {
            id: RefId::Number(id),
            monthly_price_en: Some(format!("{} SAR", id)),
            monthly_price_ar: Some(format!("{} ريال", id)),
        }
    }

    fn lists() -> ReferenceLists {
        ReferenceLists {
            countries: vec![
                Country {
                    id: RefId::Number(1),
                    name_en: "Saudi Arabia".to_string(),
                    name_ar: "السعودية".to_string(),
                    currency_id: Some(RefId::Number(100)),
                    states: vec![state(10, Some("11564")), state(11, None), state(12, Some("31952"))],
                },
                Country {
                    id: RefId::Number(2),
                    name_en: "Egypt".to_string(),
                    name_ar: "مصر".to_string(),
                    currency_id: Some(RefId::Number(200)),
                    states: vec![state(20, Some("11511"))],
                },
            ],
            currencies: Vec::new(),
            time_zones: vec![Timezone {
                id: RefId::Number(4),
                name: "Asia/Riyadh".to_string(),
                offset: Some("+03:00".to_string()),
            }],
            industries: vec![Industry {
                id: RefId::Number(7),
                name_en: "Retail".to_string(),
                name_ar: "التجزئة".to_string(),
            }],
            plans: vec![Plan {
                id: RefId::Number(5),
                plan_name_en: "Growth".to_string(),
                plan_name_ar: "النمو".to_string(),
                prices: vec![price(50), price(51)],
            }],
        }
    }

    fn select(form: &mut RegistrationForm, field: Field, value: &str) {
        form.set(field, value).unwrap();
        resolve(form, &lists()).apply(form);
    }

    #[test]
    fn test_no_country_means_no_dependents() {
        let resolution = resolve(&RegistrationForm::new(), &lists());
        assert!(resolution.options.states.is_empty());
        assert!(resolution.options.prices.is_empty());
        assert_eq!(resolution.derived, DerivedFields::default());
        assert!(resolution.cleared.is_empty());
    }

    #[test]
    fn test_country_yields_its_states_in_order() {
        let lists = lists();
        for country in &lists.countries {
            let mut form = RegistrationForm::new();
            form.set(Field::CountryId, &country.id.to_string()).unwrap();
            let resolution = resolve(&form, &lists);
            assert_eq!(resolution.options.states, country.states);
            assert_eq!(resolution.derived.currency_id, country.currency_id);
        }
    }

    #[test]
    fn test_state_sets_postal_code() {
        let mut form = RegistrationForm::new();
        select(&mut form, Field::CountryId, "1");
        select(&mut form, Field::CountryStateId, "10");
        assert_eq!(form.postal_code(), "11564");

        select(&mut form, Field::CountryStateId, "11");
        assert_eq!(form.postal_code(), "");
    }

    #[test]
    fn test_country_change_clears_foreign_state() {
        let mut form = RegistrationForm::new();
        select(&mut form, Field::CountryId, "1");
        select(&mut form, Field::CountryStateId, "12");
        assert_eq!(form.currency_id(), Some(&RefId::Number(100)));

        form.set(Field::CountryId, "2").unwrap();
        let resolution = resolve(&form, &lists());
        assert_eq!(resolution.cleared, vec![Field::CountryStateId]);
        resolution.apply(&mut form);

        assert_eq!(form.country_state_id, None);
        assert_eq!(form.postal_code(), "");
        assert_eq!(form.currency_id(), Some(&RefId::Number(200)));
    }

    #[test]
    fn test_unknown_country_is_treated_as_unset() {
        let mut form = RegistrationForm::new();
        select(&mut form, Field::CountryId, "1");
        select(&mut form, Field::CountryStateId, "10");

        form.set(Field::CountryId, "999").unwrap();
        let resolution = resolve(&form, &lists());
        assert_eq!(
            resolution.cleared,
            vec![Field::CountryId, Field::CountryStateId]
        );
        resolution.apply(&mut form);

        assert_eq!(form.country_id, None);
        assert_eq!(form.currency_id(), None);
        assert_eq!(form.postal_code(), "");
    }

    #[test]
    fn test_stale_selection_is_not_an_error() {
        let mut form = RegistrationForm::new();
        form.set(Field::IndustryId, "999").unwrap();
        let resolution = resolve(&form, &lists());

        assert_eq!(resolution.cleared, vec![Field::IndustryId]);
        // Only the ordinary required message, nothing about staleness
        assert_eq!(
            resolution.field_errors.get(Field::IndustryId),
            Some(crate::constants::MSG_REQUIRED)
        );
    }

    #[test]
    fn test_plan_yields_prices_and_drops_foreign_price() {
        let mut form = RegistrationForm::new();
        select(&mut form, Field::PlanId, "5");
        select(&mut form, Field::PlanPriceId, "51");
        assert_eq!(form.plan_price_id, Some(RefId::Number(51)));

        form.set(Field::PlanId, "").unwrap();
        let resolution = resolve(&form, &lists());
        assert!(resolution.options.prices.is_empty());
        assert_eq!(resolution.cleared, vec![Field::PlanPriceId]);
    }

    #[test]
    fn test_unknown_plan_yields_no_prices() {
        let mut form = RegistrationForm::new();
        form.set(Field::PlanId, "6").unwrap();
        let resolution = resolve(&form, &lists());
        assert!(resolution.options.prices.is_empty());
        assert_eq!(resolution.selections.plan_id, None);
    }

    #[test]
    fn test_text_id_is_canonicalized_to_api_shape() {
        let mut form = RegistrationForm::new();
        form.country_id = Some(RefId::Text("1".to_string()));
        let resolution = resolve(&form, &lists());
        assert!(matches!(
            resolution.selections.country_id,
            Some(RefId::Number(1))
        ));
    }

    #[test]
    fn test_vat_toggle_keeps_text() {
        let mut form = RegistrationForm::new();
        select(&mut form, Field::RegisteredForVat, "true");
        select(&mut form, Field::TaxRegistrationNumber, "300012345600003");
        select(&mut form, Field::RegisteredForVat, "false");
        assert!(!resolve(&form, &lists())
            .field_errors
            .contains(Field::TaxRegistrationNumberLabel));

        select(&mut form, Field::RegisteredForVat, "true");
        assert_eq!(form.tax_registration_number, "300012345600003");
        assert!(resolve(&form, &lists())
            .field_errors
            .contains(Field::TaxRegistrationNumberLabel));
    }
}
