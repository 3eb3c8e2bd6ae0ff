//! Reference lists fetched from the signup API.
//!
//! All entities here are read-only snapshots. Field names follow the wire
//! format of the API; missing or `null` values fall back to defaults. A
//! record without a usable `id` cannot be read and is dropped from its list.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{LANGUAGE_AR, LANGUAGE_EN};

/// Opaque identifier of a reference record.
///
/// The API sends integers or strings. Two ids are equal when their textual
/// forms are equal, so a value typed by the user (`"5"`) matches a numeric
/// id (`5`). The shape received from the API is kept for submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefId {
    Number(i64),
    Text(String),
}

impl RefId {
    /// Interpret user input: integers become numeric ids, anything else text.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(
            trimmed
                .parse::<i64>()
                .map(RefId::Number)
                .unwrap_or_else(|_| RefId::Text(trimmed.to_string())),
        )
    }
}

impl PartialEq for RefId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RefId::Number(a), RefId::Number(b)) => a == b,
            (RefId::Text(a), RefId::Text(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Eq for RefId {}

impl Hash for RefId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl std::fmt::Display for RefId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefId::Number(n) => write!(f, "{}", n),
            RefId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RefId {
    fn from(n: i64) -> Self {
        RefId::Number(n)
    }
}

impl From<&str> for RefId {
    fn from(s: &str) -> Self {
        RefId::Text(s.to_string())
    }
}

/// Interface language, which also picks the localized option labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    /// Language chosen on the form; anything but `ar` displays English.
    pub fn from_code(code: &str) -> Self {
        if code == LANGUAGE_AR {
            Language::Ar
        } else {
            Language::En
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => LANGUAGE_EN,
            Language::Ar => LANGUAGE_AR,
        }
    }

    fn pick<'a>(&self, en: &'a str, ar: &'a str) -> &'a str {
        match self {
            Language::En => en,
            Language::Ar => ar,
        }
    }
}

/// A record that can be offered as a select option.
pub trait OptionLabel {
    fn id(&self) -> &RefId;

    /// Display text in the given language
    fn label(&self, language: Language) -> String;
}

/// Country with its embedded states and currency reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: RefId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_en: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_ar: String,
    /// Currency used in this country
    #[serde(default, rename = "currency")]
    pub currency_id: Option<RefId>,
    #[serde(default, rename = "country_states", deserialize_with = "null_as_default")]
    pub states: Vec<CountryState>,
}

/// State (region) of a country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryState {
    pub id: RefId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_en: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_ar: String,
    #[serde(default, rename = "zip_code", deserialize_with = "lenient_string")]
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub id: RefId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency_name_ar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timezone {
    pub id: RefId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// UTC offset as displayed by the API (e.g. `+03:00`)
    #[serde(default, deserialize_with = "lenient_string")]
    pub offset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Industry {
    pub id: RefId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_en: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_ar: String,
}

/// Subscription plan with its embedded prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: RefId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub plan_name_en: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub plan_name_ar: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prices: Vec<PlanPrice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPrice {
    pub id: RefId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub monthly_price_en: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub monthly_price_ar: Option<String>,
}

impl OptionLabel for Country {
    fn id(&self) -> &RefId {
        &self.id
    }

    fn label(&self, language: Language) -> String {
        language.pick(&self.name_en, &self.name_ar).to_string()
    }
}

impl OptionLabel for CountryState {
    fn id(&self) -> &RefId {
        &self.id
    }

    fn label(&self, language: Language) -> String {
        language.pick(&self.name_en, &self.name_ar).to_string()
    }
}

impl OptionLabel for Currency {
    fn id(&self) -> &RefId {
        &self.id
    }

    fn label(&self, language: Language) -> String {
        language
            .pick(&self.currency_name, &self.currency_name_ar)
            .to_string()
    }
}

impl OptionLabel for Timezone {
    fn id(&self) -> &RefId {
        &self.id
    }

    fn label(&self, _language: Language) -> String {
        match &self.offset {
            Some(offset) => format!("{} ({})", self.name, offset),
            None => self.name.clone(),
        }
    }
}

impl OptionLabel for Industry {
    fn id(&self) -> &RefId {
        &self.id
    }

    fn label(&self, language: Language) -> String {
        language.pick(&self.name_en, &self.name_ar).to_string()
    }
}

impl OptionLabel for Plan {
    fn id(&self) -> &RefId {
        &self.id
    }

    fn label(&self, language: Language) -> String {
        language
            .pick(&self.plan_name_en, &self.plan_name_ar)
            .to_string()
    }
}

impl OptionLabel for PlanPrice {
    fn id(&self) -> &RefId {
        &self.id
    }

    fn label(&self, language: Language) -> String {
        let en = self.monthly_price_en.as_deref().unwrap_or_default();
        let ar = self.monthly_price_ar.as_deref().unwrap_or_default();
        language.pick(en, ar).to_string()
    }
}

/// The five reference lists a registration form draws its options from.
///
/// Fetched once per form mount and never mutated afterwards. A list whose
/// fetch failed stays empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLists {
    pub countries: Vec<Country>,
    pub currencies: Vec<Currency>,
    pub time_zones: Vec<Timezone>,
    pub industries: Vec<Industry>,
    pub plans: Vec<Plan>,
}

impl ReferenceLists {
    pub fn find_country(&self, id: &RefId) -> Option<&Country> {
        find_by_id(&self.countries, id)
    }

    pub fn find_plan(&self, id: &RefId) -> Option<&Plan> {
        find_by_id(&self.plans, id)
    }

    pub fn find_industry(&self, id: &RefId) -> Option<&Industry> {
        find_by_id(&self.industries, id)
    }

    pub fn find_time_zone(&self, id: &RefId) -> Option<&Timezone> {
        find_by_id(&self.time_zones, id)
    }

    pub fn find_currency(&self, id: &RefId) -> Option<&Currency> {
        find_by_id(&self.currencies, id)
    }
}

/// Exact lookup by identifier
pub fn find_by_id<'a, T: OptionLabel>(items: &'a [T], id: &RefId) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

/// `(id, label)` pairs in list order
pub fn labels<T: OptionLabel>(items: &[T], language: Language) -> Vec<(RefId, String)> {
    items
        .iter()
        .map(|item| (item.id().clone(), item.label(language)))
        .collect()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Scalars the API uses interchangeably for display strings
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(s) => s,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}
