//! Concurrent loading of the reference lists.

use std::fmt;

use futures::join;
use tracing::{info, warn};

use common::{AppError, AppResult};
use domain::ReferenceLists;

use crate::api::SignupApi;

/// One of the five reference lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Countries,
    Currencies,
    TimeZones,
    Industries,
    Plans,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 5] = [
        ReferenceKind::Countries,
        ReferenceKind::Currencies,
        ReferenceKind::TimeZones,
        ReferenceKind::Industries,
        ReferenceKind::Plans,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Countries => "countries",
            ReferenceKind::Currencies => "currencies",
            ReferenceKind::TimeZones => "time zones",
            ReferenceKind::Industries => "industries",
            ReferenceKind::Plans => "plans",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a form mount: whatever loaded, plus what didn't.
#[derive(Debug, Default)]
pub struct ReferenceLoad {
    pub lists: ReferenceLists,
    pub failures: Vec<(ReferenceKind, AppError)>,
}

impl ReferenceLoad {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, kind: ReferenceKind) -> bool {
        self.failures.iter().any(|(k, _)| *k == kind)
    }
}

fn keep<T>(
    kind: ReferenceKind,
    result: AppResult<Vec<T>>,
    failures: &mut Vec<(ReferenceKind, AppError)>,
) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            warn!("Failed to load {}: {}", kind, e);
            failures.push((kind, e));
            Vec::new()
        }
    }
}

/// Fetch all five lists in parallel.
///
/// A failing list is logged and left empty; it never blocks the others.
pub async fn load_reference_lists(api: &dyn SignupApi) -> ReferenceLoad {
    let (countries, currencies, time_zones, industries, plans) = join!(
        api.countries(),
        api.currencies(),
        api.time_zones(),
        api.industries(),
        api.plans(),
    );

    let mut failures = Vec::new();
    let lists = ReferenceLists {
        countries: keep(ReferenceKind::Countries, countries, &mut failures),
        currencies: keep(ReferenceKind::Currencies, currencies, &mut failures),
        time_zones: keep(ReferenceKind::TimeZones, time_zones, &mut failures),
        industries: keep(ReferenceKind::Industries, industries, &mut failures),
        plans: keep(ReferenceKind::Plans, plans, &mut failures),
    };

    info!(
        countries = lists.countries.len(),
        currencies = lists.currencies.len(),
        time_zones = lists.time_zones.len(),
        industries = lists.industries.len(),
        plans = lists.plans.len(),
        failed = failures.len(),
        "Reference lists loaded"
    );

    ReferenceLoad { lists, failures }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockSignupApi;
    use domain::{Industry, Plan, RefId};

    fn industry(id: i64, name: &str) -> Industry {
        Industry {
            id: RefId::Number(id),
            name_en: name.to_string(),
            name_ar: String::new(),
        }
    }

    #[tokio::test]
    async fn test_plans_failure_leaves_other_lists() {
        let mut api = MockSignupApi::new();
        api.expect_countries().times(1).returning(|| Ok(vec![]));
        api.expect_currencies().times(1).returning(|| Ok(vec![]));
        api.expect_time_zones().times(1).returning(|| Ok(vec![]));
        api.expect_industries()
            .times(1)
            .returning(|| Ok(vec![industry(1, "Retail"), industry(2, "Services")]));
        api.expect_plans()
            .times(1)
            .returning(|| Err(AppError::Transport("connection refused".to_string())));

        let load = load_reference_lists(&api).await;

        assert_eq!(load.lists.industries.len(), 2);
        assert!(load.lists.plans.is_empty());
        assert!(!load.is_complete());
        assert!(load.failed(ReferenceKind::Plans));
        assert!(!load.failed(ReferenceKind::Industries));
    }

    #[tokio::test]
    async fn test_all_lists_loaded() {
        let mut api = MockSignupApi::new();
        api.expect_countries().returning(|| Ok(vec![]));
        api.expect_currencies().returning(|| Ok(vec![]));
        api.expect_time_zones().returning(|| Ok(vec![]));
        api.expect_industries().returning(|| Ok(vec![]));
        api.expect_plans().returning(|| {
            Ok(vec![Plan {
                id: RefId::Number(3),
                plan_name_en: "Basic".to_string(),
                plan_name_ar: String::new(),
                prices: vec![],
            }])
        });

        let load = load_reference_lists(&api).await;
        assert!(load.is_complete());
        assert_eq!(load.lists.plans.len(), 1);
    }
}
