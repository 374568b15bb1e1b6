//! Wire models for the two vacancy providers.
//!
//! Response shapes differ (HeadHunter nests an optional `salary` block,
//! SuperJob inlines flat payment fields), so each provider gets its own
//! serde types here and the rest of the system works through
//! [`VacancyPage`](crate::traits::VacancyPage).

use serde::Deserialize;

use crate::salary;
use crate::traits::VacancyPage;

/// Currency code HeadHunter uses for rubles.
pub const HH_CURRENCY_RUB: &str = "RUR";

/// Currency code SuperJob uses for rubles.
pub const SJ_CURRENCY_RUB: &str = "rub";

/// One page of HeadHunter search results.
#[derive(Debug, Clone, Deserialize)]
pub struct HhPage {
    pub found: u64,
    #[serde(default)]
    pub items: Vec<HhVacancy>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhVacancy {
    pub salary: Option<HhSalary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HhSalary {
    pub from: Option<f64>,
    pub to: Option<f64>,
    pub currency: Option<String>,
}

impl HhVacancy {
    /// Ruble estimate for this listing, `None` for unpriced listings and
    /// other currencies.
    fn rub_estimate(&self) -> Option<f64> {
        let salary = self.salary.as_ref()?;
        if salary.currency.as_deref() != Some(HH_CURRENCY_RUB) {
            return None;
        }
        salary::estimate(salary.from, salary.to)
    }
}

impl VacancyPage for HhPage {
    fn found(&self) -> u64 {
        self.found
    }

    fn estimates(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.items.iter().map(HhVacancy::rub_estimate)
    }
}

/// One page of SuperJob search results.
#[derive(Debug, Clone, Deserialize)]
pub struct SjPage {
    pub total: u64,
    #[serde(default)]
    pub objects: Vec<SjVacancy>,
}

/// SuperJob reports unset payment bounds as `0`, `null`, or a missing
/// key; the optional types and the shared estimation rule treat all
/// three as absent.
#[derive(Debug, Clone, Deserialize)]
pub struct SjVacancy {
    #[serde(default)]
    pub payment_from: Option<f64>,
    #[serde(default)]
    pub payment_to: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl SjVacancy {
    fn rub_estimate(&self) -> Option<f64> {
        if self.currency.as_deref() != Some(SJ_CURRENCY_RUB) {
            return None;
        }
        salary::estimate(self.payment_from, self.payment_to)
    }
}

impl VacancyPage for SjPage {
    fn found(&self) -> u64 {
        self.total
    }

    fn estimates(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.objects.iter().map(SjVacancy::rub_estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hh_page_shape() {
        let raw = r#"{
            "found": 2156,
            "pages": 22,
            "page": 0,
            "per_page": 100,
            "items": [
                {"id": "1", "name": "Rust developer", "salary": null},
                {"id": "2", "salary": {"from": 200000, "to": null, "currency": "RUR", "gross": false}},
                {"id": "3", "salary": {"from": 3000, "to": 5000, "currency": "USD", "gross": true}},
                {"id": "4", "salary": {"from": 100000, "to": 140000, "currency": "RUR", "gross": false}}
            ]
        }"#;

        let page: HhPage = serde_json::from_str(raw).unwrap();
        assert_eq!(page.found(), 2156);

        let estimates: Vec<_> = page.estimates().collect();
        assert_eq!(
            estimates,
            vec![None, Some(200_000.0 * 1.2), None, Some(120_000.0)]
        );
    }

    #[test]
    fn test_hh_page_without_items() {
        let page: HhPage = serde_json::from_str(r#"{"found": 0}"#).unwrap();
        assert_eq!(page.found(), 0);
        assert_eq!(page.estimates().count(), 0);
    }

    #[test]
    fn test_sj_page_shape() {
        let raw = r#"{
            "total": 125,
            "more": true,
            "objects": [
                {"profession": "Программист", "payment_from": 50000, "payment_to": 90000, "currency": "rub"},
                {"profession": "Разработчик", "payment_from": 0, "payment_to": 0, "currency": "rub"},
                {"profession": "Developer", "payment_from": 1000, "payment_to": 2000, "currency": "usd"}
            ]
        }"#;

        let page: SjPage = serde_json::from_str(raw).unwrap();
        assert_eq!(page.found(), 125);

        let estimates: Vec<_> = page.estimates().collect();
        assert_eq!(estimates, vec![Some(70_000.0), None, None]);
    }

    #[test]
    fn test_sj_null_payment_fields_are_absent_bounds() {
        let raw = r#"{
            "total": 3,
            "objects": [
                {"payment_from": null, "payment_to": 90000, "currency": "rub"},
                {"payment_from": 50000, "currency": "rub"},
                {"payment_from": 50000, "payment_to": 90000, "currency": null}
            ]
        }"#;

        let page: SjPage = serde_json::from_str(raw).unwrap();
        assert_eq!(page.found(), 3);

        let estimates: Vec<_> = page.estimates().collect();
        assert_eq!(
            estimates,
            vec![Some(90_000.0 * 0.8), Some(50_000.0 * 1.2), None]
        );
    }
}
