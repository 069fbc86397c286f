use serde::{Deserialize, Serialize};

use crate::core::ReportingPeriod;

/// How the header `EndDate` of a monthly file is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EndDatePolicy {
    /// Actual last day of the month (28–31).
    #[default]
    LastDayOfMonth,
    /// Always day 31, as emitted by older releases of the product.
    /// Produces impossible dates such as `2025-02-31`.
    Fixed31,
}

impl EndDatePolicy {
    /// Render the end date of `period` as `YYYY-MM-DD`.
    pub fn render(&self, period: ReportingPeriod) -> String {
        match self {
            EndDatePolicy::LastDayOfMonth => period.end_date().format("%Y-%m-%d").to_string(),
            EndDatePolicy::Fixed31 => format!("{}-{:02}-31", period.year(), period.month()),
        }
    }
}

/// Fixed identifiers and defaults written into SAF-T files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaftConfig {
    /// Software product id, also the prefix of consolidated export names.
    pub product_id: String,
    pub product_version: String,
    /// AGT software certification number.
    pub software_certificate_number: String,
    pub tax_entity: String,
    /// NIF of the software producer; the issuing company's NIF when unset.
    pub product_company_tax_id: Option<String>,
    pub city: String,
    pub country: String,
    pub currency: String,
    /// `CustomerID` used for clients without a NIF.
    pub placeholder_customer_id: String,
    pub end_date_policy: EndDatePolicy,
    /// Operator recorded on submissions when the request names none.
    pub default_operator: String,
}

impl Default for SaftConfig {
    fn default() -> Self {
        Self {
            product_id: "UniversalSoft".into(),
            product_version: "1.0.0".into(),
            software_certificate_number: "385/AGT/2022".into(),
            tax_entity: "Global".into(),
            product_company_tax_id: None,
            city: "Luanda".into(),
            country: "AO".into(),
            currency: "AOA".into(),
            placeholder_customer_id: "C-MOCK".into(),
            end_date_policy: EndDatePolicy::LastDayOfMonth,
            default_operator: "Administrador".into(),
        }
    }
}

impl SaftConfig {
    pub fn builder() -> SaftConfigBuilder {
        SaftConfigBuilder::default()
    }
}

/// Builder for [`SaftConfig`], starting from the defaults.
#[derive(Debug, Default)]
pub struct SaftConfigBuilder {
    config: SaftConfig,
}

impl SaftConfigBuilder {
    pub fn product(mut self, id: impl Into<String>, version: impl Into<String>) -> Self {
        self.config.product_id = id.into();
        self.config.product_version = version.into();
        self
    }

    pub fn software_certificate_number(mut self, number: impl Into<String>) -> Self {
        self.config.software_certificate_number = number.into();
        self
    }

    pub fn tax_entity(mut self, entity: impl Into<String>) -> Self {
        self.config.tax_entity = entity.into();
        self
    }

    pub fn product_company_tax_id(mut self, nif: impl Into<String>) -> Self {
        self.config.product_company_tax_id = Some(nif.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.config.city = city.into();
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.config.country = country.into();
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.config.currency = currency.into();
        self
    }

    pub fn placeholder_customer_id(mut self, id: impl Into<String>) -> Self {
        self.config.placeholder_customer_id = id.into();
        self
    }

    pub fn end_date_policy(mut self, policy: EndDatePolicy) -> Self {
        self.config.end_date_policy = policy;
        self
    }

    pub fn default_operator(mut self, operator: impl Into<String>) -> Self {
        self.config.default_operator = operator.into();
        self
    }

    pub fn build(self) -> SaftConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_date_policies() {
        let feb = ReportingPeriod::new(2025, 2).unwrap();
        assert_eq!(EndDatePolicy::LastDayOfMonth.render(feb), "2025-02-28");
        assert_eq!(EndDatePolicy::Fixed31.render(feb), "2025-02-31");

        let leap = ReportingPeriod::new(2024, 2).unwrap();
        assert_eq!(EndDatePolicy::LastDayOfMonth.render(leap), "2024-02-29");
    }

    #[test]
    fn config_from_partial_json() {
        let config: SaftConfig =
            serde_json::from_str(r#"{"product_id":"Factura360","end_date_policy":"Fixed31"}"#)
                .unwrap();
        assert_eq!(config.product_id, "Factura360");
        assert_eq!(config.end_date_policy, EndDatePolicy::Fixed31);
        assert_eq!(config.currency, "AOA");
        assert_eq!(config.placeholder_customer_id, "C-MOCK");
    }

    #[test]
    fn builder_overrides() {
        let config = SaftConfig::builder()
            .product("Factura360", "2.1.0")
            .product_company_tax_id("5417000000")
            .build();
        assert_eq!(config.product_version, "2.1.0");
        assert_eq!(config.product_company_tax_id.as_deref(), Some("5417000000"));
        assert_eq!(config.tax_entity, "Global");
    }
}
