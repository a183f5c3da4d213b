use serde_json::{json, Value};

use super::client::post_json;
use super::error::EstimationError;
use crate::config;
use crate::models::emission_result::{CH4_SHARE, CO2_SHARE, N2O_SHARE};
use crate::models::EmissionResult;

pub const DEFAULT_YEAR: &str = "2023";
pub const DEFAULT_SOURCE: &str = "Climatiq";

/// Client for the Climatiq `/estimate` endpoint.
pub struct ClimatiqClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    activity_id: String,
    data_version: String,
}

impl ClimatiqClient {
    pub fn new(client: reqwest::Client, endpoint: &str, api_key: &str) -> Self {
        Self {
            client,
            endpoint: config::sanitize_api_url(endpoint),
            api_key: api_key.trim().to_string(),
            activity_id: config::DEFAULT_ACTIVITY_ID.to_string(),
            data_version: config::DEFAULT_DATA_VERSION.to_string(),
        }
    }

    /// Build a client from environment configuration.
    pub fn from_env() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(format!("carbonlens/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::new(client, &config::get_api_url(), &config::get_api_key())
            .with_activity_id(config::get_activity_id())
            .with_data_version(config::get_data_version()))
    }

    pub fn with_activity_id(mut self, activity_id: impl Into<String>) -> Self {
        self.activity_id = activity_id.into();
        self
    }

    pub fn with_data_version(mut self, data_version: impl Into<String>) -> Self {
        self.data_version = data_version.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn request_body(&self, region_code: &str, energy_kwh: f64) -> Value {
        json!({
            "emission_factor": {
                "activity_id": self.activity_id,
                "region": region_code,
                "data_version": self.data_version,
            },
            "parameters": {
                "energy": energy_kwh,
                "energy_unit": "kWh",
            }
        })
    }

    /// Ask the API for one region's emissions. Makes exactly one request.
    pub async fn fetch(&self, region_code: &str, energy_kwh: f64) -> Result<EmissionResult, EstimationError> {
        let body = self.request_body(region_code, energy_kwh);
        let payload = post_json(&self.client, &self.endpoint, &self.api_key, &body).await?;
        parse_estimate(region_code, &payload)
    }
}

/// Turn an `/estimate` payload into a result.
///
/// `co2e` must be a positive finite number. Missing or null gases are
/// approximated from the total. A gas that is present but not a
/// non-negative number makes the whole payload unusable. Missing or empty
/// year/source take the Climatiq defaults.
pub fn parse_estimate(region_code: &str, payload: &Value) -> Result<EmissionResult, EstimationError> {
    let total = payload
        .get("co2e")
        .and_then(|v| v.as_f64())
        .filter(|t| t.is_finite() && *t > 0.0)
        .ok_or(EstimationError::MissingTotal)?;

    let gases = payload.get("constituent_gases");
    let gas = |key: &str, share: f64| -> Result<f64, EstimationError> {
        match gases.and_then(|g| g.get(key)) {
            None | Some(Value::Null) => Ok(total * share),
            Some(v) => v
                .as_f64()
                .filter(|g| g.is_finite() && *g >= 0.0)
                .ok_or_else(|| EstimationError::Decode(format!("constituent_gases.{} is not a usable amount: {}", key, v))),
        }
    };

    let factor = payload.get("emission_factor");
    let year = factor
        .and_then(|f| f.get("year"))
        .and_then(scalar_text)
        .unwrap_or_else(|| DEFAULT_YEAR.to_string());
    let source = factor
        .and_then(|f| f.get("source"))
        .and_then(scalar_text)
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

    Ok(EmissionResult::new(
        region_code,
        total,
        gas("co2", CO2_SHARE)?,
        gas("ch4", CH4_SHARE)?,
        gas("n2o", N2O_SHARE)?,
        year,
        source,
    ))
}

fn scalar_text(v: &Value) -> Option<String> {
    let text = match v {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_estimate_uses_constituent_gases() {
        let payload = json!({
            "co2e": 41.2,
            "constituent_gases": { "co2": 40.0, "ch4": 0.01234567, "n2o": 0.002 },
            "emission_factor": { "year": 2022, "source": "UBA" }
        });
        let r = parse_estimate("DE", &payload).unwrap();
        assert_eq!(r.total_kg_co2e, 41.2);
        assert_eq!(r.co2_kg, 40.0);
        assert_eq!(r.ch4_kg, 0.01235);
        assert_eq!(r.n2o_kg, 0.002);
        assert_eq!(r.year, "2022");
        assert_eq!(r.source, "UBA");
    }

    #[test]
    fn test_parse_estimate_approximates_missing_gases() {
        let payload = json!({ "co2e": 100.0, "constituent_gases": { "co2": 97.5 } });
        let r = parse_estimate("FR", &payload).unwrap();
        assert_eq!(r.co2_kg, 97.5);
        assert_eq!(r.ch4_kg, 0.1);
        assert_eq!(r.n2o_kg, 0.05);
        assert_eq!(r.year, DEFAULT_YEAR);
        assert_eq!(r.source, DEFAULT_SOURCE);
    }

    #[test]
    fn test_parse_estimate_empty_metadata_uses_defaults() {
        let payload = json!({ "co2e": 1.0, "emission_factor": { "year": "", "source": null } });
        let r = parse_estimate("JP", &payload).unwrap();
        assert_eq!(r.year, "2023");
        assert_eq!(r.source, "Climatiq");
    }

    #[test]
    fn test_parse_estimate_rejects_unusable_totals() {
        for payload in [
            json!({}),
            json!({ "co2e": null }),
            json!({ "co2e": "12" }),
            json!({ "co2e": 0 }),
            json!({ "co2e": -3.0 }),
        ] {
            assert_eq!(parse_estimate("IN", &payload), Err(EstimationError::MissingTotal));
        }
    }

    #[test]
    fn test_parse_estimate_rejects_unusable_gases() {
        for gases in [
            json!({ "co2": "40" }),
            json!({ "ch4": -0.1 }),
            json!({ "n2o": true }),
            json!({ "co2": { "value": 1 } }),
        ] {
            let payload = json!({ "co2e": 41.2, "constituent_gases": gases });
            assert!(matches!(parse_estimate("DE", &payload), Err(EstimationError::Decode(_))));
        }
    }

    #[test]
    fn test_parse_estimate_null_gas_is_approximated() {
        let payload = json!({ "co2e": 10.0, "constituent_gases": { "co2": null, "ch4": 0.0 } });
        let r = parse_estimate("GB", &payload).unwrap();
        assert_eq!(r.co2_kg, 9.8);
        assert_eq!(r.ch4_kg, 0.0);
        assert_eq!(r.n2o_kg, 0.005);
    }

    #[test]
    fn test_request_body_shape() {
        let client = ClimatiqClient::new(reqwest::Client::new(), "https://example.test/estimate/", "k");
        let body = client.request_body("GB", 12.5);
        assert_eq!(body["emission_factor"]["activity_id"], config::DEFAULT_ACTIVITY_ID);
        assert_eq!(body["emission_factor"]["region"], "GB");
        assert_eq!(body["emission_factor"]["data_version"], "^27");
        assert_eq!(body["parameters"]["energy"], 12.5);
        assert_eq!(body["parameters"]["energy_unit"], "kWh");
        assert_eq!(client.endpoint(), "https://example.test/estimate");
    }
}
