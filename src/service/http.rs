//! HTTP implementation of [`TimetableService`] over the backend's JSON API.
//!
//! - `GET  {base}/get-module-names`              → `["CODE - Title (L1)", ...]`
//! - `POST {base}/get-module-timetables` `[codes]` → keyed object or positional array
//! - `GET  {base}/validate/{username}/{password}` → `true` / `false`

use std::collections::HashSet;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::core::config::{ResolvedConfig, ResponseShape, normalize_base_url};
use crate::core::timetable::{AggregatedTimetable, TimetableRecord};
use crate::service::{ServiceError, TimetableService};

const MODULE_NAMES_ENDPOINT: &str = "get-module-names";
const MODULE_TIMETABLES_ENDPOINT: &str = "get-module-timetables";
const VALIDATE_ENDPOINT: &str = "validate";

pub struct HttpTimetableService {
    base_url: String,
    response_shape: ResponseShape,
    client: reqwest::Client,
}

impl HttpTimetableService {
    pub fn new(base_url: &str, response_shape: ResponseShape) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            response_shape,
            client: reqwest::Client::new(),
        }
    }

    /// Builds the adapter from resolved config, applying the request timeout.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ServiceError::Config(e.to_string()))?;

        Ok(Self {
            base_url: normalize_base_url(&config.base_url),
            response_shape: config.response_shape,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ServiceError::Config(format!("invalid base URL {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| ServiceError::Config(format!("base URL cannot have a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ServiceError> {
        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Backend error: {} - {}", status.as_u16(), message);
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ServiceError::Parse(e.to_string()))
    }
}

/// Turns a raw timetable body into a mapping keyed by exactly `codes`.
pub fn decode_timetables(
    body: serde_json::Value,
    codes: &[String],
    shape: ResponseShape,
) -> Result<AggregatedTimetable, ServiceError> {
    match (shape, body) {
        (ResponseShape::Keyed, serde_json::Value::Object(map)) => {
            let requested: HashSet<&str> = codes.iter().map(String::as_str).collect();
            for key in map.keys().filter(|key| !requested.contains(key.as_str())) {
                warn!("Dropping timetable for unrequested module {}", key);
            }

            codes
                .iter()
                .map(|code| {
                    map.get(code)
                        .map(|record| (code.clone(), TimetableRecord(record.clone())))
                        .ok_or_else(|| {
                            ServiceError::Parse(format!("response missing timetable for {code}"))
                        })
                })
                .collect()
        }
        (ResponseShape::Positional, serde_json::Value::Array(records)) => {
            if records.len() != codes.len() {
                return Err(ServiceError::Parse(format!(
                    "expected {} timetables, got {}",
                    codes.len(),
                    records.len()
                )));
            }
            Ok(codes
                .iter()
                .cloned()
                .zip(records.into_iter().map(TimetableRecord))
                .collect())
        }
        (ResponseShape::Keyed, _) => Err(ServiceError::Parse(
            "expected a JSON object keyed by module code".to_string(),
        )),
        (ResponseShape::Positional, _) => Err(ServiceError::Parse(
            "expected a JSON array of timetables".to_string(),
        )),
    }
}

#[async_trait]
impl TimetableService for HttpTimetableService {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_catalog(&self) -> Result<Vec<String>, ServiceError> {
        let url = self.endpoint(&[MODULE_NAMES_ENDPOINT])?;
        info!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let names: Vec<String> = Self::read_json(response).await?;
        info!("Catalog response: {} modules", names.len());
        Ok(names)
    }

    async fn fetch_timetables(
        &self,
        codes: &[String],
    ) -> Result<AggregatedTimetable, ServiceError> {
        let url = self.endpoint(&[MODULE_TIMETABLES_ENDPOINT])?;
        info!("POST {} codes={:?}", url, codes);

        let response = self
            .client
            .post(url)
            .json(codes)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let body: serde_json::Value = Self::read_json(response).await?;
        decode_timetables(body, codes, self.response_shape)
    }

    async fn validate_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, ServiceError> {
        let url = self.endpoint(&[VALIDATE_ENDPOINT, username, password])?;
        // Never log the URL here, it carries the password.
        info!("GET /{}/{}/***", VALIDATE_ENDPOINT, username);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let service = HttpTimetableService::new("http://localhost:5000/", ResponseShape::Keyed);
        let url = service.endpoint(&[MODULE_NAMES_ENDPOINT]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/get-module-names");
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_encodes() {
        let service = HttpTimetableService::new("http://host/api", ResponseShape::Keyed);
        let url = service.endpoint(&[VALIDATE_ENDPOINT, "abcd12", "p/ss word"]).unwrap();
        assert_eq!(url.as_str(), "http://host/api/validate/abcd12/p%2Fss%20word");
    }

    #[test]
    fn test_endpoint_rejects_garbage_base() {
        let service = HttpTimetableService::new("not a url", ResponseShape::Keyed);
        assert!(matches!(
            service.endpoint(&[MODULE_NAMES_ENDPOINT]),
            Err(ServiceError::Config(_))
        ));
    }

    #[test]
    fn test_decode_keyed_drops_unrequested() {
        let body = json!({ "ACCT0001": {"Monday": []}, "EXTRA": {} });
        let mapping =
            decode_timetables(body, &codes(&["ACCT0001"]), ResponseShape::Keyed).unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping["ACCT0001"].as_value(), &json!({"Monday": []}));
    }

    #[test]
    fn test_decode_keyed_missing_code_is_error() {
        let body = json!({ "ACCT0001": [] });
        let err = decode_timetables(body, &codes(&["ACCT0001", "MATH1061"]), ResponseShape::Keyed)
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Parse("response missing timetable for MATH1061".to_string())
        );
    }

    #[test]
    fn test_decode_positional_zips_codes() {
        let body = json!([{"n": 1}, {"n": 2}]);
        let mapping = decode_timetables(
            body,
            &codes(&["ACCT0001", "MATH1061"]),
            ResponseShape::Positional,
        )
        .unwrap();
        assert_eq!(mapping["MATH1061"].as_value(), &json!({"n": 2}));
    }

    #[test]
    fn test_decode_positional_length_mismatch() {
        let body = json!([{"n": 1}]);
        let err = decode_timetables(
            body,
            &codes(&["ACCT0001", "MATH1061"]),
            ResponseShape::Positional,
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::Parse(_)));
    }

    #[test]
    fn test_decode_wrong_shape() {
        assert!(decode_timetables(json!([]), &codes(&["A"]), ResponseShape::Keyed).is_err());
        assert!(decode_timetables(json!({}), &codes(&["A"]), ResponseShape::Positional).is_err());
    }
}
