//! HTTP client for the remote parameter store.
//!
//! This module owns every network interaction: the host existence check, the
//! parameter read, and the three write operations (create, update, delete).
//! The API is Foreman v2 shaped: parameters are a sub-resource of the host
//! record at `/api/v2/hosts/{host}/parameters/`.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::models::{HostCheck, ObservedState};
use crate::{Error, Result};

/// Accept header required by the store's v2 API
const ACCEPT: &str = "application/json,version=2";

/// Connection settings for one invocation.
///
/// Built fresh per run from CLI arguments; there is no shared or global
/// client state.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the store, e.g. `https://foreman.example.com`
    pub base_url: String,

    /// Basic auth username
    pub user: String,

    /// Basic auth password
    pub password: String,

    /// Verify the store's TLS certificate (disabled by `--insecure`)
    pub verify_tls: bool,

    /// Connect and read timeout
    pub timeout: Duration,
}

/// Blocking client for the parameter store.
pub struct ParamStore {
    agent: ureq::Agent,
    base_url: String,
    auth_header: String,
}

impl ParamStore {
    /// Build a client from explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the TLS connector cannot be constructed.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let mut builder = ureq::builder()
            .timeout_connect(config.timeout)
            .timeout_read(config.timeout);

        if !config.verify_tls {
            let connector = native_tls::TlsConnector::builder()
                .danger_accept_invalid_certs(true)
                .build()
                .map_err(|e| Error::Transport(e.to_string()))?;
            builder = builder.tls_connector(Arc::new(connector));
        }

        let credentials = BASE64.encode(format!("{}:{}", config.user, config.password));

        Ok(Self {
            agent: builder.build(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_header: format!("Basic {}", credentials),
        })
    }

    fn host_url(&self, host: &str) -> String {
        format!("{}/api/v2/hosts/{}", self.base_url, host)
    }

    fn params_url(&self, host: &str) -> String {
        format!("{}/parameters/", self.host_url(host))
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("Authorization", &self.auth_header)
            .set("Content-Type", "application/json")
            .set("Accept", ACCEPT)
    }

    /// Check that the target host record exists and the credentials are
    /// accepted. 404 and 401 are expected answers here, not failures of the
    /// call itself; any other non-2xx status is a rejection.
    pub fn check_host(&self, host: &str) -> Result<HostCheck> {
        let url = self.host_url(host);
        debug!("GET {}", url);

        match self.request("GET", &url).call() {
            Ok(_) => Ok(HostCheck {
                found: true,
                authenticated: true,
            }),
            Err(ureq::Error::Status(404, _)) => Ok(HostCheck {
                found: false,
                authenticated: true,
            }),
            Err(ureq::Error::Status(401, _)) => Ok(HostCheck {
                found: true,
                authenticated: false,
            }),
            Err(ureq::Error::Status(status, resp)) => Err(rejection(status, resp)),
            Err(e) => Err(Error::Transport(e.to_string())),
        }
    }

    /// Read the observed state of a parameter.
    ///
    /// A 404 on the sub-resource, or a 2xx body missing the `value`/`id`
    /// fields, both mean the parameter has never been set: the normal
    /// steady-state observation, not an error.
    pub fn read_param(&self, host: &str, param: &str) -> Result<ObservedState> {
        let url = format!("{}{}", self.params_url(host), param);
        debug!("GET {}", url);

        match self.request("GET", &url).call() {
            Ok(resp) => {
                let record: ParameterRecord = resp
                    .into_json()
                    .map_err(|e| Error::Response(e.to_string()))?;
                Ok(record.into_observed())
            }
            Err(ureq::Error::Status(404, _)) => Ok(ObservedState::absent()),
            Err(ureq::Error::Status(status, resp)) => Err(rejection(status, resp)),
            Err(e) => Err(Error::Transport(e.to_string())),
        }
    }

    /// Create the parameter with the given value.
    pub fn create_param(&self, host: &str, param: &str, value: &str) -> Result<()> {
        let url = self.params_url(host);
        debug!("POST {}", url);

        let payload = json!({ "parameter": { "name": param, "value": value } });
        classify(self.request("POST", &url).send_json(payload))
    }

    /// Update the parameter addressed by its store-assigned id.
    pub fn update_param(&self, host: &str, id: &str, value: &str) -> Result<()> {
        let url = format!("{}{}", self.params_url(host), id);
        debug!("PUT {}", url);

        let payload = json!({ "parameter": { "value": value } });
        classify(self.request("PUT", &url).send_json(payload))
    }

    /// Delete the parameter addressed by its name.
    pub fn delete_param(&self, host: &str, param: &str) -> Result<()> {
        let url = format!("{}{}", self.params_url(host), param);
        debug!("DELETE {}", url);

        classify(self.request("DELETE", &url).call())
    }
}

/// Classify a write result: any 2xx is success, anything else is a fatal
/// rejection carrying the status code and response body verbatim.
fn classify(outcome: std::result::Result<ureq::Response, ureq::Error>) -> Result<()> {
    match outcome {
        Ok(_) => Ok(()),
        Err(ureq::Error::Status(status, resp)) => Err(rejection(status, resp)),
        Err(e) => Err(Error::Transport(e.to_string())),
    }
}

fn rejection(status: u16, resp: ureq::Response) -> Error {
    let body = resp.into_string().unwrap_or_default();
    Error::Rejected { status, body }
}

/// Parameter record as returned by the store (only the fields we care about).
///
/// Both fields are raw JSON values: the store returns numeric ids, and
/// parameter values are not guaranteed to be JSON strings.
#[derive(Debug, Deserialize)]
struct ParameterRecord {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    value: Option<serde_json::Value>,
}

impl ParameterRecord {
    fn into_observed(self) -> ObservedState {
        match (self.id, self.value) {
            (Some(id), Some(value)) => ObservedState {
                exists: true,
                current_value: Some(scalar_string(&value)),
                remote_id: Some(scalar_string(&id)),
            },
            _ => ObservedState::absent(),
        }
    }
}

/// Render a JSON scalar the way the store compares it: strings unquoted,
/// everything else in its JSON form.
fn scalar_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
