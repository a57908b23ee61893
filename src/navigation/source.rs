use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::SourceConfig;
use crate::error::{NavigationError, NavigationResult};
use crate::menu::MenuConfig;
use crate::routes::Principal;

/// Where a session's principal and menu configuration come from
#[async_trait]
pub trait SessionSource: Send + Sync {
    async fn fetch_principal(&self) -> NavigationResult<Principal>;

    async fn fetch_menu_configuration(&self) -> NavigationResult<Vec<MenuConfig>>;
}

/// In-memory source. A `None` part behaves like an unreachable backend.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionSource {
    principal: Option<Principal>,
    menus: Option<Vec<MenuConfig>>,
}

impl StaticSessionSource {
    pub fn new(principal: Principal, menus: Vec<MenuConfig>) -> Self {
        Self {
            principal: Some(principal),
            menus: Some(menus),
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Menu configuration from a file; the principal file is optional
    pub fn from_files(menu_path: impl AsRef<Path>, principal_path: Option<&Path>) -> NavigationResult<Self> {
        let menus = crate::menu::load_menu_configuration(menu_path)?;
        let principal = match principal_path {
            Some(path) => crate::format::read_structured(path)?,
            None => Principal::default(),
        };
        Ok(Self::new(principal, menus))
    }
}

#[async_trait]
impl SessionSource for StaticSessionSource {
    async fn fetch_principal(&self) -> NavigationResult<Principal> {
        self.principal
            .clone()
            .ok_or_else(|| NavigationError::SourceUnavailable("principal".to_string()))
    }

    async fn fetch_menu_configuration(&self) -> NavigationResult<Vec<MenuConfig>> {
        self.menus
            .clone()
            .ok_or_else(|| NavigationError::SourceUnavailable("menu configuration".to_string()))
    }
}

/// Backend source over HTTP. Responses may be wrapped in a
/// `{ code, data, message }` envelope or be the bare payload.
#[derive(Debug, Clone)]
pub struct HttpSessionSource {
    client: reqwest::Client,
    principal_url: Url,
    menu_url: Url,
    token: Option<String>,
}

impl HttpSessionSource {
    pub fn new(config: &SourceConfig) -> NavigationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            principal_url: endpoint_url(&config.base_url, &config.principal_endpoint)?,
            menu_url: endpoint_url(&config.base_url, &config.menu_endpoint)?,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    async fn get<T: DeserializeOwned>(&self, url: &Url) -> NavigationResult<T> {
        tracing::debug!("GET {}", url);
        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        // Error envelopes arrive with a non-2xx status, so read the body first
        let body = match response.json::<Value>().await {
            Ok(body) => Some(body),
            Err(err) if status.is_success() => return Err(err.into()),
            Err(_) => None,
        };
        read_response(status, body)
    }
}

#[async_trait]
impl SessionSource for HttpSessionSource {
    async fn fetch_principal(&self) -> NavigationResult<Principal> {
        self.get(&self.principal_url).await
    }

    async fn fetch_menu_configuration(&self) -> NavigationResult<Vec<MenuConfig>> {
        self.get(&self.menu_url).await
    }
}

/// `base` + `endpoint` as plain concatenation, so a base path like `/api` is kept
fn endpoint_url(base: &str, endpoint: &str) -> NavigationResult<Url> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );
    Ok(Url::parse(&joined)?)
}

/// A failed status keeps the envelope's code and message when the body has one
pub(crate) fn read_response<T: DeserializeOwned>(status: StatusCode, body: Option<Value>) -> NavigationResult<T> {
    if status.is_success() {
        return unwrap_envelope(body.unwrap_or(Value::Null));
    }
    let fallback = NavigationError::SourceRejected {
        code: status.as_u16().to_string(),
        message: status.canonical_reason().unwrap_or_default().to_string(),
    };
    match body.map(unwrap_envelope::<Value>) {
        Some(Err(rejected @ NavigationError::SourceRejected { .. })) => Err(rejected),
        _ => Err(fallback),
    }
}

/// Success codes are 0 and 200, numeric or string; anything else is a rejection
pub(crate) fn unwrap_envelope<T: DeserializeOwned>(body: Value) -> NavigationResult<T> {
    match body {
        Value::Object(mut map) if map.contains_key("code") => {
            let code = match map.get("code") {
                Some(Value::String(code)) => code.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            if code != "0" && code != "200" {
                let message = map
                    .remove("message")
                    .and_then(|m| m.as_str().map(str::to_string))
                    .unwrap_or_default();
                return Err(NavigationError::SourceRejected { code, message });
            }
            let data = map.remove("data").unwrap_or(Value::Null);
            Ok(serde_json::from_value(data)?)
        }
        bare => Ok(serde_json::from_value(bare)?),
    }
}
