use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub navigation: NavigationConfig,
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// What the permission index does when two routes declare the same code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    LastWins,
    Reject,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last_wins" | "last-wins" => Ok(DuplicatePolicy::LastWins),
            "reject" => Ok(DuplicatePolicy::Reject),
            other => Err(format!("unknown duplicate policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    pub duplicate_permission_policy: DuplicatePolicy,
    pub debug_logging: bool,
    pub super_admin_roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: String,
    pub menu_endpoint: String,
    pub principal_endpoint: String,
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Navigation overrides
        if let Ok(v) = env::var("NAV_DUPLICATE_PERMISSION_POLICY") {
            self.navigation.duplicate_permission_policy =
                v.parse().unwrap_or(self.navigation.duplicate_permission_policy);
        }
        if let Ok(v) = env::var("NAV_DEBUG_LOGGING") {
            self.navigation.debug_logging = v.parse().unwrap_or(self.navigation.debug_logging);
        }
        if let Ok(v) = env::var("NAV_SUPER_ADMIN_ROLES") {
            self.navigation.super_admin_roles = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Source overrides
        if let Ok(v) = env::var("NAV_SOURCE_BASE_URL") {
            self.source.base_url = v;
        }
        if let Ok(v) = env::var("NAV_SOURCE_MENU_ENDPOINT") {
            self.source.menu_endpoint = v;
        }
        if let Ok(v) = env::var("NAV_SOURCE_PRINCIPAL_ENDPOINT") {
            self.source.principal_endpoint = v;
        }
        if let Ok(v) = env::var("NAV_SOURCE_TIMEOUT_SECS") {
            self.source.timeout_secs = v.parse().unwrap_or(self.source.timeout_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            navigation: NavigationConfig {
                duplicate_permission_policy: DuplicatePolicy::LastWins,
                debug_logging: true,
                super_admin_roles: vec!["admin".to_string(), "super_admin".to_string()],
            },
            source: SourceConfig {
                base_url: "http://localhost:3000/api".to_string(),
                menu_endpoint: "/menu/user".to_string(),
                principal_endpoint: "/user/info".to_string(),
                timeout_secs: 30,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            navigation: NavigationConfig {
                duplicate_permission_policy: DuplicatePolicy::Reject,
                debug_logging: false,
                super_admin_roles: vec!["admin".to_string(), "super_admin".to_string()],
            },
            source: SourceConfig {
                base_url: "https://staging.example.com/api".to_string(),
                menu_endpoint: "/menu/user".to_string(),
                principal_endpoint: "/user/info".to_string(),
                timeout_secs: 15,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            navigation: NavigationConfig {
                duplicate_permission_policy: DuplicatePolicy::LastWins,
                debug_logging: false,
                super_admin_roles: vec!["super_admin".to_string()],
            },
            source: SourceConfig {
                base_url: "https://app.example.com/api".to_string(),
                menu_endpoint: "/menu/user".to_string(),
                principal_endpoint: "/user/info".to_string(),
                timeout_secs: 10,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}
