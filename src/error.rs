// Navigation engine error and diagnostic types
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that reach the caller. Everything the UI consumes degrades instead of
/// returning one of these; they surface from file loading, sources and strict
/// configuration policies.
#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Duplicate permission code '{code}' on routes '{first}' and '{second}'")]
    DuplicatePermissionCode {
        code: String,
        first: String,
        second: String,
    },

    #[error("Invalid source URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Source request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Source returned code {code}: {message}")]
    SourceRejected { code: String, message: String },

    #[error("Source has no {0} available")]
    SourceUnavailable(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub type NavigationResult<T> = Result<T, NavigationError>;

/// Categories of non-fatal findings collected while building a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    // Compiler
    MissingId,
    MissingTitle,
    UnknownMenuType,
    DuplicateMenuId,

    // Binding repair
    DanglingBinding,
    CyclicBinding,
    HiddenBindingTarget,

    // Permission index
    PermissionCodeOverwritten,

    // Loader
    SourceUnavailable,
}

impl DiagnosticKind {
    /// Whether the finding changed the compiled result (node dropped or binding cleared)
    pub fn is_repair(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::MissingId
                | DiagnosticKind::MissingTitle
                | DiagnosticKind::UnknownMenuType
                | DiagnosticKind::DanglingBinding
                | DiagnosticKind::CyclicBinding
                | DiagnosticKind::HiddenBindingTarget
        )
    }
}

/// A non-fatal finding (dropped node, cleared binding, overwritten mapping)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub menu_id: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            menu_id: None,
            message: message.into(),
        }
    }

    pub fn for_menu(mut self, menu_id: impl Into<String>) -> Self {
        self.menu_id = Some(menu_id.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.menu_id {
            Some(id) => write!(f, "[{:?}] menu '{}': {}", self.kind, id, self.message),
            None => write!(f, "[{:?}] {}", self.kind, self.message),
        }
    }
}
