// Structured file loading shared by route tables and menu configuration
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;

use crate::error::{NavigationError, NavigationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> NavigationResult<Self> {
        match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Ok(FileFormat::Json),
            Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
            _ => Err(NavigationError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

pub fn read_structured<T: DeserializeOwned>(path: &Path) -> NavigationResult<T> {
    let format = FileFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    parse_structured(&content, format)
}

pub fn parse_structured<T: DeserializeOwned>(content: &str, format: FileFormat) -> NavigationResult<T> {
    match format {
        FileFormat::Json => Ok(serde_json::from_str(content)?),
        FileFormat::Yaml => Ok(serde_yaml::from_str(content)?),
    }
}

/// Field helper: an empty string reads as absent, the same as a missing key
pub fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
