use std::path::{Path, PathBuf};

use clap::Args;
use serde_json::json;

use crate::cli::utils::output_json;
use crate::cli::OutputFormat;
use crate::menu::{load_menu_configuration, validate_menu_configuration, ValidationReport};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[arg(long, help = "Menu configuration file (JSON or YAML)")]
    pub menus: PathBuf,

    #[arg(long, help = "Write the repaired configuration here when errors are found")]
    pub write_repaired: Option<PathBuf>,
}

pub fn handle(args: ValidateArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let menus = load_menu_configuration(&args.menus)?;
    let report = validate_menu_configuration(&menus);

    let written = match (&args.write_repaired, &report.repaired) {
        (Some(path), Some(repaired)) => {
            std::fs::write(path, serde_json::to_string_pretty(repaired)?)?;
            Some(path)
        }
        _ => None,
    };

    match output_format {
        OutputFormat::Json => output_json(&json_response(&report, written.map(PathBuf::as_path))?)?,
        OutputFormat::Text => {
            print!("{}", report);
            if let Some(path) = written {
                println!("✓ Repaired configuration written to {}", path.display());
            }
        }
    }

    if !report.is_valid() {
        anyhow::bail!("menu configuration has {} error(s)", report.errors.len());
    }
    Ok(())
}

/// The report as one JSON document, plus where the repaired copy went
fn json_response(report: &ValidationReport, written: Option<&Path>) -> anyhow::Result<serde_json::Value> {
    let mut response = serde_json::to_value(report)?;
    if let Some(path) = written {
        response["repairedWrittenTo"] = json!(path.display().to_string());
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{MenuConfig, MenuType};

    #[test]
    fn test_json_response_is_a_single_document() {
        let configs = vec![MenuConfig::new("a", "A", MenuType::SidebarNav).hidden_bound_to("ghost")];
        let report = validate_menu_configuration(&configs);

        let response = json_response(&report, Some(Path::new("/tmp/repaired.json"))).unwrap();
        assert_eq!(response["repairedWrittenTo"], "/tmp/repaired.json");
        assert_eq!(response["errors"].as_array().map(Vec::len), Some(1));
        assert_eq!(response["residual_errors"], 0);

        let response = json_response(&report, None).unwrap();
        assert!(response.get("repairedWrittenTo").is_none());
    }
}
