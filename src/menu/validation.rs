// Whole-configuration validation for the menu editor
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::binding::{BindingGraph, BindingValidator};
use super::compiler::check_structure;
use super::types::MenuConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Position in the submitted tree, e.g. `[0].children[2]`
    pub location: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    /// Present when errors were found: invalid nodes removed, invalid bindings cleared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repaired: Option<Vec<MenuConfig>>,
    /// Errors still present in `repaired` (duplicates cannot be repaired automatically)
    pub residual_errors: usize,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn validate_menu_configuration(configs: &[MenuConfig]) -> ValidationReport {
    let (errors, warnings) = collect_issues(configs);

    if errors.is_empty() {
        return ValidationReport {
            errors,
            warnings,
            repaired: None,
            residual_errors: 0,
        };
    }

    tracing::info!("Menu configuration has {} error(s); generating repaired copy", errors.len());
    let repaired = repair(configs);
    let (residual, _) = collect_issues(&repaired);

    ValidationReport {
        errors,
        warnings,
        repaired: Some(repaired),
        residual_errors: residual.len(),
    }
}

/// Drop structurally invalid nodes, then clear bindings that no longer stand
pub fn repair(configs: &[MenuConfig]) -> Vec<MenuConfig> {
    let pruned = prune_invalid(configs);
    let (repaired, _) = BindingValidator::repair_configs(&pruned);
    repaired
}

fn prune_invalid(configs: &[MenuConfig]) -> Vec<MenuConfig> {
    configs
        .iter()
        .filter(|c| check_structure(c).is_ok())
        .map(|c| MenuConfig {
            children: prune_invalid(&c.children),
            ..c.clone()
        })
        .collect()
}

fn collect_issues(configs: &[MenuConfig]) -> (Vec<ValidationIssue>, Vec<ValidationIssue>) {
    let mut flat = Vec::new();
    flatten(configs, "", &mut flat);

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Basic fields
    for (location, config) in &flat {
        if let Err(diagnostic) = check_structure(config) {
            errors.push(ValidationIssue {
                location: location.clone(),
                message: diagnostic.message,
            });
        }
    }

    // Bindings; graph positions line up with `flat` since both are pre-order
    let graph = BindingGraph::from_configs(configs);
    for (pos, (location, config)) in flat.iter().enumerate() {
        if let Some(violation) = graph.check(pos) {
            errors.push(ValidationIssue {
                location: location.clone(),
                message: violation.describe(config.bind_menu_id.as_deref().unwrap_or_default()),
            });
        }
        if config.hidden && config.bind_menu_id.is_none() {
            warnings.push(ValidationIssue {
                location: location.clone(),
                message: "hidden menu has no bound parent; it will not highlight any visible entry".to_string(),
            });
        }
    }

    // Uniqueness
    errors.extend(duplicates(&flat, |c| c.permission_code.as_deref(), "permission code"));
    errors.extend(duplicates(&flat, |c| Some(c.id.as_str()).filter(|id| !id.is_empty()), "menu id"));

    (errors, warnings)
}

fn duplicates<'a, F>(flat: &'a [(String, &'a MenuConfig)], key: F, what: &str) -> Vec<ValidationIssue>
where
    F: Fn(&'a MenuConfig) -> Option<&'a str>,
{
    let mut seen: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut order = Vec::new();
    for (location, config) in flat {
        if let Some(k) = key(*config) {
            let locations = seen.entry(k).or_default();
            if locations.is_empty() {
                order.push(k);
            }
            locations.push(location.as_str());
        }
    }

    order
        .into_iter()
        .filter_map(|k| {
            let locations = &seen[k];
            (locations.len() > 1).then(|| ValidationIssue {
                location: locations[0].to_string(),
                message: format!("duplicate {} '{}' at {}", what, k, locations.join(", ")),
            })
        })
        .collect()
}

fn flatten<'a>(configs: &'a [MenuConfig], prefix: &str, out: &mut Vec<(String, &'a MenuConfig)>) {
    for (i, config) in configs.iter().enumerate() {
        let location = format!("{}[{}]", prefix, i);
        out.push((location.clone(), config));
        flatten(&config.children, &format!("{}.children", location), out);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Menu configuration report")?;
        writeln!(f, "{}", "=".repeat(50))?;

        if self.is_valid() {
            writeln!(f, "OK: configuration is valid")?;
        } else {
            writeln!(f, "FAILED: {} error(s)", self.errors.len())?;
            writeln!(f, "Errors:")?;
            for (i, issue) in self.errors.iter().enumerate() {
                writeln!(f, "  {}. {}: {}", i + 1, issue.location, issue.message)?;
            }
        }

        if !self.warnings.is_empty() {
            writeln!(f, "Warnings:")?;
            for (i, issue) in self.warnings.iter().enumerate() {
                writeln!(f, "  {}. {}: {}", i + 1, issue.location, issue.message)?;
            }
        }

        if self.repaired.is_some() {
            writeln!(f, "Repaired configuration generated ({} error(s) remain)", self.residual_errors)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::types::MenuType;

    #[test]
    fn test_valid_configuration_has_no_repair() {
        let configs = vec![
            MenuConfig::new("parent", "Parent", MenuType::Top).with_permission("parent"),
            MenuConfig::new("child", "Child", MenuType::SidebarNav)
                .with_permission("child")
                .hidden_bound_to("parent"),
        ];
        let report = validate_menu_configuration(&configs);
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
        assert!(report.repaired.is_none());
    }

    #[test]
    fn test_cycle_is_reported_and_repaired() {
        let configs = vec![
            MenuConfig::new("menu1", "Menu 1", MenuType::Top).hidden_bound_to("menu2"),
            MenuConfig::new("menu2", "Menu 2", MenuType::SidebarNav).hidden_bound_to("menu1"),
        ];
        let report = validate_menu_configuration(&configs);
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.residual_errors, 0);

        let repaired = report.repaired.unwrap();
        assert!(repaired.iter().all(|c| c.bind_menu_id.is_none()));
    }

    #[test]
    fn test_dangling_binding_and_basic_fields() {
        let mut bad_type = MenuConfig::new("x", "X", MenuType::Top);
        bad_type.menu_type = "footer".to_string();
        let configs = vec![
            MenuConfig::new("child", "Child", MenuType::SidebarNav).hidden_bound_to("non_existent"),
            bad_type,
        ];
        let report = validate_menu_configuration(&configs);
        let locations: Vec<&str> = report.errors.iter().map(|e| e.location.as_str()).collect();
        assert_eq!(locations, vec!["[1]", "[0]"]);

        let repaired = report.repaired.unwrap();
        assert_eq!(repaired.len(), 1);
        assert_eq!(repaired[0].bind_menu_id, None);
    }

    #[test]
    fn test_duplicates_survive_repair() {
        let configs = vec![
            MenuConfig::new("a", "A", MenuType::Top).with_permission("p"),
            MenuConfig::new("a", "A again", MenuType::Top).with_permission("p"),
        ];
        let report = validate_menu_configuration(&configs);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].message.contains("permission code 'p'"));
        assert!(report.errors[1].message.contains("menu id 'a'"));
        assert_eq!(report.residual_errors, 2);
    }

    #[test]
    fn test_hidden_without_binding_warns() {
        let configs = vec![MenuConfig {
            hidden: true,
            ..MenuConfig::new("orphan", "Orphan", MenuType::SidebarNav)
        }];
        let report = validate_menu_configuration(&configs);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].location, "[0]");
    }

    #[test]
    fn test_report_renders_sections() {
        let configs = vec![MenuConfig::new("a", "A", MenuType::SidebarNav).hidden_bound_to("ghost")];
        let text = validate_menu_configuration(&configs).to_string();
        assert!(text.contains("FAILED: 1 error(s)"));
        assert!(text.contains("[0]: bound menu 'ghost' does not exist"));
        assert!(text.contains("Repaired configuration generated (0 error(s) remain)"));
    }

    #[test]
    fn test_nested_locations() {
        let configs = vec![MenuConfig::new("root", "Root", MenuType::Top).with_children(vec![
            MenuConfig::new("ok", "Ok", MenuType::SidebarNav),
            MenuConfig::new("", "Nameless", MenuType::SidebarNav),
        ])];
        let report = validate_menu_configuration(&configs);
        assert_eq!(report.errors[0].location, "[0].children[1]");
    }
}
