use serde::Serialize;

use super::types::MenuConfig;

/// Option node for the "bind to menu" selector in the menu editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindTargetOption {
    pub value: String,
    pub label: String,
    /// No permission code, so nothing to navigate to
    pub disabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BindTargetOption>,
}

/// Visible menus a hidden menu may bind to, in pre-order. The menu being edited
/// and its own subtree are excluded.
pub fn available_bind_targets<'a>(configs: &'a [MenuConfig], current_id: Option<&str>) -> Vec<&'a MenuConfig> {
    let mut out = Vec::new();
    collect_targets(configs, current_id, &mut out);
    out
}

fn collect_targets<'a>(configs: &'a [MenuConfig], current_id: Option<&str>, out: &mut Vec<&'a MenuConfig>) {
    for config in configs {
        if current_id == Some(config.id.as_str()) {
            continue;
        }
        if !config.hidden {
            out.push(config);
        }
        collect_targets(&config.children, current_id, out);
    }
}

/// Same candidates as `available_bind_targets`, nested for a tree select.
/// Visible descendants of a hidden menu are lifted to the hidden menu's level.
pub fn bind_target_options(configs: &[MenuConfig], current_id: Option<&str>) -> Vec<BindTargetOption> {
    let mut out = Vec::new();
    for config in configs {
        if current_id == Some(config.id.as_str()) {
            continue;
        }
        let children = bind_target_options(&config.children, current_id);
        if config.hidden {
            out.extend(children);
        } else {
            out.push(BindTargetOption {
                value: config.id.clone(),
                label: config.title.clone(),
                disabled: config.permission_code.is_none(),
                children,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::types::MenuType;

    fn configs() -> Vec<MenuConfig> {
        vec![
            MenuConfig::new("sys", "System", MenuType::Top).with_children(vec![
                MenuConfig::new("usr", "Users", MenuType::SidebarNav)
                    .with_permission("sys:user")
                    .with_children(vec![MenuConfig::new("usr-tab", "Tab", MenuType::SidebarNav).with_permission("sys:user:tab")]),
                MenuConfig::new("detail", "Detail", MenuType::SidebarNav)
                    .with_permission("sys:user:detail")
                    .hidden_bound_to("usr")
                    .with_children(vec![MenuConfig::new("audit", "Audit", MenuType::SidebarNav).with_permission("sys:audit")]),
            ]),
            MenuConfig::new("ops", "Ops", MenuType::Top).with_permission("ops"),
        ]
    }

    #[test]
    fn test_flat_targets_skip_hidden_and_own_subtree() {
        let configs = configs();
        let ids: Vec<&str> = available_bind_targets(&configs, Some("usr"))
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["sys", "audit", "ops"]);
    }

    #[test]
    fn test_flat_targets_without_current() {
        let configs = configs();
        let ids: Vec<&str> = available_bind_targets(&configs, None).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["sys", "usr", "usr-tab", "audit", "ops"]);
    }

    #[test]
    fn test_options_nest_and_disable_grouping_entries() {
        let options = bind_target_options(&configs(), Some("detail"));
        assert_eq!(options.len(), 2);

        let sys = &options[0];
        assert_eq!(sys.value, "sys");
        assert!(sys.disabled);
        assert_eq!(sys.children.len(), 1);
        assert_eq!(sys.children[0].label, "Users");
        assert!(!sys.children[0].disabled);
        assert_eq!(sys.children[0].children[0].value, "usr-tab");

        assert!(!options[1].disabled);
    }

    #[test]
    fn test_options_lift_children_of_hidden_menu() {
        let options = bind_target_options(&configs(), None);
        let sys_children: Vec<&str> = options[0].children.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(sys_children, vec!["usr", "audit"]);
    }
}
