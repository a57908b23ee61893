use std::collections::HashMap;

use crate::error::{Diagnostic, DiagnosticKind};

use super::types::{MenuConfig, MenuTree};

/// One node as seen by the binding graph
#[derive(Debug, Clone, Copy)]
pub struct BindingEntry<'a> {
    pub id: &'a str,
    pub hidden: bool,
    pub bind_menu_id: Option<&'a str>,
}

/// Why a binding was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingViolation {
    /// Target id resolves to no node
    Dangling,
    /// Following the bind chain from the target leads back to the source (or the target is the source)
    Cyclic,
    /// Target is itself hidden
    HiddenTarget,
}

impl BindingViolation {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            BindingViolation::Dangling => DiagnosticKind::DanglingBinding,
            BindingViolation::Cyclic => DiagnosticKind::CyclicBinding,
            BindingViolation::HiddenTarget => DiagnosticKind::HiddenBindingTarget,
        }
    }

    pub fn describe(&self, target: &str) -> String {
        match self {
            BindingViolation::Dangling => format!("bound menu '{}' does not exist", target),
            BindingViolation::Cyclic => format!("binding to '{}' forms a cycle", target),
            BindingViolation::HiddenTarget => format!("bound menu '{}' is hidden", target),
        }
    }
}

/// `bindMenuId` edges kept apart from the parent/child edges. Entries are
/// positional; ids resolve to their first occurrence.
pub struct BindingGraph<'a> {
    entries: Vec<BindingEntry<'a>>,
    by_id: HashMap<&'a str, usize>,
}

impl<'a> BindingGraph<'a> {
    pub fn new(entries: Vec<BindingEntry<'a>>) -> Self {
        let mut by_id = HashMap::with_capacity(entries.len());
        for (pos, entry) in entries.iter().enumerate() {
            by_id.entry(entry.id).or_insert(pos);
        }
        Self { entries, by_id }
    }

    pub fn from_tree(tree: &'a MenuTree) -> Self {
        Self::new(
            tree.iter()
                .map(|(_, node)| BindingEntry {
                    id: node.id.as_str(),
                    hidden: node.hidden,
                    bind_menu_id: node.bind_menu_id.as_deref(),
                })
                .collect(),
        )
    }

    /// Entries in pre-order, matching `flatten_configs`
    pub fn from_configs(configs: &'a [MenuConfig]) -> Self {
        let mut entries = Vec::new();
        collect_config_entries(configs, &mut entries);
        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, id: &str) -> Option<&BindingEntry<'a>> {
        self.by_id.get(id).map(|&pos| &self.entries[pos])
    }

    /// Check the binding of the entry at `pos`. Unbound or visible entries have nothing to check.
    pub fn check(&self, pos: usize) -> Option<BindingViolation> {
        let entry = &self.entries[pos];
        let target_id = match (entry.hidden, entry.bind_menu_id) {
            (true, Some(target)) => target,
            _ => return None,
        };

        let Some(target) = self.lookup(target_id) else {
            return Some(BindingViolation::Dangling);
        };

        if target.id == entry.id || self.chain_returns_to(target, entry.id) {
            return Some(BindingViolation::Cyclic);
        }

        if target.hidden {
            return Some(BindingViolation::HiddenTarget);
        }

        None
    }

    /// Walk target -> target.bind -> ... for at most `len()` hops
    fn chain_returns_to(&self, start: &BindingEntry<'a>, origin: &str) -> bool {
        let mut current = start;
        for _ in 0..self.entries.len() {
            let Some(next_id) = current.bind_menu_id else {
                return false;
            };
            if next_id == origin {
                return true;
            }
            match self.lookup(next_id) {
                Some(next) => current = next,
                None => return false,
            }
        }
        false
    }

    /// Every violation, evaluated against the graph as it stands
    pub fn violations(&self) -> Vec<(usize, BindingViolation)> {
        (0..self.entries.len())
            .filter_map(|pos| self.check(pos).map(|v| (pos, v)))
            .collect()
    }
}

fn collect_config_entries<'a>(configs: &'a [MenuConfig], out: &mut Vec<BindingEntry<'a>>) {
    for config in configs {
        out.push(BindingEntry {
            id: config.id.as_str(),
            hidden: config.hidden,
            bind_menu_id: config.bind_menu_id.as_deref(),
        });
        collect_config_entries(&config.children, out);
    }
}

/// Validates hidden-menu bindings and clears the ones that cannot stand
pub struct BindingValidator;

impl BindingValidator {
    /// Clear every invalid `bind_menu_id` in place and report what was cleared.
    /// Never fails; a rejected binding degrades to "no binding". Running it
    /// again on its own output changes nothing.
    pub fn validate_and_repair(tree: &mut MenuTree) -> Vec<Diagnostic> {
        let violations = BindingGraph::from_tree(tree).violations();
        let mut diagnostics = Vec::with_capacity(violations.len());

        for (pos, violation) in violations {
            let node = &mut tree.nodes[pos];
            let target = node.bind_menu_id.take().unwrap_or_default();
            let message = violation.describe(&target);
            tracing::warn!("Clearing binding on menu '{}': {}", node.id, message);
            diagnostics.push(Diagnostic::new(violation.kind(), message).for_menu(&node.id));
        }

        diagnostics
    }

    /// Same repair over raw configuration, returning a repaired copy
    pub fn repair_configs(configs: &[MenuConfig]) -> (Vec<MenuConfig>, Vec<Diagnostic>) {
        let violations = BindingGraph::from_configs(configs).violations();
        let mut repaired = configs.to_vec();
        let mut diagnostics = Vec::with_capacity(violations.len());

        let mut positions = violations.into_iter().peekable();
        let mut counter = 0usize;
        clear_at_positions(&mut repaired, &mut counter, &mut positions, &mut diagnostics);

        (repaired, diagnostics)
    }
}

fn clear_at_positions<I>(
    configs: &mut [MenuConfig],
    counter: &mut usize,
    positions: &mut std::iter::Peekable<I>,
    diagnostics: &mut Vec<Diagnostic>,
) where
    I: Iterator<Item = (usize, BindingViolation)>,
{
    for config in configs.iter_mut() {
        if let Some(&(pos, violation)) = positions.peek() {
            if pos == *counter {
                positions.next();
                let target = config.bind_menu_id.take().unwrap_or_default();
                diagnostics.push(Diagnostic::new(violation.kind(), violation.describe(&target)).for_menu(&config.id));
            }
        }
        *counter += 1;
        clear_at_positions(&mut config.children, counter, positions, diagnostics);
    }
}
