use serde::{Deserialize, Serialize};

/// Where a menu entry is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuType {
    Top,
    SidebarDirectory,
    SidebarNav,
}

impl MenuType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuType::Top => "top",
            MenuType::SidebarDirectory => "sidebar_directory",
            MenuType::SidebarNav => "sidebar_nav",
        }
    }
}

impl std::str::FromStr for MenuType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(MenuType::Top),
            "sidebar_directory" | "sidebarDirectory" => Ok(MenuType::SidebarDirectory),
            "sidebar_nav" | "sidebarNav" => Ok(MenuType::SidebarNav),
            other => Err(format!("unknown menu type: {}", other)),
        }
    }
}

/// Raw, admin-editable menu record as delivered by the menu API.
///
/// `menu_type` stays a string so that an unknown value drops one node at
/// compile time instead of failing the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuConfig {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::format::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub permission_code: Option<String>,
    #[serde(default)]
    pub menu_type: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(
        default,
        deserialize_with = "crate::format::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub bind_menu_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuConfig>,
}

impl MenuConfig {
    pub fn new(id: impl Into<String>, title: impl Into<String>, menu_type: MenuType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            menu_type: menu_type.as_str().to_string(),
            ..Default::default()
        }
    }

    pub fn with_permission(mut self, code: impl Into<String>) -> Self {
        self.permission_code = Some(code.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_children(mut self, children: Vec<MenuConfig>) -> Self {
        self.children = children;
        self
    }

    /// Mark hidden and anchor to a visible menu
    pub fn hidden_bound_to(mut self, menu_id: impl Into<String>) -> Self {
        self.hidden = true;
        self.bind_menu_id = Some(menu_id.into());
        self
    }

    pub fn kind(&self) -> Option<MenuType> {
        self.menu_type.parse().ok()
    }
}

/// One entry of a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Arena index of a node inside one `MenuTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Compiled menu node. `parent` is a lookup handle, not ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuNode {
    pub id: String,
    pub title: String,
    pub icon: Option<String>,
    pub permission_code: Option<String>,
    pub menu_type: MenuType,
    pub hidden: bool,
    pub bind_menu_id: Option<String>,
    pub path: Option<String>,
    pub route_name: Option<String>,
    pub level: u32,
    pub breadcrumb_path: Vec<BreadcrumbItem>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl MenuNode {
    pub fn breadcrumb_item(&self) -> BreadcrumbItem {
        BreadcrumbItem {
            title: self.title.clone(),
            icon: self.icon.clone(),
            path: self.path.clone(),
        }
    }

    /// Hidden and still carrying a binding
    pub fn is_bound(&self) -> bool {
        self.hidden && self.bind_menu_id.is_some()
    }
}

/// Immutable-per-load menu tree. Nodes are stored in depth-first pre-order,
/// so iterating `nodes` visits parents before children in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuTree {
    pub(crate) nodes: Vec<MenuNode>,
    pub(crate) roots: Vec<NodeId>,
}

impl MenuTree {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> &MenuNode {
        &self.nodes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut MenuNode {
        &mut self.nodes[id.0]
    }

    pub fn roots(&self) -> impl Iterator<Item = (NodeId, &MenuNode)> {
        self.roots.iter().map(move |&id| (id, self.get(id)))
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &MenuNode)> {
        self.get(id).children.iter().map(move |&c| (c, self.get(c)))
    }

    /// Pre-order traversal
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MenuNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Root-to-self chain of node handles
    pub fn lineage(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = vec![id];
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.get(parent).parent;
        }
        chain.reverse();
        chain
    }

    pub fn view(&self, id: NodeId) -> MenuView {
        self.view_filtered(id, &|_| true)
    }

    /// Project a subtree, keeping only descendants accepted by `keep`
    pub fn view_filtered(&self, id: NodeId, keep: &dyn Fn(&MenuNode) -> bool) -> MenuView {
        let node = self.get(id);
        MenuView {
            id: node.id.clone(),
            title: node.title.clone(),
            icon: node.icon.clone(),
            permission_code: node.permission_code.clone(),
            path: node.path.clone(),
            route_name: node.route_name.clone(),
            menu_type: node.menu_type,
            hidden: node.hidden,
            bind_menu_id: node.bind_menu_id.clone(),
            level: node.level,
            breadcrumb_path: node.breadcrumb_path.clone(),
            children: node
                .children
                .iter()
                .filter(|&&c| keep(self.get(c)))
                .map(|&c| self.view_filtered(c, keep))
                .collect(),
        }
    }

    pub fn to_views(&self) -> Vec<MenuView> {
        self.roots.iter().map(|&r| self.view(r)).collect()
    }
}

/// Owned, nested projection of a compiled subtree for UI consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuView {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::format::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub permission_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_name: Option<String>,
    pub menu_type: MenuType,
    pub hidden: bool,
    #[serde(
        default,
        deserialize_with = "crate::format::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub bind_menu_id: Option<String>,
    pub level: u32,
    pub breadcrumb_path: Vec<BreadcrumbItem>,
    #[serde(default)]
    pub children: Vec<MenuView>,
}
