use super::definition::MenuType;
use crate::view::ViewLoader;
use serde::{Serialize, Serializer};

/// What a route renders.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteComponent {
    /// The shared page layout that hosts nested routes.
    Layout,
    /// A view resolved through the registry.
    View(ViewLoader),
    /// The referenced view is not registered; the route renders blank.
    Missing { view_id: Option<String> },
    /// The original reference, passed through untouched (links).
    Raw(Option<String>),
}

impl RouteComponent {
    pub fn is_layout(&self) -> bool {
        matches!(self, RouteComponent::Layout)
    }

    pub fn loader(&self) -> Option<&ViewLoader> {
        match self {
            RouteComponent::View(loader) => Some(loader),
            _ => None,
        }
    }
}

impl Serialize for RouteComponent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RouteComponent::Layout => serializer.serialize_str("Layout"),
            RouteComponent::View(loader) => serializer.serialize_str(loader.key()),
            RouteComponent::Missing { .. } => serializer.serialize_none(),
            RouteComponent::Raw(Some(reference)) => serializer.serialize_str(reference),
            RouteComponent::Raw(None) => serializer.serialize_none(),
        }
    }
}

/// Display metadata read by the navigation layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RouteMeta {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

impl RouteMeta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// A node of the route tree handed to the navigation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub path: String,
    pub component: RouteComponent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub menu_type: Option<MenuType>,
    pub meta: RouteMeta,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    /// A route that does not originate from the permission tree.
    pub fn fixed(
        name: impl Into<String>,
        path: impl Into<String>,
        component: RouteComponent,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            path: path.into(),
            component,
            redirect: None,
            params: None,
            menu_type: None,
            meta: RouteMeta::titled(title),
            children: Vec::new(),
        }
    }

    pub fn is_menu(&self) -> bool {
        self.menu_type == Some(MenuType::Menu)
    }

    pub fn is_directory(&self) -> bool {
        self.menu_type == Some(MenuType::Directory)
    }

    /// Number of routes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(RouteNode::count).sum::<usize>()
    }

    /// Depth-first search by route name.
    pub fn find(&self, name: &str) -> Option<&RouteNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }
}
