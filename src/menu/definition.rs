use crate::error::MenuError;
use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;

/// The kind of an entry in the permission tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum MenuType {
    Directory = 1,
    Menu = 2,
    InternalLink = 3,
    ExternalLink = 4,
}

impl MenuType {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuType::Directory => "Directory",
            MenuType::Menu => "Menu",
            MenuType::InternalLink => "Internal link",
            MenuType::ExternalLink => "External link",
        }
    }

    pub fn all() -> [MenuType; 4] {
        [
            MenuType::Directory,
            MenuType::Menu,
            MenuType::InternalLink,
            MenuType::ExternalLink,
        ]
    }
}

impl From<MenuType> for u8 {
    fn from(value: MenuType) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for MenuType {
    type Error = MenuError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MenuType::Directory),
            2 => Ok(MenuType::Menu),
            3 => Ok(MenuType::InternalLink),
            4 => Ok(MenuType::ExternalLink),
            other => Err(MenuError::UnknownMenuType(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for MenuType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawCode::deserialize(deserializer)?
            .into_menu_type()
            .map_err(de::Error::custom)
    }
}

impl fmt::Display for MenuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a menu entry is shown in navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "u8")]
pub enum MenuStatus {
    Hidden = 0,
    #[default]
    Visible = 1,
}

impl MenuStatus {
    pub fn label(self) -> &'static str {
        match self {
            MenuStatus::Visible => "Visible",
            MenuStatus::Hidden => "Hidden",
        }
    }
}

impl From<MenuStatus> for u8 {
    fn from(value: MenuStatus) -> Self {
        value as u8
    }
}

// The menu service stores an empty string for entries that never had a status set.
impl<'de> Deserialize<'de> for MenuStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCode::deserialize(deserializer)?;
        if matches!(&raw, RawCode::Text(s) if s.trim().is_empty()) {
            return Ok(MenuStatus::Visible);
        }
        match raw.into_u8() {
            Ok(0) => Ok(MenuStatus::Hidden),
            Ok(1) => Ok(MenuStatus::Visible),
            Ok(other) => Err(de::Error::custom(MenuError::UnknownMenuStatus(
                other.to_string(),
            ))),
            Err(raw) => Err(de::Error::custom(MenuError::UnknownMenuStatus(raw))),
        }
    }
}

/// Menu codes arrive either as JSON numbers or as numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCode {
    Number(u64),
    Text(String),
    Other(de::IgnoredAny),
}

impl RawCode {
    /// The numeric code, or the raw text for error reporting.
    fn into_u8(self) -> Result<u8, String> {
        match self {
            RawCode::Number(n) => u8::try_from(n).map_err(|_| n.to_string()),
            RawCode::Text(s) => s.trim().parse::<u8>().map_err(|_| s),
            RawCode::Other(_) => Err("<non-scalar>".to_string()),
        }
    }

    fn into_menu_type(self) -> Result<MenuType, MenuError> {
        let code = self.into_u8().map_err(MenuError::UnknownMenuType)?;
        MenuType::try_from(code)
    }
}

/// One entry of the authorization tree, as delivered by the menu service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionNode {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    /// `None` when the service sent an empty or unrecognized type code. Such entries are
    /// kept in the list but skipped by route conversion.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_menu_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub menu_type: Option<MenuType>,
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PermissionNode>,
    #[serde(default, alias = "parentId")]
    pub parent_id: u64,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub params: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, alias = "sortNum")]
    pub sort_num: i32,
    #[serde(default, deserialize_with = "nullable_status")]
    pub status: MenuStatus,
}

impl PermissionNode {
    /// Creates a bare node; the remaining fields take their defaults.
    pub fn new(id: u64, name: impl Into<String>, menu_type: MenuType) -> Self {
        Self {
            id,
            name: name.into(),
            menu_type: Some(menu_type),
            component: None,
            children: Vec::new(),
            parent_id: 0,
            path: None,
            params: None,
            icon: None,
            sort_num: 0,
            status: MenuStatus::Visible,
        }
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_children(mut self, children: Vec<PermissionNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_parent(mut self, parent_id: u64) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn is_hidden(&self) -> bool {
        self.status == MenuStatus::Hidden
    }

    /// Parses a JSON array of permission nodes (nested or flat).
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, MenuError> {
        serde_json::from_str(json).map_err(|e| MenuError::JsonParseError(e.to_string()))
    }

    /// Loads a JSON array of permission nodes from a file.
    pub fn list_from_file(path: &str) -> Result<Vec<Self>, MenuError> {
        let content = fs::read_to_string(path)
            .map_err(|e| MenuError::JsonParseError(format!("Could not read '{}': {}", path, e)))?;
        Self::list_from_json(&content)
    }

    /// Nests a flat list by `parent_id`.
    ///
    /// Roots are nodes whose parent is 0 or not part of the list. Siblings are ordered by
    /// `sort_num`, ties keep input order. Nodes that only reach each other through a parent
    /// cycle are dropped.
    pub fn assemble(flat: Vec<PermissionNode>) -> Vec<PermissionNode> {
        let ids: HashSet<u64> = flat.iter().map(|n| n.id).collect();
        let (roots, nested): (Vec<_>, Vec<_>) = flat
            .into_iter()
            .partition(|n| n.parent_id == 0 || !ids.contains(&n.parent_id));

        let mut by_parent: HashMap<u64, Vec<PermissionNode>> =
            nested.into_iter().into_group_map_by(|n| n.parent_id);

        let nested_count: usize = by_parent.values().map(Vec::len).sum();
        let tree = attach_children(sort_siblings(roots), &mut by_parent);
        let remaining: usize = by_parent.values().map(Vec::len).sum();
        if remaining > 0 {
            log::warn!(
                "Dropped {} of {} nested menu entries that are not reachable from a root",
                remaining,
                nested_count
            );
        }
        tree
    }
}

fn sort_siblings(mut nodes: Vec<PermissionNode>) -> Vec<PermissionNode> {
    nodes.sort_by_key(|n| n.sort_num);
    nodes
}

fn attach_children(
    nodes: Vec<PermissionNode>,
    by_parent: &mut HashMap<u64, Vec<PermissionNode>>,
) -> Vec<PermissionNode> {
    nodes
        .into_iter()
        .map(|mut node| {
            if let Some(children) = by_parent.remove(&node.id) {
                let children = attach_children(sort_siblings(children), by_parent);
                node.children.extend(children);
            }
            node
        })
        .collect()
}

fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_menu_type<'de, D>(deserializer: D) -> Result<Option<MenuType>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<RawCode>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match raw.into_menu_type() {
        Ok(menu_type) => Ok(Some(menu_type)),
        Err(e) => {
            log::debug!("{}", e);
            Ok(None)
        }
    }
}

fn nullable_status<'de, D>(deserializer: D) -> Result<MenuStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<MenuStatus>::deserialize(deserializer)?.unwrap_or_default())
}
