use super::definition::{MenuType, PermissionNode};
use super::route::{RouteComponent, RouteMeta, RouteNode};
use crate::view::ViewRegistry;

/// The parameterized route appended to the companion list produced by
/// [`RouteConverter::first_menu`].
#[derive(Debug, Clone, PartialEq)]
pub struct FlowConfigRoute {
    pub path: String,
    pub name: String,
    pub title: String,
    pub view_id: String,
}

impl Default for FlowConfigRoute {
    fn default() -> Self {
        Self {
            path: "/flowconfig/:id".to_string(),
            name: "Flowconfig".to_string(),
            title: "Flow configuration".to_string(),
            view_id: "flowconfig/index".to_string(),
        }
    }
}

/// Rewrites permission trees into route trees, resolving menu views through a registry.
pub struct RouteConverter<'a> {
    registry: &'a ViewRegistry,
    home_path: String,
    flow_config: Option<FlowConfigRoute>,
}

pub struct RouteConverterBuilder<'a> {
    registry: &'a ViewRegistry,
    home_path: String,
    flow_config: Option<FlowConfigRoute>,
}

impl<'a> RouteConverterBuilder<'a> {
    pub fn new(registry: &'a ViewRegistry) -> Self {
        Self {
            registry,
            home_path: "/home".to_string(),
            flow_config: Some(FlowConfigRoute::default()),
        }
    }

    /// Where the base layout route redirects to.
    pub fn home_path(mut self, path: &str) -> Self {
        self.home_path = path.to_string();
        self
    }

    pub fn flow_config_route(mut self, route: FlowConfigRoute) -> Self {
        self.flow_config = Some(route);
        self
    }

    /// Leaves the synthetic flow-configuration route out of [`RouteConverter::first_menu`].
    pub fn without_flow_config(mut self) -> Self {
        self.flow_config = None;
        self
    }

    pub fn build(self) -> RouteConverter<'a> {
        RouteConverter {
            registry: self.registry,
            home_path: self.home_path,
            flow_config: self.flow_config,
        }
    }
}

impl<'a> RouteConverter<'a> {
    pub fn builder(registry: &'a ViewRegistry) -> RouteConverterBuilder<'a> {
        RouteConverterBuilder::new(registry)
    }

    pub fn new(registry: &'a ViewRegistry) -> Self {
        Self::builder(registry).build()
    }

    /// Converts a permission tree into a route tree.
    ///
    /// Directories always become layout routes. Menus are only emitted below the top
    /// level (`is_top == false`), with their view resolved through the registry. Links
    /// pass through at any depth. Entries without a recognized type are skipped together
    /// with their children. Children are converted with `is_top == false`.
    pub fn convert(&self, nodes: &[PermissionNode], is_top: bool) -> Vec<RouteNode> {
        nodes
            .iter()
            .filter_map(|node| {
                let component = match node.menu_type {
                    Some(MenuType::Directory) => RouteComponent::Layout,
                    Some(MenuType::Menu) if is_top => {
                        log::debug!("Skipping top-level menu '{}'", node.name);
                        return None;
                    }
                    Some(MenuType::Menu) => self.resolve_view(node),
                    Some(MenuType::InternalLink | MenuType::ExternalLink) => {
                        RouteComponent::Raw(node.component.clone())
                    }
                    None => {
                        log::warn!("Skipping menu entry '{}' with an unknown type", node.name);
                        return None;
                    }
                };

                let mut route = self.route_for(node, component);
                if !node.children.is_empty() {
                    route.children = self.convert(&node.children, false);
                }
                Some(route)
            })
            .collect()
    }

    /// Collects the top-level menus as flat routes and appends the flow-configuration route.
    pub fn first_menu(&self, nodes: &[PermissionNode]) -> Vec<RouteNode> {
        let mut routes: Vec<RouteNode> = nodes
            .iter()
            .filter(|node| node.menu_type == Some(MenuType::Menu))
            .map(|node| self.route_for(node, self.resolve_view(node)))
            .collect();

        if let Some(flow) = &self.flow_config {
            let component = self.resolve_id(&flow.view_id);
            routes.push(RouteNode::fixed(
                flow.name.as_str(),
                flow.path.as_str(),
                component,
                flow.title.as_str(),
            ));
        }
        routes
    }

    /// The routes every session has, with or without permissions.
    pub fn base_routes(&self) -> Vec<RouteNode> {
        let mut layout = RouteNode::fixed("Layout", "", RouteComponent::Layout, "");
        layout.redirect = Some(self.home_path.clone());
        layout.children = vec![
            RouteNode::fixed(
                "NotFound",
                "/:pathMatch(.*)*",
                self.resolve_id("error/404"),
                "404",
            ),
            RouteNode::fixed(
                "Profile",
                "/profile",
                self.resolve_id("sys/user/info/profile"),
                "Profile",
            ),
        ];

        let login = RouteNode::fixed("Login", "/login", self.resolve_id("login"), "Login");
        vec![layout, login]
    }

    fn route_for(&self, node: &PermissionNode, component: RouteComponent) -> RouteNode {
        RouteNode {
            id: Some(node.id),
            name: node.name.clone(),
            path: node.path.clone().unwrap_or_default(),
            component,
            redirect: None,
            params: node.params.clone().filter(|p| !p.is_empty()),
            menu_type: node.menu_type,
            meta: RouteMeta {
                title: node.name.clone(),
                icon: node.icon.clone().filter(|i| !i.is_empty()),
                hidden: node.is_hidden(),
            },
            children: Vec::new(),
        }
    }

    fn resolve_view(&self, node: &PermissionNode) -> RouteComponent {
        match node.component.as_deref() {
            Some(view_id) => self.resolve_id(view_id),
            None => {
                log::warn!("Menu '{}' has no component reference", node.name);
                RouteComponent::Missing { view_id: None }
            }
        }
    }

    fn resolve_id(&self, view_id: &str) -> RouteComponent {
        match self.registry.resolve(view_id) {
            Some(loader) => RouteComponent::View(loader),
            None => {
                log::warn!("View '{}' is not registered; route will render blank", view_id);
                RouteComponent::Missing {
                    view_id: Some(view_id.to_string()),
                }
            }
        }
    }
}

/// Everything the navigation layer needs after login, derived from one permission tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTable {
    tree: Vec<RouteNode>,
    companions: Vec<RouteNode>,
    base: Vec<RouteNode>,
    fallback: bool,
}

impl RouteTable {
    /// Runs the nested conversion and the flat companion pass over the same input.
    ///
    /// An empty permission list is a valid "no access" session: both derived lists stay
    /// empty and only the base routes remain.
    pub fn build(converter: &RouteConverter<'_>, nodes: &[PermissionNode]) -> Self {
        let mut base = converter.base_routes();
        if nodes.is_empty() {
            log::info!("No permissions granted; using the base route set");
            return Self {
                tree: Vec::new(),
                companions: Vec::new(),
                base,
                fallback: true,
            };
        }

        let companions = converter.first_menu(nodes);
        let tree = converter.convert(nodes, true);
        if let Some(layout) = base.first_mut() {
            layout.children.extend(companions.iter().cloned());
        }

        log::info!(
            "Built route table: {} top-level routes, {} companion routes",
            tree.len(),
            companions.len()
        );
        Self {
            tree,
            companions,
            base,
            fallback: false,
        }
    }

    /// The nested route tree converted from the permission tree.
    pub fn tree(&self) -> &[RouteNode] {
        &self.tree
    }

    /// The flat top-level menu routes plus the flow-configuration route.
    pub fn companions(&self) -> &[RouteNode] {
        &self.companions
    }

    /// The base routes; the layout route carries the companions as extra children.
    pub fn base(&self) -> &[RouteNode] {
        &self.base
    }

    /// The layout route hosting the companion routes.
    pub fn layout(&self) -> Option<&RouteNode> {
        self.base.first()
    }

    /// True when the table was built from an empty permission list.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Routes in registration order: the converted tree first, then the base routes.
    pub fn routes(&self) -> Vec<RouteNode> {
        self.tree.iter().chain(self.base.iter()).cloned().collect()
    }
}
