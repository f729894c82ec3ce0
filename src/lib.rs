//! # Menuflow - Tree Transformations for Admin Consoles
//!
//! **Menuflow** is the data core behind an administration console's navigation and
//! process viewer. It takes the hierarchical data delivered by backend services and
//! derives the shapes the rendering layer needs, without touching transport, storage, or
//! UI concerns.
//!
//! ## Pipelines
//!
//! Three independent, stateless pipelines:
//!
//! 1.  **Routes**: a permission tree ([`menu::PermissionNode`]) is converted into a route
//!     tree ([`menu::RouteNode`]). Menu entries get their views resolved through a
//!     [`view::ViewRegistry`] that is built once at startup.
//! 2.  **Node extraction**: a workflow definition ([`workflow::WorkflowNode`]) is
//!     flattened into selectable nodes and back-targets.
//! 3.  **Status annotation**: execution history ([`workflow::HistoryRecord`]) is laid
//!     over a workflow definition to produce an [`workflow::AnnotatedNode`] tree.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use menuflow::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // 1. Register the views the application ships with.
//!     let registry = ViewRegistry::from_manifest([
//!         "../views/sys/user.vue",
//!         "../views/flowconfig/index.vue",
//!     ]);
//!
//!     // 2. Convert the permission tree delivered at login.
//!     let permissions = PermissionNode::list_from_json(
//!         r#"[{"id": 1, "type": 1, "name": "Sys", "path": "/sys",
//!              "children": [{"id": 2, "type": "2", "name": "Users", "component": "sys/user"}]}]"#,
//!     )?;
//!     let converter = RouteConverter::new(&registry);
//!     let table = RouteTable::build(&converter, &permissions);
//!     println!("{}", serde_json::to_string_pretty(&table.routes())?);
//!
//!     // 3. Overlay execution history on a process definition.
//!     let roots = parse_workflow(
//!         r#"{"nodeId": "A", "nodeName": "Apply", "nodeType": "start",
//!             "childNode": {"nodeId": "B", "nodeName": "Review", "nodeType": "between"}}"#,
//!         None,
//!     )?;
//!     let history = vec![HistoryRecord::new("A", 2), HistoryRecord::new("B", 1)];
//!     for root in &roots {
//!         let annotated = annotate(root, &history);
//!         println!("{}", StatusFormatter::format_tree(&annotated));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod menu;
pub mod prelude;
pub mod view;
pub mod workflow;
