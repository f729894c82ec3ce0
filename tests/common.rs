//! Common test fixtures for permission trees, view registries and workflow definitions.
use menuflow::prelude::*;

/// Registry with the views referenced by the fixtures below, minus `sys/missing`.
#[allow(dead_code)]
pub fn create_registry() -> ViewRegistry {
    ViewRegistry::from_manifest([
        "../views/sys/user.vue",
        "../views/sys/role.vue",
        "../views/dashboard/index.vue",
        "../views/flowconfig/index.vue",
        "../views/error/404.vue",
        "../views/sys/user/info/profile.vue",
        "../views/login.vue",
    ])
}

/// A permission tree exercising every menu type.
///
/// ```text
/// Sys (dir)
///   Users (menu, sys/user)
///   Roles (menu, sys/role)
///   Broken (menu, sys/missing)
///   Nested (dir)
///     Docs (internal link)
/// Dashboard (menu, dashboard/index)      <- top-level menu
/// Help (external link)
/// ```
#[allow(dead_code)]
pub fn create_permission_tree() -> Vec<PermissionNode> {
    vec![
        PermissionNode::new(1, "Sys", MenuType::Directory)
            .with_path("/sys")
            .with_children(vec![
                PermissionNode::new(2, "Users", MenuType::Menu)
                    .with_component("sys/user")
                    .with_path("/sys/user"),
                PermissionNode::new(3, "Roles", MenuType::Menu)
                    .with_component("sys/role")
                    .with_path("/sys/role"),
                PermissionNode::new(4, "Broken", MenuType::Menu)
                    .with_component("sys/missing")
                    .with_path("/sys/missing"),
                PermissionNode::new(5, "Nested", MenuType::Directory).with_children(vec![
                    PermissionNode::new(6, "Docs", MenuType::InternalLink)
                        .with_component("https://docs.example.com"),
                ]),
            ]),
        PermissionNode::new(7, "Dashboard", MenuType::Menu)
            .with_component("dashboard/index")
            .with_path("/dashboard"),
        PermissionNode::new(8, "Help", MenuType::ExternalLink)
            .with_component("https://help.example.com"),
    ]
}

/// Directed-shape definition:
///
/// ```text
/// start -> review -> gateway{ legal -> legal-2 | finance } -> archive -> end
/// ```
#[allow(dead_code)]
pub fn create_directed_workflow() -> WorkflowNode {
    WorkflowNode::new("start", "Apply", "start").with_next(
        WorkflowNode::new("review", "Review", "between").with_next(
            WorkflowNode::new("gateway", "Sign-off", "parallel")
                .with_branches(vec![
                    WorkflowNode::new("legal", "Legal", "parallel-node").with_next(
                        WorkflowNode::new("legal-2", "Legal follow-up", "between"),
                    ),
                    WorkflowNode::new("finance", "Finance", "parallel-node"),
                ])
                .with_next(
                    WorkflowNode::new("archive", "Archive", "between")
                        .with_next(WorkflowNode::new("end", "Done", "end")),
                ),
        ),
    )
}

#[allow(dead_code)]
pub const DIRECTED_WORKFLOW_JSON: &str = r#"{
    "nodeId": "start", "nodeName": "Apply", "nodeType": "start",
    "childNode": {
        "nodeId": "review", "nodeName": "Review", "nodeType": "between",
        "childNode": {
            "nodeId": "gateway", "nodeName": "Sign-off", "nodeType": "parallel",
            "conditionNodes": [
                {
                    "nodeId": "legal", "nodeName": "Legal", "nodeType": "parallel-node",
                    "childNode": {"nodeId": "legal-2", "nodeName": "Legal follow-up", "nodeType": "between"}
                },
                {"nodeId": "finance", "nodeName": "Finance", "nodeType": "parallel-node", "childNode": null}
            ],
            "childNode": {
                "nodeId": "archive", "nodeName": "Archive", "nodeType": "between",
                "childNode": {"nodeId": "end", "nodeName": "Done", "nodeType": "end"}
            }
        }
    }
}"#;

#[allow(dead_code)]
pub const GENERIC_WORKFLOW_JSON: &str = r#"[{
    "nodeId": "start", "nodeName": "Apply", "nodeType": "start",
    "childNodes": [
        {
            "nodeId": "fork", "nodeName": "Fork", "nodeType": "parallel",
            "childNodes": [
                {"nodeId": "p1", "nodeName": "Branch 1", "nodeType": "parallel-node", "childNodes": []},
                {"nodeId": "p2", "nodeName": "Branch 2", "nodeType": "parallel-node", "childNodes": null}
            ]
        },
        {"nodeId": "mid", "nodeName": "Check", "nodeType": "between"},
        {"nodeId": "end", "nodeName": "Done", "nodeType": "end"}
    ]
}]"#;
