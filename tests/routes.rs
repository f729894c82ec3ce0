//! Tests for permission-tree to route-tree conversion.
mod common;
use common::*;
use menuflow::prelude::*;
use serde_json::json;

fn names(routes: &[RouteNode]) -> Vec<&str> {
    routes.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_single_directory_with_menu() {
    let registry = create_registry();
    let json = json!([{
        "type": 1,
        "name": "Sys",
        "children": [{"type": 2, "name": "Users", "component": "sys/user"}]
    }]);
    let list = PermissionNode::list_from_json(&json.to_string()).unwrap();

    let routes = RouteConverter::new(&registry).convert(&list, true);
    assert_eq!(routes.len(), 1);
    assert!(routes[0].component.is_layout());
    assert_eq!(routes[0].meta.title, "Sys");

    assert_eq!(routes[0].children.len(), 1);
    let users = &routes[0].children[0];
    assert_eq!(users.meta.title, "Users");
    assert_eq!(users.component.loader().map(|l| l.key()), Some("sys/user"));
}

#[test]
fn test_top_level_menus_are_suppressed() {
    let registry = create_registry();
    let tree = create_permission_tree();
    let converter = RouteConverter::new(&registry);

    let top = converter.convert(&tree, true);
    assert_eq!(names(&top), vec!["Sys", "Help"]);
    assert!(top.iter().all(|r| !r.is_menu()));

    let nested = converter.convert(&tree, false);
    assert_eq!(names(&nested), vec!["Sys", "Dashboard", "Help"]);
}

#[test]
fn test_directories_always_get_layout() {
    let registry = create_registry();
    let tree = create_permission_tree();
    let converter = RouteConverter::new(&registry);

    for is_top in [true, false] {
        let routes = converter.convert(&tree, is_top);
        let sys = &routes[0];
        assert!(sys.is_directory());
        assert!(sys.component.is_layout());
        let nested = sys.find("Nested").expect("nested directory is kept");
        assert!(nested.component.is_layout());
    }
}

#[test]
fn test_menus_resolve_below_top_level() {
    let registry = create_registry();
    let routes = RouteConverter::new(&registry).convert(&create_permission_tree(), true);
    let sys = &routes[0];
    assert_eq!(names(&sys.children), vec!["Users", "Roles", "Broken", "Nested"]);

    assert!(matches!(sys.children[0].component, RouteComponent::View(_)));
    assert!(matches!(sys.children[1].component, RouteComponent::View(_)));
    match &sys.children[2].component {
        RouteComponent::Missing { view_id } => assert_eq!(view_id.as_deref(), Some("sys/missing")),
        other => panic!("Expected a missing view, got {:?}", other),
    }
}

#[test]
fn test_links_pass_through() {
    let registry = create_registry();
    let routes = RouteConverter::new(&registry).convert(&create_permission_tree(), true);

    let help = routes.iter().find(|r| r.name == "Help").unwrap();
    assert_eq!(
        help.component,
        RouteComponent::Raw(Some("https://help.example.com".to_string()))
    );
    assert_eq!(help.meta.title, "Help");

    let docs = routes[0].find("Docs").unwrap();
    assert_eq!(docs.menu_type, Some(MenuType::InternalLink));
}

#[test]
fn test_every_route_has_a_title() {
    let registry = create_registry();
    let routes = RouteConverter::new(&registry).convert(&create_permission_tree(), false);

    fn check(routes: &[RouteNode]) {
        for route in routes {
            assert_eq!(route.meta.title, route.name);
            check(&route.children);
        }
    }
    check(&routes);
}

#[test]
fn test_input_is_not_mutated() {
    let registry = create_registry();
    let tree = create_permission_tree();
    let before = tree.clone();
    let converter = RouteConverter::new(&registry);

    let first = converter.convert(&tree, true);
    let second = converter.convert(&tree, true);
    assert_eq!(tree, before);
    assert_eq!(first, second);
}

#[test]
fn test_first_menu_adds_flow_config() {
    let registry = create_registry();
    let tree = create_permission_tree();
    let converter = RouteConverter::new(&registry);

    let companions = converter.first_menu(&tree);
    let top_menus = tree.iter().filter(|n| n.menu_type == Some(MenuType::Menu)).count();
    assert_eq!(companions.len(), top_menus + 1);
    assert_eq!(names(&companions), vec!["Dashboard", "Flowconfig"]);

    let flow = companions.last().unwrap();
    assert_eq!(flow.path, "/flowconfig/:id");
    assert_eq!(flow.meta.title, "Flow configuration");
    assert_eq!(flow.component.loader().map(|l| l.key()), Some("flowconfig/index"));
}

#[test]
fn test_first_menu_without_flow_config() {
    let registry = create_registry();
    let converter = RouteConverter::builder(&registry)
        .without_flow_config()
        .build();
    let companions = converter.first_menu(&create_permission_tree());
    assert_eq!(names(&companions), vec!["Dashboard"]);
}

#[test]
fn test_custom_flow_config_route() {
    let registry = create_registry();
    let converter = RouteConverter::builder(&registry)
        .flow_config_route(FlowConfigRoute {
            path: "/process/:key".to_string(),
            name: "Process".to_string(),
            title: "Process".to_string(),
            view_id: "process/editor".to_string(),
        })
        .build();

    let companions = converter.first_menu(&[]);
    assert_eq!(companions.len(), 1);
    assert_eq!(companions[0].path, "/process/:key");
    assert!(matches!(companions[0].component, RouteComponent::Missing { .. }));
}

#[test]
fn test_route_table_merges_companions_into_layout() {
    let registry = create_registry();
    let converter = RouteConverter::builder(&registry).home_path("/dashboard").build();
    let table = RouteTable::build(&converter, &create_permission_tree());

    assert!(!table.is_fallback());
    assert_eq!(names(table.tree()), vec!["Sys", "Help"]);

    let layout = table.layout().unwrap();
    assert_eq!(layout.redirect.as_deref(), Some("/dashboard"));
    assert_eq!(
        names(&layout.children),
        vec!["NotFound", "Profile", "Dashboard", "Flowconfig"]
    );

    assert_eq!(names(&table.routes()), vec!["Sys", "Help", "Layout", "Login"]);
}

#[test]
fn test_empty_permissions_fall_back() {
    let registry = create_registry();
    let converter = RouteConverter::new(&registry);
    let table = RouteTable::build(&converter, &[]);

    assert!(table.is_fallback());
    assert!(table.tree().is_empty());
    assert!(table.companions().is_empty());
    assert_eq!(names(&table.routes()), vec!["Layout", "Login"]);
    assert_eq!(names(&table.layout().unwrap().children), vec!["NotFound", "Profile"]);
}

#[test]
fn test_menu_codes_accept_strings_and_numbers() {
    let list = PermissionNode::list_from_json(
        r#"[{"name": "A", "type": "1", "status": ""}, {"name": "B", "type": 3, "status": "0"}]"#,
    )
    .unwrap();
    assert_eq!(list[0].menu_type, Some(MenuType::Directory));
    assert!(!list[0].is_hidden());
    assert_eq!(list[1].menu_type, Some(MenuType::InternalLink));
    assert!(list[1].is_hidden());
}

#[test]
fn test_unknown_menu_types_are_skipped() {
    let registry = create_registry();
    let json = json!([{
        "type": 1,
        "name": "Sys",
        "children": [
            {"type": "", "name": "Blank", "children": [{"type": 2, "name": "Inner"}]},
            {"type": 2, "name": "Users", "component": "sys/user"},
            {"type": "9", "name": "Future"},
            {"name": "Untyped"}
        ]
    }]);
    let list = PermissionNode::list_from_json(&json.to_string()).unwrap();
    assert_eq!(list[0].children.len(), 4);
    assert_eq!(list[0].children[0].menu_type, None);
    assert_eq!(list[0].children[2].menu_type, None);

    let routes = RouteConverter::new(&registry).convert(&list, true);
    assert_eq!(names(&routes), vec!["Sys"]);
    assert_eq!(names(&routes[0].children), vec!["Users"]);
    assert!(routes[0].find("Inner").is_none());
}

#[test]
fn test_unknown_type_at_top_level_is_not_a_companion() {
    let registry = create_registry();
    let list = PermissionNode::list_from_json(r#"[{"name": "A", "type": ""}]"#).unwrap();
    let converter = RouteConverter::builder(&registry)
        .without_flow_config()
        .build();

    assert!(converter.first_menu(&list).is_empty());
    assert!(converter.convert(&list, false).is_empty());
}

#[test]
fn test_unknown_menu_status_is_reported_as_status() {
    let err = PermissionNode::list_from_json(r#"[{"name": "A", "type": 1, "status": "x"}]"#)
        .unwrap_err();
    assert!(matches!(err, MenuError::JsonParseError(_)));
    assert!(err.to_string().contains("Unknown menu status 'x'"));
    assert!(!err.to_string().contains("menu type"));

    let err = PermissionNode::list_from_json(r#"[{"name": "A", "type": 1, "status": 7}]"#)
        .unwrap_err();
    assert!(err.to_string().contains("Unknown menu status '7'"));
}

#[test]
fn test_hidden_menu_is_marked_not_dropped() {
    let registry = create_registry();
    let mut tree = create_permission_tree();
    tree[0].children[0].status = MenuStatus::Hidden;

    let routes = RouteConverter::new(&registry).convert(&tree, true);
    let users = routes[0].find("Users").unwrap();
    assert!(users.meta.hidden);
}

#[test]
fn test_assemble_flat_list() {
    let flat = vec![
        PermissionNode::new(3, "Roles", MenuType::Menu).with_parent(1),
        PermissionNode::new(1, "Sys", MenuType::Directory),
        PermissionNode::new(2, "Users", MenuType::Menu).with_parent(1),
        PermissionNode::new(4, "Orphan", MenuType::Menu).with_parent(42),
        PermissionNode::new(5, "Loop A", MenuType::Menu).with_parent(6),
        PermissionNode::new(6, "Loop B", MenuType::Menu).with_parent(5),
    ];
    let mut flat = flat;
    flat[0].sort_num = 2;
    flat[2].sort_num = 1;

    let tree = PermissionNode::assemble(flat);
    assert_eq!(
        tree.iter().map(|n| n.name.as_str()).collect::<Vec<_>>(),
        vec!["Sys", "Orphan"]
    );
    assert_eq!(
        tree[0].children.iter().map(|n| n.name.as_str()).collect::<Vec<_>>(),
        vec!["Users", "Roles"]
    );
}

#[test]
fn test_route_serialization() {
    let registry = create_registry();
    let routes = RouteConverter::new(&registry).convert(&create_permission_tree(), true);
    let value = serde_json::to_value(&routes[0]).unwrap();

    assert_eq!(value["component"], json!("Layout"));
    assert_eq!(value["type"], json!(1));
    assert_eq!(value["meta"], json!({"title": "Sys"}));
    assert_eq!(value["children"][0]["component"], json!("sys/user"));
    assert_eq!(value["children"][2]["component"], json!(null));
}
