use clap::Parser;
use menuflow::menu::{MenuType, PermissionNode};
use menuflow::workflow::{HistoryRecord, WorkflowNode};
use rand::{Rng, rngs::ThreadRng};
use std::fs;
use std::path::Path;

/// A CLI tool to generate sample console data for menuflow-cli
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The directory to write the generated JSON files to
    #[arg(short, long, default_value = "generated")]
    output: String,

    /// Number of top-level menu directories
    #[arg(long, default_value_t = 4)]
    directories: usize,

    /// Maximum number of menus per directory
    #[arg(long, default_value_t = 6)]
    menus: usize,

    /// Number of sequential steps in the generated workflow
    #[arg(long, default_value_t = 5)]
    steps: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.steps == 0 {
        eprintln!("Error: --steps must be at least 1");
        std::process::exit(1);
    }

    let out = Path::new(&cli.output);
    fs::create_dir_all(out)?;

    println!(
        "Generating console data ({} directories, up to {} menus each, {} workflow steps)...",
        cli.directories, cli.menus, cli.steps
    );

    let (permissions, views) = generate_permissions(&mut rng, cli.directories, cli.menus);
    fs::write(
        out.join("permissions.json"),
        serde_json::to_string_pretty(&permissions)?,
    )?;
    fs::write(out.join("views.json"), serde_json::to_string_pretty(&views)?)?;
    println!(
        "-> Generated {} directories and {} views.",
        permissions.len(),
        views.len()
    );

    let workflow = generate_workflow(&mut rng, cli.steps);
    let history = generate_history(&mut rng, &workflow);
    fs::write(
        out.join("workflow.json"),
        serde_json::to_string_pretty(&workflow)?,
    )?;
    fs::write(
        out.join("history.json"),
        serde_json::to_string_pretty(&history)?,
    )?;
    println!(
        "-> Generated a workflow with {} nodes and {} history records.",
        workflow.node_count(),
        history.len()
    );

    println!("Successfully saved sample data to '{}'", cli.output);
    Ok(())
}

/// Builds directories of menus. Roughly one in five menus references a view that is left
/// out of the manifest, so conversions exercise the unresolved path.
fn generate_permissions(
    rng: &mut ThreadRng,
    directories: usize,
    max_menus: usize,
) -> (Vec<PermissionNode>, Vec<String>) {
    let mut next_id = 1u64;
    let mut views = Vec::new();
    let mut tree = Vec::new();

    for d in 0..directories {
        let dir_id = next_id;
        next_id += 1;
        let dir_key = format!("area{}", d);

        let menu_count = rng.random_range(1..=max_menus.max(1));
        let children = (0..menu_count)
            .map(|m| {
                let id = next_id;
                next_id += 1;
                let view = format!("{}/page{}", dir_key, m);
                if rng.random_bool(0.8) {
                    views.push(format!("../views/{}.vue", view));
                }
                let menu_type = if rng.random_bool(0.1) {
                    MenuType::ExternalLink
                } else {
                    MenuType::Menu
                };
                PermissionNode::new(id, format!("Page {}.{}", d, m), menu_type)
                    .with_component(view)
                    .with_path(format!("/{}/page{}", dir_key, m))
                    .with_parent(dir_id)
            })
            .collect();

        tree.push(
            PermissionNode::new(dir_id, format!("Area {}", d), MenuType::Directory)
                .with_path(format!("/{}", dir_key))
                .with_children(children),
        );
    }

    views.push("../views/flowconfig/index.vue".to_string());
    (tree, views)
}

/// A start node, `steps` intermediate nodes with an occasional parallel gateway, and an end node.
fn generate_workflow(rng: &mut ThreadRng, steps: usize) -> WorkflowNode {
    let mut tail = WorkflowNode::new("end", "End", "end");
    for step in (0..steps).rev() {
        let id = format!("step{}", step);
        let node = if rng.random_bool(0.3) {
            let branches = (0..rng.random_range(2..=3))
                .map(|b| {
                    WorkflowNode::new(
                        format!("{}-branch{}", id, b),
                        format!("Branch {}.{}", step, b),
                        "parallel-node",
                    )
                })
                .collect();
            WorkflowNode::new(id, format!("Gateway {}", step), "parallel").with_branches(branches)
        } else {
            WorkflowNode::new(id, format!("Step {}", step), "between")
        };
        tail = node.with_next(tail);
    }
    WorkflowNode::new("start", "Start", "start").with_next(tail)
}

/// Walks the workflow and logs statuses for a random prefix of it.
fn generate_history(rng: &mut ThreadRng, workflow: &WorkflowNode) -> Vec<HistoryRecord> {
    let nodes: Vec<&WorkflowNode> = workflow.walk().collect();
    let reached = rng.random_range(1..=nodes.len());
    let mut history = Vec::new();
    for node in &nodes[..reached] {
        if rng.random_bool(0.2) {
            history.push(HistoryRecord::new(node.node_id.clone(), 9));
        }
        history.push(HistoryRecord::new(node.node_id.clone(), 2));
    }
    if let Some(last) = nodes.get(reached) {
        history.push(HistoryRecord::new(last.node_id.clone(), 1));
    }
    history
}
