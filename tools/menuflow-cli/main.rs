use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use menuflow::prelude::*;
use menuflow::workflow::load_workflow;
use serde::Serialize;
use std::fs;
use std::time::Instant;

/// Shape selector for clap.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ShapeCli {
    Generic,
    Directed,
}

impl From<ShapeCli> for WorkflowShape {
    fn from(value: ShapeCli) -> Self {
        match value {
            ShapeCli::Generic => WorkflowShape::Generic,
            ShapeCli::Directed => WorkflowShape::Directed,
        }
    }
}

/// Derives routes, node lists and status overlays from console data files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a permission tree into the session route table
    Routes {
        /// Path to the permission JSON (array of menu entries)
        permissions_path: String,
        /// Path to the view manifest JSON (array of view file paths)
        #[arg(short, long)]
        views: Option<String>,
        /// The permission file is a flat list linked by `parent_id`
        #[arg(long)]
        flat: bool,
    },
    /// List the selectable nodes of a workflow definition
    Nodes {
        workflow_path: String,
        #[arg(short, long, value_enum)]
        shape: Option<ShapeCli>,
    },
    /// List the back-target nodes of a workflow definition
    BackTargets {
        workflow_path: String,
        #[arg(short, long, value_enum)]
        shape: Option<ShapeCli>,
    },
    /// Overlay execution history onto a workflow definition
    Annotate {
        workflow_path: String,
        history_path: String,
        #[arg(short, long, value_enum)]
        shape: Option<ShapeCli>,
        /// Print an indented outline instead of JSON
        #[arg(short, long)]
        text: bool,
    },
    /// Extract table columns from a form-designer layout
    Form { form_path: String },
}

fn main() {
    init_logger();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Command::Routes {
            permissions_path,
            views,
            flat,
        } => run_routes(&permissions_path, views.as_deref(), flat),
        Command::Nodes {
            workflow_path,
            shape,
        } => {
            let roots = load_roots(&workflow_path, shape);
            print_json(&extract_navigable_nodes_from(&roots));
        }
        Command::BackTargets {
            workflow_path,
            shape,
        } => {
            let roots = load_roots(&workflow_path, shape);
            print_json(&extract_back_targets_from(&roots));
        }
        Command::Annotate {
            workflow_path,
            history_path,
            shape,
            text,
        } => run_annotate(&workflow_path, &history_path, shape, text),
        Command::Form { form_path } => {
            let content = read_file(&form_path);
            let fields: Vec<FormField> = serde_json::from_str(&content)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse form JSON: {}", e)));
            print_json(&form_columns(&fields));
        }
    }

    log::debug!("Finished in {:?}", start.elapsed());
}

fn run_routes(permissions_path: &str, views_path: Option<&str>, flat: bool) {
    let registry = match views_path {
        Some(path) => ViewRegistry::from_manifest_file(path)
            .unwrap_or_else(|e| exit_with_error(&e.to_string())),
        None => {
            log::warn!("No view manifest given; every menu view will be unresolved");
            ViewRegistry::default()
        }
    };
    log::info!("Loaded {} views", registry.len());

    let mut permissions = PermissionNode::list_from_file(permissions_path)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    if flat {
        permissions = PermissionNode::assemble(permissions);
    }

    let converter = RouteConverter::new(&registry);
    let table = RouteTable::build(&converter, &permissions);
    if table.is_fallback() {
        log::info!("Permission list is empty; printing the base routes only");
    }
    print_json(&table.routes());
}

fn run_annotate(workflow_path: &str, history_path: &str, shape: Option<ShapeCli>, text: bool) {
    let roots = load_roots(workflow_path, shape);
    let history: Vec<HistoryRecord> = serde_json::from_str(&read_file(history_path))
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse history JSON: {}", e)));
    log::info!(
        "Annotating {} root(s) with {} history records",
        roots.len(),
        history.len()
    );

    let annotated: Vec<AnnotatedNode> = roots.iter().map(|root| annotate(root, &history)).collect();
    if text {
        for root in &annotated {
            println!("{}", StatusFormatter::format_tree(root));
        }
    } else {
        print_json(&annotated);
    }
}

fn load_roots(path: &str, shape: Option<ShapeCli>) -> Vec<WorkflowNode> {
    load_workflow(path, shape.map(WorkflowShape::from))
        .unwrap_or_else(|e| exit_with_error(&e.to_string()))
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)))
}

fn print_json<T: Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize output: {}", e)));
    println!("{}", json);
}

/// Logs to stderr so stdout stays machine readable. Level comes from `RUST_LOG`, default `info`.
fn init_logger() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::BrightBlack);

    let result = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply();

    if let Err(e) = result {
        eprintln!("Failed to initialize logger: {}", e);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
