//! vueblocks CLI - install Vue components, features, and bundles from the
//! blocks registry

use anyhow::Result;
use clap::{Parser, Subcommand};
use registry_core::tui::{self, AddArgs, InitArgs, ListArgs, ScaffoldArgs, SetupArgs};
use std::path::PathBuf;

/// CLI version - compared against the registry snapshot version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "vueblocks")]
#[command(about = "Install Vue components, features, and bundles from the blocks registry")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize your project for the blocks registry
    Init(InitCliArgs),
    /// Add components, features, or bundles to your project
    Add(AddCliArgs),
    /// List all available registry items
    List(ListCliArgs),
    /// Generate foundational project files (main.ts, App.vue)
    Scaffold(ScaffoldCliArgs),
    /// Create a new Vue 3 project wired for the registry
    Setup(SetupCliArgs),
}

#[derive(Parser, Debug)]
struct InitCliArgs {
    /// Use the default configuration without prompting
    #[arg(short, long)]
    yes: bool,
}

impl From<InitCliArgs> for InitArgs {
    fn from(args: InitCliArgs) -> Self {
        InitArgs { yes: args.yes }
    }
}

#[derive(Parser, Debug)]
struct AddCliArgs {
    /// Names of the components to add
    components: Vec<String>,

    /// Local registry checkout instead of the remote registry (for development use)
    #[arg(long = "registry-dir")]
    registry_dir: Option<PathBuf>,

    /// Overwrite existing files
    #[arg(short, long)]
    overwrite: bool,

    /// Skip confirmation prompts
    #[arg(short, long)]
    yes: bool,
}

impl From<AddCliArgs> for AddArgs {
    fn from(args: AddCliArgs) -> Self {
        AddArgs {
            components: args.components,
            registry_dir: args.registry_dir,
            overwrite: args.overwrite,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
struct ListCliArgs {
    /// Local registry checkout instead of the remote registry (for development use)
    #[arg(long = "registry-dir")]
    registry_dir: Option<PathBuf>,

    /// Filter by category
    #[arg(short, long)]
    category: Option<String>,
}

impl From<ListCliArgs> for ListArgs {
    fn from(args: ListCliArgs) -> Self {
        ListArgs {
            registry_dir: args.registry_dir,
            category: args.category,
        }
    }
}

#[derive(Parser, Debug)]
struct ScaffoldCliArgs {
    /// Generate all foundational files
    #[arg(short, long)]
    all: bool,

    /// Overwrite existing files
    #[arg(short, long)]
    overwrite: bool,

    /// Skip confirmation prompts
    #[arg(short, long)]
    yes: bool,
}

impl From<ScaffoldCliArgs> for ScaffoldArgs {
    fn from(args: ScaffoldCliArgs) -> Self {
        ScaffoldArgs {
            all: args.all,
            overwrite: args.overwrite,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
struct SetupCliArgs {
    /// Name of the project directory
    project_name: Option<String>,

    /// Use the default configuration without prompting
    #[arg(short, long)]
    yes: bool,
}

impl From<SetupCliArgs> for SetupArgs {
    fn from(args: SetupCliArgs) -> Self {
        SetupArgs {
            project_name: args.project_name,
            yes: args.yes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let result = match args.command {
        Command::Init(init_args) => tui::run_init(init_args.into()).await,
        Command::Add(add_args) => tui::run_add(add_args.into()).await,
        Command::List(list_args) => tui::run_list(list_args.into(), CLI_VERSION).await,
        Command::Scaffold(scaffold_args) => tui::run_scaffold(scaffold_args.into()).await,
        Command::Setup(setup_args) => tui::run_setup(setup_args.into()).await,
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
