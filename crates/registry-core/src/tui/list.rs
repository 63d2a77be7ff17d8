//! `list` workflow: browse the registry index

use super::setup_client;
use crate::registry::RegistryItem;
use crate::version;
use anyhow::Result;
use colored::Colorize;
use indexmap::IndexMap;
use std::path::PathBuf;

/// Arguments for the list command
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    /// Local registry checkout instead of the remote registry
    pub registry_dir: Option<PathBuf>,

    /// Only show items carrying this category tag
    pub category: Option<String>,
}

pub async fn run_list(args: ListArgs, cli_version: &str) -> Result<()> {
    cliclack::intro("vueblocks list")?;

    let client = setup_client(&args.registry_dir)?;

    let spinner = cliclack::spinner();
    spinner.start("Fetching registry...");
    let registry = match client.fetch_registry().await {
        Ok(registry) => registry,
        Err(e) => {
            spinner.stop("Failed to fetch registry");
            return Err(e.into());
        }
    };
    spinner.stop(format!("Registry loaded: {} {}", registry.name, registry.version));

    if let Some(warning) =
        version::check_compatibility(cli_version, &registry.version, version::UPGRADE_COMMAND)
    {
        cliclack::log::warning(warning.lines().next().unwrap_or(&warning))?;
    }

    let mut items = registry.all_items();
    if let Some(category) = &args.category {
        items.retain(|item| item.has_category(category));
    }

    // Group by kind, keeping first-seen group order
    let mut grouped: IndexMap<&'static str, Vec<&RegistryItem>> = IndexMap::new();
    for item in &items {
        grouped.entry(item.kind.label()).or_default().push(item);
    }

    println!();
    println!("Available components:");
    println!();
    for (label, group) in &grouped {
        println!("{}", label.to_uppercase().cyan().bold());
        for item in group {
            let categories = item
                .categories
                .as_ref()
                .map(|c| format!(" ({})", c.join(", ")))
                .unwrap_or_default();
            println!("  {} {}{}", "•".green(), item.name.green(), categories);
            if let Some(description) = &item.description {
                println!("    {}", description.dimmed());
            }
        }
        println!();
    }

    cliclack::outro(format!("Total: {} items", items.len()))?;
    Ok(())
}
