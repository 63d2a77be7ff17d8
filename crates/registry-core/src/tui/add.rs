//! `add` workflow: resolve and install registry items
//!
//! The registry index is fetched once, the dependency resolver computes the
//! install plan for each requested item, and the installer writes files in
//! plan order. Items the registry does not know are handed to shadcn-vue.

use super::setup_client;
use crate::config::ProjectConfig;
use crate::install::{install_item_files, InstallReport};
use crate::package_manager::PackageManager;
use crate::registry::RegistryClient;
use crate::resolver::DependencyResolver;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Arguments for the add command
#[derive(Debug, Clone, Default)]
pub struct AddArgs {
    /// Names of the components to add
    pub components: Vec<String>,

    /// Local registry checkout instead of the remote registry
    pub registry_dir: Option<PathBuf>,

    /// Overwrite existing files
    pub overwrite: bool,

    /// Skip confirmation prompts
    pub yes: bool,
}

pub async fn run_add(args: AddArgs) -> Result<()> {
    cliclack::intro("vueblocks add")?;

    let cwd = std::env::current_dir().context("cannot determine working directory")?;

    let Some(config) = ProjectConfig::load(&cwd).await? else {
        cliclack::log::error("components.json not found.")?;
        cliclack::outro("Run \"vueblocks init\" first to initialize your project.")?;
        anyhow::bail!("project is not initialized");
    };

    let mut components = args.components.clone();
    if components.is_empty() {
        let component: String = cliclack::input("Which component would you like to add?")
            .placeholder("button")
            .interact()?;
        if component.trim().is_empty() {
            cliclack::outro("No component selected.")?;
            return Ok(());
        }
        components = vec![component.trim().to_string()];
    }

    let mut client = setup_client(&args.registry_dir)?;

    let spinner = cliclack::spinner();
    spinner.start("Fetching registry index...");
    let registry = match client.fetch_registry().await {
        Ok(registry) => registry,
        Err(e) => {
            spinner.stop("Failed to fetch registry");
            return Err(e.into());
        }
    };
    let mut items = registry.all_items();
    spinner.stop(format!("Registry loaded ({} items)", items.len()));

    // The index can lag a newly published item; fall back to the per-item
    // endpoint before giving up on a name.
    for name in &components {
        if !items.iter().any(|i| &i.name == name) {
            if let Some(item) = client.fetch_item(name).await? {
                items.push(item);
            }
        }
    }

    let resolver = DependencyResolver::new(items);

    for name in &components {
        install_component(&client, &resolver, name, &cwd, &config, &args).await?;
    }

    cliclack::outro("Done!")?;
    Ok(())
}

async fn install_component(
    client: &RegistryClient,
    resolver: &DependencyResolver,
    name: &str,
    cwd: &Path,
    config: &ProjectConfig,
    args: &AddArgs,
) -> Result<()> {
    if resolver.item(name).is_none() {
        return install_from_shadcn(name, cwd).await;
    }

    let resolution = resolver.resolve(name);

    if let Some(missing) = &resolution.missing_dependencies {
        cliclack::log::warning(format!(
            "Missing registry dependencies: {}",
            missing.join(", ")
        ))?;
    }
    if let Some(cycles) = &resolution.circular_dependencies {
        for cycle in cycles {
            cliclack::log::warning(format!("Circular dependency: {}", cycle.join(" -> ")))?;
        }
    }

    cliclack::log::info(format!(
        "Components to install: {}",
        resolution.install_order.join(", ")
    ))?;
    if !resolution.npm_packages.is_empty() {
        cliclack::log::info(format!(
            "NPM dependencies: {}",
            resolution.npm_packages.join(", ")
        ))?;
    }

    if !args.yes {
        let proceed: bool = cliclack::confirm("Proceed with installation?")
            .initial_value(true)
            .interact()?;
        if !proceed {
            cliclack::log::warning("Installation cancelled.")?;
            return Ok(());
        }
    }

    if !resolution.npm_packages.is_empty() {
        let pm = PackageManager::detect(cwd);
        let spinner = cliclack::spinner();
        spinner.start(format!("Installing dependencies with {}...", pm.command()));
        match pm.add_packages(cwd, &resolution.npm_packages, false).await {
            Ok(()) => spinner.stop("Dependencies installed"),
            Err(e) => {
                spinner.stop("Failed to install dependencies");
                return Err(e);
            }
        }
    }

    for dep_name in &resolution.install_order {
        let Some(item) = resolver.item(dep_name) else {
            continue;
        };

        let spinner = cliclack::spinner();
        spinner.start(format!("Installing {dep_name}..."));
        match install_item_files(client, item, cwd, config, args.overwrite).await {
            Ok(report) => {
                spinner.stop(format!(
                    "Installed {dep_name} ({} files)",
                    report.written.len()
                ));
                report_outcomes(&report, cwd)?;
            }
            Err(e) => {
                spinner.stop(format!("Failed to install {dep_name}"));
                return Err(e);
            }
        }
    }

    Ok(())
}

/// Hand a name the registry does not know over to shadcn-vue.
async fn install_from_shadcn(name: &str, cwd: &Path) -> Result<()> {
    cliclack::log::info(format!(
        "\"{name}\" not found in the blocks registry, trying shadcn-vue..."
    ))?;

    let pm = PackageManager::detect(cwd);
    match pm.dlx(cwd, "shadcn-vue@latest", &["add", name, "-y"]).await {
        Ok(()) => {
            cliclack::log::success(format!("Installed {name} from shadcn-vue"))?;
        }
        Err(e) => {
            cliclack::log::error(format!("Failed to install {name} from shadcn-vue: {e}"))?;
            cliclack::log::info(format!(
                "You can try manually: pnpm dlx shadcn-vue@latest add {name}"
            ))?;
        }
    }
    Ok(())
}

fn report_outcomes(report: &InstallReport, cwd: &Path) -> Result<()> {
    for path in &report.skipped {
        let rel = path.strip_prefix(cwd).unwrap_or(path);
        cliclack::log::warning(format!(
            "Skipped {} (already exists, use --overwrite)",
            rel.display()
        ))?;
    }
    for (path, imports) in &report.unresolved_imports {
        let rel = path.strip_prefix(cwd).unwrap_or(path);
        cliclack::log::warning(format!(
            "Unresolved registry imports in {}: {}",
            rel.display(),
            imports.join(", ")
        ))?;
    }
    Ok(())
}
