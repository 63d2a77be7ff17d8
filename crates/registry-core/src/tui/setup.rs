//! `setup` workflow: create a new Vue 3 project wired for the registry
//!
//! Runs the project bootstrap end to end: `create-vue`, Tailwind v4, Vite
//! wiring, shadcn-vue init, and finally the registry configuration.

use crate::config::ProjectConfig;
use crate::package_manager::{run_command, PackageManager};
use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;
use tokio::fs;

/// Arguments for the setup command
#[derive(Debug, Clone, Default)]
pub struct SetupArgs {
    /// Name of the project directory
    pub project_name: Option<String>,

    /// Use the default configuration without prompting
    pub yes: bool,
}

pub async fn run_setup(args: SetupArgs) -> Result<()> {
    cliclack::intro("vueblocks setup")?;

    let name = match args.project_name {
        Some(name) => name,
        None => cliclack::input("Project name")
            .placeholder("my-vue-app")
            .default_input("my-vue-app")
            .interact()?,
    };

    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let project_path = cwd.join(&name);
    if project_path.exists() {
        anyhow::bail!("directory \"{name}\" already exists");
    }

    // Step 1: create the Vue project
    let spinner = cliclack::spinner();
    spinner.start("Creating Vue 3 project...");
    let create_args: Vec<String> = [
        "create",
        "vue@latest",
        name.as_str(),
        "--",
        "--typescript",
        "--router",
        "--pinia",
        "--eslint",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    match run_command("pnpm", &create_args, &cwd).await {
        Ok(()) => spinner.stop("Vue 3 project created"),
        Err(e) => {
            spinner.stop("Failed to create Vue project");
            cliclack::log::info("Make sure you have pnpm installed: npm install -g pnpm")?;
            return Err(e);
        }
    }

    // Step 2: Tailwind v4
    let spinner = cliclack::spinner();
    spinner.start("Installing Tailwind CSS v4...");
    let tailwind_packages = vec![
        "tailwindcss@next".to_string(),
        "@tailwindcss/vite@next".to_string(),
    ];
    match PackageManager::Pnpm
        .add_packages(&project_path, &tailwind_packages, false)
        .await
    {
        Ok(()) => spinner.stop("Tailwind CSS v4 installed"),
        Err(e) => {
            spinner.stop("Failed to install Tailwind CSS");
            return Err(e);
        }
    }

    // Step 3: wire Tailwind into vite.config.ts
    let spinner = cliclack::spinner();
    spinner.start("Configuring Tailwind in Vite...");
    match patch_vite_config(&project_path).await {
        Ok(()) => spinner.stop("Tailwind configured in Vite"),
        Err(e) => {
            spinner.stop("Failed to configure Tailwind in Vite");
            return Err(e);
        }
    }

    // Step 4: css entry + main.ts repoint
    let spinner = cliclack::spinner();
    spinner.start("Creating Tailwind CSS file...");
    match write_css_entry(&project_path).await {
        Ok(()) => spinner.stop("Tailwind CSS file created"),
        Err(e) => {
            spinner.stop("Failed to create Tailwind CSS file");
            return Err(e);
        }
    }

    // Step 5: shadcn-vue init (non-fatal)
    let spinner = cliclack::spinner();
    spinner.start("Initializing shadcn-vue...");
    match PackageManager::Pnpm
        .dlx(&project_path, "shadcn-vue@latest", &["init", "-y"])
        .await
    {
        Ok(()) => spinner.stop("shadcn-vue initialized"),
        Err(_) => {
            spinner.stop("Failed to initialize shadcn-vue");
            cliclack::log::warning(
                "You may need to run it manually: pnpm dlx shadcn-vue@latest init",
            )?;
        }
    }

    // Step 6: registry configuration
    let mut config = ProjectConfig::default();
    if !args.yes {
        let style: &str = cliclack::select("Which style would you like to use?")
            .item("new-york", "New York", "")
            .item("default", "Default", "")
            .interact()?;

        let base_color: &str = cliclack::select("Which color would you like to use as base color?")
            .item("neutral", "Neutral", "")
            .item("gray", "Gray", "")
            .item("zinc", "Zinc", "")
            .item("stone", "Stone", "")
            .item("slate", "Slate", "")
            .interact()?;

        let css_variables: bool = cliclack::confirm("Use CSS variables for theming?")
            .initial_value(true)
            .interact()?;

        config.style = style.to_string();
        config.tailwind.base_color = base_color.to_string();
        config.tailwind.css_variables = css_variables;
    }
    config.save(&project_path).await?;
    cliclack::log::success("Registry configuration written")?;

    println!();
    println!("  Next steps");
    println!();
    println!("  1.  cd {name}");
    println!("  2.  pnpm install");
    println!("  3.  pnpm dev");
    println!();
    println!("  Add components:       vueblocks add button");
    println!("  Generate foundations: vueblocks scaffold");

    cliclack::outro(format!("Project \"{name}\" created successfully!"))?;
    Ok(())
}

/// Insert the Tailwind plugin into the generated `vite.config.ts`.
async fn patch_vite_config(project: &Path) -> Result<()> {
    let path = project.join("vite.config.ts");
    let content = fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    if content.contains("@tailwindcss/vite") {
        return Ok(());
    }

    let content = content.replacen(
        "import vue from '@vitejs/plugin-vue'",
        "import vue from '@vitejs/plugin-vue'\nimport tailwindcss from '@tailwindcss/vite'",
        1,
    );
    let plugins_re = Regex::new(r"plugins:\s*\[").expect("hard-coded pattern");
    let content = plugins_re
        .replace(&content, "plugins: [\n    tailwindcss(),")
        .into_owned();

    fs::write(&path, content)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Create the Tailwind css entry and point `main.ts` at it.
async fn write_css_entry(project: &Path) -> Result<()> {
    let css_dir = project.join("src/css");
    fs::create_dir_all(&css_dir)
        .await
        .with_context(|| format!("failed to create {}", css_dir.display()))?;
    fs::write(
        css_dir.join("style.css"),
        "@import \"tailwindcss\";\n\n/* Your custom styles here */\n",
    )
    .await
    .context("failed to write src/css/style.css")?;

    let main_ts = project.join("src/main.ts");
    let content = fs::read_to_string(&main_ts)
        .await
        .with_context(|| format!("failed to read {}", main_ts.display()))?;
    let content = content.replacen(
        "import './assets/main.css'",
        "import './css/style.css'",
        1,
    );
    fs::write(&main_ts, content)
        .await
        .with_context(|| format!("failed to write {}", main_ts.display()))
}
