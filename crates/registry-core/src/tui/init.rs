//! `init` workflow: write the project configuration

use crate::config::{ProjectConfig, CONFIG_FILE};
use anyhow::{Context, Result};

/// Arguments for the init command
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Use the default configuration without prompting
    pub yes: bool,
}

pub async fn run_init(args: InitArgs) -> Result<()> {
    cliclack::intro("vueblocks init")?;

    let cwd = std::env::current_dir().context("cannot determine working directory")?;

    if cwd.join(CONFIG_FILE).exists() {
        let overwrite: bool = cliclack::confirm(format!("{} already exists. Overwrite?", CONFIG_FILE))
            .initial_value(false)
            .interact()?;
        if !overwrite {
            cliclack::outro("Initialization cancelled.")?;
            return Ok(());
        }
    }

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

        let css_path: String = cliclack::input("Where is your global CSS file?")
            .placeholder("src/css/style.css")
            .default_input("src/css/style.css")
            .interact()?;

        let css_variables: bool = cliclack::confirm("Use CSS variables for theming?")
            .initial_value(true)
            .interact()?;

        config.style = style.to_string();
        config.tailwind.base_color = base_color.to_string();
        config.tailwind.css = css_path;
        config.tailwind.css_variables = css_variables;
    }

    config.save(&cwd).await?;

    cliclack::log::success(format!("Configuration saved to {}", CONFIG_FILE))?;
    cliclack::outro("You can now add components: vueblocks add button")?;

    Ok(())
}
