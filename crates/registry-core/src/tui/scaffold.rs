//! `scaffold` workflow: generate foundational project files

use crate::config::ProjectConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// A foundational file the CLI can generate from an embedded template.
struct ScaffoldFile {
    name: &'static str,
    description: &'static str,
    content: &'static str,
    target: &'static str,
}

const SCAFFOLD_FILES: &[ScaffoldFile] = &[
    ScaffoldFile {
        name: "main.ts",
        description: "Main entry file with Pinia, Router, Vue Query, i18n, and vTooltip",
        content: include_str!("../../templates/main.ts.template"),
        target: "src/main.ts",
    },
    ScaffoldFile {
        name: "App.vue",
        description: "Root App component with RouterView and Toaster",
        content: include_str!("../../templates/App.vue.template"),
        target: "src/App.vue",
    },
];

/// Arguments for the scaffold command
#[derive(Debug, Clone, Default)]
pub struct ScaffoldArgs {
    /// Generate all foundational files without selecting
    pub all: bool,

    /// Overwrite existing files
    pub overwrite: bool,

    /// Skip confirmation prompts
    pub yes: bool,
}

pub async fn run_scaffold(args: ScaffoldArgs) -> Result<()> {
    cliclack::intro("vueblocks scaffold")?;

    let cwd = std::env::current_dir().context("cannot determine working directory")?;

    if ProjectConfig::load(&cwd).await?.is_none() {
        cliclack::log::error("components.json not found.")?;
        cliclack::outro("Run \"vueblocks init\" first to initialize your project.")?;
        anyhow::bail!("project is not initialized");
    }

    let selected: Vec<&ScaffoldFile> = if args.all {
        SCAFFOLD_FILES.iter().collect()
    } else {
        let mut multi = cliclack::multiselect("Select files to generate");
        for (idx, file) in SCAFFOLD_FILES.iter().enumerate() {
            multi = multi.item(idx, file.name, file.description);
        }
        let picked: Vec<usize> = multi.interact()?;
        picked.into_iter().map(|i| &SCAFFOLD_FILES[i]).collect()
    };

    if selected.is_empty() {
        cliclack::outro("No files selected.")?;
        return Ok(());
    }

    cliclack::log::info(format!(
        "Files to generate: {}",
        selected
            .iter()
            .map(|f| f.name)
            .collect::<Vec<_>>()
            .join(", ")
    ))?;

    let existing: Vec<&str> = selected
        .iter()
        .filter(|f| cwd.join(f.target).exists())
        .map(|f| f.name)
        .collect();

    if !existing.is_empty() && !args.overwrite {
        cliclack::log::warning(format!(
            "The following files already exist: {}",
            existing.join(", ")
        ))?;

        if !args.yes {
            let overwrite: bool = cliclack::confirm("Overwrite existing files?")
                .initial_value(false)
                .interact()?;
            if !overwrite {
                cliclack::outro("Cancelled. No files were generated.")?;
                return Ok(());
            }
        }
    }

    if !args.yes {
        let proceed: bool = cliclack::confirm("Proceed with file generation?")
            .initial_value(true)
            .interact()?;
        if !proceed {
            cliclack::outro("Generation cancelled.")?;
            return Ok(());
        }
    }

    for file in &selected {
        let target = cwd.join(file.target);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&target, file.content)
            .await
            .with_context(|| format!("failed to write {}", target.display()))?;
        cliclack::log::success(format!("Generated {}", file.name))?;
    }

    cliclack::log::info(
        "Next steps:\n\
          1. Review the generated files\n\
          2. Install required dependencies if not already installed:\n\
            @tanstack/vue-query, floating-vue, pinia, vue-router, vue-sonner\n\
         3. Make sure the sonner component is installed: vueblocks add sonner",
    )?;
    cliclack::outro("Foundational files generated.")?;

    Ok(())
}
