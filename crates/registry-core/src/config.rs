//! Project configuration (`components.json`)
//!
//! Written by `init` (or `setup`) and read by every command that touches
//! the project tree. The shape matches the shadcn-vue configuration file so
//! both tools can share one config.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// File name of the project configuration, relative to the project root.
pub const CONFIG_FILE: &str = "components.json";

const CONFIG_SCHEMA_URL: &str = "https://shadcn-vue.com/schema.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Import aliases configured in the user's project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aliases {
    pub components: String,
    pub utils: String,
    pub ui: String,
    pub lib: String,
    pub composables: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailwindConfig {
    pub config: String,
    pub css: String,
    pub base_color: String,
    pub css_variables: bool,
    pub prefix: String,
}

/// The project configuration stored in `components.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    pub style: String,
    pub typescript: bool,
    pub tailwind: TailwindConfig,
    pub icon_library: String,
    pub aliases: Aliases,

    /// Additional registries, keyed by namespace
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub registries: IndexMap<String, String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            schema: Some(CONFIG_SCHEMA_URL.to_string()),
            style: "new-york".to_string(),
            typescript: true,
            tailwind: TailwindConfig {
                config: String::new(),
                css: "src/css/style.css".to_string(),
                base_color: "neutral".to_string(),
                css_variables: true,
                prefix: String::new(),
            },
            icon_library: "lucide".to_string(),
            aliases: Aliases {
                components: "@/components".to_string(),
                utils: "@/lib/utils".to_string(),
                ui: "@/components/ui".to_string(),
                lib: "@/lib".to_string(),
                composables: "@/composables".to_string(),
            },
            registries: IndexMap::new(),
        }
    }
}

impl ProjectConfig {
    /// Read the configuration from a project directory. `Ok(None)` when the
    /// project has not been initialized.
    pub async fn load(cwd: &Path) -> Result<Option<Self>, ConfigError> {
        let path = cwd.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| ConfigError::Parse { path, source })
    }

    /// Write the configuration into a project directory, pretty-printed.
    pub async fn save(&self, cwd: &Path) -> Result<(), ConfigError> {
        let path = cwd.join(CONFIG_FILE);
        let mut text = serde_json::to_string_pretty(self)
            .map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        text.push('\n');
        fs::write(&path, text)
            .await
            .map_err(|source| ConfigError::Io { path, source })
    }
}
