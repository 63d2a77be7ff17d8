//! Registry document types, following the shadcn-vue registry layout
//! extended with feature and bundle items.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Kind of a registry item (or of a single file within one).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistryItemType {
    #[default]
    #[serde(rename = "registry:ui")]
    Ui,
    #[serde(rename = "registry:component")]
    Component,
    #[serde(rename = "registry:block")]
    Block,
    #[serde(rename = "registry:lib")]
    Lib,
    #[serde(rename = "registry:hook")]
    Hook,
    #[serde(rename = "registry:page")]
    Page,
    #[serde(rename = "registry:file")]
    File,
    #[serde(rename = "registry:feature")]
    Feature,
    #[serde(rename = "registry:layout")]
    Layout,
    #[serde(rename = "registry:bundle")]
    Bundle,
}

impl RegistryItemType {
    /// Short label without the `registry:` prefix, for display grouping.
    pub fn label(&self) -> &'static str {
        match self {
            RegistryItemType::Ui => "ui",
            RegistryItemType::Component => "component",
            RegistryItemType::Block => "block",
            RegistryItemType::Lib => "lib",
            RegistryItemType::Hook => "hook",
            RegistryItemType::Page => "page",
            RegistryItemType::File => "file",
            RegistryItemType::Feature => "feature",
            RegistryItemType::Layout => "layout",
            RegistryItemType::Bundle => "bundle",
        }
    }
}

/// One file belonging to a registry item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Path of the file within the registry tree
    pub path: String,

    #[serde(rename = "type")]
    pub kind: RegistryItemType,

    /// Explicit install location, required for page and file kinds.
    /// A leading `~/` refers to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Inlined file content (present in generated registry JSON)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// CSS variables shipped with an item, keyed by theme scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CssVars {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<IndexMap<String, String>>,
}

/// A named, installable unit: component, library, feature, or bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Unique identifier within a registry snapshot
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: RegistryItemType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// npm packages to install alongside this item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,

    /// Other registry items, referenced by name (`button`) or by absolute
    /// URL (`https://example.com/r/hello-world.json`). URL entries point
    /// outside this registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_dependencies: Option<Vec<String>>,

    #[serde(default)]
    pub files: Vec<RegistryFile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_vars: Option<CssVars>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<Vec<String>>,

    /// Installation documentation shown after install
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Map<String, serde_json::Value>>,
}

impl RegistryItem {
    /// Whether the item carries the given category tag.
    pub fn has_category(&self, category: &str) -> bool {
        self.categories
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|c| c == category)
    }
}

/// The registry index (`registry.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    pub name: String,

    /// Snapshot version, compared against the CLI version
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    #[serde(default)]
    pub items: Vec<RegistryItem>,

    /// Legacy layout: items grouped by kind, keyed by name. Superseded by
    /// `items` but still emitted by older registry builds.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub components: IndexMap<String, RegistryItem>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub features: IndexMap<String, RegistryItem>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub bundles: IndexMap<String, RegistryItem>,
}

impl Registry {
    /// Flatten `items` together with the legacy grouped maps. Legacy entries
    /// without a `name` field take their map key as the item name.
    pub fn all_items(&self) -> Vec<RegistryItem> {
        let mut items = self.items.clone();
        for map in [&self.components, &self.features, &self.bundles] {
            for (name, item) in map {
                let mut item = item.clone();
                if item.name.is_empty() {
                    item.name = name.clone();
                }
                items.push(item);
            }
        }
        items
    }
}
