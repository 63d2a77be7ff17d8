//! Installing registry item files into a project tree

use super::transform::{find_untransformed, transform_imports};
use crate::config::ProjectConfig;
use crate::registry::{RegistryClient, RegistryFile, RegistryItem};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// What happened while installing one item's files.
#[derive(Debug, Default)]
pub struct InstallReport {
    pub written: Vec<PathBuf>,
    /// Existing files left untouched because overwrite was not requested
    pub skipped: Vec<PathBuf>,
    /// `@registry` specifiers that survived rewriting, per written file
    pub unresolved_imports: Vec<(PathBuf, Vec<String>)>,
}

/// Where a registry file lands inside the project.
///
/// An explicit `target` wins (a leading `~/` refers to the project root).
/// The `modules`, `layouts`, and `shared` trees keep their full registry
/// layout under `src/`; `lib` and `composables` map to their aliases, and
/// everything else goes under the components alias.
pub fn target_path(file: &RegistryFile, cwd: &Path, config: &ProjectConfig) -> PathBuf {
    if let Some(target) = &file.target {
        let rel = target.strip_prefix("~/").unwrap_or(target);
        return cwd.join(rel);
    }

    let mut parts = file.path.split('/');
    let first = parts.next().unwrap_or_default();
    match first {
        "modules" | "layouts" | "shared" => cwd.join("src").join(&file.path),
        _ => {
            let alias = match first {
                "lib" => &config.aliases.lib,
                "composables" => &config.aliases.composables,
                _ => &config.aliases.components,
            };
            let base = alias.replacen("@/", "src/", 1);
            let rest: Vec<&str> = parts.collect();
            cwd.join(base).join(rest.join("/"))
        }
    }
}

/// Fetch, transform, and write every file of a registry item.
///
/// Existing files are skipped unless `overwrite` is set; the caller decides
/// how to surface skips and unresolved imports to the user.
pub async fn install_item_files(
    client: &RegistryClient,
    item: &RegistryItem,
    cwd: &Path,
    config: &ProjectConfig,
    overwrite: bool,
) -> Result<InstallReport> {
    let mut report = InstallReport::default();

    for file in &item.files {
        let target = target_path(file, cwd, config);

        if target.exists() && !overwrite {
            report.skipped.push(target);
            continue;
        }

        let raw = match &file.content {
            Some(content) => content.clone(),
            None => client
                .fetch_file(&file.path)
                .await
                .with_context(|| format!("failed to fetch {}", file.path))?,
        };

        let content = transform_imports(&raw, config);
        let leftover = find_untransformed(&content);
        if !leftover.is_empty() {
            report.unresolved_imports.push((target.clone(), leftover));
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&target, content.as_bytes())
            .await
            .with_context(|| format!("failed to write {}", target.display()))?;
        report.written.push(target);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{RegistryItemType, RegistrySource};

    fn file(path: &str) -> RegistryFile {
        RegistryFile {
            path: path.to_string(),
            kind: RegistryItemType::Ui,
            ..Default::default()
        }
    }

    #[test]
    fn test_explicit_target_strips_home_prefix() {
        let f = RegistryFile {
            target: Some("~/src/pages/LoginPage.vue".to_string()),
            ..file("pages/LoginPage.vue")
        };
        let path = target_path(&f, Path::new("/proj"), &ProjectConfig::default());
        assert_eq!(path, Path::new("/proj/src/pages/LoginPage.vue"));
    }

    #[test]
    fn test_module_tree_preserved_under_src() {
        let f = file("modules/auth/composables/useAuth.ts");
        let path = target_path(&f, Path::new("/proj"), &ProjectConfig::default());
        assert_eq!(
            path,
            Path::new("/proj/src/modules/auth/composables/useAuth.ts")
        );
    }

    #[test]
    fn test_shared_tree_preserved_under_src() {
        let f = file("shared/services/apiClient.ts");
        let path = target_path(&f, Path::new("/proj"), &ProjectConfig::default());
        assert_eq!(path, Path::new("/proj/src/shared/services/apiClient.ts"));
    }

    #[test]
    fn test_lib_files_follow_lib_alias() {
        let f = file("lib/utils.ts");
        let path = target_path(&f, Path::new("/proj"), &ProjectConfig::default());
        assert_eq!(path, Path::new("/proj/src/lib/utils.ts"));
    }

    #[test]
    fn test_composables_follow_composables_alias() {
        let f = file("composables/useClipboard.ts");
        let path = target_path(&f, Path::new("/proj"), &ProjectConfig::default());
        assert_eq!(path, Path::new("/proj/src/composables/useClipboard.ts"));
    }

    #[test]
    fn test_components_follow_components_alias() {
        let mut config = ProjectConfig::default();
        config.aliases.components = "@/widgets".to_string();

        let f = file("components/ui/button/Button.vue");
        let path = target_path(&f, Path::new("/proj"), &config);
        assert_eq!(path, Path::new("/proj/src/widgets/ui/button/Button.vue"));
    }

    #[tokio::test]
    async fn test_install_writes_transformed_inline_content() {
        let dir = tempfile::tempdir().unwrap();
        let client = RegistryClient::new(RegistrySource::local(dir.path().join("registry")));
        let config = ProjectConfig::default();

        let item = RegistryItem {
            name: "button".to_string(),
            kind: RegistryItemType::Ui,
            files: vec![RegistryFile {
                content: Some(
                    "import { cn } from '@registry/lib/utils'\n".to_string(),
                ),
                ..file("components/ui/button/Button.vue")
            }],
            ..Default::default()
        };

        let report = install_item_files(&client, &item, dir.path(), &config, false)
            .await
            .unwrap();

        assert_eq!(report.written.len(), 1);
        assert!(report.skipped.is_empty());
        let written = std::fs::read_to_string(&report.written[0]).unwrap();
        assert_eq!(written, "import { cn } from '@/lib/utils'\n");
    }

    #[tokio::test]
    async fn test_install_skips_existing_without_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let client = RegistryClient::new(RegistrySource::local(dir.path().join("registry")));
        let config = ProjectConfig::default();

        let item = RegistryItem {
            name: "button".to_string(),
            kind: RegistryItemType::Ui,
            files: vec![RegistryFile {
                content: Some("new\n".to_string()),
                ..file("components/ui/button/Button.vue")
            }],
            ..Default::default()
        };

        let existing = target_path(&item.files[0], dir.path(), &config);
        std::fs::create_dir_all(existing.parent().unwrap()).unwrap();
        std::fs::write(&existing, "old\n").unwrap();

        let report = install_item_files(&client, &item, dir.path(), &config, false)
            .await
            .unwrap();
        assert_eq!(report.skipped, [existing.clone()]);
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "old\n");

        let report = install_item_files(&client, &item, dir.path(), &config, true)
            .await
            .unwrap();
        assert_eq!(report.written, [existing.clone()]);
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "new\n");
    }
}
