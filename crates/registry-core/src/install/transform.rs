//! Import-specifier rewriting for installed component sources
//!
//! Registry sources import through the `@registry/` namespace; on install
//! those specifiers are rewritten to the user's configured aliases:
//!
//! - `@registry/components/ui/button` -> `@/components/ui/button`
//! - `@registry/lib/utils` -> `@/lib/utils`
//! - `@registry/modules/auth/...` -> `@/modules/auth/...`
//! - `@registry/app/layouts/...` -> `@/layouts/...`
//! - `@registry/shared/utils/typeGuards` -> `@/lib/typeGuards`

use crate::config::ProjectConfig;
use regex::Regex;
use std::sync::OnceLock;

/// Rewrite `@registry/` specifiers to the project's aliases. Replacement
/// order matters: the more specific prefixes run before the catch-all
/// `@registry/shared` rewrite.
pub fn transform_imports(content: &str, config: &ProjectConfig) -> String {
    // Module and layout trees keep their structure under the project root
    let mut out = content.replace("@registry/modules", "@/modules");
    out = out.replace("@registry/app/layouts", "@/layouts");

    if !config.aliases.components.is_empty() {
        out = out.replace("@registry/components", &config.aliases.components);
    }
    if !config.aliases.lib.is_empty() {
        out = out.replace("@registry/lib", &config.aliases.lib);
    }

    // Shared utils land next to the user's lib helpers
    let lib_alias = if config.aliases.lib.is_empty() {
        "@/lib"
    } else {
        config.aliases.lib.as_str()
    };
    out = out.replace("@registry/shared/utils", lib_alias);

    // Everything else under shared keeps its structure
    out.replace("@registry/shared", "@/shared")
}

/// Any `@registry/` specifiers that survived [`transform_imports`].
pub fn find_untransformed(content: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"@registry/[\w/.-]+").expect("hard-coded pattern")
    });
    re.find_iter(content).map(|m| m.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_component_and_lib_imports() {
        let config = ProjectConfig::default();
        let source = "import { Button } from '@registry/components/ui/button'\n\
                      import { cn } from '@registry/lib/utils'\n";

        let out = transform_imports(source, &config);
        assert_eq!(
            out,
            "import { Button } from '@/components/ui/button'\n\
             import { cn } from '@/lib/utils'\n"
        );
    }

    #[test]
    fn test_module_and_layout_trees_keep_structure() {
        let config = ProjectConfig::default();
        let source = "import { useAuth } from '@registry/modules/auth/composables/useAuth'\n\
                      import AppLayout from '@registry/app/layouts/AppLayout.vue'\n";

        let out = transform_imports(source, &config);
        assert!(out.contains("'@/modules/auth/composables/useAuth'"));
        assert!(out.contains("'@/layouts/AppLayout.vue'"));
    }

    #[test]
    fn test_shared_utils_map_to_lib_alias() {
        let config = ProjectConfig::default();
        let source = "import { isDefined } from '@registry/shared/utils/typeGuards'\n\
                      import { apiClient } from '@registry/shared/services/apiClient'\n";

        let out = transform_imports(source, &config);
        assert!(out.contains("'@/lib/typeGuards'"));
        assert!(out.contains("'@/shared/services/apiClient'"));
    }

    #[test]
    fn test_respects_custom_aliases() {
        let mut config = ProjectConfig::default();
        config.aliases.components = "~/widgets".to_string();
        config.aliases.lib = "~/support".to_string();

        let out = transform_imports(
            "import { Button } from '@registry/components/ui/button'\n\
             import { cn } from '@registry/lib/utils'\n",
            &config,
        );
        assert!(out.contains("'~/widgets/ui/button'"));
        assert!(out.contains("'~/support/utils'"));
    }

    #[test]
    fn test_find_untransformed_reports_leftovers() {
        let content = "import x from '@/components/x'\n\
                       import y from '@registry/unknown/path.vue'\n";

        assert_eq!(find_untransformed(content), ["@registry/unknown/path.vue"]);
        assert!(find_untransformed("import x from '@/components/x'\n").is_empty());
    }
}
