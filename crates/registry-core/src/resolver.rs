//! Dependency resolution for registry items
//!
//! Builds an in-memory graph from a registry snapshot and computes install
//! order via depth-first traversal, with circular and missing dependency
//! detection. Cycles and missing references are reported as data on the
//! result, never as errors: the caller decides whether they are fatal.

use crate::registry::RegistryItem;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;

/// A node in the dependency graph, derived from one registry item.
#[derive(Debug, Clone)]
struct DependencyNode {
    /// npm package names; accumulated into the resolution, never traversed
    dependencies: Vec<String>,
    /// References to other registry items by name, or absolute URLs
    registry_dependencies: Vec<String>,
}

/// Result of resolving one item, or the whole registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyResolution {
    /// Item names in installation order: dependencies before dependents.
    pub install_order: Vec<String>,

    /// Deduplicated npm packages across every visited item.
    pub npm_packages: Vec<String>,

    /// Cycle paths encountered during traversal, if any. Each path runs
    /// from the traversal root to the back-edge, closed by the revisited
    /// name (`["a", "b", "a"]` for a two-node loop reached from `a`).
    pub circular_dependencies: Option<Vec<Vec<String>>>,

    /// Referenced item names absent from the registry, if any.
    pub missing_dependencies: Option<Vec<String>>,
}

/// Transient bookkeeping for a single traversal. Every public operation
/// starts from a fresh state, so the resolver itself never mutates.
#[derive(Default)]
struct TraversalState {
    install_order: Vec<String>,
    npm_packages: IndexSet<String>,
    visited: HashSet<String>,
    visiting: HashSet<String>,
    circular: Vec<Vec<String>>,
    missing: Vec<String>,
}

impl TraversalState {
    fn into_resolution(self) -> DependencyResolution {
        DependencyResolution {
            install_order: self.install_order,
            npm_packages: self.npm_packages.into_iter().collect(),
            circular_dependencies: (!self.circular.is_empty()).then_some(self.circular),
            missing_dependencies: (!self.missing.is_empty()).then_some(self.missing),
        }
    }
}

/// Dependency resolver for registry items.
///
/// Construction snapshots the items into a name-indexed graph; duplicate
/// names overwrite (last one wins), and invalid references are only
/// detected lazily during traversal.
pub struct DependencyResolver {
    registry: IndexMap<String, RegistryItem>,
    nodes: IndexMap<String, DependencyNode>,
}

impl DependencyResolver {
    pub fn new(items: Vec<RegistryItem>) -> Self {
        let mut registry = IndexMap::new();
        let mut nodes = IndexMap::new();

        for item in items {
            nodes.insert(
                item.name.clone(),
                DependencyNode {
                    dependencies: item.dependencies.clone().unwrap_or_default(),
                    registry_dependencies: item.registry_dependencies.clone().unwrap_or_default(),
                },
            );
            registry.insert(item.name.clone(), item);
        }

        Self { registry, nodes }
    }

    /// Look up the full registry item backing a resolved name.
    pub fn item(&self, name: &str) -> Option<&RegistryItem> {
        self.registry.get(name)
    }

    /// Resolve dependencies for a given item.
    ///
    /// Returns the item and its transitive local registry dependencies in
    /// installation order, together with the npm packages they pull in.
    /// URL-form registry dependencies are treated as already satisfied and
    /// skipped. A name with no node in the graph (including the requested
    /// root) is recorded once in `missing_dependencies`.
    pub fn resolve(&self, item_name: &str) -> DependencyResolution {
        let mut state = TraversalState::default();
        self.visit(item_name, &mut Vec::new(), &mut state);
        state.into_resolution()
    }

    fn visit(&self, name: &str, path: &mut Vec<String>, state: &mut TraversalState) {
        let Some(node) = self.nodes.get(name) else {
            if !state.missing.iter().any(|m| m == name) {
                state.missing.push(name.to_string());
            }
            return;
        };

        // Back-edge into the active stack closes a cycle
        if state.visiting.contains(name) {
            let mut cycle = path.clone();
            cycle.push(name.to_string());
            state.circular.push(cycle);
            return;
        }

        // Already fully processed through some other path
        if state.visited.contains(name) {
            return;
        }

        state.visiting.insert(name.to_string());

        for dep in &node.dependencies {
            state.npm_packages.insert(dep.clone());
        }

        path.push(name.to_string());
        for dep in &node.registry_dependencies {
            if is_external_url(dep) {
                continue;
            }
            self.visit(dep, path, state);
        }
        path.pop();

        state.visiting.remove(name);
        state.visited.insert(name.to_string());
        state.install_order.push(name.to_string());
    }

    /// Resolve every item in the registry in one pass.
    ///
    /// Roots iterate in registry insertion order, sharing one visited set,
    /// so each item lands exactly once in `install_order` with its
    /// dependencies ahead of it. Unlike [`DependencyResolver::resolve`],
    /// references to unknown names are skipped silently here;
    /// `missing_dependencies` is always `None` on this path.
    pub fn resolve_all(&self) -> DependencyResolution {
        let mut state = TraversalState::default();
        for name in self.nodes.keys() {
            self.visit_all(name, &mut Vec::new(), &mut state);
        }
        state.into_resolution()
    }

    fn visit_all(&self, name: &str, path: &mut Vec<String>, state: &mut TraversalState) {
        let Some(node) = self.nodes.get(name) else {
            return;
        };
        if state.visited.contains(name) {
            return;
        }

        if path.iter().any(|p| p == name) {
            let mut cycle = path.clone();
            cycle.push(name.to_string());
            state.circular.push(cycle);
            return;
        }

        for dep in &node.dependencies {
            state.npm_packages.insert(dep.clone());
        }

        path.push(name.to_string());
        for dep in &node.registry_dependencies {
            if !is_external_url(dep) {
                self.visit_all(dep, path, state);
            }
        }
        path.pop();

        state.visited.insert(name.to_string());
        state.install_order.push(name.to_string());
    }

    /// Every name transitively reachable from `item_name` through local
    /// registry dependencies, excluding `item_name` itself, in
    /// first-discovery order. Referenced names with no node still appear:
    /// they are discovered as edges even though they cannot be descended.
    pub fn get_all_dependencies(&self, item_name: &str) -> Vec<String> {
        let mut result = IndexSet::new();
        let mut visited = HashSet::new();
        self.collect_dependencies(item_name, &mut result, &mut visited);
        result.into_iter().collect()
    }

    fn collect_dependencies(
        &self,
        name: &str,
        result: &mut IndexSet<String>,
        visited: &mut HashSet<String>,
    ) {
        if !visited.insert(name.to_string()) {
            return;
        }
        let Some(node) = self.nodes.get(name) else {
            return;
        };
        for dep in &node.registry_dependencies {
            if is_external_url(dep) {
                continue;
            }
            result.insert(dep.clone());
            self.collect_dependencies(dep, result, visited);
        }
    }

    /// Whether any cycle exists anywhere in the graph. Pure predicate over
    /// a fresh traversal, short-circuiting on the first cycle found; safe
    /// to call repeatedly.
    pub fn has_circular_dependencies(&self) -> bool {
        let mut visited = HashSet::new();
        let mut visiting = HashSet::new();
        self.nodes
            .keys()
            .any(|name| self.has_cycle(name, &mut visited, &mut visiting))
    }

    fn has_cycle(
        &self,
        name: &str,
        visited: &mut HashSet<String>,
        visiting: &mut HashSet<String>,
    ) -> bool {
        if visiting.contains(name) {
            return true;
        }
        if visited.contains(name) {
            return false;
        }

        visiting.insert(name.to_string());
        if let Some(node) = self.nodes.get(name) {
            for dep in &node.registry_dependencies {
                if !is_external_url(dep) && self.has_cycle(dep, visited, visiting) {
                    return true;
                }
            }
        }
        visiting.remove(name);
        visited.insert(name.to_string());
        false
    }
}

/// Registry dependencies in URL form point outside the local registry and
/// are treated as already satisfied.
fn is_external_url(dep: &str) -> bool {
    dep.starts_with("http://") || dep.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryItemType;

    fn item(name: &str, npm: &[&str], registry: &[&str]) -> RegistryItem {
        RegistryItem {
            name: name.to_string(),
            kind: RegistryItemType::Ui,
            dependencies: (!npm.is_empty())
                .then(|| npm.iter().map(|s| s.to_string()).collect()),
            registry_dependencies: (!registry.is_empty())
                .then(|| registry.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    #[test]
    fn test_single_item_without_dependencies() {
        let resolver = DependencyResolver::new(vec![item("button", &[], &[])]);
        let result = resolver.resolve("button");

        assert_eq!(result.install_order, ["button"]);
        assert!(result.npm_packages.is_empty());
        assert!(result.circular_dependencies.is_none());
        assert!(result.missing_dependencies.is_none());
    }

    #[test]
    fn test_collects_npm_packages() {
        let resolver =
            DependencyResolver::new(vec![item("api-client", &["axios", "zod"], &[])]);
        let result = resolver.resolve("api-client");

        assert_eq!(result.npm_packages, ["axios", "zod"]);
    }

    #[test]
    fn test_npm_packages_deduplicated_across_items() {
        let resolver = DependencyResolver::new(vec![
            item("utils", &["clsx", "tailwind-merge"], &[]),
            item("button", &["clsx"], &["utils"]),
        ]);
        let result = resolver.resolve("button");

        assert_eq!(result.npm_packages, ["clsx", "tailwind-merge"]);
    }

    #[test]
    fn test_registry_dependencies_come_first() {
        let resolver = DependencyResolver::new(vec![
            item("utils", &[], &[]),
            item("button", &[], &["utils"]),
        ]);
        let result = resolver.resolve("button");

        assert_eq!(result.install_order, ["utils", "button"]);
    }

    #[test]
    fn test_nested_chain_resolves_bottom_up() {
        let resolver = DependencyResolver::new(vec![
            item("utils", &[], &[]),
            item("api-client", &[], &["utils"]),
            item("auth-service", &[], &["api-client"]),
        ]);
        let result = resolver.resolve("auth-service");

        assert_eq!(result.install_order, ["utils", "api-client", "auth-service"]);
    }

    #[test]
    fn test_multiple_dependencies_precede_dependent() {
        let resolver = DependencyResolver::new(vec![
            item("utils", &[], &[]),
            item("button", &[], &[]),
            item("form", &[], &["button", "utils"]),
        ]);
        let result = resolver.resolve("form");

        let pos = |name: &str| {
            result
                .install_order
                .iter()
                .position(|n| n == name)
                .unwrap()
        };
        assert!(pos("button") < pos("form"));
        assert!(pos("utils") < pos("form"));
        // visitation follows the order dependencies are listed on the item
        assert_eq!(result.install_order, ["button", "utils", "form"]);
    }

    #[test]
    fn test_diamond_visited_exactly_once() {
        let resolver = DependencyResolver::new(vec![
            item("d", &[], &[]),
            item("b", &[], &["d"]),
            item("c", &[], &["d"]),
            item("a", &[], &["b", "c"]),
        ]);
        let result = resolver.resolve("a");

        assert_eq!(result.install_order, ["d", "b", "c", "a"]);
        assert_eq!(
            result.install_order.iter().filter(|n| *n == "d").count(),
            1
        );
        assert!(result.circular_dependencies.is_none());
    }

    #[test]
    fn test_two_node_cycle_reported_not_hung() {
        let resolver = DependencyResolver::new(vec![
            item("a", &[], &["b"]),
            item("b", &[], &["a"]),
        ]);
        let result = resolver.resolve("a");

        let cycles = result.circular_dependencies.unwrap();
        assert_eq!(cycles, [["a", "b", "a"]]);
        // both nodes still land in the order exactly once
        assert_eq!(result.install_order, ["b", "a"]);
    }

    #[test]
    fn test_has_circular_dependencies_three_node_loop() {
        let resolver = DependencyResolver::new(vec![
            item("a", &[], &["b"]),
            item("b", &[], &["c"]),
            item("c", &[], &["a"]),
        ]);
        assert!(resolver.has_circular_dependencies());
    }

    #[test]
    fn test_has_circular_dependencies_acyclic() {
        let resolver = DependencyResolver::new(vec![
            item("d", &[], &[]),
            item("b", &[], &["d"]),
            item("c", &[], &["d"]),
            item("a", &[], &["b", "c"]),
        ]);
        assert!(!resolver.has_circular_dependencies());
        // pure predicate, repeatable
        assert!(!resolver.has_circular_dependencies());
    }

    #[test]
    fn test_cycle_unrelated_to_other_nodes_still_detected() {
        let resolver = DependencyResolver::new(vec![
            item("standalone", &[], &[]),
            item("x", &[], &["y"]),
            item("y", &[], &["x"]),
        ]);
        assert!(resolver.has_circular_dependencies());
    }

    #[test]
    fn test_missing_dependency_reported_once() {
        let resolver = DependencyResolver::new(vec![
            item("button", &[], &["utils"]),
            item("card", &[], &["utils"]),
            item("panel", &[], &["button", "card"]),
        ]);
        let result = resolver.resolve("panel");

        assert_eq!(result.missing_dependencies.unwrap(), ["utils"]);
        assert!(!result.install_order.iter().any(|n| n == "utils"));
    }

    #[test]
    fn test_missing_root_reported() {
        let resolver = DependencyResolver::new(vec![item("button", &[], &[])]);
        let result = resolver.resolve("toast");

        assert!(result.install_order.is_empty());
        assert_eq!(result.missing_dependencies.unwrap(), ["toast"]);
    }

    #[test]
    fn test_url_dependencies_skipped_entirely() {
        let resolver = DependencyResolver::new(vec![
            item("utils", &[], &[]),
            item(
                "hello",
                &[],
                &[
                    "utils",
                    "https://example.com/r/hello-world.json",
                    "http://mirror.example.com/r/other.json",
                ],
            ),
        ]);
        let result = resolver.resolve("hello");

        assert_eq!(result.install_order, ["utils", "hello"]);
        assert!(result.missing_dependencies.is_none());
    }

    #[test]
    fn test_resolve_all_orders_whole_registry() {
        let resolver = DependencyResolver::new(vec![
            item("utils", &[], &[]),
            item("button", &[], &["utils"]),
            item("form", &[], &["button"]),
        ]);
        let result = resolver.resolve_all();

        assert_eq!(result.install_order, ["utils", "button", "form"]);
    }

    #[test]
    fn test_resolve_all_respects_cross_references() {
        let resolver = DependencyResolver::new(vec![
            item("utils", &[], &[]),
            item("button", &[], &["utils"]),
            item("form", &[], &["button", "utils"]),
        ]);
        let result = resolver.resolve_all();

        let pos = |name: &str| {
            result
                .install_order
                .iter()
                .position(|n| n == name)
                .unwrap()
        };
        assert!(pos("utils") < pos("button"));
        assert!(pos("button") < pos("form"));
        assert_eq!(result.install_order.len(), 3);
    }

    #[test]
    fn test_resolve_all_does_not_report_missing() {
        let resolver = DependencyResolver::new(vec![item("button", &[], &["utils"])]);
        let result = resolver.resolve_all();

        assert_eq!(result.install_order, ["button"]);
        assert!(result.missing_dependencies.is_none());
    }

    #[test]
    fn test_resolve_all_reports_cycles() {
        let resolver = DependencyResolver::new(vec![
            item("a", &[], &["b"]),
            item("b", &[], &["a"]),
        ]);
        let result = resolver.resolve_all();

        assert!(result.circular_dependencies.is_some());
        assert_eq!(result.install_order.len(), 2);
    }

    #[test]
    fn test_get_all_dependencies_excludes_root() {
        let resolver = DependencyResolver::new(vec![
            item("utils", &[], &[]),
            item("api-client", &[], &["utils"]),
            item("auth-service", &[], &["api-client"]),
        ]);
        let deps = resolver.get_all_dependencies("auth-service");

        assert_eq!(deps, ["api-client", "utils"]);
    }

    #[test]
    fn test_get_all_dependencies_fresh_per_call() {
        let resolver = DependencyResolver::new(vec![
            item("utils", &[], &[]),
            item("button", &[], &["utils"]),
        ]);
        assert_eq!(resolver.get_all_dependencies("button"), ["utils"]);
        assert_eq!(resolver.get_all_dependencies("button"), ["utils"]);
    }

    #[test]
    fn test_duplicate_names_last_one_wins() {
        let resolver = DependencyResolver::new(vec![
            item("utils", &[], &[]),
            item("button", &["old-pkg"], &[]),
            item("button", &["new-pkg"], &["utils"]),
        ]);
        let result = resolver.resolve("button");

        assert_eq!(result.install_order, ["utils", "button"]);
        assert_eq!(result.npm_packages, ["new-pkg"]);
    }

    #[test]
    fn test_item_lookup_returns_snapshot() {
        let resolver = DependencyResolver::new(vec![item("button", &["reka-ui"], &[])]);
        assert_eq!(
            resolver.item("button").unwrap().dependencies.as_deref(),
            Some(&["reka-ui".to_string()][..])
        );
        assert!(resolver.item("toast").is_none());
    }
}
