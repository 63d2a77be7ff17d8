//! Registry Core - shared library behind the vueblocks CLI
//!
//! Installs Vue components, features, and bundles from a blocks registry
//! into a user's project, rewriting imports to match the project's aliases.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Registry access** - document schema plus a remote/local registry client
//! - **Dependency resolution** - install-order computation over registry items,
//!   with circular and missing dependency detection
//! - **Installation** - import rewriting and file placement in the project tree
//! - **TUI** - cliclack-based command workflows (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based command workflows
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use registry_core::{DependencyResolver, RegistryClient};
//!
//! let client = RegistryClient::from_env()?;
//! let registry = client.fetch_registry().await?;
//! let resolver = DependencyResolver::new(registry.all_items());
//! let plan = resolver.resolve("login-form");
//! ```

pub mod config;
pub mod install;
pub mod package_manager;
pub mod registry;
pub mod resolver;
pub mod version;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::ProjectConfig;
pub use package_manager::PackageManager;
pub use registry::{Registry, RegistryClient, RegistryItem, RegistrySource};
pub use resolver::{DependencyResolution, DependencyResolver};
