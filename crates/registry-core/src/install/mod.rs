//! Installing registry items into a project
//!
//! This module provides:
//! - Import-specifier rewriting to the project's aliases
//! - Target-path mapping and file installation with overwrite handling

pub mod installer;
pub mod transform;

pub use installer::{install_item_files, target_path, InstallReport};
pub use transform::{find_untransformed, transform_imports};
