//! Interactive command workflows built on cliclack
//!
//! Each submodule implements one CLI command end to end: prompts, registry
//! access, resolution, and installation. The binaries only parse arguments
//! and dispatch here.

pub mod add;
pub mod init;
pub mod list;
pub mod scaffold;
pub mod setup;

pub use add::{run_add, AddArgs};
pub use init::{run_init, InitArgs};
pub use list::{run_list, ListArgs};
pub use scaffold::{run_scaffold, ScaffoldArgs};
pub use setup::{run_setup, SetupArgs};

use crate::registry::RegistryClient;
use anyhow::Result;
use std::path::PathBuf;

/// Client for the remote registry, or a local checkout when one was given.
pub(crate) fn setup_client(registry_dir: &Option<PathBuf>) -> Result<RegistryClient> {
    match registry_dir {
        Some(path) => {
            cliclack::log::info(format!("Using local registry from {}", path.display()))?;
            Ok(RegistryClient::from_local(path.clone()))
        }
        None => Ok(RegistryClient::from_env()?),
    }
}
