//! Registry schema and fetching
//!
//! This module provides:
//! - Registry document types (Registry, RegistryItem, RegistryFile)
//! - Fetching from the remote registry or a local checkout

pub mod client;
pub mod schema;

pub use client::{
    RegistryClient, RegistryError, RegistrySource, DEFAULT_REGISTRY_URL, REGISTRY_URL_ENV,
};
pub use schema::{CssVars, Registry, RegistryFile, RegistryItem, RegistryItemType};
