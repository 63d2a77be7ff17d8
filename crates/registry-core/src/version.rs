//! Version comparison between the CLI and a registry snapshot

use semver::Version;

/// Upgrade/install command shown in version warnings.
pub const UPGRADE_COMMAND: &str = "cargo install vueblocks-tools --force";

/// Compare the CLI version against the registry snapshot version.
/// Returns a warning message if the CLI is older than the registry expects.
pub fn check_compatibility(
    cli_version: &str,
    registry_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli_ver = parse_version(cli_version)?;
    let registry_ver = parse_version(registry_version)?;

    if cli_ver < registry_ver {
        Some(format!(
            "Warning: This registry snapshot targets CLI version {} or newer.\n\
             You are running version {}.\n\
             Consider updating: {}",
            registry_version, cli_version, upgrade_command
        ))
    } else {
        None
    }
}

/// Parse a version string, tolerating a leading `v`.
fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned).ok()
}
