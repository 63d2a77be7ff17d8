//! Package-manager detection and invocation
//!
//! Detection looks for lock files in order of preference (pnpm, yarn, npm)
//! and defaults to pnpm. Command construction is kept separate from
//! spawning so it stays testable.

use anyhow::Result;
use std::path::Path;
use tokio::process::Command;

/// Supported JavaScript package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Pnpm,
    Yarn,
    Npm,
}

impl PackageManager {
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    /// Detect the package manager used in a project by its lock file.
    pub fn detect(cwd: &Path) -> Self {
        if cwd.join("pnpm-lock.yaml").exists() {
            return PackageManager::Pnpm;
        }
        if cwd.join("yarn.lock").exists() {
            return PackageManager::Yarn;
        }
        if cwd.join("package-lock.json").exists() {
            return PackageManager::Npm;
        }
        PackageManager::Pnpm
    }

    /// Arguments for adding packages (`pnpm add` / `yarn add` / `npm install`).
    pub fn add_args(&self, packages: &[String], dev: bool) -> Vec<String> {
        let mut args = vec![match self {
            PackageManager::Npm => "install",
            _ => "add",
        }
        .to_string()];

        if dev {
            args.push(
                match self {
                    PackageManager::Npm => "--save-dev",
                    _ => "-D",
                }
                .to_string(),
            );
        }

        args.extend(packages.iter().cloned());
        args
    }

    /// Run the package manager to add dependencies to the project.
    pub async fn add_packages(&self, cwd: &Path, packages: &[String], dev: bool) -> Result<()> {
        run_command(self.command(), &self.add_args(packages, dev), cwd).await
    }

    /// Execute a package through dlx: `pnpm dlx` / `yarn dlx` / `npx`.
    pub async fn dlx(&self, cwd: &Path, package: &str, args: &[&str]) -> Result<()> {
        let mut full_args: Vec<String> = Vec::new();
        let program = match self {
            PackageManager::Npm => "npx",
            _ => {
                full_args.push("dlx".to_string());
                self.command()
            }
        };
        full_args.push(package.to_string());
        full_args.extend(args.iter().map(|a| a.to_string()));

        run_command(program, &full_args, cwd).await
    }
}

/// Spawn a command, capturing output; failures carry the process's stderr.
pub async fn run_command(program: &str, args: &[String], cwd: &Path) -> Result<()> {
    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .await
        .map_err(|e| anyhow::anyhow!("failed to run {}: {}", program, e))?;

    if !output.status.success() {
        anyhow::bail!(
            "{} {} exited with {}:\n{}",
            program,
            args.join(" "),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}
