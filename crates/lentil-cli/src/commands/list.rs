//! `lentil list` command implementation.

use std::path::PathBuf;

use lentil_core::error::{LentilError, LentilResult};
use lentil_manifest::PackageSpec;
use serde::Serialize;

use super::CommandContext;

/// One package row in the listing
#[derive(Serialize)]
struct ListedPackage<'a> {
    name: &'a str,
    constraint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<&'static str>,
}

/// Execute the `lentil list` command
pub async fn execute(
    path: Option<PathBuf>,
    dev: bool,
    json: bool,
    ctx: &CommandContext,
) -> LentilResult<()> {
    let (manifest, _manifest_path) = super::load_manifest(path, ctx).await?;
    let table = if dev {
        &manifest.dev_packages
    } else {
        &manifest.packages
    };

    let listed: Vec<ListedPackage> = table
        .iter()
        .map(|(name, spec)| ListedPackage {
            name,
            constraint: describe(spec),
            origin: origin(spec),
        })
        .collect();

    if json {
        let rendered = serde_json::to_string_pretty(&listed).map_err(|e| {
            LentilError::JsonParse {
                message: e.to_string(),
            }
        })?;
        println!("{}", rendered);
        return Ok(());
    }

    if listed.is_empty() {
        ctx.output.info(if dev {
            "No development packages declared"
        } else {
            "No runtime packages declared"
        });
        return Ok(());
    }

    for package in &listed {
        match package.origin {
            Some(origin) => ctx.output.info(&format!(
                "{} {} ({})",
                package.name, package.constraint, origin
            )),
            None => ctx
                .output
                .info(&format!("{} {}", package.name, package.constraint)),
        }
    }
    Ok(())
}

/// Human-readable constraint for a package
fn describe(spec: &PackageSpec) -> String {
    match spec {
        PackageSpec::Plain(constraint) => constraint.clone(),
        PackageSpec::Table(table) => {
            if let Some(version) = &table.version {
                version.clone()
            } else if let Some(git) = &table.git {
                git.clone()
            } else if let Some(path) = &table.path {
                path.clone()
            } else if let Some(file) = &table.file {
                file.clone()
            } else {
                "*".to_string()
            }
        }
    }
}

fn origin(spec: &PackageSpec) -> Option<&'static str> {
    match spec {
        PackageSpec::Table(table) if table.git.is_some() => Some("git"),
        PackageSpec::Table(table) if table.path.is_some() => Some("path"),
        PackageSpec::Table(table) if table.file.is_some() => Some("file"),
        _ => None,
    }
}
