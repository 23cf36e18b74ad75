//! Command layer tests.

use super::*;
use crate::output::OutputHandler;
use lentil_manifest::validate::validate;
use tempfile::TempDir;

fn context_in(dir: &TempDir) -> CommandContext {
    CommandContext {
        cwd: dir.path().to_path_buf(),
        output: OutputHandler::new(),
    }
}

#[test]
fn test_starter_manifest_is_valid() {
    let manifest = pipfile::parse_pipfile(init::STARTER_MANIFEST).unwrap();
    let report = validate(&manifest);
    assert!(report.is_ok(), "starter manifest should validate cleanly");
    assert_eq!(report.sources, 1);
    assert_eq!(report.runtime_packages, 0);
}

#[tokio::test]
async fn test_load_manifest_explicit_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Pipfile");
    std::fs::write(&path, "[packages]\nrequests = \"*\"\n").unwrap();

    let ctx = context_in(&dir);
    let (manifest, resolved) = load_manifest(Some(path.clone()), &ctx).await.unwrap();
    assert_eq!(manifest.packages.len(), 1);
    assert_eq!(resolved, path);
}

#[tokio::test]
async fn test_load_manifest_discovery() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("Pipfile"), "[dev-packages]\npytest = \"*\"\n").unwrap();

    let ctx = context_in(&dir);
    let (manifest, _path) = load_manifest(None, &ctx).await.unwrap();
    assert_eq!(manifest.dev_packages.len(), 1);
}

#[tokio::test]
async fn test_load_manifest_missing() {
    let dir = TempDir::new().unwrap();
    let ctx = context_in(&dir);
    assert!(load_manifest(None, &ctx).await.is_err());
}

#[tokio::test]
async fn test_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let ctx = context_in(&dir);

    init::execute(&ctx).await.unwrap();
    assert!(dir.path().join("Pipfile").exists());

    let err = init::execute(&ctx).await.unwrap_err();
    assert!(err.to_string().contains("refusing to overwrite"));
}
