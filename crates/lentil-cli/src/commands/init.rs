//! `lentil init` command implementation.

use lentil_core::error::{LentilError, LentilResult};
use lentil_manifest::loader::MANIFEST_NAME;

use super::CommandContext;

/// Starter manifest written by `lentil init`
pub const STARTER_MANIFEST: &str = r#"[[source]]
url = "https://pypi.org/simple"
verify_ssl = true
name = "pypi"

[packages]

[dev-packages]
"#;

/// Execute the `lentil init` command
pub async fn execute(ctx: &CommandContext) -> LentilResult<()> {
    let target = ctx.cwd.join(MANIFEST_NAME);
    if target.exists() {
        return Err(LentilError::Validation {
            field: "manifest".to_string(),
            reason: format!("{} already exists; refusing to overwrite", target.display()),
        });
    }

    tokio::fs::write(&target, STARTER_MANIFEST)
        .await
        .map_err(|e| LentilError::io(format!("Failed to write {}", target.display()), e))?;

    ctx.output
        .success(&format!("Created {}", target.display()));
    ctx.output
        .info("Add packages under [packages] and run 'lentil check'");
    Ok(())
}
