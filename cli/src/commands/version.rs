//! `skiff version`

use anyhow::Result;

const NAME: &str = "skiff";

/// Print the client version, as JSON with `--json`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    if json {
        let doc = serde_json::json!({ "name": NAME, "version": version });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("{NAME} {version}");
    }
    Ok(())
}
