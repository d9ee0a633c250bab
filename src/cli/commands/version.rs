//! Version command implementation.

use serde_json::json;

/// Execute the version command.
pub fn execute(json_mode: bool) {
    let version = env!("CARGO_PKG_VERSION");

    if json_mode {
        let payload = json!({
            "name": "idb",
            "version": version,
        });
        println!("{payload:#}");
    } else {
        println!("idb {version}");
    }
}
