//! Schema command implementation.
//!
//! Emits JSON Schema documents describing idb's machine-readable outputs.
//! This is intended for tooling that wants stable shapes without reading
//! source code.

use crate::cli::{SchemaArgs, SchemaTarget};
use crate::error::Result;
use crate::model::Issue;
use crate::paginate::Page;
use chrono::{DateTime, Utc};
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
struct SchemaOutput {
    tool: &'static str,
    generated_at: DateTime<Utc>,
    schemas: BTreeMap<&'static str, RootSchema>,
}

/// Execute the schema command. Output is JSON regardless of mode, so callers
/// never have to pass `--json`.
///
/// # Errors
///
/// Returns an error if the payload cannot be serialized.
pub fn execute(args: &SchemaArgs) -> Result<()> {
    let payload = SchemaOutput {
        tool: "idb",
        generated_at: Utc::now(),
        schemas: build_schemas(args.target),
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn build_schemas(target: SchemaTarget) -> BTreeMap<&'static str, RootSchema> {
    let mut schemas = BTreeMap::new();

    match target {
        SchemaTarget::All => {
            schemas.insert("Issue", schema_for!(Issue));
            schemas.insert("Page", schema_for!(Page<Issue>));
        }
        SchemaTarget::Issue => {
            schemas.insert("Issue", schema_for!(Issue));
        }
        SchemaTarget::Page => {
            schemas.insert("Page", schema_for!(Page<Issue>));
        }
    }

    schemas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_generation_is_json_serializable() {
        let schemas = build_schemas(SchemaTarget::All);
        for (name, schema) in schemas {
            let value = serde_json::to_value(&schema).expect("schema serializable");
            assert!(value.is_object(), "{name} schema should be a JSON object");
        }
    }

    #[test]
    fn single_target_emits_one_schema() {
        assert_eq!(build_schemas(SchemaTarget::Issue).len(), 1);
        assert_eq!(build_schemas(SchemaTarget::Page).len(), 1);
        assert_eq!(build_schemas(SchemaTarget::All).len(), 2);
    }
}
