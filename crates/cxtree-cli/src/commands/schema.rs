use anyhow::Context;
use cxtree_schema::SchemaRegistry;

use crate::cli::root_commands::SchemaArgs;
use crate::output;

/// Handle `cxtree schema`.
pub fn handle(args: &SchemaArgs) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new()?;
    if args.list {
        return output::output(&serde_json::to_value(registry.list())?, false);
    }
    let schema = registry.get(&args.name).with_context(|| {
        format!(
            "unknown schema '{}' (available: {})",
            args.name,
            registry.list().join(", ")
        )
    })?;
    output::output(schema, false)
}
