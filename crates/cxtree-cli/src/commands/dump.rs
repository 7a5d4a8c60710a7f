use anyhow::Context;
use cxtree_config::CxtreeConfig;
use cxtree_parser::{TraceOmissions, pipeline, write_json};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::DumpArgs;

/// Handle `cxtree dump`.
pub fn handle(args: &DumpArgs, config: &CxtreeConfig, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let options = bootstrap::parse_options(&config.parse, args.max_depth)?;
    let record = pipeline::parse_file(&args.source, &args.database, options, &mut TraceOmissions)
        .with_context(|| format!("failed to dump {}", args.source.display()))?;

    let pretty = config.output.pretty && !args.compact;
    write_json(&record, std::io::stdout().lock(), pretty).context("failed to write to stdout")
}
