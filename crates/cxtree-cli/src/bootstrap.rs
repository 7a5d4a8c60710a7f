use anyhow::Context;
use cxtree_config::{CxtreeConfig, ParseConfig};
use cxtree_parser::ParseOptions;

use crate::cli::GlobalFlags;

/// Load layered configuration, honoring `--config`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<CxtreeConfig> {
    CxtreeConfig::load_with_dotenv_from(flags.config.as_deref())
        .context("failed to load cxtree configuration")
}

/// Front-end options from configuration, with a command-line depth override.
pub fn parse_options(config: &ParseConfig, max_depth: Option<usize>) -> anyhow::Result<ParseOptions> {
    let max_depth = max_depth.unwrap_or(config.max_depth);
    if max_depth == 0 {
        anyhow::bail!("--max-depth must be at least 1");
    }
    Ok(ParseOptions {
        max_depth,
        detailed_preprocessing_record: config.detailed_preprocessing_record,
        skip_function_bodies: config.skip_function_bodies,
        extra_args: config.extra_args.clone(),
    })
}
