use std::path::{Path, PathBuf};

use cxtree_config::CxtreeConfig;
use cxtree_core::{BatchReport, FileOutcome, NodeRecord};
use cxtree_parser::{
    ClangFrontend, CollectOmissions, DocumentWriter, Frontend, OmissionSink, ParserError,
    Pipeline, TraceOmissions,
};

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ParseArgs;
use crate::output;
use crate::progress::Progress;

/// Handle `cxtree parse`.
pub fn handle(args: &ParseArgs, config: &CxtreeConfig, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let options = bootstrap::parse_options(&config.parse, args.max_depth)?;
    let pipeline = Pipeline::new(ClangFrontend::new(options));

    let progress = Progress::bar(args.sources.len() as u64, "parsing");
    let report = run_batch(&pipeline, args, config, |outcome| {
        progress.set_message(&outcome.file().display().to_string());
        progress.inc(1);
    });
    if report.has_failures() {
        progress.finish_err(&format!("{} failed", report.failed));
    } else {
        progress.finish_ok("done");
    }

    let summary = serde_json::to_value(&report)?;
    if let Some(path) = &args.report {
        output::write_file(&summary, path)?;
    }
    output::output(&summary, false)?;

    if report.has_failures() {
        anyhow::bail!(
            "{} of {} files failed",
            report.failed,
            report.succeeded + report.failed
        );
    }
    Ok(())
}

/// Output directory: `--output`, then the configured one, then `.`.
fn output_dir(args: &ParseArgs, config: &CxtreeConfig) -> PathBuf {
    args.output
        .clone()
        .or_else(|| config.output.directory.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Run the batch and write each document, recording omissions when configured.
pub fn run_batch<F: Frontend>(
    pipeline: &Pipeline<F>,
    args: &ParseArgs,
    config: &CxtreeConfig,
    progress: impl FnMut(&FileOutcome),
) -> BatchReport {
    let mut writer = DocumentWriter::new(
        output_dir(args, config),
        config.output.pretty && !args.compact,
    );
    let emit = |source: &Path, record: &NodeRecord| -> Result<Option<PathBuf>, ParserError> {
        let path = writer.write(source, record)?;
        tracing::debug!(file = %source.display(), output = %path.display(), "document written");
        Ok(Some(path))
    };

    if config.diagnostics.record_omissions {
        let mut sink = CollectOmissions::new();
        let mut report = pipeline.parse_batch(&args.sources, &args.database, &mut sink, emit, progress);
        report.omissions = Some(sink.into_summary());
        report
    } else {
        let sink: &mut dyn OmissionSink = &mut TraceOmissions;
        pipeline.parse_batch(&args.sources, &args.database, sink, emit, progress)
    }
}
