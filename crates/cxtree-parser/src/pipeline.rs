//! Per-file and batch processing: compilation lookup, then parse and build.
//!
//! The lookup always runs first. A file without a compile command is
//! reported as a lookup failure and never reaches the front-end.

use std::path::{Path, PathBuf};

use cxtree_core::{BatchReport, FailureStage, FileOutcome, NodeRecord};

use crate::compdb::CompilationDatabase;
use crate::error::ParserError;
use crate::frontend::{ClangFrontend, Frontend, ParseOptions};
use crate::omission::OmissionSink;

pub use crate::serialize::{DocumentWriter, output_path, write_document};

/// A front-end plus the lookup step in front of it.
#[derive(Debug, Clone, Default)]
pub struct Pipeline<F> {
    frontend: F,
}

impl<F: Frontend> Pipeline<F> {
    pub const fn new(frontend: F) -> Self {
        Self { frontend }
    }

    pub const fn frontend(&self) -> &F {
        &self.frontend
    }

    /// Look up `source` in `database`, then parse it.
    ///
    /// # Errors
    ///
    /// `CompilationLookup` before any parse attempt when `database` has no
    /// usable command for `source`; otherwise any front-end error.
    pub fn parse_file(
        &self,
        source: &Path,
        database: &CompilationDatabase,
        sink: &mut dyn OmissionSink,
    ) -> Result<NodeRecord, ParserError> {
        let arguments = database.lookup(source)?;
        self.frontend.parse(source, &arguments, sink)
    }

    /// Process every source independently. `emit` receives each finished
    /// record and may return where it was written; `progress` is told about
    /// every outcome as it happens.
    pub fn parse_batch<E, P>(
        &self,
        sources: &[PathBuf],
        database_dir: &Path,
        sink: &mut dyn OmissionSink,
        mut emit: E,
        mut progress: P,
    ) -> BatchReport
    where
        E: FnMut(&Path, &NodeRecord) -> Result<Option<PathBuf>, ParserError>,
        P: FnMut(&FileOutcome),
    {
        let database = CompilationDatabase::load(database_dir).map_err(|err| {
            tracing::warn!(dir = %database_dir.display(), %err, "compilation database unusable");
            err.to_string()
        });

        let mut report = BatchReport::default();
        for source in sources {
            let outcome = match &database {
                Ok(database) => self.process(source, database, sink, &mut emit),
                Err(error) => FileOutcome::Failed {
                    file: source.clone(),
                    stage: FailureStage::Lookup,
                    error: error.clone(),
                },
            };
            progress(&outcome);
            report.record(outcome);
        }
        tracing::debug!(
            succeeded = report.succeeded,
            failed = report.failed,
            "batch finished"
        );
        report
    }

    fn process<E>(
        &self,
        source: &Path,
        database: &CompilationDatabase,
        sink: &mut dyn OmissionSink,
        emit: &mut E,
    ) -> FileOutcome
    where
        E: FnMut(&Path, &NodeRecord) -> Result<Option<PathBuf>, ParserError>,
    {
        let result = self.parse_file(source, database, sink).and_then(|record| {
            let output = emit(source, &record)?;
            Ok((record.node_count(), output))
        });
        match result {
            Ok((nodes, output)) => FileOutcome::Succeeded {
                file: source.to_path_buf(),
                output,
                nodes,
            },
            Err(err) => {
                tracing::warn!(file = %source.display(), stage = %err.stage(), %err, "file failed");
                FileOutcome::Failed {
                    file: source.to_path_buf(),
                    stage: err.stage(),
                    error: err.to_string(),
                }
            }
        }
    }
}

/// Parse one file with libclang using the database in `database_dir`.
///
/// # Errors
///
/// `CompilationLookup` when the database is missing, malformed or has no
/// entry for `source`; otherwise any front-end error.
pub fn parse_file(
    source: &Path,
    database_dir: &Path,
    options: ParseOptions,
    sink: &mut dyn OmissionSink,
) -> Result<NodeRecord, ParserError> {
    let database = CompilationDatabase::load(database_dir)?;
    Pipeline::new(ClangFrontend::new(options)).parse_file(source, &database, sink)
}
