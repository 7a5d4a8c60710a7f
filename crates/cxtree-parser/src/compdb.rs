//! `compile_commands.json` loading and per-file compiler argument lookup.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors raised while resolving the compiler arguments of a source file.
///
/// Every variant is a lookup failure: none of them is ever raised after a
/// parse has started.
#[derive(Debug, thiserror::Error)]
pub enum CompileDbError {
    #[error("Cannot read compilation database {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed compilation database {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No compile command for {}", .file.display())]
    NoEntry { file: PathBuf },

    #[error("Compile command for {} is empty", .file.display())]
    EmptyCommand { file: PathBuf },

    #[error("Compile command for {} has unbalanced quoting", .file.display())]
    Unsplittable { file: PathBuf },
}

/// One entry of `compile_commands.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileCommand {
    pub directory: PathBuf,
    pub file: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl CompileCommand {
    /// Absolute, lexically normalized path of the entry's source file.
    #[must_use]
    pub fn source_path(&self) -> PathBuf {
        normalize_lexically(&self.directory.join(&self.file))
    }

    /// Full argv, compiler first. `arguments` wins over `command`.
    ///
    /// # Errors
    ///
    /// `Unsplittable` when `command` has unbalanced quotes, `EmptyCommand`
    /// when neither form yields a compiler.
    pub fn argv(&self) -> Result<Vec<String>, CompileDbError> {
        let argv = match (&self.arguments, &self.command) {
            (Some(arguments), _) => arguments.clone(),
            (None, Some(command)) => {
                shlex::split(command).ok_or_else(|| CompileDbError::Unsplittable {
                    file: self.file.clone(),
                })?
            }
            (None, None) => Vec::new(),
        };
        if argv.is_empty() {
            return Err(CompileDbError::EmptyCommand {
                file: self.file.clone(),
            });
        }
        Ok(argv)
    }

    /// The arguments to hand to the front-end: the argv without the
    /// compiler, `-c`, `-o <out>` and the source file itself.
    ///
    /// # Errors
    ///
    /// Propagates [`argv`](Self::argv) failures.
    pub fn compiler_arguments(&self) -> Result<Vec<String>, CompileDbError> {
        let source = self.source_path();
        let mut kept = Vec::new();
        let mut args = self.argv()?.into_iter().skip(1);
        while let Some(arg) = args.next() {
            if arg == "-c" {
                continue;
            }
            if arg == "-o" {
                args.next();
                continue;
            }
            if arg.starts_with("-o") && arg.len() > 2 {
                continue;
            }
            if !arg.starts_with('-') && self.names_source(&arg, &source) {
                continue;
            }
            kept.push(arg);
        }
        Ok(kept)
    }

    fn names_source(&self, arg: &str, source: &Path) -> bool {
        Path::new(arg) == self.file || normalize_lexically(&self.directory.join(arg)) == source
    }
}

/// A loaded `compile_commands.json`.
#[derive(Debug, Clone, Default)]
pub struct CompilationDatabase {
    root: PathBuf,
    commands: Vec<CompileCommand>,
}

impl CompilationDatabase {
    pub const FILE_NAME: &'static str = "compile_commands.json";

    /// Read `<dir>/compile_commands.json`.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, `Malformed` if it is not an array of
    /// compile commands.
    pub fn load(dir: &Path) -> Result<Self, CompileDbError> {
        let path = dir.join(Self::FILE_NAME);
        let text = std::fs::read_to_string(&path).map_err(|source| CompileDbError::Io {
            path: path.clone(),
            source,
        })?;
        let commands: Vec<CompileCommand> =
            serde_json::from_str(&text).map_err(|source| CompileDbError::Malformed {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), entries = commands.len(), "loaded compilation database");
        Ok(Self {
            root: dir.to_path_buf(),
            commands,
        })
    }

    #[must_use]
    pub fn from_commands(root: impl Into<PathBuf>, commands: Vec<CompileCommand>) -> Self {
        Self {
            root: root.into(),
            commands,
        }
    }

    /// Directory the database was loaded from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn commands(&self) -> &[CompileCommand] {
        &self.commands
    }

    /// The first entry whose source path matches `file`.
    ///
    /// Relative `file` paths are resolved against the working directory.
    /// Paths are compared lexically first, then by canonical form so that
    /// symlinked checkouts still match.
    #[must_use]
    pub fn find(&self, file: &Path) -> Option<&CompileCommand> {
        let wanted = std::path::absolute(file)
            .map(|p| normalize_lexically(&p))
            .unwrap_or_else(|_| file.to_path_buf());
        if let Some(hit) = self.commands.iter().find(|c| c.source_path() == wanted) {
            return Some(hit);
        }
        let canonical = std::fs::canonicalize(&wanted).ok()?;
        self.commands
            .iter()
            .find(|c| std::fs::canonicalize(c.source_path()).is_ok_and(|p| p == canonical))
    }

    /// Compiler arguments for `file`, ready for the front-end.
    ///
    /// # Errors
    ///
    /// `NoEntry` when the database has no command for `file`, otherwise any
    /// error from [`CompileCommand::compiler_arguments`].
    pub fn lookup(&self, file: &Path) -> Result<Vec<String>, CompileDbError> {
        self.find(file)
            .ok_or_else(|| CompileDbError::NoEntry {
                file: file.to_path_buf(),
            })?
            .compiler_arguments()
    }
}

/// Resolve `.` and `..` components without touching the filesystem.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
