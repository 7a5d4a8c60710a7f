use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use cxtree_core::Category;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Parse source files and write one JSON document per file.
    Parse(ParseArgs),
    /// Parse one source file and print its document to stdout.
    Dump(DumpArgs),
    /// List the attributes harvested for each category.
    Capabilities(CapabilitiesArgs),
    /// Print the JSON Schema of cxtree output.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ParseArgs {
    /// Directory containing compile_commands.json
    #[arg(short = 'p', long = "database", value_name = "DIR")]
    pub database: PathBuf,

    /// Output directory (defaults to the configured one, then the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Write documents without indentation
    #[arg(long)]
    pub compact: bool,

    /// Override the maximum traversal depth
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Also write the batch summary to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Source files to parse
    #[arg(required = true, value_name = "SOURCES")]
    pub sources: Vec<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct DumpArgs {
    /// Directory containing compile_commands.json
    #[arg(short = 'p', long = "database", value_name = "DIR")]
    pub database: PathBuf,

    /// Print without indentation
    #[arg(long)]
    pub compact: bool,

    /// Override the maximum traversal depth
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Source file to parse
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct CapabilitiesArgs {
    /// Only this category (all three when omitted)
    #[arg(value_enum)]
    pub category: Option<CategoryArg>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CategoryArg {
    Kind,
    Node,
    Type,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Kind => Self::Kind,
            CategoryArg::Node => Self::Node,
            CategoryArg::Type => Self::Type,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name
    #[arg(default_value = "node_record")]
    pub name: String,

    /// List the available schema names instead
    #[arg(long)]
    pub list: bool,
}
