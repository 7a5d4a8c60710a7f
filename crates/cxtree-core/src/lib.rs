//! # cxtree-core
//!
//! Data model shared by every cxtree crate.
//!
//! - [`NodeRecord`]: one serializable record per visited syntax node
//! - [`Value`]: a harvested attribute value, including snapshots of nested
//!   front-end handles (types, entities, enumeration members)
//! - [`Category`], [`Flavor`], [`Skip`]: vocabulary of the attribute harvester
//! - [`BatchReport`]: per-file outcomes of a batch run
//! - [`CoreError`]: cross-cutting error type

pub mod attribute;
pub mod errors;
pub mod record;
pub mod report;
pub mod value;

pub use attribute::{Category, Flavor, Skip};
pub use errors::CoreError;
pub use record::{AttributeMap, Location, NodeRecord};
pub use report::{BatchReport, FailureStage, FileOutcome, OmissionSummary};
pub use value::{EntitySnapshot, EnumMember, TypeSnapshot, Value};
