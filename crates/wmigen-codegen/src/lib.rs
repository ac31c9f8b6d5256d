//! Dictionary compiler for WMI decision tries.
//!
//! This crate lowers [`wmigen_core`] decision trees into nested match
//! dispatch source and writes one self-contained artifact per dataset,
//! plus a JSON report of the run.

pub mod compiler;
pub mod dispatch;
pub mod errors;
pub mod model;
pub mod output;
pub mod render;

pub use compiler::{CompileResult, DictCompiler, EmittedDict};
pub use dispatch::{ArmTarget, DispatchModule, MatchArm, MatchLevel, lower};
pub use errors::CodegenError;
pub use model::{
    CompileIssue, CompileOptions, CompileReport, DatasetKind, DictReport, DropReason,
};
pub use render::{Backend, RustBackend};
