use thiserror::Error;

use crate::model::DatasetKind;

/// Errors emitted by the dictionary compiler.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("invalid record: {0}")]
    Input(#[from] wmigen_core::Error),
    #[error("empty {0} dataset: nothing to compile")]
    EmptyDataset(DatasetKind),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
