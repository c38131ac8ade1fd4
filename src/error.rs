use thiserror::Error;

/// Errors raised while turning a workbook into graph data.
#[derive(Error, Debug, PartialEq)]
pub enum ImportError {
    /// The header row of a sheet has no non-empty cell in column A.
    #[error("No column names exist in sheet '{sheet}'")]
    NoColumns { sheet: String },

    #[error("Invalid namespace: {0:?}")]
    InvalidNamespace(String),
}
