/// Shared collator signatures and errors.
use thiserror::Error;

use crate::core::extract::WorkbookSource;
use crate::core::script::ImportError;
use crate::schema::artifact::Artifact;
use crate::schema::classification::Classification;

#[derive(Debug, Error)]
pub enum CollateError {
    #[error("import #{index} is malformed: {source}")]
    Import {
        index: usize,
        #[source]
        source: ImportError,
    },
}

/// Maps fragment text to a verdict. Must accept any input.
pub type ClassifyFn = fn(&str) -> Classification;

/// Maps a workbook to the artifacts of one language.
pub type CollateFn = fn(&dyn WorkbookSource) -> Result<Vec<Artifact>, CollateError>;
