//! Error taxonomy for the conversion library.
//!
//! The engine itself never fails: structural anomalies, unresolvable
//! references, and unknown markup are all recovered locally during
//! dispatch. `ConvertError` only covers the outer, non-algorithmic
//! failures around a conversion (reading input, empty documents).

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document {path} contains no content")]
    EmptyDocument { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
