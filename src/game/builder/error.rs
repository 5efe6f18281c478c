//! Build Errors
//!
//! Every error here is recoverable: callers report it and keep the frame loop
//! running. Query misses, invalid placements and removal misses are not
//! errors at all; they surface as `valid = false` or a `None` result.

use crate::game::pieces::PieceTypeId;

/// A piece factory could not produce a piece.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FactoryError {
    #[error("invalid piece template: {0}")]
    InvalidTemplate(String),

    #[error("piece factory unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Requested piece type is not registered in the catalog
    #[error("unknown piece type {0}")]
    UnknownPiece(PieceTypeId),

    /// Requested string key is not registered in the catalog
    #[error("unknown piece key '{0}'")]
    UnknownPieceKey(String),

    /// The catalog entry exists but its factory failed
    #[error("failed to instantiate piece '{piece}'")]
    Instantiation {
        piece: String,
        #[source]
        source: FactoryError,
    },
}
