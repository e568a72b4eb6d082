//! Error taxonomy for the loading pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors surfaced by a pipeline run.
///
/// Row-level problems are deliberately absent from this enum: a short
/// row, an unresolved parent reference, or an unparsable price,
/// quantity, or date is dropped where it occurs and only reduces the
/// output set. Everything represented here aborts the remaining
/// stages and propagates to the caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read input file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// DDL execution failed while rebuilding the schema.
    #[error("schema rebuild failed: {0}")]
    Schema(#[source] diesel::result::Error),

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("database connection failed: {0}")]
    Connection(#[from] diesel::ConnectionError),

    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}
