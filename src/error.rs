//! Error types for grid construction, editing and search requests.

use thiserror::Error;

use crate::cell::Coord;

/// Errors surfaced by the grid and the solver. Not finding a path is not one of
/// them, see [SearchOutcome::NoPath](crate::solver::SearchOutcome::NoPath).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid size must be positive, got {0}")]
    InvalidGridSize(i32),

    #[error("search requested without both start and end set")]
    MissingEndpoints,

    #[error("{0} lies outside the grid")]
    OutOfBounds(Coord),

    #[error("endpoint {0} is a barrier")]
    BlockedEndpoint(Coord),

    #[error("internal consistency failure: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, GridError>;
