/// Error types for wf3d-core

use thiserror::Error;

use crate::shape::Edge;

/// Errors raised while building shapes or configuring the engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("edge {edge:?} references vertex {index}, but the shape only has {vertex_count} vertices")]
    InvalidEdge {
        edge: Edge,
        index: usize,
        vertex_count: usize,
    },

    #[error("viewport must have positive dimensions, got {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("shapes can only be added before the render loop starts")]
    AlreadyRunning,
}

/// Result type alias for wf3d-core operations
pub type Result<T> = std::result::Result<T, Error>;
