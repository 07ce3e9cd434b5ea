/// wf3d Core Library - wireframe geometry, camera and render loop
///
/// This library provides the geometric pipeline for wireframe rendering:
/// row-vector homogeneous transforms, a camera producing view, projection and
/// viewport matrices, and an engine that spins, projects and strokes shapes
/// onto any [`DrawSurface`] at a fixed cadence.

pub mod engine;
pub mod error;
pub mod projection;
pub mod shape;
pub mod timing;
pub mod transform;

// Re-export commonly used types
pub use engine::{DrawSurface, Engine, EngineConfig, EngineState, Scheduler};
pub use error::{Error, Result};
pub use projection::{Camera, Movement};
pub use shape::{Edge, Shape, ShapeKind};
pub use timing::FrameTimer;
pub use transform::{Transform, VertexBuffer};
