/// Wireframe shapes: a vertex buffer plus an edge list
use nalgebra::Vector3;

use crate::error::{Error, Result};
use crate::transform::{Transform, VertexBuffer};

/// An unordered pair of indices into a shape's vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge(pub usize, pub usize);

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Self(a, b)
    }

    pub fn indices(&self) -> [usize; 2] {
        [self.0, self.1]
    }
}

/// Which dataset a shape was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Cube,
    Pyramid,
    Custom,
}

const CUBE_VERTICES: [[f64; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 0.0, 1.0],
];

// bottom loop, top loop, then the four uprights
const CUBE_EDGES: [Edge; 12] = [
    Edge(0, 1),
    Edge(1, 2),
    Edge(2, 3),
    Edge(3, 0),
    Edge(4, 5),
    Edge(5, 6),
    Edge(6, 7),
    Edge(7, 4),
    Edge(1, 5),
    Edge(0, 4),
    Edge(2, 6),
    Edge(3, 7),
];

const PYRAMID_VERTICES: [[f64; 3]; 4] = [
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 0.5, 1.0],
];

const PYRAMID_EDGES: [Edge; 6] = [
    Edge(0, 1),
    Edge(1, 2),
    Edge(2, 0),
    Edge(0, 3),
    Edge(1, 3),
    Edge(2, 3),
];

/// A wireframe shape.
///
/// Transforms replace the vertex buffer with a transformed copy; the edge
/// list is fixed at construction and always indexes inside the buffer.
#[derive(Debug, Clone)]
pub struct Shape {
    kind: ShapeKind,
    vertices: VertexBuffer,
    edges: Vec<Edge>,
}

impl Shape {
    /// Create a shape from caller-supplied points (w = 1) and edges
    pub fn new(points: &[[f64; 3]], edges: Vec<Edge>) -> Result<Self> {
        Self::from_buffer(Transform::homogeneous(points), edges)
    }

    /// Create a shape from an existing homogeneous buffer
    pub fn from_buffer(vertices: VertexBuffer, edges: Vec<Edge>) -> Result<Self> {
        let vertex_count = vertices.nrows();
        for edge in &edges {
            if let Some(&index) = edge.indices().iter().find(|&&i| i >= vertex_count) {
                return Err(Error::InvalidEdge {
                    edge: *edge,
                    index,
                    vertex_count,
                });
            }
        }

        Ok(Self {
            kind: ShapeKind::Custom,
            vertices,
            edges,
        })
    }

    /// Unit cube spanning [0, 1] on every axis
    pub fn cube() -> Self {
        Self::builtin(ShapeKind::Cube, &CUBE_VERTICES, &CUBE_EDGES)
    }

    /// Pyramid over a triangular base
    pub fn pyramid() -> Self {
        Self::builtin(ShapeKind::Pyramid, &PYRAMID_VERTICES, &PYRAMID_EDGES)
    }

    fn builtin(kind: ShapeKind, points: &[[f64; 3]], edges: &[Edge]) -> Self {
        Self {
            kind,
            vertices: Transform::homogeneous(points),
            edges: edges.to_vec(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn vertices(&self) -> &VertexBuffer {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.nrows()
    }

    pub fn translate(&mut self, offset: Vector3<f64>) {
        self.vertices = Transform::translate(&self.vertices, &offset);
    }

    /// Rotate about the X axis by `degrees`
    pub fn rotate_x(&mut self, degrees: f64) {
        self.vertices = Transform::rotate_x(&self.vertices, degrees.to_radians());
    }

    /// Rotate about the Y axis by `degrees`
    pub fn rotate_y(&mut self, degrees: f64) {
        self.vertices = Transform::rotate_y(&self.vertices, degrees.to_radians());
    }

    /// Rotate about the Z axis by `degrees`
    pub fn rotate_z(&mut self, degrees: f64) {
        self.vertices = Transform::rotate_z(&self.vertices, degrees.to_radians());
    }

    pub fn scale(&mut self, factor: f64) {
        self.vertices = Transform::scale(&self.vertices, factor);
    }
}
