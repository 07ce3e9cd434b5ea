/// Example: render caller-supplied geometry in the terminal
///
/// Usage: cargo run --example octahedron
use nalgebra::Vector3;
use std::io;
use wf3d_core::{Edge, Engine, EngineConfig, Shape};
use wf3d_terminal::TerminalApp;

fn octahedron() -> wf3d_core::Result<Shape> {
    let points = [
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ];
    // every tip joins the four tips that are not its opposite
    let edges = (0..6)
        .flat_map(|a| (a + 1..6).map(move |b| (a, b)))
        .filter(|&(a, b)| a / 2 != b / 2)
        .map(|(a, b)| Edge(a, b))
        .collect();

    let mut shape = Shape::new(&points, edges)?;
    shape.scale(3.0);
    shape.rotate_x(20.0);
    Ok(shape)
}

fn main() -> io::Result<()> {
    let to_io = |e: wf3d_core::Error| io::Error::new(io::ErrorKind::InvalidData, e);

    let mut engine = Engine::new(EngineConfig {
        spin_degrees: 2.0,
        ..EngineConfig::default()
    })
    .map_err(to_io)?;

    let shape = octahedron().map_err(to_io)?;
    println!("Octahedron with {} edges", shape.edges().len());
    engine.add_shape(shape).map_err(to_io)?;

    let mut pyramid = Shape::pyramid();
    pyramid.translate(Vector3::new(5.0, 0.0, 0.0));
    engine.add_shape(pyramid).map_err(to_io)?;

    TerminalApp::new(engine).run()
}
