/// Randomly scattered demo scenes
use nalgebra::Vector3;
use rand::Rng;
use wf3d_core::Shape;

/// Cubes then pyramids, each moved by a random offset in `[0, spread)` per axis
pub fn scattered<R: Rng + ?Sized>(
    rng: &mut R,
    cubes: usize,
    pyramids: usize,
    spread: f64,
) -> Vec<Shape> {
    let builtins = std::iter::repeat_with(Shape::cube)
        .take(cubes)
        .chain(std::iter::repeat_with(Shape::pyramid).take(pyramids));

    builtins
        .map(|mut shape| {
            let offset = Vector3::new(rng.gen::<f64>(), rng.gen::<f64>(), rng.gen::<f64>());
            shape.translate(offset * spread);
            shape
        })
        .collect()
}
