//! Drifting asteroids tracked by the quadtree broad phase

use std::rc::Rc;

use game_core::foundation::math::Vec2i;
use game_core::physics::collision::{Bounded, Poly2, Rect2, Shape};
use game_core::spatial::{QuadTree, SpatialError};
use rand::Rng;

const MAX_SIZE: i32 = 40;

/// One asteroid and its per-tick drift
pub struct Asteroid {
    pub shape: Rc<Shape>,
    pub velocity: Vec2i,
}

/// Scatter `count` small polygons inside `bounds`
pub fn spawn<R: Rng>(
    rng: &mut R,
    bounds: &Rect2,
    count: usize,
) -> Result<Vec<Asteroid>, SpatialError> {
    (0..count)
        .map(|_| {
            let x = rng.gen_range(bounds.min.x..(bounds.max.x - MAX_SIZE).max(bounds.min.x + 1));
            let y = rng.gen_range(bounds.min.y..(bounds.max.y - MAX_SIZE).max(bounds.min.y + 1));
            let size = rng.gen_range(8..MAX_SIZE);
            let rock = Poly2::from_coords(&[
                (x + size / 2, y),
                (x + size, y + size / 2),
                (x + size / 2, y + size),
                (x, y + size / 2),
            ])?;
            Ok(Asteroid {
                shape: Rc::new(Shape::Poly(rock)),
                velocity: Vec2i::new(rng.gen_range(-3..=3), rng.gen_range(-3..=3)),
            })
        })
        .collect()
}

/// Move every asteroid one tick, bouncing off the edges of `bounds`
pub fn drift(tree: &mut QuadTree<Shape>, asteroids: &mut [Asteroid], bounds: &Rect2) {
    for asteroid in asteroids {
        let mut moved = asteroid.shape.translated(asteroid.velocity);
        if !bounds.contains(&moved.bounding_box()) {
            asteroid.velocity = -asteroid.velocity;
            moved = asteroid.shape.translated(asteroid.velocity);
        }
        let moved = Rc::new(moved);
        if !tree.replace(&asteroid.shape, Rc::clone(&moved)) {
            log::warn!("Asteroid was missing from the quadtree, inserting it again");
            tree.insert(Rc::clone(&moved));
        }
        asteroid.shape = moved;
    }
}
