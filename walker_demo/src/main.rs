//! Walker Demo
//!
//! Headless run of the gameplay core:
//! - A walker state machine fed a scripted key timeline
//! - Asteroids drifting through a quadtree broad phase
//! - Candidate collision pairs reported each tick
//!
//! Usage: `walker_demo [config.toml|config.ron]`

mod field;
mod walker;

use std::rc::Rc;

use game_core::config::{Config, ConfigError, CoreConfig};
use game_core::foundation::logging;
use game_core::fsm::StateMachineError;
use game_core::physics::collision::Rect2;
use game_core::spatial::{QuadTree, SpatialError};
use rand::rngs::StdRng;
use rand::SeedableRng;

const NUM_ASTEROIDS: usize = 24;
const RNG_SEED: u64 = 7;
const PLAYER_SIZE: i32 = 16;

/// Everything that can stop the demo
#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("Failed to load config: {0}")]
    Config(#[from] ConfigError),

    #[error("Spatial index error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("Walker error: {0}")]
    Walker(#[from] StateMachineError),

    #[error("{0}")]
    InvalidWalker(String),
}

fn load_config() -> Result<CoreConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(CoreConfig::load_from_file(&path)?),
        None => Ok(CoreConfig::default()),
    }
}

fn run(config: &CoreConfig) -> Result<(), DemoError> {
    let bounds = config.quadtree.bounds;
    let mut tree = QuadTree::from_config(&config.quadtree)?;
    let mut rng = StdRng::seed_from_u64(RNG_SEED);
    let mut asteroids = field::spawn(&mut rng, &bounds, NUM_ASTEROIDS)?;
    for asteroid in &asteroids {
        tree.insert(Rc::clone(&asteroid.shape));
    }

    let mut machine = walker::build_walker()?;
    let (valid, message) = machine.validate().into_parts();
    if !valid {
        return Err(DemoError::InvalidWalker(message));
    }
    log::info!("{}", message);

    let center = bounds.center();
    let mut player_x = center.x;
    let mut total_pairs = 0;

    for (tick, keys) in walker::timeline().into_iter().enumerate() {
        if machine.update(&keys)? {
            log::info!("Tick {}: walker is now '{}'", tick, machine.current_state().name());
        }
        player_x = (player_x + walker::velocity(&machine))
            .clamp(bounds.min.x, bounds.max.x - PLAYER_SIZE);

        field::drift(&mut tree, &mut asteroids, &bounds);

        let player = Rect2::from_origin_size(player_x, center.y, PLAYER_SIZE, PLAYER_SIZE);
        let near = tree.query(&player);
        if !near.is_empty() {
            log::debug!("Tick {}: {} asteroid(s) near the player", tick, near.len());
        }

        let pairs = tree.candidate_pairs();
        let touching = pairs
            .iter()
            .filter(|pair| pair.first.intersects(&pair.second))
            .count();
        log::trace!(
            "Tick {}: {} candidate pair(s), {} touching, tree depth {} over {} node(s)",
            tick,
            pairs.len(),
            touching,
            tree.depth(),
            tree.node_count()
        );
        total_pairs += pairs.len();

        if machine.is_terminated() {
            log::info!("Walker finished after {} ticks", tick + 1);
            break;
        }
    }

    println!("Walker ended in '{}' at x = {}", machine.current_state().name(), player_x);
    println!(
        "Quadtree: {} object(s), depth {}/{}, {} node(s)",
        tree.len(),
        tree.depth(),
        tree.max_depth(),
        tree.node_count()
    );
    println!("Broad phase produced {} candidate pair(s) in total", total_pairs);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    logging::init_with_level(config.level_filter());

    println!("=== Walker Demo ===");
    println!("Scripted input: idle, right, both keys, left, idle, escape");
    println!();

    run(&config).map_err(|e| {
        log::error!("{}", e);
        e.into()
    })
}
