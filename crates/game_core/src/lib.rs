//! # Game Core
//!
//! Engine-independent gameplay building blocks for 2D games.
//!
//! ## Features
//!
//! - **State Machines**: Deterministic FSMs with guarded transitions and graph validation
//! - **Spatial Partitioning**: Region quadtree for broad-phase collision queries
//! - **Collision Geometry**: Integer rectangles and polygons with exact predicates
//! - **Configuration**: TOML/RON backed settings
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use game_core::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let idle = State::<bool>::new("Idle");
//! let walk = State::new("Walk");
//! let done = State::new("Done");
//!
//! let mut machine = StateMachine::builder("walker")
//!     .transition(Transition::new("start", &idle, &walk, |moving: &bool| *moving))
//!     .transition(Transition::new("stop", &walk, &idle, |moving: &bool| !*moving))
//!     .transition(Transition::new("quit", &idle, &done, |_: &bool| false))
//!     .initial(idle)
//!     .state(walk)
//!     .final_state(done)
//!     .build()?;
//!
//! machine.update(&true)?;
//! assert_eq!(machine.current_state().name(), "Walk");
//!
//! let mut tree = QuadTree::new(Rect2::new(0, 0, 640, 480), 4)?;
//! let rock = Rc::new(Shape::Rect(Rect2::new(400, 10, 420, 30)));
//! tree.insert(Rc::clone(&rock));
//! assert_eq!(tree.query(&Rect2::new(320, 0, 640, 240)).len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod fsm;
pub mod physics;
pub mod spatial;

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, CoreConfig, QuadTreeConfig},
        fsm::{
            MachineEvent, State, StateId, StateMachine, StateMachineBuilder, StateMachineError,
            Transition, TransitionId, ValidationIssue, ValidationReport,
        },
        physics::collision::{Bounded, Poly2, Rect2, Shape},
        spatial::{CollisionPair, QuadTree, Quadrant, SpatialError, SpatialQuery},
    };
}
