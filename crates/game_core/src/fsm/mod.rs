//! Finite state machines for game object behavior
//!
//! A [`StateMachine`] owns a fixed graph of [`State`]s connected by guarded
//! [`Transition`]s. Each tick the driving loop calls
//! [`StateMachine::update`] with a context value (for example the set of
//! pressed keys); guards read that context to decide whether they fire.
//!
//! # Determinism
//!
//! Guards leaving the current state must be mutually exclusive. When two or
//! more fire in the same update the machine reports
//! [`StateMachineError::AmbiguousTransition`] instead of picking one.
//!
//! # Example
//!
//! ```rust
//! use game_core::fsm::{State, StateMachine, Transition};
//!
//! # fn main() -> Result<(), game_core::fsm::StateMachineError> {
//! let closed = State::<u32>::new("Closed");
//! let open = State::new("Open").on_enter(|coins: &u32| assert!(*coins > 0));
//!
//! let mut turnstile = StateMachine::builder("turnstile")
//!     .transition(Transition::new("coin", &closed, &open, |coins: &u32| *coins > 0))
//!     .initial(closed)
//!     .final_state(open)
//!     .build()?;
//!
//! assert!(turnstile.validate().is_valid());
//! turnstile.update(&1)?;
//! assert!(turnstile.is_terminated());
//! # Ok(())
//! # }
//! ```

mod machine;
mod state;
mod transition;
mod validation;

pub use machine::{MachineEvent, StateMachine, StateMachineBuilder};
pub use state::{EntryAction, State, StateId};
pub use transition::{FireAction, Guard, Transition, TransitionId};
pub use validation::{ValidationIssue, ValidationReport};

use std::sync::atomic::{AtomicU64, Ordering};

/// Next process-unique identity for states and transitions
fn next_id() -> u64 {
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// State machine errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StateMachineError {
    /// The builder was never given an initial state
    #[error("State machine '{machine}' has no initial state")]
    MissingInitial {
        /// Machine name
        machine: String,
    },

    /// The builder was never given a final state
    #[error("State machine '{machine}' has no final state")]
    MissingFinal {
        /// Machine name
        machine: String,
    },

    /// The same state identity was added twice
    #[error("State '{name}' ({id}) was added to '{machine}' more than once")]
    DuplicateState {
        /// Machine name
        machine: String,
        /// State name
        name: String,
        /// Repeated identity
        id: StateId,
    },

    /// The same transition identity was added twice
    #[error("Transition '{name}' ({id}) was added to '{machine}' more than once")]
    DuplicateTransition {
        /// Machine name
        machine: String,
        /// Transition name
        name: String,
        /// Repeated identity
        id: TransitionId,
    },

    /// A reference points at a state that is not part of the machine
    #[error("{reference} in '{machine}' refers to {state}, which is not one of its states")]
    UnknownState {
        /// Machine name
        machine: String,
        /// What holds the dangling reference
        reference: String,
        /// The missing state
        state: StateId,
    },

    /// More than one guard fired from the current state in one update
    #[error("Ambiguous transition from state '{state}' in '{machine}': {transitions:?} fire at once")]
    AmbiguousTransition {
        /// Machine name
        machine: String,
        /// Name of the current state
        state: String,
        /// Names of every transition whose guard held
        transitions: Vec<String>,
    },
}
