//! Player walker driven by held keys

use bitflags::bitflags;
use game_core::fsm::{State, StateMachine, StateMachineError, Transition};

bitflags! {
    /// Keys held during one frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Keys: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const ESCAPE = 1 << 2;
    }
}

impl Keys {
    /// Exactly one direction key is held
    fn only(self, key: Self) -> bool {
        self & (Self::LEFT | Self::RIGHT) == key
    }
}

/// Horizontal speed in pixels per tick while walking
pub const WALK_SPEED: i32 = 4;

/// Build the Idle/WalkLeft/WalkRight/Final machine
///
/// Holding both direction keys counts as holding neither, so the guards
/// leaving each state never overlap.
pub fn build_walker() -> Result<StateMachine<Keys>, StateMachineError> {
    let idle = State::new("Idle").with_description("Standing still");
    let left = State::new("WalkLeft").on_enter(|_: &Keys| log::debug!("Facing left"));
    let right = State::new("WalkRight").on_enter(|_: &Keys| log::debug!("Facing right"));
    let done = State::new("Final").with_description("Player quit");

    let stopped = |keys: &Keys| !keys.only(Keys::LEFT) && !keys.only(Keys::RIGHT);

    StateMachine::builder("walker")
        .transition(Transition::new("start_left", &idle, &left, |k: &Keys| k.only(Keys::LEFT)))
        .transition(Transition::new("start_right", &idle, &right, |k: &Keys| k.only(Keys::RIGHT)))
        .transition(Transition::new("stop_left", &left, &idle, stopped))
        .transition(Transition::new("stop_right", &right, &idle, stopped))
        .transition(Transition::new("turn_right", &left, &right, |k: &Keys| k.only(Keys::RIGHT)))
        .transition(Transition::new("turn_left", &right, &left, |k: &Keys| k.only(Keys::LEFT)))
        .transition(
            Transition::new("quit", &idle, &done, |k: &Keys| {
                k.contains(Keys::ESCAPE) && !k.only(Keys::LEFT) && !k.only(Keys::RIGHT)
            })
            .on_fire(|from: &State<Keys>, _: &State<Keys>| {
                log::info!("Leaving '{}' for good", from.name());
            }),
        )
        .initial(idle)
        .states([left, right])
        .final_state(done)
        .build()
}

/// Horizontal velocity for the walker's current state
pub fn velocity(machine: &StateMachine<Keys>) -> i32 {
    match machine.current_state().name() {
        "WalkLeft" => -WALK_SPEED,
        "WalkRight" => WALK_SPEED,
        _ => 0,
    }
}

/// Scripted input, one entry per tick
pub fn timeline() -> Vec<Keys> {
    let mut frames = Vec::new();
    frames.extend([Keys::empty(); 5]);
    frames.extend([Keys::RIGHT; 20]);
    frames.extend([Keys::LEFT | Keys::RIGHT; 3]);
    frames.extend([Keys::LEFT; 30]);
    frames.extend([Keys::empty(); 4]);
    frames.push(Keys::ESCAPE);
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walker_is_valid() {
        let machine = build_walker().unwrap();
        assert!(machine.validate().is_valid());
        assert!(machine.unreachable_states().is_empty());
    }

    #[test]
    fn test_timeline_ends_in_final_state() {
        let mut machine = build_walker().unwrap();
        for keys in timeline() {
            machine.update(&keys).unwrap();
        }
        assert!(machine.is_terminated());
    }

    #[test]
    fn test_both_keys_stop() {
        let mut machine = build_walker().unwrap();
        machine.update(&Keys::RIGHT).unwrap();
        assert_eq!(velocity(&machine), WALK_SPEED);
        machine.update(&(Keys::LEFT | Keys::RIGHT)).unwrap();
        assert_eq!(velocity(&machine), 0);
    }
}
