//! State nodes

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Callback run when a state becomes current
pub type EntryAction<C> = Arc<dyn Fn(&C) + Send + Sync>;

/// Unique state identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u64);

impl StateId {
    /// Raw identifier value
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "state#{}", self.0)
    }
}

/// A node in a state machine graph
///
/// Equality and hashing use the identity assigned by [`State::new`], never the
/// name: two states called "Idle" are different states. Clones share the
/// identity and the entry action, so one state may appear in several machines.
pub struct State<C: ?Sized> {
    id: StateId,
    name: String,
    description: Option<String>,
    on_enter: Option<EntryAction<C>>,
}

impl<C: ?Sized> State<C> {
    /// Creates a state with a fresh identity
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: StateId(super::next_id()),
            name: name.into(),
            description: None,
            on_enter: None,
        }
    }

    /// Attach a human-readable description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the entry action run by [`State::act`]
    #[must_use]
    pub fn on_enter<F>(mut self, action: F) -> Self
    where
        F: Fn(&C) + Send + Sync + 'static,
    {
        self.on_enter = Some(Arc::new(action));
        self
    }

    /// Identity of this state
    pub fn id(&self) -> StateId {
        self.id
    }

    /// Name used in diagnostics and by collaborators to pick presentation
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Run the entry action, if any
    pub fn act(&self, context: &C) {
        if let Some(action) = &self.on_enter {
            action(context);
        }
    }
}

impl<C: ?Sized> Clone for State<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            on_enter: self.on_enter.clone(),
        }
    }
}

impl<C: ?Sized> PartialEq for State<C> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<C: ?Sized> Eq for State<C> {}

impl<C: ?Sized> Hash for State<C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<C: ?Sized> fmt::Debug for State<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_equality_is_by_identity() {
        let a = State::<()>::new("Idle");
        let b = State::<()>::new("Idle");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_act_runs_entry_action() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let state = State::new("Jump")
            .with_description("airborne")
            .on_enter(move |height: &u32| {
                seen.fetch_add(*height as usize, Ordering::SeqCst);
            });

        state.act(&3);
        state.act(&4);
        assert_eq!(count.load(Ordering::SeqCst), 7);
        assert_eq!(state.description(), Some("airborne"));
    }

    #[test]
    fn test_act_without_action_is_noop() {
        State::<str>::new("Still").act("anything");
    }
}
