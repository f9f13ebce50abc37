//! Guarded transitions between states

use std::fmt;
use std::sync::Arc;

use super::state::{State, StateId};

/// Predicate over the update context deciding whether a transition fires
pub type Guard<C> = Arc<dyn Fn(&C) -> bool + Send + Sync>;

/// Callback run with `(from, to)` when a transition is taken
pub type FireAction<C> = Arc<dyn Fn(&State<C>, &State<C>) + Send + Sync>;

/// Unique transition identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(u64);

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transition#{}", self.0)
    }
}

/// A directed, guarded edge between two states
///
/// Endpoints are held by [`StateId`]; the machine owns the states themselves.
pub struct Transition<C: ?Sized> {
    id: TransitionId,
    name: String,
    description: Option<String>,
    from: StateId,
    to: StateId,
    guard: Guard<C>,
    on_fire: Option<FireAction<C>>,
}

impl<C: ?Sized> Transition<C> {
    /// Creates a transition from `from` to `to` taken when `guard` holds
    pub fn new<F>(name: impl Into<String>, from: &State<C>, to: &State<C>, guard: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self::between(name, from.id(), to.id(), guard)
    }

    /// Creates a transition between state identities
    pub fn between<F>(name: impl Into<String>, from: StateId, to: StateId, guard: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Self {
            id: TransitionId(super::next_id()),
            name: name.into(),
            description: None,
            from,
            to,
            guard: Arc::new(guard),
            on_fire: None,
        }
    }

    /// Attach a human-readable description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the action run by [`Transition::fire`]
    #[must_use]
    pub fn on_fire<F>(mut self, action: F) -> Self
    where
        F: Fn(&State<C>, &State<C>) + Send + Sync + 'static,
    {
        self.on_fire = Some(Arc::new(action));
        self
    }

    /// Identity of this transition
    pub fn id(&self) -> TransitionId {
        self.id
    }

    /// Transition name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Source state
    pub fn from(&self) -> StateId {
        self.from
    }

    /// Destination state
    pub fn to(&self) -> StateId {
        self.to
    }

    /// Whether source and destination are the same state
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Evaluate the guard
    pub fn fires(&self, context: &C) -> bool {
        (self.guard)(context)
    }

    /// Run the fire action, if any
    pub fn fire(&self, from: &State<C>, to: &State<C>) {
        if let Some(action) = &self.on_fire {
            action(from, to);
        }
    }
}

impl<C: ?Sized> Clone for Transition<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            from: self.from,
            to: self.to,
            guard: Arc::clone(&self.guard),
            on_fire: self.on_fire.clone(),
        }
    }
}

impl<C: ?Sized> fmt::Debug for Transition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_guard_reads_context() {
        let low = State::<i32>::new("Low");
        let high = State::new("High");
        let rise = Transition::new("rise", &low, &high, |level: &i32| *level > 10);

        assert!(!rise.fires(&3));
        assert!(rise.fires(&11));
        assert_eq!(rise.from(), low.id());
        assert_eq!(rise.to(), high.id());
        assert!(!rise.is_self_loop());
    }

    #[test]
    fn test_fire_passes_endpoints() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let a = State::<()>::new("A");
        let b = State::new("B");
        let t = Transition::new("go", &a, &b, |_: &()| true).on_fire(move |from, to| {
            sink.lock()
                .unwrap()
                .push(format!("{}->{}", from.name(), to.name()));
        });

        t.fire(&a, &b);
        assert_eq!(*log.lock().unwrap(), vec!["A->B".to_string()]);
    }
}
