//! State machine runtime and builder

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use super::state::{State, StateId};
use super::transition::{Transition, TransitionId};
use super::validation::{ValidationIssue, ValidationReport};
use super::StateMachineError;

/// Lifecycle notifications emitted by [`StateMachine::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineEvent {
    /// First update after construction or [`StateMachine::reset`]
    Started {
        /// The initial state
        state: StateId,
    },
    /// A transition was taken
    Transitioned {
        /// Transition taken
        transition: TransitionId,
        /// Previous state
        from: StateId,
        /// New current state
        to: StateId,
    },
    /// The final state was reached
    Finished {
        /// The final state
        state: StateId,
    },
}

type Listener = Box<dyn FnMut(&MachineEvent) + Send>;

/// A finite state machine with a fixed, validated topology
///
/// Only the current state and the in-progress flag change after
/// construction.
pub struct StateMachine<C: ?Sized> {
    name: String,
    states: HashMap<StateId, State<C>>,
    /// Insertion order of `states`
    state_order: Vec<StateId>,
    transitions: Vec<Transition<C>>,
    transition_index: HashMap<TransitionId, usize>,
    adjacency: HashMap<StateId, Vec<StateId>>,
    initial: StateId,
    final_state: StateId,
    current: StateId,
    in_progress: bool,
    listeners: Vec<Listener>,
}

impl<C: ?Sized> StateMachine<C> {
    /// Start describing a machine
    pub fn builder(name: impl Into<String>) -> StateMachineBuilder<C> {
        StateMachineBuilder::new(name)
    }

    /// Advance the machine by one tick
    ///
    /// Evaluates every guard leaving the current state against `context`.
    /// Exactly one firing guard moves the machine: the transition's fire
    /// action runs, the destination becomes current and its entry action runs.
    /// No firing guard leaves the machine where it is. More than one is an
    /// [`StateMachineError::AmbiguousTransition`] and leaves `current` as is.
    ///
    /// Returns whether a transition was taken.
    pub fn update(&mut self, context: &C) -> Result<bool, StateMachineError> {
        if self.current == self.initial && !self.in_progress {
            self.in_progress = true;
            log::info!(
                "State machine '{}' started in '{}'",
                self.name,
                self.current_state().name()
            );
            self.emit(&MachineEvent::Started {
                state: self.current,
            });
        }

        let firing: Vec<usize> = self
            .transitions
            .iter()
            .enumerate()
            .filter(|(_, t)| t.from() == self.current && t.fires(context))
            .map(|(index, _)| index)
            .collect();
        log::trace!(
            "State machine '{}': {} guard(s) fired from '{}'",
            self.name,
            firing.len(),
            self.current_state().name()
        );

        let taken = match firing.as_slice() {
            [] => None,
            [index] => Some(*index),
            _ => {
                let names: Vec<String> = firing
                    .iter()
                    .map(|&i| self.transitions[i].name().to_string())
                    .collect();
                log::warn!(
                    "State machine '{}' has {} transitions firing from '{}': {:?}",
                    self.name,
                    names.len(),
                    self.current_state().name(),
                    names
                );
                return Err(StateMachineError::AmbiguousTransition {
                    machine: self.name.clone(),
                    state: self.current_state().name().to_string(),
                    transitions: names,
                });
            }
        };

        if let Some(index) = taken {
            let transition = &self.transitions[index];
            let from = self.lookup(transition.from(), transition.name())?;
            let to = self.lookup(transition.to(), transition.name())?;

            transition.fire(from, to);
            log::debug!(
                "State machine '{}': '{}' -> '{}' via '{}'",
                self.name,
                from.name(),
                to.name(),
                transition.name()
            );
            let event = MachineEvent::Transitioned {
                transition: transition.id(),
                from: from.id(),
                to: to.id(),
            };

            let target = to.id();
            self.current = target;
            self.states[&target].act(context);
            self.emit(&event);
        }

        if self.in_progress && self.current == self.final_state {
            self.in_progress = false;
            log::info!(
                "State machine '{}' finished in '{}'",
                self.name,
                self.current_state().name()
            );
            self.emit(&MachineEvent::Finished {
                state: self.current,
            });
        }

        Ok(taken.is_some())
    }

    /// Check the graph for structural problems
    ///
    /// Collects every finding rather than stopping at the first. Does not
    /// change the machine, and [`StateMachine::update`] does not consult it.
    pub fn validate(&self) -> ValidationReport {
        let mut issues = Vec::new();

        let state_names = self.state_order.iter().map(|id| self.states[id].name());
        for (name, count) in repeated(state_names) {
            issues.push(ValidationIssue::DuplicateStateName {
                name: name.to_string(),
                count,
            });
        }

        for (name, count) in repeated(self.transitions.iter().map(Transition::name)) {
            issues.push(ValidationIssue::DuplicateTransitionName {
                name: name.to_string(),
                count,
            });
        }

        let entered: HashSet<StateId> = self
            .transitions
            .iter()
            .filter(|t| !t.is_self_loop())
            .map(Transition::to)
            .collect();
        for id in &self.state_order {
            if *id != self.initial && !entered.contains(id) {
                issues.push(ValidationIssue::IsolatedState {
                    name: self.states[id].name().to_string(),
                });
            }
        }

        let final_name = self.final_state().name();
        for t in &self.transitions {
            if t.from() == self.final_state && !t.is_self_loop() {
                issues.push(ValidationIssue::FinalStateExit {
                    state: final_name.to_string(),
                    transition: t.name().to_string(),
                    target: self.states[&t.to()].name().to_string(),
                });
            }
        }

        for issue in &issues {
            log::warn!("State machine '{}': {}", self.name, issue);
        }
        ValidationReport::new(self.name.clone(), issues)
    }

    /// States that cannot be reached from the initial state
    pub fn unreachable_states(&self) -> Vec<&State<C>> {
        let mut reached = HashSet::from([self.initial]);
        let mut queue = VecDeque::from([self.initial]);
        while let Some(id) = queue.pop_front() {
            for next in self.successors(id) {
                if reached.insert(*next) {
                    queue.push_back(*next);
                }
            }
        }
        self.state_order
            .iter()
            .filter(|id| !reached.contains(*id))
            .map(|id| &self.states[id])
            .collect()
    }

    /// Return to the initial state; the next update starts the machine again
    pub fn reset(&mut self) {
        log::debug!("State machine '{}' reset", self.name);
        self.current = self.initial;
        self.in_progress = false;
    }

    /// Register a callback for lifecycle events
    pub fn on_event<F>(&mut self, listener: F)
    where
        F: FnMut(&MachineEvent) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Machine name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The state the machine is in
    pub fn current_state(&self) -> &State<C> {
        &self.states[&self.current]
    }

    /// The designated start state
    pub fn initial_state(&self) -> &State<C> {
        &self.states[&self.initial]
    }

    /// The designated terminal state
    pub fn final_state(&self) -> &State<C> {
        &self.states[&self.final_state]
    }

    /// Whether the current state is the final state
    pub fn is_terminated(&self) -> bool {
        self.current == self.final_state
    }

    /// Whether the machine has started and not yet finished
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Look up a state by identity
    pub fn state(&self, id: StateId) -> Option<&State<C>> {
        self.states.get(&id)
    }

    /// First state with the given name, in insertion order
    pub fn state_by_name(&self, name: &str) -> Option<&State<C>> {
        self.states().find(|s| s.name() == name)
    }

    /// Look up a transition by identity
    pub fn transition(&self, id: TransitionId) -> Option<&Transition<C>> {
        self.transition_index
            .get(&id)
            .map(|&index| &self.transitions[index])
    }

    /// States in insertion order
    pub fn states(&self) -> impl Iterator<Item = &State<C>> + '_ {
        self.state_order.iter().map(|id| &self.states[id])
    }

    /// Transitions in insertion order
    pub fn transitions(&self) -> impl Iterator<Item = &Transition<C>> + '_ {
        self.transitions.iter()
    }

    /// Destination states for every state, in transition order
    pub fn adjacency(&self) -> &HashMap<StateId, Vec<StateId>> {
        &self.adjacency
    }

    /// Destinations reachable in one step from `id`
    pub fn successors(&self, id: StateId) -> &[StateId] {
        self.adjacency.get(&id).map_or(&[], Vec::as_slice)
    }

    fn lookup(&self, id: StateId, transition: &str) -> Result<&State<C>, StateMachineError> {
        self.states
            .get(&id)
            .ok_or_else(|| StateMachineError::UnknownState {
                machine: self.name.clone(),
                reference: format!("Transition '{transition}'"),
                state: id,
            })
    }

    fn emit(&mut self, event: &MachineEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

impl<C: ?Sized> fmt::Debug for StateMachine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("name", &self.name)
            .field("current", &self.current_state().name())
            .field("in_progress", &self.in_progress)
            .field("states", &self.states.len())
            .field("transitions", &self.transitions.len())
            .finish()
    }
}

/// Names that occur more than once, with their counts, in first-seen order
fn repeated<'a>(names: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for name in names {
        match counts.iter_mut().find(|(seen, _)| *seen == name) {
            Some((_, count)) => *count += 1,
            None => counts.push((name, 1)),
        }
    }
    counts.retain(|&(_, count)| count > 1);
    counts
}

/// Collects states and transitions before a [`StateMachine`] is built
pub struct StateMachineBuilder<C: ?Sized> {
    name: String,
    states: Vec<State<C>>,
    transitions: Vec<Transition<C>>,
    initial: Option<StateId>,
    final_state: Option<StateId>,
}

impl<C: ?Sized> StateMachineBuilder<C> {
    /// Create an empty builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            transitions: Vec::new(),
            initial: None,
            final_state: None,
        }
    }

    /// Add a state
    #[must_use]
    pub fn state(mut self, state: State<C>) -> Self {
        self.states.push(state);
        self
    }

    /// Add several states
    #[must_use]
    pub fn states(mut self, states: impl IntoIterator<Item = State<C>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Add a transition
    #[must_use]
    pub fn transition(mut self, transition: Transition<C>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add several transitions
    #[must_use]
    pub fn transitions(mut self, transitions: impl IntoIterator<Item = Transition<C>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Add a state and make it the initial state
    #[must_use]
    pub fn initial(mut self, state: State<C>) -> Self {
        self.initial = Some(state.id());
        self.state(state)
    }

    /// Add a state and make it the final state
    #[must_use]
    pub fn final_state(mut self, state: State<C>) -> Self {
        self.final_state = Some(state.id());
        self.state(state)
    }

    /// Mark an already added state as initial
    #[must_use]
    pub fn initial_id(mut self, id: StateId) -> Self {
        self.initial = Some(id);
        self
    }

    /// Mark an already added state as final
    #[must_use]
    pub fn final_id(mut self, id: StateId) -> Self {
        self.final_state = Some(id);
        self
    }

    /// Assemble the machine and derive its adjacency
    ///
    /// Fails when the initial or final state is missing, when a state or
    /// transition was added twice, or when anything refers to a state that
    /// was not added.
    pub fn build(self) -> Result<StateMachine<C>, StateMachineError> {
        let machine = self.name;
        let initial = self.initial.ok_or_else(|| StateMachineError::MissingInitial {
            machine: machine.clone(),
        })?;
        let final_state = self.final_state.ok_or_else(|| StateMachineError::MissingFinal {
            machine: machine.clone(),
        })?;

        let mut states = HashMap::with_capacity(self.states.len());
        let mut state_order = Vec::with_capacity(self.states.len());
        for state in self.states {
            let id = state.id();
            if states.contains_key(&id) {
                return Err(StateMachineError::DuplicateState {
                    machine,
                    name: state.name().to_string(),
                    id,
                });
            }
            state_order.push(id);
            states.insert(id, state);
        }

        let unknown = |reference: String, state: StateId| StateMachineError::UnknownState {
            machine: machine.clone(),
            reference,
            state,
        };
        if !states.contains_key(&initial) {
            return Err(unknown("Initial state".to_string(), initial));
        }
        if !states.contains_key(&final_state) {
            return Err(unknown("Final state".to_string(), final_state));
        }

        let mut transition_index = HashMap::with_capacity(self.transitions.len());
        let mut adjacency: HashMap<StateId, Vec<StateId>> =
            state_order.iter().map(|&id| (id, Vec::new())).collect();
        for (index, transition) in self.transitions.iter().enumerate() {
            for endpoint in [transition.from(), transition.to()] {
                if !states.contains_key(&endpoint) {
                    return Err(unknown(format!("Transition '{}'", transition.name()), endpoint));
                }
            }
            if transition_index.insert(transition.id(), index).is_some() {
                return Err(StateMachineError::DuplicateTransition {
                    machine: machine.clone(),
                    name: transition.name().to_string(),
                    id: transition.id(),
                });
            }
            adjacency
                .entry(transition.from())
                .or_default()
                .push(transition.to());
        }

        log::debug!(
            "Built state machine '{}' with {} states and {} transitions",
            machine,
            state_order.len(),
            self.transitions.len()
        );

        Ok(StateMachine {
            name: machine,
            states,
            state_order,
            transitions: self.transitions,
            transition_index,
            adjacency,
            initial,
            final_state,
            current: initial,
            in_progress: false,
            listeners: Vec::new(),
        })
    }
}
