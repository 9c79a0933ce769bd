//! State machine runtime
//!
//! Flat state machines for one-way visual states. A machine that has no
//! transition for an event simply stays put, which is what makes terminal
//! states terminal: once an element is revealed, further intersection
//! reports find no matching transition.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Unique identifier for a state machine instance
    pub struct FsmId;
}

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an event type
pub type EventId = u32;

/// A transition in the state machine
#[derive(Clone, Copy, Debug)]
pub struct Transition {
    pub from_state: StateId,
    pub event: EventId,
    pub to_state: StateId,
}

impl Transition {
    pub fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine {
    current_state: StateId,
    transitions: Vec<Transition>,
}

impl StateMachine {
    pub fn new(initial_state: StateId, transitions: Vec<Transition>) -> Self {
        Self {
            current_state: initial_state,
            transitions,
        }
    }

    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// Check if an event can trigger a transition from the current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.transitions
            .iter()
            .any(|t| t.from_state == self.current_state && t.event == event)
    }

    /// Send an event, returning the (possibly unchanged) resulting state.
    pub fn send(&mut self, event: EventId) -> StateId {
        let matched = self
            .transitions
            .iter()
            .find(|t| t.from_state == self.current_state && t.event == event);

        if let Some(transition) = matched {
            self.current_state = transition.to_state;
        }
        self.current_state
    }
}

/// Runtime that manages a set of state machine instances
pub struct FsmRuntime {
    machines: SlotMap<FsmId, StateMachine>,
}

impl FsmRuntime {
    pub fn new() -> Self {
        Self {
            machines: SlotMap::with_key(),
        }
    }

    pub fn create(&mut self, machine: StateMachine) -> FsmId {
        self.machines.insert(machine)
    }

    pub fn get(&self, id: FsmId) -> Option<&StateMachine> {
        self.machines.get(id)
    }

    pub fn get_mut(&mut self, id: FsmId) -> Option<&mut StateMachine> {
        self.machines.get_mut(id)
    }

    /// Send an event to a machine; `None` if it no longer exists.
    pub fn send(&mut self, id: FsmId, event: EventId) -> Option<StateId> {
        self.machines.get_mut(id).map(|fsm| fsm.send(event))
    }

    pub fn current_state(&self, id: FsmId) -> Option<StateId> {
        self.machines.get(id).map(|fsm| fsm.current_state())
    }

    pub fn remove(&mut self, id: FsmId) -> Option<StateMachine> {
        self.machines.remove(id)
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

impl Default for FsmRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOSED: StateId = 0;
    const OPEN: StateId = 1;

    const TOGGLE: EventId = 1;
    const DISMISS: EventId = 2;

    #[test]
    fn test_simple_transitions() {
        let mut fsm = StateMachine::new(
            CLOSED,
            vec![
                Transition::new(CLOSED, TOGGLE, OPEN),
                Transition::new(OPEN, TOGGLE, CLOSED),
                Transition::new(OPEN, DISMISS, CLOSED),
            ],
        );

        assert_eq!(fsm.current_state(), CLOSED);

        fsm.send(TOGGLE);
        assert_eq!(fsm.current_state(), OPEN);

        fsm.send(DISMISS);
        assert_eq!(fsm.current_state(), CLOSED);
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = StateMachine::new(CLOSED, vec![Transition::new(CLOSED, TOGGLE, OPEN)]);

        // DISMISS is not valid in CLOSED state
        fsm.send(DISMISS);
        assert_eq!(fsm.current_state(), CLOSED);
    }

    #[test]
    fn test_terminal_state_absorbs_repeat_events() {
        let mut fsm = StateMachine::new(CLOSED, vec![Transition::new(CLOSED, TOGGLE, OPEN)]);

        assert!(fsm.can_send(TOGGLE));
        fsm.send(TOGGLE);
        assert!(!fsm.can_send(TOGGLE));

        fsm.send(TOGGLE);
        fsm.send(TOGGLE);
        assert!(fsm.is_in(OPEN));
    }

    #[test]
    fn test_fsm_runtime() {
        let mut runtime = FsmRuntime::new();

        let fsm1 = runtime.create(StateMachine::new(
            CLOSED,
            vec![Transition::new(CLOSED, TOGGLE, OPEN)],
        ));
        let fsm2 = runtime.create(StateMachine::new(
            CLOSED,
            vec![Transition::new(CLOSED, TOGGLE, OPEN)],
        ));

        assert_eq!(runtime.len(), 2);

        runtime.send(fsm1, TOGGLE);
        assert_eq!(runtime.current_state(fsm1), Some(OPEN));
        assert_eq!(runtime.current_state(fsm2), Some(CLOSED));

        runtime.remove(fsm1);
        assert_eq!(runtime.len(), 1);
        assert_eq!(runtime.current_state(fsm1), None);
    }
}
