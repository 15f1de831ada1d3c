use crate::alphabet::{Alphabet, Symbol};
use crate::math::{Map, Set};

/// Internal index of a state. Indices are allocated monotonically and never reused,
/// so they stay valid across renames and renumbering.
pub(crate) type StateId = usize;

/// A single automaton vertex. It owns its outgoing transitions (symbol to target)
/// and its incoming transitions (symbol to set of sources), the latter kept purely
/// so that edges can be severed from either endpoint.
///
/// Every method here mutates only `self`. The machine layer is responsible for
/// touching both endpoints of an edge atomically, which is what upholds the
/// bidirectional symmetry invariant: `from.out[s] == to` iff `from` is in
/// `to.inc[s]`.
#[derive(Clone, Debug)]
pub(crate) struct MachineState {
    pub(crate) title: String,
    out: Map<Symbol, StateId>,
    inc: Map<Symbol, Set<StateId>>,
}

impl MachineState {
    pub(crate) fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            out: Map::default(),
            inc: Map::default(),
        }
    }

    /// Wires an outgoing transition, overwriting any prior target for the symbol
    /// (last-write-wins). Returns the previous target, if any.
    pub(crate) fn add_transition_out(&mut self, symbol: Symbol, target: StateId) -> Option<StateId> {
        self.out.insert(symbol, target)
    }

    /// Records an incoming transition, creating the source set lazily.
    pub(crate) fn add_transition_in(&mut self, symbol: Symbol, source: StateId) {
        self.inc.entry(symbol).or_default().insert(source);
    }

    pub(crate) fn remove_transition_out(&mut self, symbol: &str) -> Option<StateId> {
        self.out.remove(symbol)
    }

    /// Removes `source` from the incoming set for `symbol`. The set is dropped
    /// entirely once empty: absence of a symbol key must mean "no incoming
    /// transition on that symbol", not "empty set".
    pub(crate) fn remove_transition_in(&mut self, symbol: &str, source: StateId) {
        if let Some(sources) = self.inc.get_mut(symbol) {
            sources.remove(&source);
            if sources.is_empty() {
                self.inc.remove(symbol);
            }
        }
    }

    /// The target of the outgoing transition for `symbol`, if wired.
    pub(crate) fn target(&self, symbol: &str) -> Option<StateId> {
        self.out.get(symbol).copied()
    }

    pub(crate) fn transitions_out(&self) -> impl Iterator<Item = (&Symbol, StateId)> + '_ {
        self.out.iter().map(|(s, &t)| (s, t))
    }

    pub(crate) fn transitions_in(&self) -> impl Iterator<Item = (&Symbol, &Set<StateId>)> + '_ {
        self.inc.iter()
    }

    pub(crate) fn has_incoming(&self, symbol: &str, source: StateId) -> bool {
        self.inc.get(symbol).is_some_and(|sources| sources.contains(&source))
    }

    /// Pure label mutation. The state does not know about the machine's title
    /// index, so every rename must be paired with a re-key at the machine layer.
    pub(crate) fn rename(&mut self, new_title: impl Into<String>) {
        self.title = new_title.into();
    }

    /// Whether every symbol of the given alphabet has an outgoing transition.
    pub(crate) fn is_complete(&self, alphabet: &Alphabet) -> bool {
        alphabet.universe().all(|s| self.out.contains_key(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let mut state = MachineState::new("A");
        assert_eq!(state.add_transition_out("0".into(), 1), None);
        assert_eq!(state.add_transition_out("0".into(), 2), Some(1));
        assert_eq!(state.target("0"), Some(2));
    }

    #[test]
    fn incoming_sets_stay_sparse() {
        let mut state = MachineState::new("B");
        state.add_transition_in("1".into(), 0);
        state.add_transition_in("1".into(), 2);
        assert!(state.has_incoming("1", 0));

        state.remove_transition_in("1", 0);
        assert!(state.has_incoming("1", 2));
        state.remove_transition_in("1", 2);
        // the now-empty set must be pruned, not left behind
        assert_eq!(state.transitions_in().count(), 0);
    }

    #[test]
    fn completeness() {
        let alphabet = Alphabet::from_csv("0,1").unwrap();
        let mut state = MachineState::new("A");
        assert!(!state.is_complete(&alphabet));
        state.add_transition_out("0".into(), 0);
        assert!(!state.is_complete(&alphabet));
        state.add_transition_out("1".into(), 1);
        assert!(state.is_complete(&alphabet));
    }
}
