use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::alphabet::{Alphabet, Symbol};
use crate::math::{Bijection, Set};

mod error;
mod run;
mod state;
mod titles;

pub use error::MachineError;
pub use run::MachineTransition;
pub use titles::{LatinTitles, TitleGenerator, LATIN_TITLES_COUNT};

use state::{MachineState, StateId};

/// A mutable deterministic finite automaton over a fixed [`Alphabet`].
///
/// States are addressed by their title throughout the public surface. Internally
/// each state lives under a stable numeric id and a bijective title index maps
/// between the two, so renaming and renumbering re-key the index without touching
/// any edge.
///
/// The machine upholds two structural invariants across every mutation:
/// determinism (at most one outgoing edge per symbol per state) and bidirectional
/// symmetry (an edge is recorded at both of its endpoints, or at neither).
///
/// # Example
/// ```
/// use dfa_machine::prelude::*;
///
/// let mut machine = Machine::new(Alphabet::from_csv("0,1").unwrap());
/// let a = machine.add_state().unwrap();
/// let b = machine.add_state().unwrap();
/// machine.add_transitions(["0", "1"], &a, &b).unwrap();
/// machine.add_transitions(["0", "1"], &b, &b).unwrap();
/// machine.set_start_state(&a).unwrap();
/// machine.add_final_state(&b).unwrap();
/// assert!(machine.is_complete_states());
///
/// machine.transition("1").unwrap();
/// assert!(machine.is_accepting());
/// ```
#[derive(Clone, Debug)]
pub struct Machine<G: TitleGenerator = LatinTitles> {
    alphabet: Alphabet,
    generator: G,
    states: BTreeMap<StateId, MachineState>,
    titles: Bijection<String, StateId>,
    start: Option<StateId>,
    current: Option<StateId>,
    finals: Set<StateId>,
    states_count: usize,
    next_id: StateId,
    history: Vec<MachineTransition>,
}

impl Machine<LatinTitles> {
    /// Creates an empty machine over the given alphabet, naming states `A` through `Z`.
    pub fn new(alphabet: Alphabet) -> Self {
        Self::with_generator(alphabet, LatinTitles)
    }
}

impl<G: TitleGenerator> Machine<G> {
    /// Creates an empty machine over the given alphabet with a custom naming strategy.
    pub fn with_generator(alphabet: Alphabet, generator: G) -> Self {
        Self {
            alphabet,
            generator,
            states: BTreeMap::new(),
            titles: Bijection::new(),
            start: None,
            current: None,
            finals: Set::default(),
            states_count: 0,
            next_id: 0,
            history: Vec::new(),
        }
    }

    /// The alphabet this machine was created with.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn resolve(&self, title: &str) -> Result<StateId, MachineError> {
        self.titles
            .get_by_left(title)
            .copied()
            .ok_or_else(|| MachineError::UnknownState(title.to_string()))
    }

    fn title_of(&self, id: StateId) -> &str {
        self.titles.get_by_right(&id).expect("every state id is indexed")
    }

    // ------------------------------------------------------------------
    // structural editing
    // ------------------------------------------------------------------

    /// Adds a state named by the title generator and returns the new title.
    pub fn add_state(&mut self) -> Result<String, MachineError> {
        let title = self
            .generator
            .try_title(self.states_count)
            .ok_or(MachineError::TitleExhausted(self.states_count))?;
        self.add_state_titled(title.clone())?;
        Ok(title)
    }

    /// Adds a state with an explicit title.
    pub fn add_state_titled(&mut self, title: impl Into<String>) -> Result<(), MachineError> {
        let title = title.into();
        if self.titles.contains_left(&title) {
            return Err(MachineError::DuplicateTitle(title));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.states_count += 1;
        trace!("adding state <{title}>");
        self.states.insert(id, MachineState::new(title.clone()));
        self.titles.insert(title, id);
        Ok(())
    }

    /// Renames a state. This is a label mutation only, no edge or flag changes.
    pub fn rename_state(&mut self, old: &str, new: impl Into<String>) -> Result<(), MachineError> {
        let new = new.into();
        let id = self.resolve(old)?;
        if self.titles.contains_left(&new) {
            return Err(MachineError::DuplicateTitle(new));
        }
        trace!("renaming state <{old}> to <{new}>");
        self.titles.remove_by_right(&id);
        self.states.get_mut(&id).expect("resolved id").rename(new.clone());
        self.titles.insert(new, id);
        self.history.clear();
        Ok(())
    }

    /// Removes a state, severing every transition touching it in both directions,
    /// and renumbers the surviving states so that the title sequence stays densely
    /// packed and matches what the generator would produce for a fresh state.
    ///
    /// Renumbering shifts every survivor whose title sorts after the removed title
    /// down by one generator position. This is only well-defined while those titles
    /// are ones the generator produced; if any of them is not, the operation fails
    /// with [`MachineError::UnrenumberableTitle`] and the machine is left untouched.
    pub fn remove_state(&mut self, title: &str) -> Result<(), MachineError> {
        let id = self.resolve(title)?;

        // Plan the renumbering up front so nothing is mutated on failure, and no
        // rename happens while iterating the title index.
        let mut plan = Vec::new();
        for (survivor, &sid) in self.titles.iter() {
            if sid == id || survivor.as_str() <= title {
                continue;
            }
            let shifted = self
                .generator
                .index_of(survivor)
                .filter(|&i| i > 0)
                .and_then(|i| self.generator.try_title(i - 1))
                .ok_or_else(|| MachineError::UnrenumberableTitle(survivor.clone()))?;
            plan.push((sid, shifted));
        }

        trace!("removing state <{title}>");
        self.states_count -= 1;

        // Sever all edges touching the removed state, keeping the neighbors
        // consistent. Both edge lists are collected first so neighbor mutation
        // never overlaps iteration.
        let removed = self.states.remove(&id).expect("resolved id");
        let outgoing: Vec<(Symbol, StateId)> = removed
            .transitions_out()
            .map(|(s, t)| (s.clone(), t))
            .collect();
        let incoming: Vec<(Symbol, Vec<StateId>)> = removed
            .transitions_in()
            .map(|(s, sources)| (s.clone(), sources.iter().copied().collect()))
            .collect();
        for (symbol, target) in outgoing {
            if target != id {
                self.states
                    .get_mut(&target)
                    .expect("edge targets a live state")
                    .remove_transition_in(&symbol, id);
            }
        }
        for (symbol, sources) in incoming {
            for source in sources {
                if source != id {
                    self.states
                        .get_mut(&source)
                        .expect("edge comes from a live state")
                        .remove_transition_out(&symbol);
                }
            }
        }

        self.titles.remove_by_right(&id);
        self.finals.remove(&id);
        if self.start == Some(id) {
            self.start = None;
            self.current = None;
        } else if self.current == Some(id) {
            self.current = self.start;
        }
        self.history.clear();

        // Apply the planned renumbering in ascending title order, so each slot is
        // vacated before it is reused.
        for (sid, shifted) in plan {
            self.titles.remove_by_right(&sid);
            self.states.get_mut(&sid).expect("survivor").rename(shifted.clone());
            self.titles.insert(shifted, sid);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // transitions
    // ------------------------------------------------------------------

    /// Adds a batch of transitions from `from` to `to`, one per symbol.
    ///
    /// If any of the symbols is already wired out of `from`, the whole batch is
    /// rejected with [`MachineError::TransitionsExist`] carrying the conflicting
    /// symbol to existing-target map, so the caller can ask for confirmation and
    /// retry via [`Machine::add_and_replace_transitions`].
    pub fn add_transitions<I, S>(&mut self, symbols: I, from: &str, to: &str) -> Result<(), MachineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let symbols = self.checked_batch(symbols, from, to)?;
        let existing = self.existing_transitions(symbols.iter().cloned(), from)?;
        if !existing.is_empty() {
            return Err(MachineError::TransitionsExist {
                from: from.to_string(),
                existing,
            });
        }
        self.wire_batch(symbols, from, to)
    }

    /// Like [`Machine::add_transitions`], but unconditionally overwrites any
    /// transitions that already exist for the given symbols.
    pub fn add_and_replace_transitions<I, S>(
        &mut self,
        symbols: I,
        from: &str,
        to: &str,
    ) -> Result<(), MachineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let symbols = self.checked_batch(symbols, from, to)?;
        self.wire_batch(symbols, from, to)
    }

    /// Validates a transition batch: both endpoints must exist and every symbol
    /// must belong to the alphabet.
    fn checked_batch<I, S>(&self, symbols: I, from: &str, to: &str) -> Result<BTreeSet<Symbol>, MachineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.resolve(from)?;
        self.resolve(to)?;
        let symbols: BTreeSet<Symbol> = symbols.into_iter().map(Into::into).collect();
        for symbol in &symbols {
            if !self.alphabet.contains(symbol) {
                return Err(MachineError::ForeignSymbol(symbol.clone()));
            }
        }
        Ok(symbols)
    }

    /// Wires every symbol of the batch at both endpoints. Overwritten edges have
    /// their reverse entry removed first, so symmetry is never broken.
    fn wire_batch(&mut self, symbols: BTreeSet<Symbol>, from: &str, to: &str) -> Result<(), MachineError> {
        let from_id = self.resolve(from)?;
        let to_id = self.resolve(to)?;
        for symbol in symbols {
            trace!("wiring <{from}> --[{symbol}]--> <{to}>");
            let previous = self
                .states
                .get_mut(&from_id)
                .expect("resolved id")
                .add_transition_out(symbol.clone(), to_id);
            if let Some(previous) = previous {
                self.states
                    .get_mut(&previous)
                    .expect("edge targets a live state")
                    .remove_transition_in(&symbol, from_id);
            }
            self.states
                .get_mut(&to_id)
                .expect("resolved id")
                .add_transition_in(symbol, from_id);
        }
        Ok(())
    }

    /// The subset of `symbols` for which `from` already has an outgoing transition,
    /// mapped to the titles of their current targets.
    pub fn existing_transitions<I, S>(
        &self,
        symbols: I,
        from: &str,
    ) -> Result<BTreeMap<Symbol, String>, MachineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let from_id = self.resolve(from)?;
        let state = &self.states[&from_id];
        Ok(symbols
            .into_iter()
            .map(Into::into)
            .filter_map(|symbol| {
                let target = state.target(&symbol)?;
                Some((symbol, self.title_of(target).to_string()))
            })
            .collect())
    }

    /// Removes the transitions between `from` and `to` for the given symbols.
    /// Symbols that are not currently wired from `from` to `to` are skipped.
    pub fn remove_transitions<I, S>(&mut self, from: &str, to: &str, symbols: I) -> Result<(), MachineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let from_id = self.resolve(from)?;
        let to_id = self.resolve(to)?;
        for symbol in symbols.into_iter().map(Into::into) {
            if self.states[&from_id].target(&symbol) != Some(to_id) {
                continue;
            }
            trace!("severing <{from}> --[{symbol}]--> <{to}>");
            self.states
                .get_mut(&from_id)
                .expect("resolved id")
                .remove_transition_out(&symbol);
            self.states
                .get_mut(&to_id)
                .expect("resolved id")
                .remove_transition_in(&symbol, from_id);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // start and final states
    // ------------------------------------------------------------------

    /// Designates the start state. The current state is set alongside it.
    ///
    /// Fails with [`MachineError::StartStateSet`] if a start state is already
    /// assigned; callers must explicitly go through
    /// [`Machine::override_start_state`] to replace it.
    pub fn set_start_state(&mut self, title: &str) -> Result<(), MachineError> {
        if let Some(current) = self.start {
            return Err(MachineError::StartStateSet {
                current: self.title_of(current).to_string(),
            });
        }
        let id = self.resolve(title)?;
        self.start = Some(id);
        self.current = Some(id);
        Ok(())
    }

    /// Replaces the assigned start state and returns the previous start title, so
    /// the caller can update any dependent display state.
    pub fn override_start_state(&mut self, title: &str) -> Result<String, MachineError> {
        let previous = self.start.ok_or(MachineError::NoStartState)?;
        let id = self.resolve(title)?;
        let previous = self.title_of(previous).to_string();
        self.start = Some(id);
        self.current = Some(id);
        Ok(previous)
    }

    /// Clears the start state. The current state is cleared with it, preserving
    /// their joint nullity.
    pub fn remove_start_state(&mut self) {
        self.start = None;
        self.current = None;
    }

    /// Marks a state as final.
    pub fn add_final_state(&mut self, title: &str) -> Result<(), MachineError> {
        let id = self.resolve(title)?;
        self.finals.insert(id);
        Ok(())
    }

    /// Unmarks a state as final.
    pub fn remove_final_state(&mut self, title: &str) -> Result<(), MachineError> {
        let id = self.resolve(title)?;
        self.finals.remove(&id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // readiness gates
    // ------------------------------------------------------------------

    /// Whether every state has an outgoing transition for every alphabet symbol.
    pub fn is_complete_states(&self) -> bool {
        self.states.values().all(|state| state.is_complete(&self.alphabet))
    }

    /// Whether a start state is assigned.
    pub fn is_start_state_set(&self) -> bool {
        self.start.is_some()
    }

    /// Whether at least one final state is designated.
    pub fn is_final_states_set(&self) -> bool {
        !self.finals.is_empty()
    }

    // ------------------------------------------------------------------
    // queries for rendering and serialization
    // ------------------------------------------------------------------

    /// The number of states, as fed to the title generator. After removals this
    /// tracks the renumbered sequence, so the next generated title never collides.
    pub fn states_count(&self) -> usize {
        self.states_count
    }

    /// Returns an iterator over all state titles, in sorted order.
    pub fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        self.titles.left_values().map(String::as_str)
    }

    /// Whether a state with the given title exists.
    pub fn contains_state(&self, title: &str) -> bool {
        self.titles.contains_left(title)
    }

    /// Title of the start state, if one is assigned.
    pub fn start_state(&self) -> Option<&str> {
        self.start.map(|id| self.title_of(id))
    }

    /// Title of the current state. `Some` exactly while a start state is assigned.
    pub fn current_state(&self) -> Option<&str> {
        self.current.map(|id| self.title_of(id))
    }

    /// Whether the given state is marked final.
    pub fn is_final(&self, title: &str) -> Result<bool, MachineError> {
        Ok(self.finals.contains(&self.resolve(title)?))
    }

    /// Titles of all final states, in sorted order.
    pub fn final_states(&self) -> BTreeSet<String> {
        self.finals.iter().map(|&id| self.title_of(id).to_string()).collect()
    }

    /// The title of the state reached from `from` on `symbol`, if that edge is wired.
    pub fn target_of(&self, from: &str, symbol: &str) -> Option<&str> {
        let id = *self.titles.get_by_left(from)?;
        self.states[&id].target(symbol).map(|t| self.title_of(t))
    }

    /// The set of symbols wired between the ordered pair `(from, to)`.
    pub fn transition_symbols(&self, from: &str, to: &str) -> BTreeSet<Symbol> {
        let (Some(&from_id), Some(&to_id)) =
            (self.titles.get_by_left(from), self.titles.get_by_left(to))
        else {
            return BTreeSet::new();
        };
        self.states[&from_id]
            .transitions_out()
            .filter(|&(_, t)| t == to_id)
            .map(|(s, _)| s.clone())
            .collect()
    }

    /// Every transition of the machine, grouped per ordered state pair and sorted,
    /// as `(from, to, symbols)`. This is enough structural data to re-render a
    /// graph after any mutation, and it drives serialization.
    pub fn edges(&self) -> Vec<(String, String, BTreeSet<Symbol>)> {
        let mut grouped: BTreeMap<(String, String), BTreeSet<Symbol>> = BTreeMap::new();
        for (title, &id) in self.titles.iter() {
            for (symbol, target) in self.states[&id].transitions_out() {
                grouped
                    .entry((title.clone(), self.title_of(target).to_string()))
                    .or_default()
                    .insert(symbol.clone());
            }
        }
        grouped
            .into_iter()
            .map(|((from, to), symbols)| (from, to, symbols))
            .collect()
    }

    /// Checks the bidirectional symmetry invariant in both directions. Used by
    /// tests after every class of mutation.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.states.iter().all(|(&id, state)| {
            state
                .transitions_out()
                .all(|(symbol, target)| self.states[&target].has_incoming(symbol, id))
                && state.transitions_in().all(|(symbol, sources)| {
                    sources.iter().all(|source| self.states[source].target(symbol) == Some(id))
                })
        })
    }
}

/// Renders the transition table: one row per state (the start state marked with
/// `->`, final states wrapped in parentheses), one column per alphabet symbol.
impl<G: TitleGenerator> std::fmt::Display for Machine<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("state".to_string())
                .chain(self.alphabet.universe().cloned()),
        );
        for (title, &id) in self.titles.iter() {
            let mut decorated = if self.finals.contains(&id) {
                format!("({title})")
            } else {
                title.clone()
            };
            if self.start == Some(id) {
                decorated = format!("-> {decorated}");
            }
            let mut row = vec![decorated];
            for symbol in self.alphabet.universe() {
                match self.states[&id].target(symbol) {
                    Some(target) => row.push(self.title_of(target).to_string()),
                    None => row.push("-".to_string()),
                }
            }
            builder.push_record(row);
        }
        write!(
            f,
            "{}",
            builder.build().with(tabled::settings::Style::rounded())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary_machine(states: usize) -> Machine {
        let mut machine = Machine::new(Alphabet::from_csv("0,1").unwrap());
        for _ in 0..states {
            machine.add_state().unwrap();
        }
        machine
    }

    #[test]
    fn generated_titles_are_sequential() {
        let mut machine = binary_machine(0);
        assert_eq!(machine.add_state().unwrap(), "A");
        assert_eq!(machine.add_state().unwrap(), "B");
        assert_eq!(machine.add_state().unwrap(), "C");
        assert_eq!(machine.states_count(), 3);
        assert_eq!(machine.titles().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }

    #[test]
    fn determinism_last_write_wins_via_replace() {
        let mut machine = binary_machine(3);
        machine.add_transitions(["0"], "A", "B").unwrap();
        machine.add_and_replace_transitions(["0"], "A", "C").unwrap();
        assert_eq!(machine.target_of("A", "0"), Some("C"));
        // the old reverse entry must be gone
        assert!(machine.transition_symbols("A", "B").is_empty());
        assert!(machine.is_consistent());
    }

    #[test]
    fn conflicting_batch_is_rejected_whole() {
        let mut machine = binary_machine(3);
        machine.add_transitions(["0"], "A", "B").unwrap();

        let err = machine.add_transitions(["0", "1"], "A", "C").unwrap_err();
        assert_eq!(
            err,
            MachineError::TransitionsExist {
                from: "A".to_string(),
                existing: BTreeMap::from([("0".to_string(), "B".to_string())]),
            }
        );
        // the whole batch was aborted, the disjoint symbol was not wired either
        assert_eq!(machine.target_of("A", "1"), None);
        assert_eq!(machine.target_of("A", "0"), Some("B"));
        assert!(machine.is_consistent());
    }

    #[test]
    fn disjoint_batch_leaves_prior_edges_untouched() {
        let mut machine = binary_machine(3);
        machine.add_transitions(["0"], "A", "B").unwrap();
        machine.add_transitions(["1"], "A", "C").unwrap();
        assert_eq!(machine.target_of("A", "0"), Some("B"));
        assert_eq!(machine.target_of("A", "1"), Some("C"));
        assert!(machine.is_consistent());
    }

    #[test]
    fn batch_validation() {
        let mut machine = binary_machine(2);
        assert_eq!(
            machine.add_transitions(["0"], "A", "X"),
            Err(MachineError::UnknownState("X".to_string()))
        );
        assert_eq!(
            machine.add_transitions(["2"], "A", "B"),
            Err(MachineError::ForeignSymbol("2".to_string()))
        );
    }

    #[test]
    fn completeness_is_monotonic_in_wiring() {
        let mut machine = binary_machine(2);
        assert!(!machine.is_complete_states());

        machine.add_transitions(["0", "1"], "A", "B").unwrap();
        assert!(!machine.is_complete_states());
        machine.add_transitions(["0", "1"], "B", "B").unwrap();
        assert!(machine.is_complete_states());

        machine.remove_transitions("A", "B", ["1"]).unwrap();
        assert!(!machine.is_complete_states());
        assert!(machine.is_consistent());
    }

    #[test]
    fn start_state_single_assignment() {
        let mut machine = binary_machine(2);
        machine.set_start_state("A").unwrap();
        assert_eq!(
            machine.set_start_state("B"),
            Err(MachineError::StartStateSet {
                current: "A".to_string()
            })
        );
        assert_eq!(machine.start_state(), Some("A"));

        assert_eq!(machine.override_start_state("B").unwrap(), "A");
        assert_eq!(machine.start_state(), Some("B"));
        assert_eq!(machine.current_state(), Some("B"));
    }

    #[test]
    fn start_and_current_share_nullity() {
        let mut machine = binary_machine(1);
        assert_eq!(machine.override_start_state("A"), Err(MachineError::NoStartState));
        machine.set_start_state("A").unwrap();
        assert_eq!(machine.current_state(), Some("A"));
        machine.remove_start_state();
        assert_eq!(machine.start_state(), None);
        assert_eq!(machine.current_state(), None);
    }

    #[test]
    fn final_states() {
        let mut machine = binary_machine(2);
        assert!(!machine.is_final_states_set());
        machine.add_final_state("B").unwrap();
        assert!(machine.is_final_states_set());
        assert!(machine.is_final("B").unwrap());
        assert!(!machine.is_final("A").unwrap());
        machine.remove_final_state("B").unwrap();
        assert!(!machine.is_final_states_set());
        assert_eq!(machine.is_final("X"), Err(MachineError::UnknownState("X".to_string())));
    }

    #[test]
    fn rename_rekeys_the_title_index() {
        let mut machine = binary_machine(2);
        machine.add_transitions(["0"], "A", "B").unwrap();
        machine.rename_state("B", "Q").unwrap();

        assert!(!machine.contains_state("B"));
        assert!(machine.contains_state("Q"));
        assert_eq!(machine.target_of("A", "0"), Some("Q"));
        assert_eq!(
            machine.rename_state("Q", "A"),
            Err(MachineError::DuplicateTitle("A".to_string()))
        );
        assert!(machine.is_consistent());
    }

    #[test_log::test]
    fn removal_renumbers_survivors() {
        // fully wired ring on `1` (A -> B -> C -> A) with self-loops on `0`
        let mut machine = binary_machine(3);
        for (from, to) in [("A", "B"), ("B", "C"), ("C", "A")] {
            machine.add_transitions(["1"], from, to).unwrap();
        }
        for title in ["A", "B", "C"] {
            machine.add_transitions(["0"], title, title).unwrap();
        }
        assert!(machine.is_complete_states());

        machine.remove_state("B").unwrap();

        // former C was renamed to B, the title sequence is dense again
        assert_eq!(machine.titles().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(machine.states_count(), 2);
        // every edge touching the removed state was severed
        assert_eq!(machine.target_of("A", "1"), None);
        // the renamed survivor kept its own edges
        assert_eq!(machine.target_of("B", "1"), Some("A"));
        assert_eq!(machine.target_of("B", "0"), Some("B"));
        assert!(machine.is_consistent());

        // the freed title is what the generator hands out next
        assert_eq!(machine.add_state().unwrap(), "C");
    }

    #[test]
    fn removal_clears_start_and_final_flags() {
        let mut machine = binary_machine(2);
        machine.set_start_state("B").unwrap();
        machine.add_final_state("B").unwrap();

        machine.remove_state("B").unwrap();
        assert_eq!(machine.start_state(), None);
        assert_eq!(machine.current_state(), None);
        assert!(!machine.is_final_states_set());
    }

    #[test]
    fn removal_with_self_loop() {
        let mut machine = binary_machine(2);
        machine.add_transitions(["0", "1"], "B", "B").unwrap();
        machine.remove_state("B").unwrap();
        assert_eq!(machine.titles().collect::<Vec<_>>(), vec!["A"]);
        assert!(machine.is_consistent());
    }

    #[test]
    fn removal_guards_foreign_titles() {
        let mut machine = binary_machine(1);
        machine.add_state_titled("custom").unwrap();
        machine.add_transitions(["0"], "A", "custom").unwrap();

        // "custom" sorts after "A" but was never produced by the generator, so
        // the removal must refuse and leave everything in place
        assert_eq!(
            machine.remove_state("A"),
            Err(MachineError::UnrenumberableTitle("custom".to_string()))
        );
        assert!(machine.contains_state("A"));
        assert_eq!(machine.target_of("A", "0"), Some("custom"));
        assert!(machine.is_consistent());
    }

    #[test]
    fn deep_copy_is_independent() {
        let mut machine = binary_machine(2);
        machine.add_transitions(["0", "1"], "A", "B").unwrap();
        machine.set_start_state("A").unwrap();
        machine.add_final_state("B").unwrap();

        let mut copy = machine.clone();
        copy.remove_state("B").unwrap();
        copy.rename_state("A", "X").unwrap();

        // the original is untouched
        assert_eq!(machine.titles().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(machine.target_of("A", "0"), Some("B"));
        assert_eq!(machine.start_state(), Some("A"));
        assert!(machine.is_final("B").unwrap());
        assert!(machine.is_consistent());
    }

    #[test]
    fn duplicate_titles_are_rejected() {
        let mut machine = binary_machine(1);
        assert_eq!(
            machine.add_state_titled("A"),
            Err(MachineError::DuplicateTitle("A".to_string()))
        );
    }

    #[test]
    fn edges_group_symbols_per_ordered_pair() {
        let mut machine = binary_machine(2);
        machine.add_transitions(["0", "1"], "A", "B").unwrap();
        machine.add_transitions(["0"], "B", "A").unwrap();

        let edges = machine.edges();
        assert_eq!(
            edges,
            vec![
                (
                    "A".to_string(),
                    "B".to_string(),
                    BTreeSet::from(["0".to_string(), "1".to_string()])
                ),
                ("B".to_string(), "A".to_string(), BTreeSet::from(["0".to_string()])),
            ]
        );
        assert_eq!(
            machine.transition_symbols("A", "B"),
            BTreeSet::from(["0".to_string(), "1".to_string()])
        );
    }

    #[test]
    fn transition_table_display() {
        let mut machine = binary_machine(2);
        machine.add_transitions(["0", "1"], "A", "B").unwrap();
        machine.set_start_state("A").unwrap();
        machine.add_final_state("B").unwrap();

        let table = machine.to_string();
        assert!(table.contains("-> A"));
        assert!(table.contains("(B)"));
    }
}
