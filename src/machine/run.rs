use tracing::trace;

use super::{Machine, MachineError, TitleGenerator};
use crate::alphabet::Symbol;

/// One executed transition, recorded so a run can be stepped back and reset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachineTransition {
    /// Title of the state the transition left.
    pub from: String,
    /// The consumed symbol.
    pub symbol: Symbol,
    /// Title of the state the transition entered.
    pub to: String,
}

impl std::fmt::Display for MachineTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}> --[{}]--> <{}>", self.from, self.symbol, self.to)
    }
}

/// Execution of the automaton. Before a run starts, callers are expected to have
/// verified the three readiness gates ([`Machine::is_complete_states`],
/// [`Machine::is_start_state_set`], [`Machine::is_final_states_set`]); a missing
/// edge during execution is reported as a hard [`MachineError::MissingTransition`].
impl<G: TitleGenerator> Machine<G> {
    /// Consumes one symbol, advancing the current state along its outgoing edge.
    /// Returns the title of the state that was entered.
    ///
    /// A symbol outside the alphabet is rejected with [`MachineError::ForeignSymbol`]
    /// and leaves the machine unchanged.
    pub fn transition(&mut self, symbol: &str) -> Result<String, MachineError> {
        if !self.alphabet.contains(symbol) {
            return Err(MachineError::ForeignSymbol(symbol.to_string()));
        }
        let current = self.current.ok_or(MachineError::NoStartState)?;
        let state = &self.states[&current];
        let target = state.target(symbol).ok_or_else(|| MachineError::MissingTransition {
            state: state.title.clone(),
            symbol: symbol.to_string(),
        })?;

        let record = MachineTransition {
            from: state.title.clone(),
            symbol: symbol.to_string(),
            to: self.states[&target].title.clone(),
        };
        trace!("executing {record}");
        self.history.push(record);
        self.current = Some(target);
        Ok(self.states[&target].title.clone())
    }

    /// Steps the run back over the most recent transition and returns the title of
    /// the state that became current again.
    pub fn undo(&mut self) -> Result<String, MachineError> {
        let last = self.history.pop().ok_or(MachineError::EmptyHistory)?;
        trace!("undoing {last}");
        let id = self
            .titles
            .get_by_left(&last.from)
            .copied()
            .ok_or(MachineError::UnknownState(last.from.clone()))?;
        self.current = Some(id);
        Ok(last.from)
    }

    /// Ends the run: reports whether the input consumed so far is accepted, clears
    /// the history and rewinds the current state to the start state.
    pub fn reset(&mut self) -> Result<bool, MachineError> {
        if self.history.is_empty() {
            return Err(MachineError::EmptyHistory);
        }
        let accepted = self.is_accepting();
        self.history.clear();
        self.current = self.start;
        Ok(accepted)
    }

    /// Whether the current state is a final state.
    pub fn is_accepting(&self) -> bool {
        self.current.is_some_and(|id| self.finals.contains(&id))
    }

    /// The transitions executed since the last reset, oldest first.
    pub fn history(&self) -> &[MachineTransition] {
        &self.history
    }
}
