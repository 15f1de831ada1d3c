use std::collections::BTreeMap;

use crate::alphabet::Symbol;

/// Failures reported by [`crate::machine::Machine`] operations.
///
/// All of these are locally recoverable. The two conflict kinds,
/// [`MachineError::StartStateSet`] and [`MachineError::TransitionsExist`], carry the
/// conflicting payload so a caller can render a confirmation and retry with the
/// overriding operation instead of re-querying the machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MachineError {
    /// An operation named a title that is not present in the machine.
    #[error("no state with title {0:?}")]
    UnknownState(String),

    /// A transition used a symbol outside the machine's alphabet.
    #[error("symbol {0:?} does not belong to the alphabet")]
    ForeignSymbol(Symbol),

    /// A state with the given title already exists.
    #[error("a state with title {0:?} already exists")]
    DuplicateTitle(String),

    /// The title generator cannot name a state with this ordinal index.
    #[error("the title generator cannot name state number {0}")]
    TitleExhausted(usize),

    /// A start state is already assigned. Carries the current start title so the
    /// caller can offer overriding it as an alternative action.
    #[error("start state is already set to {current:?}")]
    StartStateSet {
        /// Title of the currently assigned start state.
        current: String,
    },

    /// The operation requires a start state, but none is assigned.
    #[error("no start state is set")]
    NoStartState,

    /// Adding the transition batch would silently overwrite existing edges.
    /// Carries the conflicting symbol to existing-target mapping.
    #[error("state {from:?} already has transitions for {existing:?}")]
    TransitionsExist {
        /// Title of the source state of the rejected batch.
        from: String,
        /// The conflicting subset: each symbol mapped to the title of its current target.
        existing: BTreeMap<Symbol, String>,
    },

    /// Execution hit a state without an outgoing transition for the consumed symbol.
    /// A complete automaton is the caller-checked precondition for execution.
    #[error("state {state:?} has no transition for symbol {symbol:?}")]
    MissingTransition {
        /// Title of the state execution was in.
        state: String,
        /// The symbol that could not be consumed.
        symbol: Symbol,
    },

    /// `undo` or `reset` was called without any recorded transition.
    #[error("no transitions have been made")]
    EmptyHistory,

    /// State removal would have to renumber a title the generator does not
    /// recognize. The machine is left untouched.
    #[error("cannot renumber state {0:?}")]
    UnrenumberableTitle(String),
}
