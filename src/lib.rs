//! Core model of an editable, runnable deterministic finite automaton (DFA).
//!
//! The centerpiece is [`machine::Machine`]: a mutable directed labeled graph of
//! states with alphabet-constrained transitions that are recorded at both of their
//! endpoints, so an edge can always be severed safely from either side. The machine
//! tracks a start state and a set of final states, reports completeness (every
//! state wired for every symbol of its [`alphabet::Alphabet`]), and executes one
//! input symbol at a time with an undoable transition history.
//!
//! States are addressed by their display title. Titles are produced by a pluggable
//! [`machine::TitleGenerator`] and the machine keeps them densely packed: removing
//! a state renumbers every surviving state whose title sorts after the removed one,
//! so the next generated title never collides.
//!
//! Everything a graphical builder or runner needs sits behind plain method calls:
//! structural editing, start/final management, the readiness gates, execution, and
//! a render surface describing states, flags and per-pair transition symbol sets.
//! Machines can be persisted in a two-line interchange format via [`storage`], and
//! the alphabet comes from an explicit [`config::Config`] rather than any global
//! state.
//!
//! ```
//! use dfa_machine::prelude::*;
//!
//! let mut machine = Machine::new(Alphabet::from_csv("0,1").unwrap());
//! let a = machine.add_state().unwrap();
//! let b = machine.add_state().unwrap();
//!
//! machine.add_transitions(["0"], &a, &a).unwrap();
//! machine.add_transitions(["1"], &a, &b).unwrap();
//! machine.add_transitions(["0", "1"], &b, &b).unwrap();
//! machine.set_start_state(&a).unwrap();
//! machine.add_final_state(&b).unwrap();
//!
//! assert!(machine.is_complete_states() && machine.is_start_state_set());
//! machine.transition("0").unwrap();
//! machine.transition("1").unwrap();
//! assert!(machine.is_accepting());
//! ```
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude re-exports the types needed for everyday use of the crate, so that
/// `use dfa_machine::prelude::*;` is enough to get going.
pub mod prelude {
    pub use super::{
        alphabet::{Alphabet, AlphabetError, Symbol},
        config::{Config, ConfigError},
        machine::{
            LatinTitles, Machine, MachineError, MachineTransition, TitleGenerator,
        },
        storage::{MachineDocument, Position, StorageError},
    };
}

/// Definitions of the collection types used throughout the crate.
pub mod math;

/// The input alphabet machines are validated against.
pub mod alphabet;

/// The automaton model: states, transitions, execution.
pub mod machine;

/// Persistence in the line-oriented interchange format.
pub mod storage;

/// Explicit application configuration, including the alphabet.
pub mod config;
