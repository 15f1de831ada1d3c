//! Reading and writing machines in the line-oriented interchange format.
//!
//! A stored machine is two lines of semicolon-delimited records:
//! 1. one record `title,x,y,isStart,isFinal;` per state, and
//! 2. one record `from,to,symbols;` per ordered state pair, with the symbols of
//!    that pair joined by `+` (loops use `from == to`).
//!
//! The format carries node coordinates for the graph canvas, which the core
//! machine knows nothing about, so the unit of persistence is a
//! [`MachineDocument`] pairing a machine with its node positions.

use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use itertools::Itertools;
use tracing::debug;

use crate::alphabet::Alphabet;
use crate::machine::{LatinTitles, Machine, MachineError, TitleGenerator};
use crate::math::Map;

/// Canvas coordinates of one node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

/// A machine together with the per-state canvas positions the interchange format
/// carries. States without a recorded position are written at the origin.
#[derive(Clone, Debug)]
pub struct MachineDocument<G: TitleGenerator = LatinTitles> {
    /// The automaton itself.
    pub machine: Machine<G>,
    /// Node positions, keyed by state title.
    pub positions: Map<String, Position>,
}

impl<G: TitleGenerator> MachineDocument<G> {
    /// Writes the document in the two-line interchange format.
    pub fn save<W: Write>(&self, mut writer: W) -> Result<(), StorageError> {
        let nodes = self
            .machine
            .titles()
            .map(|title| {
                let position = self.positions.get(title).copied().unwrap_or_default();
                let is_start = self.machine.start_state() == Some(title);
                let is_final = self.machine.is_final(title).expect("title is live");
                format!("{},{},{},{},{};", title, position.x, position.y, is_start, is_final)
            })
            .join("");
        writeln!(writer, "{nodes}")?;

        let transitions = self
            .machine
            .edges()
            .into_iter()
            .map(|(from, to, symbols)| format!("{},{},{};", from, to, symbols.iter().join("+")))
            .join("");
        writeln!(writer, "{transitions}")?;
        debug!("saved machine with {} states", self.machine.states_count());
        Ok(())
    }

    /// Writes the document to a file, replacing any previous content.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        self.save(std::fs::File::create(path)?)
    }

    /// Reads a document from the two-line interchange format. The alphabet is not
    /// part of the format and must be supplied by the caller (it comes from the
    /// application configuration).
    ///
    /// Reading aborts with a hard failure if a transition record references an
    /// unknown state or re-assigns a symbol already wired from the same source.
    pub fn load<R: Read>(reader: R, alphabet: Alphabet, generator: G) -> Result<Self, StorageError> {
        let mut lines = BufReader::new(reader).lines();
        let nodes_line = lines.next().transpose()?.ok_or(StorageError::MissingLine {
            which: "nodes",
        })?;
        let transitions_line = lines.next().transpose()?.unwrap_or_default();

        let mut machine = Machine::with_generator(alphabet, generator);
        let mut positions = Map::default();
        for record in records(&nodes_line) {
            let node = NodeRecord::parse(record)?;
            machine.add_state_titled(node.title.clone())?;
            if node.is_start {
                machine.set_start_state(&node.title)?;
            }
            if node.is_final {
                machine.add_final_state(&node.title)?;
            }
            positions.insert(node.title, node.position);
        }

        for record in records(&transitions_line) {
            let (from, to, symbols) = parse_transition(record)?;
            machine.add_transitions(symbols, from, to)?;
        }

        debug!("loaded machine with {} states", machine.states_count());
        Ok(Self { machine, positions })
    }

    /// Reads a document from a file.
    pub fn load_from_path(
        path: impl AsRef<Path>,
        alphabet: Alphabet,
        generator: G,
    ) -> Result<Self, StorageError> {
        Self::load(std::fs::File::open(path)?, alphabet, generator)
    }
}

fn records(line: &str) -> impl Iterator<Item = &str> {
    line.split(';').map(str::trim_end).filter(|r| !r.is_empty())
}

struct NodeRecord {
    title: String,
    position: Position,
    is_start: bool,
    is_final: bool,
}

impl NodeRecord {
    fn parse(record: &str) -> Result<Self, StorageError> {
        let bad = || StorageError::bad_record("nodes", record);
        let (title, x, y, is_start, is_final) =
            record.split(',').collect_tuple().ok_or_else(bad)?;
        Ok(Self {
            title: title.to_string(),
            position: Position {
                x: x.parse().map_err(|_| bad())?,
                y: y.parse().map_err(|_| bad())?,
            },
            is_start: parse_bool(is_start).ok_or_else(bad)?,
            is_final: parse_bool(is_final).ok_or_else(bad)?,
        })
    }
}

fn parse_transition(record: &str) -> Result<(&str, &str, Vec<String>), StorageError> {
    let (from, to, symbols) = record
        .split(',')
        .collect_tuple()
        .ok_or_else(|| StorageError::bad_record("transitions", record))?;
    Ok((from, to, symbols.split('+').map(str::to_string).collect()))
}

fn parse_bool(token: &str) -> Option<bool> {
    if token.eq_ignore_ascii_case("true") {
        Some(true)
    } else if token.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Failures while reading or writing the interchange format.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The underlying reader or writer failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The input ended before the named line.
    #[error("missing {which} line")]
    MissingLine {
        /// Which of the two lines was absent.
        which: &'static str,
    },
    /// A record did not match the expected field layout.
    #[error("malformed {line} record {record:?}")]
    BadRecord {
        /// Which line the record came from.
        line: &'static str,
        /// The offending record text.
        record: String,
    },
    /// Rebuilding the machine rejected a record, e.g. an unknown state reference
    /// or a symbol already assigned from the same source.
    #[error(transparent)]
    Machine(#[from] MachineError),
}

impl StorageError {
    fn bad_record(line: &'static str, record: &str) -> Self {
        Self::BadRecord {
            line,
            record: record.to_string(),
        }
    }
}
