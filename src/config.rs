//! Application configuration, read from a `.properties`-style file.
//!
//! The configuration is an explicit value handed to whoever needs it at
//! construction time; there is no process-wide singleton. The core only
//! interprets the `alphabet` key, everything else is passed through untyped for
//! the surrounding layers (window titles, canvas sizes and the like).

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::alphabet::{Alphabet, AlphabetError};
use crate::math::Map;

/// Key under which the machine alphabet is configured, as a comma-delimited
/// symbol list.
pub const ALPHABET_KEY: &str = "alphabet";

/// A parsed set of configuration properties.
///
/// # Example
/// ```
/// use dfa_machine::config::Config;
///
/// let config: Config = "# machine setup\nalphabet=0,1\nmain-title=Machines"
///     .parse()
///     .unwrap();
/// assert_eq!(config.alphabet().unwrap().size(), 2);
/// assert_eq!(config.get("main-title"), Some("Machines"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Config {
    properties: Map<String, String>,
}

impl Config {
    /// Reads properties from `key=value` lines. Blank lines and lines starting
    /// with `#` or `!` are skipped; keys and values are trimmed.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        let mut properties = Map::default();
        for (line_no, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                continue;
            }
            let (key, value) = trimmed.split_once('=').ok_or_else(|| ConfigError::BadLine {
                line_no: line_no + 1,
                line: line.clone(),
            })?;
            properties.insert(key.trim().to_string(), value.trim().to_string());
        }
        Ok(Self { properties })
    }

    /// Reads properties from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_reader(std::fs::File::open(path)?)
    }

    /// The configured machine alphabet.
    pub fn alphabet(&self) -> Result<Alphabet, ConfigError> {
        let csv = self
            .get(ALPHABET_KEY)
            .ok_or_else(|| ConfigError::MissingKey(ALPHABET_KEY.to_string()))?;
        Ok(Alphabet::from_csv(csv)?)
    }

    /// Raw value of an arbitrary property.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(s.as_bytes())
    }
}

/// Failures while reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The underlying reader failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A required property is absent.
    #[error("missing property {0:?}")]
    MissingKey(String),
    /// The configured alphabet is not valid.
    #[error(transparent)]
    Alphabet(#[from] AlphabetError),
    /// A non-comment line is not of the form `key=value`.
    #[error("malformed line {line_no}: {line:?}")]
    BadLine {
        /// One-based line number.
        line_no: usize,
        /// The offending line.
        line: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_properties() {
        let config: Config = "# comment\n! also a comment\n\nalphabet = a,b\ncanvas-width=600\n"
            .parse()
            .unwrap();
        assert_eq!(config.get("canvas-width"), Some("600"));
        assert_eq!(config.get("unknown"), None);

        let alphabet = config.alphabet().unwrap();
        assert!(alphabet.contains_all(["a", "b"]));
    }

    #[test]
    fn missing_alphabet_key() {
        let config: Config = "main-title=Machines".parse().unwrap();
        assert!(matches!(config.alphabet(), Err(ConfigError::MissingKey(_))));
    }

    #[test]
    fn bad_lines_are_rejected() {
        let err = "alphabet=0,1\nnot a property\n".parse::<Config>().unwrap_err();
        assert!(matches!(err, ConfigError::BadLine { line_no: 2, .. }));
    }

    #[test]
    fn degenerate_alphabet_is_surfaced() {
        let config: Config = "alphabet=0,,1".parse().unwrap();
        assert!(matches!(config.alphabet(), Err(ConfigError::Alphabet(_))));
    }
}
