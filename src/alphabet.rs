use itertools::Itertools;

/// A single input symbol. Symbols are strings of arbitrary but fixed granularity
/// (single characters in practice) and are compared by exact equality.
pub type Symbol = String;

/// An immutable-after-construction set of input symbols. Every transition of a
/// [`crate::machine::Machine`] is validated against the alphabet it was created with.
///
/// # Example
/// ```
/// use dfa_machine::alphabet::Alphabet;
///
/// let alphabet = Alphabet::from_csv("0,1").unwrap();
/// assert!(alphabet.contains("1"));
/// assert!(!alphabet.contains("2"));
/// assert!(alphabet.contains_all(["0", "1"]));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Alphabet(Vec<Symbol>);

impl Alphabet {
    /// Creates an alphabet from the given symbols. Duplicates are collapsed and the
    /// symbols are kept in sorted order.
    pub fn new<I, S>(symbols: I) -> Result<Self, AlphabetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let symbols: Vec<Symbol> = symbols.into_iter().map(Into::into).unique().sorted().collect();
        if symbols.is_empty() {
            return Err(AlphabetError::Empty);
        }
        if symbols.iter().any(|s| s.is_empty()) {
            return Err(AlphabetError::EmptySymbol);
        }
        Ok(Self(symbols))
    }

    /// Parses an alphabet from a comma-delimited string, treating each token as one
    /// symbol. Tokens are taken verbatim, no trimming happens.
    pub fn from_csv(symbols: &str) -> Result<Self, AlphabetError> {
        Self::new(symbols.split(','))
    }

    /// The number of symbols in the alphabet.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns an iterator over all symbols, in sorted order.
    pub fn universe(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.0.iter()
    }

    /// Checks whether the given symbol belongs to the alphabet.
    pub fn contains(&self, symbol: &str) -> bool {
        self.0.binary_search_by(|s| s.as_str().cmp(symbol)).is_ok()
    }

    /// Checks whether every one of the given symbols belongs to the alphabet.
    pub fn contains_all<I, S>(&self, symbols: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        symbols.into_iter().all(|s| self.contains(s.as_ref()))
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(","))
    }
}

impl std::str::FromStr for Alphabet {
    type Err = AlphabetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_csv(s)
    }
}

/// Ways in which constructing an [`Alphabet`] can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlphabetError {
    /// No symbols were given. An alphabet must be non-empty.
    #[error("an alphabet must contain at least one symbol")]
    Empty,
    /// One of the given tokens was the empty string.
    #[error("the empty string is not a valid symbol")]
    EmptySymbol,
}
