/// A naming strategy producing a state's display title from its ordinal index.
///
/// The machine never hard-codes a naming policy. It asks its generator for the title
/// of a freshly added state and, during state removal, uses [`TitleGenerator::index_of`]
/// to verify that the surviving titles can be renumbered without collisions.
pub trait TitleGenerator {
    /// Generates the title for the state with the given ordinal index, or `None` if
    /// the generator cannot name that many states.
    fn try_title(&self, index: usize) -> Option<String>;

    /// The inverse of [`TitleGenerator::try_title`]: the ordinal index a title was
    /// generated for, or `None` if this generator would never produce it.
    fn index_of(&self, title: &str) -> Option<usize>;

    /// Generates the title for the state with the given ordinal index.
    ///
    /// # Panics
    /// Panics if the generator cannot name that many states.
    fn title(&self, index: usize) -> String {
        self.try_title(index)
            .unwrap_or_else(|| panic!("no title for state index {index}"))
    }
}

/// The default naming strategy: single latin capital letters `A` through `Z`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LatinTitles;

/// The number of titles [`LatinTitles`] can produce.
pub const LATIN_TITLES_COUNT: usize = 26;

impl TitleGenerator for LatinTitles {
    fn try_title(&self, index: usize) -> Option<String> {
        if index >= LATIN_TITLES_COUNT {
            return None;
        }
        Some(((b'A' + index as u8) as char).to_string())
    }

    fn index_of(&self, title: &str) -> Option<usize> {
        let mut chars = title.chars();
        let c = chars.next()?;
        if chars.next().is_some() || !c.is_ascii_uppercase() {
            return None;
        }
        Some(c as usize - 'A' as usize)
    }
}
