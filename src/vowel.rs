use std::{collections::HashSet, path::Path};

use tracing::{debug, info};

use crate::source::read_lines_or_empty;

/// Phoneme symbols that mark a syllable nucleus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VowelSymbolSet {
    symbols: HashSet<String>,
}

impl VowelSymbolSet {
    pub fn is_nucleus_symbol(symbol: &str) -> bool {
        matches!(symbol.chars().next(), Some('A' | 'E' | 'I' | 'O' | 'U'))
    }

    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for symbol in symbols {
            let symbol = symbol.as_ref();
            if Self::is_nucleus_symbol(symbol) {
                debug!("Adding rhyme {}", symbol);
                set.insert(symbol.to_owned());
            }
        }

        VowelSymbolSet { symbols: set }
    }

    pub fn load(path: &Path) -> Self {
        let set = Self::from_symbols(read_lines_or_empty(path));
        info!(
            "Loaded {} vowel symbols from {}",
            set.len(),
            path.display()
        );
        set
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(|s| s.as_str())
    }
}
