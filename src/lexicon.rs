use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
};

use tracing::{info, trace};

use crate::{
    error::{AnalyzerError, Result},
    source::read_lines_or_empty,
    vowel::VowelSymbolSet,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pronunciation {
    // "AH0-N"; "-" without any nucleus
    pub rhyme: String,
    // "[AH0][AE1][AH0]"
    pub meter: String,
}

impl Pronunciation {
    pub fn derive<S: AsRef<str>>(phonemes: &[S], vowels: &VowelSymbolSet) -> Self {
        // None until the first nucleus; consonants before it never reach the key
        let mut rhyme: Option<String> = None;
        let mut meter = String::new();

        for phoneme in phonemes {
            let phoneme = phoneme.as_ref();
            if vowels.contains(phoneme) {
                rhyme = Some(phoneme.to_owned());
                meter.push('[');
                meter.push_str(phoneme);
                meter.push(']');
            } else if let Some(rhyme) = rhyme.as_mut() {
                rhyme.push('-');
                rhyme.push_str(phoneme);
            }
        }

        Pronunciation {
            rhyme: rhyme.unwrap_or_else(|| "-".to_owned()),
            meter,
        }
    }

    pub fn syllable_count(&self) -> usize {
        self.meter.matches('[').count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PronunciationLexicon {
    words: HashMap<String, Pronunciation>,
}

impl PronunciationLexicon {
    // `WORD PH1 PH2 ...`; a later record for the same word wins
    pub fn build<I, S>(records: I, vowels: &VowelSymbolSet, source_name: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = HashMap::new();

        for (i, record) in records.into_iter().enumerate() {
            let record = record.as_ref();
            let fields: Vec<&str> = record.split_whitespace().collect();
            if fields.len() < 2 {
                return Err(AnalyzerError::malformed(
                    source_name,
                    i + 1,
                    record,
                    "expected a word followed by at least one phoneme",
                ));
            }

            let word = fields[0];
            let pronunciation = Pronunciation::derive(&fields[1..], vowels);
            trace!("{} has a rhyme: {}", word, pronunciation.rhyme);
            trace!("{} has a pentameter: {}", word, pronunciation.meter);

            words.insert(word.to_owned(), pronunciation);
        }

        Ok(PronunciationLexicon { words })
    }

    pub fn load(path: &Path, vowels: &VowelSymbolSet) -> Result<Self> {
        let source_name = path.display().to_string();
        let lexicon = Self::build(read_lines_or_empty(path), vowels, &source_name)?;
        info!("Loaded {} words from {}", lexicon.len(), source_name);
        Ok(lexicon)
    }

    pub fn get(&self, word: &str) -> Option<&Pronunciation> {
        self.words.get(word)
    }

    pub fn rhyme_of(&self, word: &str) -> Option<&str> {
        self.get(word).map(|p| p.rhyme.as_str())
    }

    pub fn meter_of(&self, word: &str) -> Option<&str> {
        self.get(word).map(|p| p.meter.as_str())
    }

    pub fn rhymes_with(&self, a: &str, b: &str) -> bool {
        match (self.rhyme_of(a), self.rhyme_of(b)) {
            (Some(a), Some(b)) => a != "-" && a == b,
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Pronunciation)> {
        self.words.iter().map(|(w, p)| (w.as_str(), p))
    }

    pub fn rhyme_groups(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (word, pronunciation) in &self.words {
            groups
                .entry(pronunciation.rhyme.as_str())
                .or_default()
                .push(word.as_str());
        }
        for words in groups.values_mut() {
            words.sort_unstable();
        }
        groups
    }
}
