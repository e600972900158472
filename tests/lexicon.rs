use std::path::{Path, PathBuf};

use anyhow::Result;

use shakesword_corpus::{
    error::AnalyzerError,
    lexicon::{Pronunciation, PronunciationLexicon},
    vowel::VowelSymbolSet,
};

fn data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

#[test]
fn test_vowel_symbols_by_first_letter() {
    let vowels = VowelSymbolSet::from_symbols(["AA0", "B", "AE1"]);

    assert_eq!(vowels.len(), 2);
    assert!(vowels.contains("AA0"));
    assert!(vowels.contains("AE1"));
    assert!(!vowels.contains("B"));

    let vowels = VowelSymbolSet::from_symbols(["", "a", "Y", "UW1", "UW1", "OW"]);
    let mut symbols: Vec<_> = vowels.iter().collect();
    symbols.sort();
    assert_eq!(symbols, vec!["OW", "UW1"]);
}

#[test]
fn test_vowel_symbols_from_file() {
    let vowels = VowelSymbolSet::load(&data("cmudict.symbols"));

    assert_eq!(vowels.len(), 16);
    assert!(vowels.iter().all(VowelSymbolSet::is_nucleus_symbol));
    assert!(vowels.contains("EY1"));
    assert!(!vowels.contains("Z"));
}

#[test]
fn test_vowel_symbols_missing_file() {
    let vowels = VowelSymbolSet::load(&data("no-such.symbols"));
    assert!(vowels.is_empty());
}

#[test]
fn test_derive_abandon() {
    let vowels = VowelSymbolSet::from_symbols(["AH0", "AE1"]);
    let p = Pronunciation::derive(&["AH0", "B", "AE1", "N", "D", "AH0", "N"], &vowels);

    assert_eq!(p.rhyme, "AH0-N");
    assert_eq!(p.meter, "[AH0][AE1][AH0]");
    assert_eq!(p.syllable_count(), 3);
}

#[test]
fn test_derive_ends_on_nucleus() {
    let vowels = VowelSymbolSet::from_symbols(["IY1"]);
    let p = Pronunciation::derive(&["S", "IY1"], &vowels);

    assert_eq!(p.rhyme, "IY1");
    assert_eq!(p.meter, "[IY1]");
}

#[test]
fn test_derive_without_nucleus() {
    let vowels = VowelSymbolSet::from_symbols(["AH0"]);
    let p = Pronunciation::derive(&["HH", "M"], &vowels);

    assert_eq!(p.rhyme, "-");
    assert_eq!(p.meter, "");
    assert_eq!(p.syllable_count(), 0);
}

#[test]
fn test_last_record_wins() -> Result<()> {
    let vowels = VowelSymbolSet::from_symbols(["IY1", "EH1", "AH0"]);
    let lexicon = PronunciationLexicon::build(
        ["read R IY1 D", "bread B R EH1 D", "read R EH1 D AH0"],
        &vowels,
        "inline",
    )?;

    assert_eq!(lexicon.len(), 2);
    assert_eq!(lexicon.rhyme_of("read"), Some("AH0"));
    assert_eq!(lexicon.meter_of("read"), Some("[EH1][AH0]"));
    assert_eq!(lexicon.rhyme_of("bread"), Some("EH1-D"));
    assert_eq!(lexicon.get("unknown"), None);

    Ok(())
}

#[test]
fn test_whitespace_separated_fields() -> Result<()> {
    let vowels = VowelSymbolSet::from_symbols(["UW1"]);
    let lexicon = PronunciationLexicon::build(["  bloom\tB L  UW1 M  "], &vowels, "inline")?;

    assert_eq!(lexicon.rhyme_of("bloom"), Some("UW1-M"));
    assert_eq!(lexicon.meter_of("bloom"), Some("[UW1]"));

    Ok(())
}

#[test]
fn test_malformed_record_is_fatal() {
    let vowels = VowelSymbolSet::from_symbols(["UW1"]);
    let err = PronunciationLexicon::build(["bloom B L UW1 M", "lonely"], &vowels, "inline")
        .unwrap_err();

    assert!(err.is_fatal());
    match err {
        AnalyzerError::MalformedRecord {
            source_name,
            line_number,
            line,
            ..
        } => {
            assert_eq!(source_name, "inline");
            assert_eq!(line_number, 2);
            assert_eq!(line, "lonely");
        }
        err => panic!("unexpected error: {}", err),
    }

    let err = PronunciationLexicon::build([""], &vowels, "inline").unwrap_err();
    assert!(matches!(err, AnalyzerError::MalformedRecord { .. }));
}

#[test]
fn test_lexicon_from_file() -> Result<()> {
    let vowels = VowelSymbolSet::load(&data("cmudict.symbols"));
    let lexicon = PronunciationLexicon::load(&data("cmudict.dict"), &vowels)?;

    assert_eq!(lexicon.len(), 7);
    assert_eq!(lexicon.rhyme_of("abandon"), Some("AH0-N"));
    assert_eq!(lexicon.meter_of("abandon"), Some("[AH0][AE1][AH0]"));
    assert_eq!(lexicon.rhyme_of("spring"), Some("IH1-NG"));
    assert_eq!(lexicon.rhyme_of("hmm"), Some("-"));
    assert_eq!(lexicon.rhyme_of("read"), Some("EH1-D"));

    assert!(lexicon.rhymes_with("bloom", "doom"));
    assert!(!lexicon.rhymes_with("bloom", "rain"));
    assert!(!lexicon.rhymes_with("hmm", "hmm"));
    assert!(!lexicon.rhymes_with("bloom", "unknown"));

    let groups = lexicon.rhyme_groups();
    assert_eq!(groups.get("UW1-M"), Some(&vec!["bloom", "doom"]));
    assert_eq!(groups.get("-"), Some(&vec!["hmm"]));

    Ok(())
}

#[test]
fn test_lexicon_missing_file() -> Result<()> {
    let vowels = VowelSymbolSet::from_symbols(["AH0"]);
    let lexicon = PronunciationLexicon::load(&data("no-such.dict"), &vowels)?;
    assert!(lexicon.is_empty());
    Ok(())
}
