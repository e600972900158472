use std::{
    ops::AddAssign,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::{
    classifier::LineClassifier,
    config::AnalyzerConfig,
    error::Result,
    lexicon::PronunciationLexicon,
    normalizer::{normalize_line, sentinel_region},
    output::TaggedSink,
    source::read_lines_or_empty,
    tags::TagIndex,
    vowel::VowelSymbolSet,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusStats {
    /// Lines between the sentinels.
    pub region_lines: usize,
    pub kept: usize,
    pub rejected: usize,
    pub appends: usize,
}

impl AddAssign for CorpusStats {
    fn add_assign(&mut self, other: Self) {
        self.region_lines += other.region_lines;
        self.kept += other.kept;
        self.rejected += other.rejected;
        self.appends += other.appends;
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub files: Vec<(PathBuf, CorpusStats)>,
    pub total: CorpusStats,
}

impl RunSummary {
    pub fn record(&mut self, path: &Path, stats: CorpusStats) {
        self.files.push((path.to_owned(), stats));
        self.total += stats;
    }
}

pub struct CorpusPipeline {
    vowels: VowelSymbolSet,
    lexicon: PronunciationLexicon,
    tags: TagIndex,
    classifier: LineClassifier,
}

impl CorpusPipeline {
    pub fn new(vowels: VowelSymbolSet, lexicon: PronunciationLexicon, tags: TagIndex) -> Self {
        let classifier = LineClassifier::new(&tags);
        CorpusPipeline {
            vowels,
            lexicon,
            tags,
            classifier,
        }
    }

    // missing files leave the structure empty; malformed ones abort
    pub fn initialize(config: &AnalyzerConfig) -> Result<Self> {
        let vowels = VowelSymbolSet::load(&config.symbols);
        let lexicon = PronunciationLexicon::load(&config.dictionary, &vowels)?;
        let tags = TagIndex::load(&config.tags)?;

        Ok(Self::new(vowels, lexicon, tags))
    }

    pub fn vowels(&self) -> &VowelSymbolSet {
        &self.vowels
    }

    pub fn lexicon(&self) -> &PronunciationLexicon {
        &self.lexicon
    }

    pub fn tags(&self) -> &TagIndex {
        &self.tags
    }

    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    pub fn process_lines<I, S, K>(&self, lines: I, sink: &mut K) -> CorpusStats
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        K: TaggedSink + ?Sized,
    {
        let mut stats = CorpusStats::default();

        for raw in sentinel_region(lines) {
            stats.region_lines += 1;
            match normalize_line(raw.as_ref()) {
                Some(line) => {
                    stats.kept += 1;
                    stats.appends += self.classifier.classify(&line, sink);
                }
                None => stats.rejected += 1,
            }
        }

        stats
    }

    pub fn process_corpus_file<K>(&self, path: &Path, sink: &mut K) -> CorpusStats
    where
        K: TaggedSink + ?Sized,
    {
        info!("Reading file {}", path.display());

        let stats = self.process_lines(read_lines_or_empty(path), sink);
        if let Err(err) = sink.flush() {
            warn!("{}", err);
        }

        info!(
            "Finished {}: {} lines kept, {} rejected, {} tag appends",
            path.display(),
            stats.kept,
            stats.rejected,
            stats.appends
        );
        stats
    }
}
