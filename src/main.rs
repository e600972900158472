use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use std::{env, path::PathBuf};

use shakesword_corpus::{
    config::AnalyzerConfig,
    logging::{self, LogTarget},
    output::{MemorySink, TagFileSink, TaggedSink},
    pipeline::{CorpusPipeline, RunSummary},
};

struct Args {
    config_path: Option<String>,
    symbols: Option<String>,
    dictionary: Option<String>,
    tags: Option<String>,
    output_dir: Option<String>,
    log_file: Option<String>,
    log_level: Option<String>,
    quiet: bool,
    dry_run: bool,
    corpora: Vec<String>,
}

fn get_args() -> Result<Option<Args>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut opts = getopts::Options::new();
    opts.optopt("c", "config", "JSON config file", "FILE");
    opts.optopt("", "symbols", "phoneme symbol list", "FILE");
    opts.optopt("", "dict", "pronunciation dictionary", "FILE");
    opts.optopt("", "tags", "tag definitions", "FILE");
    opts.optopt("o", "output", "directory for the per-tag files", "DIR");
    opts.optopt("", "log", "diagnostic log file", "FILE");
    opts.optopt("", "log-level", "log filter, e.g. info or debug", "LEVEL");
    opts.optflag("q", "quiet", "do not show the progress bar");
    opts.optflag("n", "dry-run", "count tag hits without writing tag files");
    opts.optflag("h", "help", "print this help");

    let matches = match opts.parse(&args) {
        Ok(m) => m,
        Err(f) => bail!(f),
    };

    if matches.opt_present("h") {
        let brief = "Usage: shakesword-corpus [options] [CORPUS...]";
        print!("{}", opts.usage(brief));
        return Ok(None);
    }

    Ok(Some(Args {
        config_path: matches.opt_str("c"),
        symbols: matches.opt_str("symbols"),
        dictionary: matches.opt_str("dict"),
        tags: matches.opt_str("tags"),
        output_dir: matches.opt_str("o"),
        log_file: matches.opt_str("log"),
        log_level: matches.opt_str("log-level"),
        quiet: matches.opt_present("q"),
        dry_run: matches.opt_present("n"),
        corpora: matches.free,
    }))
}

// command line > config file > defaults
fn build_config(args: &Args) -> Result<AnalyzerConfig> {
    let mut config = match &args.config_path {
        Some(path) => AnalyzerConfig::load(&PathBuf::from(path))?,
        None => AnalyzerConfig::default(),
    };

    if let Some(symbols) = &args.symbols {
        config.symbols = PathBuf::from(symbols);
    }
    if let Some(dictionary) = &args.dictionary {
        config.dictionary = PathBuf::from(dictionary);
    }
    if let Some(tags) = &args.tags {
        config.tags = PathBuf::from(tags);
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = PathBuf::from(output_dir);
    }
    if let Some(log_file) = &args.log_file {
        config.log_file = PathBuf::from(log_file);
    }
    if let Some(log_level) = &args.log_level {
        config.log_level = log_level.clone();
    }
    if !args.corpora.is_empty() {
        config.corpora = args.corpora.iter().map(PathBuf::from).collect();
    }

    Ok(config)
}

enum TagOut {
    Memory(MemorySink),
    File(TagFileSink),
}

impl TagOut {
    fn sink(&mut self) -> &mut dyn TaggedSink {
        match self {
            TagOut::Memory(sink) => sink,
            TagOut::File(sink) => sink,
        }
    }
}

fn main() -> Result<()> {
    let Some(args) = get_args()? else {
        return Ok(());
    };

    let config = build_config(&args).context("Failed to load config")?;

    if logging::init(&config.log_file, &config.log_level) == LogTarget::Stderr {
        eprintln!(
            "Unable to open log file '{}', logging to stderr",
            config.log_file.display()
        );
    }

    println!("Loading dictionaries...");

    let pipeline = CorpusPipeline::initialize(&config).context("Failed to initialize")?;

    println!(
        "Finished. {} vowel symbols, {} words in {} rhyme groups, {} tags.",
        pipeline.vowels().len(),
        pipeline.lexicon().len(),
        pipeline.lexicon().rhyme_groups().len(),
        pipeline.tags().tag_count()
    );

    let mut out = if args.dry_run {
        TagOut::Memory(MemorySink::new())
    } else {
        TagOut::File(TagFileSink::new(&config.output_dir).with_context(|| {
            format!(
                "Failed to prepare output directory: {}",
                config.output_dir.display()
            )
        })?)
    };

    println!("Processing corpora...");

    let mut summary = RunSummary::default();
    let pb = create_progress_bar(config.corpora.len() as u64, args.quiet);
    for path in config.corpora.iter().progress_with(pb) {
        let stats = pipeline.process_corpus_file(path, out.sink());
        summary.record(path, stats);
    }

    println!("Finished.");

    for (path, stats) in &summary.files {
        println!(
            "{}: {} kept, {} rejected, {} tagged",
            path.display(),
            stats.kept,
            stats.rejected,
            stats.appends
        );
    }

    println!(
        "Total: {} kept, {} rejected, {} tagged",
        summary.total.kept, summary.total.rejected, summary.total.appends
    );

    if let TagOut::Memory(sink) = &out {
        for tag_name in sink.tag_names() {
            println!("{}: {}", tag_name, sink.lines(tag_name).len());
        }
    }

    Ok(())
}

fn create_progress_bar(len: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{percent:>3}% [{wide_bar:.cyan/blue}] {pos}/{len} [{elapsed_precise} < {eta_precise}]",
        )
        .unwrap()
        .progress_chars("#-"),
    );
    pb
}
