pub mod classifier;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod logging;
pub mod normalizer;
pub mod output;
pub mod pipeline;
pub mod source;
pub mod tags;
pub mod vowel;
