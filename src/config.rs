use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    pub symbols: PathBuf,
    pub dictionary: PathBuf,
    pub tags: PathBuf,
    pub corpora: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            symbols: PathBuf::from("cmudict.symbols"),
            dictionary: PathBuf::from("cmudict.dict"),
            tags: PathBuf::from("tags.txt"),
            corpora: [
                "20158-0.txt",
                "21141-0.txt",
                "3238-0.txt",
                "19978-0.txt",
                "49716-0.txt",
                "56244-0.txt",
                "60454-0.txt",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
            output_dir: PathBuf::from("."),
            log_file: PathBuf::from("SonnetGeneratorLog.txt"),
            log_level: "debug".to_owned(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json(json: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AnalyzerError::Config {
            path: path.to_owned(),
            message: e.to_string(),
        })
    }

    // unlike the data files, an unreadable config is an error
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| AnalyzerError::Config {
            path: path.to_owned(),
            message: e.to_string(),
        })?;
        Self::from_json(&json, path)
    }
}
