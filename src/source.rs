use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use tracing::warn;

use crate::error::{AnalyzerError, Result};

// lossy UTF-8, BOM removed from the first line
pub struct SourceLines {
    path: PathBuf,
    reader: Option<BufReader<File>>,
    buffer: Vec<u8>,
    line_number: usize,
}

impl SourceLines {
    pub fn open(path: &Path) -> Result<SourceLines> {
        let file = File::open(path).map_err(|source| AnalyzerError::MissingSource {
            path: path.to_owned(),
            source,
        })?;

        Ok(SourceLines {
            path: path.to_owned(),
            reader: Some(BufReader::new(file)),
            buffer: Vec::new(),
            line_number: 0,
        })
    }
}

impl Iterator for SourceLines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;

        self.buffer.clear();
        match reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => {
                self.reader = None;
                None
            }
            Ok(_) => {
                self.line_number += 1;
                Some(Ok(decode_line(&self.buffer, self.line_number == 1)))
            }
            Err(source) => {
                self.reader = None;
                Some(Err(AnalyzerError::IoFailure {
                    action: format!("reading line {} of", self.line_number + 1),
                    path: self.path.clone(),
                    source,
                }))
            }
        }
    }
}

fn decode_line(bytes: &[u8], first: bool) -> String {
    let mut bytes = bytes;
    if let Some(rest) = bytes.strip_suffix(b"\n") {
        bytes = rest;
    }
    if let Some(rest) = bytes.strip_suffix(b"\r") {
        bytes = rest;
    }

    if first {
        encoding_rs::UTF_8.decode_with_bom_removal(bytes).0.into_owned()
    } else {
        encoding_rs::UTF_8
            .decode_without_bom_handling(bytes)
            .0
            .into_owned()
    }
}

// missing file: nothing; read fault: stream ends there. Both are logged.
pub fn read_lines_or_empty(path: &Path) -> impl Iterator<Item = String> {
    let lines = match SourceLines::open(path) {
        Ok(lines) => Some(lines),
        Err(err) => {
            warn!("{}", err);
            None
        }
    };

    lines.into_iter().flatten().map_while(|line| match line {
        Ok(line) => Some(line),
        Err(err) => {
            warn!("{}", err);
            None
        }
    })
}
