use std::{
    collections::{hash_map::Entry, BTreeMap, HashMap},
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::warn;

use crate::error::{AnalyzerError, Result};

pub trait TaggedSink {
    fn append(&mut self, tag_name: &str, line: &str) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

// `<root>/<tag name>.txt`, opened in append mode, never truncated
pub struct TagFileSink {
    root: PathBuf,
    writers: HashMap<String, BufWriter<File>>,
}

impl TagFileSink {
    pub fn new(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).map_err(|source| AnalyzerError::IoFailure {
            action: "creating output directory".to_owned(),
            path: root.to_owned(),
            source,
        })?;

        Ok(TagFileSink {
            root: root.to_owned(),
            writers: HashMap::new(),
        })
    }

    pub fn path_for(&self, tag_name: &str) -> PathBuf {
        self.root.join(format!("{}.txt", tag_name))
    }
}

impl TaggedSink for TagFileSink {
    fn append(&mut self, tag_name: &str, line: &str) -> Result<()> {
        let path = self.path_for(tag_name);

        let writer = match self.writers.entry(tag_name.to_owned()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .map_err(|source| AnalyzerError::IoFailure {
                        action: "opening".to_owned(),
                        path: path.clone(),
                        source,
                    })?;
                entry.insert(BufWriter::new(file))
            }
        };

        if let Err(source) = writeln!(writer, "{}", line) {
            // the next append opens the file again
            self.writers.remove(tag_name);
            return Err(AnalyzerError::IoFailure {
                action: "writing".to_owned(),
                path,
                source,
            });
        }

        Ok(())
    }

    // failed handles are dropped; the first failure is returned, the rest logged
    fn flush(&mut self) -> Result<()> {
        let mut first_err = None;
        let mut failed = Vec::new();
        for (tag_name, writer) in self.writers.iter_mut() {
            if let Err(source) = writer.flush() {
                let err = AnalyzerError::IoFailure {
                    action: "flushing".to_owned(),
                    path: self.root.join(format!("{}.txt", tag_name)),
                    source,
                };
                if first_err.is_none() {
                    first_err = Some(err);
                } else {
                    warn!("{}", err);
                }
                failed.push(tag_name.clone());
            }
        }
        for tag_name in failed {
            self.writers.remove(&tag_name);
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Drop for TagFileSink {
    fn drop(&mut self) {
        let _ = TaggedSink::flush(self);
    }
}

#[derive(Debug, Default)]
pub struct MemorySink {
    lines: BTreeMap<String, Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self, tag_name: &str) -> &[String] {
        self.lines.get(tag_name).map(|l| l.as_slice()).unwrap_or(&[])
    }

    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.lines.keys().map(|t| t.as_str())
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.lines
    }
}

impl TaggedSink for MemorySink {
    fn append(&mut self, tag_name: &str, line: &str) -> Result<()> {
        self.lines
            .entry(tag_name.to_owned())
            .or_default()
            .push(line.to_owned());
        Ok(())
    }
}
