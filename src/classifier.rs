use std::collections::HashMap;

use tracing::{trace, warn};

use crate::{output::TaggedSink, tags::TagIndex};

const TOKEN_SEPARATORS: [char; 2] = [' ', ','];

// keyword -> tag names; a tag name shared by two categories is listed twice
#[derive(Debug, Clone, Default)]
pub struct LineClassifier {
    keywords: HashMap<String, Vec<String>>,
}

impl LineClassifier {
    pub fn new(index: &TagIndex) -> Self {
        let mut keywords: HashMap<String, Vec<String>> = HashMap::new();
        for (_, tag_name, tag_keywords) in index.iter() {
            for keyword in tag_keywords {
                keywords
                    .entry(keyword.clone())
                    .or_default()
                    .push(tag_name.to_owned());
            }
        }

        LineClassifier { keywords }
    }

    pub fn destinations<'a>(&'a self, line: &str) -> Vec<&'a str> {
        line.split(&TOKEN_SEPARATORS[..])
            .filter(|token| !token.is_empty())
            .filter_map(|token| self.keywords.get(token))
            .flatten()
            .map(|tag_name| tag_name.as_str())
            .collect()
    }

    // returns the number of appends that succeeded
    pub fn classify<S: TaggedSink + ?Sized>(&self, line: &str, sink: &mut S) -> usize {
        let mut appended = 0;
        for tag_name in self.destinations(line) {
            match sink.append(tag_name, line) {
                Ok(()) => {
                    trace!("Tagged {:?} as {}", line, tag_name);
                    appended += 1;
                }
                Err(err) => warn!("{}", err),
            }
        }
        appended
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}
