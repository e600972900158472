use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    path::Path,
};

use tracing::{debug, info};

use crate::{
    error::{AnalyzerError, Result},
    source::read_lines_or_empty,
};

pub const HEADER_MARKER: &str = "==Tag";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagCategory {
    Season,
    Weather,
    History,
    Mood,
}

impl TagCategory {
    pub const ALL: [TagCategory; 4] = [
        TagCategory::Season,
        TagCategory::Weather,
        TagCategory::History,
        TagCategory::Mood,
    ];

    pub fn of(name: &str) -> Option<Self> {
        match name {
            "Season" => Some(Self::Season),
            "Weather" => Some(Self::Weather),
            "History" => Some(Self::History),
            "Mood" => Some(Self::Mood),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Season => "Season",
            Self::Weather => "Weather",
            Self::History => "History",
            Self::Mood => "Mood",
        }
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum OpenTag {
    NotYet,
    // header with a category we do not know; its keywords go nowhere
    Ignored,
    Open(TagCategory, String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    categories: BTreeMap<TagCategory, BTreeMap<String, BTreeSet<String>>>,
}

impl TagIndex {
    // `==Tag <Category> <TagName>` headers, each followed by one keyword per line
    pub fn build<I, S>(lines: I, source_name: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut categories: BTreeMap<TagCategory, BTreeMap<String, BTreeSet<String>>> =
            BTreeMap::new();
        let mut open = OpenTag::NotYet;

        for (i, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            let trimmed = line.trim();

            if trimmed.starts_with(HEADER_MARKER) {
                let fields: Vec<&str> = trimmed.split_whitespace().collect();
                if fields.len() != 3 || fields[0] != HEADER_MARKER {
                    return Err(AnalyzerError::malformed(
                        source_name,
                        i + 1,
                        line,
                        "expected `==Tag <Category> <TagName>`",
                    ));
                }

                let (category, tag_name) = (fields[1], fields[2]);
                // the tag name becomes a file name under the output directory
                if tag_name.contains(&['/', '\\'][..]) {
                    return Err(AnalyzerError::malformed(
                        source_name,
                        i + 1,
                        line,
                        "tag name must not contain a path separator",
                    ));
                }
                debug!("Starting tag {}: {}", category, tag_name);

                open = match TagCategory::of(category) {
                    Some(category) => {
                        categories
                            .entry(category)
                            .or_default()
                            .entry(tag_name.to_owned())
                            .or_default();
                        OpenTag::Open(category, tag_name.to_owned())
                    }
                    None => {
                        debug!("Unknown tag category {}, dropping its keywords", category);
                        OpenTag::Ignored
                    }
                };
                continue;
            }

            if trimmed.is_empty() {
                continue;
            }

            match &open {
                OpenTag::NotYet => {
                    return Err(AnalyzerError::malformed(
                        source_name,
                        i + 1,
                        line,
                        "keyword before any `==Tag` header",
                    ));
                }
                OpenTag::Ignored => {}
                OpenTag::Open(category, tag_name) => {
                    categories
                        .entry(*category)
                        .or_default()
                        .entry(tag_name.clone())
                        .or_default()
                        .insert(trimmed.to_owned());
                }
            }
        }

        Ok(TagIndex { categories })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source_name = path.display().to_string();
        let index = Self::build(read_lines_or_empty(path), &source_name)?;
        info!(
            "Loaded {} tags ({} keywords) from {}",
            index.tag_count(),
            index.keyword_count(),
            source_name
        );
        Ok(index)
    }

    pub fn keywords(&self, category: TagCategory, tag_name: &str) -> Option<&BTreeSet<String>> {
        self.categories.get(&category)?.get(tag_name)
    }

    pub fn tags(&self, category: TagCategory) -> impl Iterator<Item = &str> {
        self.categories
            .get(&category)
            .into_iter()
            .flat_map(|tags| tags.keys().map(|t| t.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (TagCategory, &str, &BTreeSet<String>)> {
        self.categories.iter().flat_map(|(category, tags)| {
            tags.iter()
                .map(move |(tag_name, keywords)| (*category, tag_name.as_str(), keywords))
        })
    }

    pub fn tag_count(&self) -> usize {
        self.categories.values().map(|tags| tags.len()).sum()
    }

    pub fn keyword_count(&self) -> usize {
        self.iter().map(|(_, _, keywords)| keywords.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tag_count() == 0
    }
}
