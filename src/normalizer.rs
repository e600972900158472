use once_cell::sync::Lazy;
use regex::Regex;

pub const START_SENTINEL: &str = "====Shakesword start";
pub const END_SENTINEL: &str = "====Shakesword end";

pub const MIN_TOKENS: usize = 5;

const FORBIDDEN_CHARS: [char; 9] = ['-', '_', '^', '(', ')', '[', ']', '{', '}'];

// nothing is pulled from `lines` after the end sentinel
pub struct SentinelRegion<I> {
    lines: I,
    state: RegionState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegionState {
    BeforeStart,
    Inside,
    Finished,
}

pub fn sentinel_region<I, S>(lines: I) -> SentinelRegion<I::IntoIter>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    SentinelRegion {
        lines: lines.into_iter(),
        state: RegionState::BeforeStart,
    }
}

impl<I, S> Iterator for SentinelRegion<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = S;

    fn next(&mut self) -> Option<S> {
        if self.state == RegionState::BeforeStart {
            match self.lines.by_ref().find(|l| l.as_ref() == START_SENTINEL) {
                Some(_) => self.state = RegionState::Inside,
                None => self.state = RegionState::Finished,
            }
        }

        if self.state == RegionState::Finished {
            return None;
        }

        match self.lines.next() {
            Some(line) if line.as_ref() != END_SENTINEL => Some(line),
            _ => {
                self.state = RegionState::Finished;
                None
            }
        }
    }
}

/// Cleans one corpus line. `None` if the line is not a usable verse line.
pub fn normalize_line(raw: &str) -> Option<String> {
    static REGEX_SPANS: Lazy<[Regex; 4]> = Lazy::new(|| {
        [
            Regex::new(r"\[.*\]").unwrap(),
            Regex::new(r"\(.*\)").unwrap(),
            Regex::new(r"\{.*\}").unwrap(),
            Regex::new(r"[0-9]+").unwrap(),
        ]
    });
    static REGEX_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").unwrap());

    let mut line = raw.trim().to_owned();

    for regex in REGEX_SPANS.iter() {
        // every match is non-empty, so each pass shortens the line
        while let Some(m) = regex.find(&line) {
            let matched = m.as_str().to_owned();
            line = line.replace(&matched, "");
        }
    }

    let line = REGEX_SPACES.replace_all(&line, " ");
    let line = line.trim();

    if line.is_empty() || line.contains(&FORBIDDEN_CHARS[..]) {
        return None;
    }
    if line.split_whitespace().count() < MIN_TOKENS {
        return None;
    }

    Some(line.to_owned())
}
