use std::sync::Mutex;

use regex::Regex;

use sluice_core::{DataProvider, Series, SeriesStream, SluiceError, Tag, TimeRange};

/// Provider that claims every tag matching a regular expression at its start.
///
/// Loaded series are empty and named after their tag. Every batch passed to
/// [`DataProvider::load_series`] is recorded so tests can assert on dispatch.
pub struct RegexProvider {
    name: &'static str,
    pattern: Regex,
    calls: Mutex<Vec<Vec<Tag>>>,
}

impl RegexProvider {
    /// Build a provider named `name` claiming tags that match `pattern` from the first character.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `pattern` is not a valid regular expression.
    pub fn new(name: &'static str, pattern: &str) -> Result<Self, SluiceError> {
        let pattern = Regex::new(&format!("^(?:{pattern})"))
            .map_err(|e| SluiceError::InvalidArg(format!("invalid tag pattern: {e}")))?;
        Ok(Self {
            name,
            pattern,
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Tag batches received so far, one entry per loader invocation.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<Tag>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of loader invocations so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

impl DataProvider for RegexProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn can_handle_tag(&self, tag: &Tag) -> bool {
        self.pattern.is_match(tag.as_str())
    }

    fn load_series<'a>(&'a self, _range: TimeRange, tags: Vec<Tag>) -> SeriesStream<'a> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(tags.clone());
        }
        Box::new(tags.into_iter().map(move |t| {
            if self.can_handle_tag(&t) {
                Ok(Series::empty(t))
            } else {
                Err(SluiceError::not_found(format!("tag '{t}' in {}", self.name)))
            }
        }))
    }
}
