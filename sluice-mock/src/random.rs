use std::sync::Mutex;

use chrono::TimeDelta;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sluice_core::{DataProvider, ProviderConfig, Series, SeriesStream, SluiceError, Tag, TimeRange};

/// Provider that fabricates random samples for every tag it is asked about.
///
/// Each series holds between `min_size` and `max_size` samples (inclusive) at
/// distinct whole-second timestamps inside the requested range, with values in
/// `[0, 1)`. A fixed `seed` makes the output reproducible for a given sequence
/// of loads.
pub struct RandomDataProvider {
    min_size: usize,
    max_size: usize,
    seed: Option<u64>,
    rng: Mutex<StdRng>,
}

impl RandomDataProvider {
    /// Create a provider producing `min_size..=max_size` samples per tag.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `min_size > max_size`.
    pub fn new(min_size: usize, max_size: usize, seed: Option<u64>) -> Result<Self, SluiceError> {
        if min_size > max_size {
            return Err(SluiceError::InvalidArg(format!(
                "min_size ({min_size}) must not exceed max_size ({max_size})"
            )));
        }
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Ok(Self {
            min_size,
            max_size,
            seed,
            rng: Mutex::new(rng),
        })
    }

    /// Rebuild a provider from its serialized description.
    ///
    /// # Errors
    /// Returns `Config` for descriptions of other provider kinds and
    /// `InvalidArg` for inconsistent sizes.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, SluiceError> {
        match config {
            ProviderConfig::RandomDataProvider {
                min_size,
                max_size,
                seed,
            } => Self::new(*min_size, *max_size, *seed),
            other => Err(SluiceError::Config(format!(
                "not a random data provider config: {other:?}"
            ))),
        }
    }

    fn generate(&self, tag: &Tag, range: TimeRange) -> Result<Series, SluiceError> {
        let span = usize::try_from(range.duration().num_seconds()).unwrap_or(0);
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| SluiceError::provider(self.name(), "rng lock poisoned"))?;
        let wanted = rng.random_range(self.min_size..=self.max_size).min(span);

        let mut offsets = rand::seq::index::sample(&mut *rng, span, wanted).into_vec();
        offsets.sort_unstable();
        let points: Vec<_> = offsets
            .into_iter()
            .map(|o| {
                let secs = i64::try_from(o).unwrap_or(i64::MAX);
                (range.from + TimeDelta::seconds(secs), rng.random::<f64>())
            })
            .collect();
        Series::from_points(tag.clone(), points)
    }
}

impl DataProvider for RandomDataProvider {
    fn name(&self) -> &'static str {
        "random"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn can_handle_tag(&self, _tag: &Tag) -> bool {
        true
    }

    fn load_series<'a>(&'a self, range: TimeRange, tags: Vec<Tag>) -> SeriesStream<'a> {
        Box::new(tags.into_iter().map(move |t| self.generate(&t, range)))
    }

    fn to_config(&self) -> Option<ProviderConfig> {
        Some(ProviderConfig::RandomDataProvider {
            min_size: self.min_size,
            max_size: self.max_size,
            seed: self.seed,
        })
    }
}
