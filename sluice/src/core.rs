use std::sync::Arc;

use sluice_core::{DataProvider, DatasetConfig, SluiceError, Tag, TimeRange};

use crate::dataset::TimeSeriesDataset;
use crate::preprocess::PreprocessorRegistry;
use crate::router::load::{RoutedSeries, load_from_providers};

/// Orchestrator that routes tag loads across registered providers and builds datasets.
pub struct Sluice {
    pub(crate) providers: Vec<Arc<dyn DataProvider>>,
    pub(crate) registry: PreprocessorRegistry,
}

/// Builder for constructing a `Sluice` orchestrator.
pub struct SluiceBuilder {
    providers: Vec<Arc<dyn DataProvider>>,
    registry: PreprocessorRegistry,
}

impl Default for SluiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SluiceBuilder {
    /// Create a new builder with no providers and the built-in preprocessors registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: vec![],
            registry: PreprocessorRegistry::with_builtins(),
        }
    }

    /// Register a provider.
    ///
    /// Behavior and trade-offs:
    /// - Registration order is priority order: a tag claimed by several providers is
    ///   served by the one registered first.
    /// - Duplicates are not deduplicated; a second copy of a provider never receives
    ///   tags the first one claims.
    #[must_use]
    pub fn with_provider(mut self, p: Arc<dyn DataProvider>) -> Self {
        self.providers.push(p);
        self
    }

    /// Replace the preprocessor registry used to resolve declarative preprocessor records.
    #[must_use]
    pub fn registry(mut self, registry: PreprocessorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Build the `Sluice` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no providers have been registered via
    /// [`SluiceBuilder::with_provider`].
    pub fn build(self) -> Result<Sluice, SluiceError> {
        if self.providers.is_empty() {
            return Err(SluiceError::InvalidArg(
                "no providers registered; add at least one via with_provider(...)".to_string(),
            ));
        }
        Ok(Sluice {
            providers: self.providers,
            registry: self.registry,
        })
    }
}

impl Sluice {
    /// Start building a new `Sluice` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use sluice_mock::RandomDataProvider;
    ///
    /// let sluice = sluice::Sluice::builder()
    ///     .with_provider(Arc::new(RandomDataProvider::new(10, 100, None)?))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> SluiceBuilder {
        SluiceBuilder::new()
    }

    /// Registered providers in priority order.
    #[must_use]
    pub fn providers(&self) -> &[Arc<dyn DataProvider>] {
        &self.providers
    }

    /// Registry used to resolve preprocessor records.
    #[must_use]
    pub const fn registry(&self) -> &PreprocessorRegistry {
        &self.registry
    }

    /// Lazily load `tags` over `range` from the registered providers.
    ///
    /// See [`load_from_providers`] for routing rules and error behavior.
    pub fn load(&self, range: TimeRange, tags: &[Tag]) -> RoutedSeries<'_> {
        load_from_providers(&self.providers, range, tags.to_vec())
    }

    /// Bind a dataset description to this orchestrator.
    ///
    /// Nothing is loaded until [`TimeSeriesDataset::get_data`] is called.
    #[must_use]
    pub fn dataset(&self, config: &DatasetConfig) -> TimeSeriesDataset<'_> {
        TimeSeriesDataset::new(self, config.clone())
    }
}
