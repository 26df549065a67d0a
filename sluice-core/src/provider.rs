use crate::{ProviderConfig, Series, SluiceError, Tag, TimeRange};

/// Lazily produced raw series, one item per requested tag.
///
/// Providers may fail per item; the router forwards such errors unchanged.
pub type SeriesStream<'a> = Box<dyn Iterator<Item = Result<Series, SluiceError>> + 'a>;

/// Main provider trait implemented by upstream data sources.
///
/// A provider advertises which tags it can serve through [`DataProvider::can_handle_tag`]
/// and loads a batch of tags over a time range through [`DataProvider::load_series`].
/// Providers carry no routing state and may be shared across many loads.
pub trait DataProvider: Send + Sync {
    /// A stable identifier used in logs and errors (e.g., "influx", "random").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this provider *claims* to serve `tag`.
    ///
    /// Routing trusts the claim; a provider that later fails to load the tag
    /// surfaces that failure from [`DataProvider::load_series`].
    fn can_handle_tag(&self, tag: &Tag) -> bool;

    /// Load one series per tag over `range`, in the order the provider chooses.
    ///
    /// Each returned series must be named after its tag. The router calls this at
    /// most once per load with every tag assigned to this provider.
    fn load_series<'a>(&'a self, range: TimeRange, tags: Vec<Tag>) -> SeriesStream<'a>;

    /// Serializable description of this provider, when it has one.
    fn to_config(&self) -> Option<ProviderConfig> {
        None
    }
}
