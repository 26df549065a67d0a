//! Mock providers for CI-safe tests and examples.
//!
//! - [`RandomDataProvider`]: synthetic random samples for any tag.
//! - [`RegexProvider`]: claims tags by pattern and serves empty series; records calls.
//! - [`FixtureProvider`]: serves pre-built series from memory; records calls.

mod fixture;
mod pattern;
mod random;

pub use fixture::FixtureProvider;
pub use pattern::RegexProvider;
pub use random::RandomDataProvider;
