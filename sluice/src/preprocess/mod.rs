//! Dataset preprocessors and the registry that builds them from declarative records.

pub mod fill_gaps;
pub mod registry;

pub use fill_gaps::{FILL_GAPS, FillGapsPreprocessor};
pub use registry::{PreprocessorCtor, PreprocessorRegistry, PreprocessorSpec};
