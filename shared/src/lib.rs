pub mod models;
pub mod utils;

// Plain data shared by the engine library and the dashboard binary:
// raw records as they come out of a reader, the canonical row every
// pipeline stage works with, and the pt-BR number/date helpers.
pub use models::{CanonicalRow, RawRecord, RawValue};
pub use utils::brazilian_format;
