mod polisher;

pub use polisher::{polish, CorrectionHistory};
