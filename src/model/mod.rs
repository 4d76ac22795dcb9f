mod correction;

pub use correction::{Correction, PolishRequest};
