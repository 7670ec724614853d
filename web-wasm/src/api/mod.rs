pub mod analyze;

pub use analyze::{analyze, Engine};
