pub mod dimension;
pub mod record;
pub mod stats;

pub use dimension::*;
pub use record::*;
pub use stats::*;
