pub mod date_range;
pub mod error;
pub mod observation;
pub mod series;
pub mod station;

pub use error::{ParseError, Result};
