pub mod commands;
pub mod validation;

pub use commands::*;
pub use validation::*;
