pub mod ai;
pub mod calculators;
pub mod catch;
pub mod commands;
pub mod engine;
pub mod move_effects;
pub mod state;
pub mod stats;

#[cfg(test)]
pub(crate) mod tests;
