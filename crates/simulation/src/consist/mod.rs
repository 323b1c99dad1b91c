//! The consist: locomotive arc state plus trailing wagons, advanced as one
//! unit along the shared path.

mod state;
mod systems;
mod types;

#[cfg(test)]
mod tests;

pub use state::{AdvanceOutcome, TrainConsist};
pub use systems::{drive_consist, ConsistPlugin};
pub use types::{Wagon, WagonAdded, WagonRemoved};
