pub mod geodesy;
pub mod phaselist;
pub mod report;
pub mod resolver;

pub use crate::domain::model::{EventParameters, PhaseReport};
pub use crate::domain::ports::{DistanceCalculator, TravelTimeEngine};
pub use crate::utils::error::Result;
