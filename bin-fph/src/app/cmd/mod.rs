pub mod rips;
pub mod stats;
