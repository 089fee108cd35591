mod opts;
mod helper;

pub use opts::*;
pub use helper::*;
