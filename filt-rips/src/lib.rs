mod simplex;
mod complex;
mod reduce;
mod diagram;
mod rips;

pub use simplex::*;
pub use complex::*;
pub use reduce::*;
pub use diagram::*;
pub use rips::*;
