mod err;
mod metric;
mod oracle;
mod dense;
mod sparse;
mod greedy;

pub use err::*;
pub use metric::*;
pub use oracle::*;
pub use dense::*;
pub use sparse::*;
pub use greedy::*;
