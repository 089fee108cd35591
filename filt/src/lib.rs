mod field;
mod binomial;
mod union_find;
mod config;

pub use field::*;
pub use binomial::*;
pub use union_find::*;
pub use config::*;

pub mod util;
