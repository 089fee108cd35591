use derive_more::Display;

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum DistError {
    #[display("matrix is not square: {_0} x {_1}")]
    NotSquare(usize, usize),

    #[display("matrix is not symmetric at ({_0}, {_1})")]
    NotSymmetric(usize, usize),

    #[display("negative distance at ({_0}, {_1})")]
    Negative(usize, usize),

    #[display("conflicting entries at ({_0}, {_1})")]
    Conflict(usize, usize),

    #[display("entry ({_0}, {_1}) is out of range for size {_2}")]
    OutOfRange(usize, usize, usize),
}

impl std::error::Error for DistError {}
