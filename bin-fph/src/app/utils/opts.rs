use clap::ValueEnum;
use derive_more::Display;

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Display, Debug, Default)]
#[clap(rename_all="lower")]
pub enum InputKind {
    #[default] Points,
    Dense,
    Sparse
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Display, Debug, Default)]
#[clap(rename_all="lower")]
pub enum Format {
    #[default] Unicode,
    Json
}
