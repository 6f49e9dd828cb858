mod appointment;
mod common;
mod financial;
mod patient;
mod selection;

pub use appointment::*;
pub use common::*;
pub use financial::*;
pub use patient::*;
pub use selection::*;
