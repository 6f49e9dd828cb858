pub mod appointments;
pub mod financial;
pub(crate) mod health;
pub mod patients;

pub use health::health_check;
