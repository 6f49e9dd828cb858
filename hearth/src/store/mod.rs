mod memory;
mod seed;
pub mod traits;

pub use memory::InMemoryStore;
pub use seed::SeedDataset;
pub use traits::*;
