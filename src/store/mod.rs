pub mod memory;
pub mod seed;

pub use memory::{Dataset, MemoryStore};
pub use seed::{seed_dataset, seed_explanations};
