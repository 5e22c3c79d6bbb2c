pub mod describe;
pub mod types;

pub use describe::{describe_pending, describe_resolved};
pub use types::*;
