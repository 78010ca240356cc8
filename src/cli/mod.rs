mod migrate;
mod serve;

pub use migrate::{migrate, reset};
pub use serve::serve;
