mod cache;
mod root;

pub use root::*;
