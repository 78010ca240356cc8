pub mod jwt;
mod root;
mod session;

pub use root::*;
