mod cache;
mod root;

pub use cache::FeedQuery;
pub use root::*;
