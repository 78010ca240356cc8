mod command;
mod date;
pub mod recipe;
pub mod shopping;
pub mod user;

pub use command::*;
pub use date::*;

/// Generates a new sortable identifier for documents.
pub fn new_id() -> String {
    ulid::Ulid::new().to_string()
}

/// Rounds an ingredient amount to two decimals.
pub fn round_amount(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
