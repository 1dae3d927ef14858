pub mod connection;
pub mod listing;

pub use connection::{init_db, Database};
