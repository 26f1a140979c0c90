pub mod error;
pub mod mapping;
pub mod memory;

mod connection;
mod models;
mod repository;

pub use connection::{DbPool, establish_connection_pool, establish_test_connection_pool};
pub use error::classify_backend_error;
pub use memory::InMemoryPlayerRepository;
pub use repository::*;
