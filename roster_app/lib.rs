pub mod config;
pub mod context;
pub mod key;
pub mod repository;
pub mod test_utils;

pub use context::Ctx;
