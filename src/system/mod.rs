mod config;
mod db;
mod repository;

pub use config::Config;
pub use db::{connect, init_db, shutdown_signal};
#[cfg(test)]
pub use repository::memory::MemoryProducts;
pub use repository::{ProductRepository, SqliteProducts};
