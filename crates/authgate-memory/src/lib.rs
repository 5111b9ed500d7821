#![doc = include_str!("../README.md")]

pub mod sessions;
pub mod users;

pub use sessions::MemorySessionResolver;
pub use users::MemoryUserStore;
