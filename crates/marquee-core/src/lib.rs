//! Core types and trait definitions for the Marquee watchlist.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! catalog client and the durable store live in their own crates and plug in
//! through the [`catalog::Catalog`] and [`store::StateStore`] traits.

pub mod catalog;
pub mod credentials;
pub mod error;
pub mod manager;
pub mod memory;
pub mod movie;
pub mod session_log;
pub mod store;
pub mod table;

pub use error::{Error, Result};
pub use manager::Manager;
pub use memory::MemoryStore;
pub use session_log::SessionLog;
