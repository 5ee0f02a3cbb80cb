//! In-memory key-value store served over HTTP.
//!
//! `GET /set?<key>=<value>` writes the first pair of the query string,
//! `GET /get?key=<key>` reads it back.

pub mod env;
pub mod error;
pub mod kv_store;
pub mod logger;
pub mod server;

pub use error::KvError;
pub use kv_store::KVStore;
pub use server::configure;
