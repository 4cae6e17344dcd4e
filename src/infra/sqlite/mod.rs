pub mod kv;
pub mod schema;
pub mod snapshot;
pub mod store;
