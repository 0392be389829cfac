// carta_server/src/services/mod.rs

pub mod pg_store;
pub mod tenants;
