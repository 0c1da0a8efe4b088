pub mod file;
pub mod keys;
pub mod memory;
pub mod state_store;
