pub mod holding_store;
