pub mod api_key_store_memory;

pub use api_key_store_memory::ApiKeyStoreMemory;
