pub mod api_key_store;
