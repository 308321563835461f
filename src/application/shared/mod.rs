pub mod api_key_types;
