pub mod api_key_records;
