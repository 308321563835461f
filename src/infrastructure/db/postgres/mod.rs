pub mod api_key_store_postgres;
mod database;

pub use database::PostgresDatabase;
