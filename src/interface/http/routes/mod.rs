pub mod api_key;
pub mod health;
pub mod metrics;
pub mod ready;
