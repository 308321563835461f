pub mod api_key_repository;
pub mod factory;

pub use factory::Repositories;
