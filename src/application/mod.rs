pub mod context;
pub mod sessions;
pub mod shared;
pub mod usecases;
