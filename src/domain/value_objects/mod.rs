pub mod ids;
pub mod secret;
pub mod timestamps;
