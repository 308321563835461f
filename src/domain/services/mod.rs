pub mod disclosure;
pub mod key_digest;
pub mod key_lifecycle;
pub mod secret_generator;
