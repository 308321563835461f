pub mod create_api_key;
pub mod delete_api_key;
pub mod dismiss_api_key;
pub mod hide_api_key;
pub mod list_api_keys;
pub mod reveal_api_key;
pub mod rotate_api_key;
pub mod set_api_key_active;
