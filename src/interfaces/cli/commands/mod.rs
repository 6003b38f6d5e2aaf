mod config_gen;
mod resolve;
mod user;

pub use config_gen::config_generate;
pub use resolve::resolve_input;
pub use user::{add_user, list_users, remove_user, set_password};
