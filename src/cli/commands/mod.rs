mod admin;
mod forge;
mod initdb;

pub use admin::{cmd_admin, upsert_admin};
pub use forge::{SEED_MOVIES, SEED_OWNER, cmd_forge, forge};
pub use initdb::cmd_initdb;
