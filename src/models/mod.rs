pub mod movie;
pub mod user;

pub use movie::Movie;
pub use user::User;
