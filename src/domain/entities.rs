pub mod experience;
pub mod user;
