pub mod contacts;
pub mod projects;
pub mod users;
