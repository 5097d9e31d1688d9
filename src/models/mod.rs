pub mod contacts;
pub mod projects;
pub mod responses;
pub mod users;
