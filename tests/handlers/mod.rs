mod cors;
mod projects;
mod users;
