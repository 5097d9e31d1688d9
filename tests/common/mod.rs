#![allow(dead_code)]

pub mod test_app;

pub use database::{BrokenStore, UnreachableStore};
pub use helpers::{create_project, seed_user, submit_contact, unique_name};
pub use test_app::{TestApp, TestAppOptions};
