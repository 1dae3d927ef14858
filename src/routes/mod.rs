pub mod admin;
pub mod ai;
pub mod auth;
pub mod public;
