pub mod admin;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod navigation;
pub mod notification;
pub mod profile;
