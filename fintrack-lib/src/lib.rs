#[macro_use]
extern crate actix_web;

pub mod admin;
pub mod auth;
pub mod category;
pub mod config;
pub mod error;
pub mod policy;
pub mod tracing;
pub mod transaction;
pub mod user;
