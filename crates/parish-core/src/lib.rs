//! Core types, traits, and aggregate services for the Parish member
//! directory.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod address;
pub mod auth;
pub mod error;
pub mod household;
pub mod media;
pub mod person;
pub mod reconcile;
pub mod service;
pub mod store;
pub mod user;

pub use error::{Error, Result};
