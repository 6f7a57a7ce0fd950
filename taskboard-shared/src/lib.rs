//! # Taskboard Shared Library
//!
//! Types and fixtures shared by the taskboard client and its gateways.
//!
//! ## Module Organization
//!
//! - `models`: boards, tasks, logs and user profiles
//! - `seed`: static fixtures used when the remote API is unreachable
//! - `auth`: password hashing for locally stored accounts

pub mod auth;
pub mod models;
pub mod seed;

/// Current version of the taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
