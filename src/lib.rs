//! Deadline core library
//!
//! State core for the Deadline complaint dashboard: session management,
//! complaint lifecycle, durable local persistence, and the derived views
//! the role dashboards consume.

pub mod config;
pub mod crypto;
pub mod error;
pub mod models;
pub mod reports;
pub mod seed;
pub mod services;
pub mod storage;
