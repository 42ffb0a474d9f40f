// src/lib.rs

//! EcoDeli client library
//!
//! Typed access to the EcoDeli marketplace backend: a single HTTP client
//! that attaches the session token and classifies failures, resource
//! services on top of it, and small state containers for front-ends.

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;
pub mod validation;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult, AppError, ErrorKind, Result};
