//! Web API module for feedhub.
//!
//! This module provides the REST API under `/v1`: user registration,
//! feed management, follows, and aggregated posts.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
