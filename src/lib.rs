//! Hybrid course recommendation service
//!
//! Ranks courses for a learner by blending rule-based content matching
//! against an inferred learning profile with user-user collaborative
//! filtering, served over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
