//! Core library components.
//!
//! This module contains the binding protocol: credential resolution,
//! vault client configuration, and the variables handed to a job.

pub mod binding;
pub mod client;
pub mod config;
pub mod constants;
pub mod context;
pub mod credential;
pub mod endpoint;
pub mod job;
pub mod registry;
pub mod types;
pub mod validation;
pub mod variables;
