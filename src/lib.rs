//! Library exports for the photo aggregator service
//!
//! This module exposes internal components for testing and potential library usage.

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod pagination;
pub mod provider;
pub mod remote;
pub mod route;
pub mod service;
pub mod state;

#[cfg(test)]
mod test_support;
