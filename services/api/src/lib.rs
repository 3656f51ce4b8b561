//! services/api/src/lib.rs
//!
//! HTTP backend of the tutor marketplace.

pub mod adapters;
pub mod config;
pub mod error;
pub mod token;
pub mod web;
