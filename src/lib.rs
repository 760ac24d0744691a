//! Dorm Sensors - user sensor subscriptions for the smart dormitory monitor
//!
//! This library exposes the core modules for testing and reuse.

pub mod common;
pub mod config;
pub mod entity;
pub mod error;
pub mod registry;
