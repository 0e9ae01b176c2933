//! Core library for the SmartCare danger-sign screening service.

pub mod config;
pub mod error;
pub mod screening;
pub mod telemetry;
