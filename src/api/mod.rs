//! HTTP API handlers for pinguinos

pub mod community;
pub mod health;
pub mod submit;
pub mod ui;
