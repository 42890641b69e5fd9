//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and persistence into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod lead_service;
