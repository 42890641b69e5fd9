//! Flutter-facing FFI crate for Leadbook.
//!
//! The bridge glue is generated by `flutter_rust_bridge_codegen`; only the
//! use-case API in [`api`] is hand-written.

pub mod api;
