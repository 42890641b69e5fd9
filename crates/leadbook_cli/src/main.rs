//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `leadbook_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe to validate core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("leadbook_core ping={}", leadbook_core::ping());
    println!("leadbook_core version={}", leadbook_core::core_version());
}
