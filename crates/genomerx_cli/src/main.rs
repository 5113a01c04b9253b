//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `genomerx_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("genomerx_core ping={}", genomerx_core::ping());
    println!("genomerx_core version={}", genomerx_core::core_version());
}
