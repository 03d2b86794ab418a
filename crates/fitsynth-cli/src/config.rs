/// Re-export `Config` from `fitsynth-core` for use within this crate.
///
/// All environment-variable parsing lives in `fitsynth-core` so tests can
/// build configs without going through the binary.
pub use fitsynth_core::config::Config;
