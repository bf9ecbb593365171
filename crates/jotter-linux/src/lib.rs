//! Linux-specific capability probes for jotter
//!
//! This crate answers which host capabilities jotter can rely on when
//! running on Linux.

#![cfg(target_os = "linux")]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

/// Get platform name
#[must_use]
pub fn platform_name() -> &'static str {
    "Linux"
}

/// Check whether a system speech-to-text engine is available.
///
/// Linux has no system-wide transcription service jotter can bind to, so
/// this currently always reports `false` and voice capture is refused
/// with a user-facing notice.
#[must_use]
pub fn speech_available() -> bool {
    false
}
