//! macOS-specific capability probes for jotter
//!
//! This crate answers which host capabilities jotter can rely on when
//! running on macOS.

#![cfg(target_os = "macos")]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

/// Get platform name
#[must_use]
pub fn platform_name() -> &'static str {
    "macOS"
}

/// Check whether a system speech-to-text engine is available.
///
/// The Speech framework (`SFSpeechRecognizer`) is the obvious backend
/// here, but no binding is wired up yet, so this reports `false` and
/// voice capture is refused with a user-facing notice.
#[must_use]
pub fn speech_available() -> bool {
    false
}
