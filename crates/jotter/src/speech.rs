//! Speech-to-text capability abstraction.
//!
//! This module defines the seam between the note composer and whatever
//! transcription engine the host platform provides. Engines are
//! feature-detected by the host; when none exists the composer refuses to
//! start recording and the user is told synchronously.

use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur while driving a speech engine.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// The engine failed to start.
    #[error("failed to start speech engine '{name}': {message}")]
    StartFailed {
        /// Name of the engine.
        name: &'static str,
        /// Description of what went wrong.
        message: String,
    },

    /// The engine failed to stop cleanly.
    #[error("failed to stop speech engine '{name}': {message}")]
    StopFailed {
        /// Name of the engine.
        name: &'static str,
        /// Description of what went wrong.
        message: String,
    },
}

impl SpeechError {
    /// Create a start failure for the named engine.
    #[must_use]
    pub fn start_failed(name: &'static str, message: impl Into<String>) -> Self {
        Self::StartFailed {
            name,
            message: message.into(),
        }
    }

    /// Create a stop failure for the named engine.
    #[must_use]
    pub fn stop_failed(name: &'static str, message: impl Into<String>) -> Self {
        Self::StopFailed {
            name,
            message: message.into(),
        }
    }
}

/// An event produced by a running speech engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    /// The full transcript accumulated so far.
    ///
    /// Engines report cumulative results: each event carries the whole
    /// text, and consumers replace their draft rather than appending.
    Transcript(String),

    /// A runtime error inside the engine. Recording may continue.
    Error(String),

    /// The engine stopped on its own (end of input, timeout, etc.).
    Ended,
}

/// Trait for host-provided speech-to-text engines.
///
/// Implementors provide the actual transcription mechanism for a specific
/// platform. Events flow through the channel handed to [`start`]; the
/// consumer owns the receiving end and cancels delivery by dropping it.
///
/// [`start`]: SpeechEngine::start
pub trait SpeechEngine: Send {
    /// The name of this engine (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Start transcribing and send events through the provided channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails to start, such as when a
    /// microphone or platform service is unavailable.
    fn start(&mut self, tx: mpsc::Sender<TranscriptEvent>) -> Result<(), SpeechError>;

    /// Stop transcribing.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails to stop cleanly.
    fn stop(&mut self) -> Result<(), SpeechError>;

    /// Check if the engine is currently transcribing.
    fn is_running(&self) -> bool;
}
