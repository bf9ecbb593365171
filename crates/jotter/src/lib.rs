//! `jotter` - local-first note capture, typed or spoken
//!
//! This library provides the core functionality for capturing short notes,
//! persisting them in a local key-value store, and transcribing voice input
//! through a host-provided speech-to-text engine.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod composer;
pub mod config;
pub mod error;
pub mod logging;
pub mod note;
pub mod speech;
pub mod storage;
pub mod store;

pub use composer::{Composer, ComposerState};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use note::{Note, NoteId};
pub use speech::{SpeechEngine, TranscriptEvent};
pub use storage::Storage;
pub use store::NoteStore;
