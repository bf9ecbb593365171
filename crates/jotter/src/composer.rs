//! The note composer state machine.
//!
//! The composer owns the transient state of the "new note" flow: the
//! draft text buffer, the onboarding prompt flag, and the active
//! recording session. It produces finished note content and hands it to
//! the [`NoteStore`]; it never touches persistence itself.
//!
//! All transitions are synchronous. The only long-lived resource is the
//! recording session — a single handle at a time, owned by the composer,
//! created on start-recording and destroyed on stop. Dropping the
//! session also drops the transcript channel receiver, so a late update
//! from the engine can never repopulate the draft after a reset.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{error, info};

use crate::error::{Error, Result};
use crate::note::Note;
use crate::speech::{SpeechEngine, TranscriptEvent};
use crate::store::NoteStore;

/// Capacity of the transcript event channel.
///
/// Engines deliver cumulative results, so a full channel only costs
/// intermediate snapshots, never final text.
const TRANSCRIPT_CHANNEL_CAPACITY: usize = 64;

/// Observable state of the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerState {
    /// No content yet; the user is prompted to record or type.
    Onboarding,
    /// Free-text editing is active.
    Editing,
    /// A recording session is live.
    Recording,
}

/// An active recording session.
///
/// Owns the engine and the receiving end of its transcript channel.
/// Dropped on stop, which cancels delivery of any late events.
pub struct RecordingSession {
    engine: Box<dyn SpeechEngine>,
    rx: mpsc::Receiver<TranscriptEvent>,
}

impl std::fmt::Debug for RecordingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingSession")
            .field("engine", &self.engine.name())
            .finish_non_exhaustive()
    }
}

/// The "new note" composer.
#[derive(Debug)]
pub struct Composer {
    content: String,
    show_onboarding: bool,
    session: Option<RecordingSession>,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    /// Create a composer in its initial (onboarding) state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            content: String::new(),
            show_onboarding: true,
            session: None,
        }
    }

    /// The current observable state.
    #[must_use]
    pub fn state(&self) -> ComposerState {
        if self.session.is_some() {
            ComposerState::Recording
        } else if self.show_onboarding {
            ComposerState::Onboarding
        } else {
            ComposerState::Editing
        }
    }

    /// The current draft content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether a recording session is live.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.session.is_some()
    }

    /// Dismiss the onboarding prompt and move to free-text editing.
    pub fn start_editing(&mut self) {
        self.show_onboarding = false;
    }

    /// Replace the draft content.
    ///
    /// Non-empty text dismisses the onboarding prompt; clearing all text
    /// returns the composer to onboarding.
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.show_onboarding = self.content.is_empty();
    }

    /// Start a recording session with the given engine.
    ///
    /// `None` means the host has no speech-to-text capability; the call
    /// fails with [`Error::SpeechUnavailable`] and the state is
    /// unchanged so the caller can notify the user synchronously.
    /// Starting while a session is live replaces it (the previous
    /// session is stopped first).
    ///
    /// # Errors
    ///
    /// Returns [`Error::SpeechUnavailable`] when no engine was provided,
    /// or the engine's own error if it fails to start.
    pub fn start_recording(&mut self, engine: Option<Box<dyn SpeechEngine>>) -> Result<()> {
        let Some(mut engine) = engine else {
            return Err(Error::SpeechUnavailable);
        };

        self.end_session();

        let (tx, rx) = mpsc::channel(TRANSCRIPT_CHANNEL_CAPACITY);
        engine.start(tx)?;
        info!(engine = engine.name(), "recording started");

        self.session = Some(RecordingSession { engine, rx });
        self.show_onboarding = false;
        Ok(())
    }

    /// Apply transcript events that have arrived since the last call.
    ///
    /// Each transcript REPLACES the whole draft: engines report
    /// cumulative results, not deltas. Engine errors are logged and
    /// otherwise ignored; an `Ended` event (or a dropped sender) closes
    /// the session as if the user had stopped. Returns the number of
    /// transcript updates applied.
    pub fn poll_transcripts(&mut self) -> usize {
        let mut applied = 0;
        let mut ended = false;

        if let Some(session) = self.session.as_mut() {
            loop {
                match session.rx.try_recv() {
                    Ok(TranscriptEvent::Transcript(text)) => {
                        self.content = text;
                        applied += 1;
                    }
                    Ok(TranscriptEvent::Error(message)) => {
                        error!(
                            engine = session.engine.name(),
                            "speech engine error: {message}"
                        );
                    }
                    Ok(TranscriptEvent::Ended) | Err(TryRecvError::Disconnected) => {
                        ended = true;
                        break;
                    }
                    Err(TryRecvError::Empty) => break,
                }
            }
        }

        if ended {
            self.stop_recording();
        }
        applied
    }

    /// Stop the active recording session.
    ///
    /// Transcripts that arrived before the stop are still applied; the
    /// receiver is then dropped so anything later has nowhere to go.
    /// Ends in editing when the draft is non-empty, onboarding otherwise.
    /// A no-op when no session is live.
    pub fn stop_recording(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        if let Err(err) = session.engine.stop() {
            error!("failed to stop speech engine: {err}");
        }

        while let Ok(event) = session.rx.try_recv() {
            if let TranscriptEvent::Transcript(text) = event {
                self.content = text;
            }
        }
        drop(session);

        if self.content.is_empty() {
            self.show_onboarding = true;
        }
        info!("recording stopped");
    }

    /// Save the draft as a new note.
    ///
    /// An empty (or whitespace-only) draft is silently ignored: no store
    /// mutation, no error, `Ok(None)`. Otherwise the note is created,
    /// the composer resets to onboarding with an empty draft, and the
    /// created note is returned so the host can show a success
    /// notification. Any live session is stopped first so a late
    /// transcript cannot repopulate the draft after the reset.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails to persist the new note.
    pub fn save(&mut self, store: &mut NoteStore) -> Result<Option<Note>> {
        if self.session.is_some() {
            self.stop_recording();
        }

        if self.content.trim().is_empty() {
            return Ok(None);
        }

        let note = store.create(self.content.clone())?;
        self.content.clear();
        self.show_onboarding = true;
        Ok(Some(note))
    }

    /// Close the compose surface.
    ///
    /// Stops any live session. An empty draft resets to onboarding; a
    /// non-empty draft is preserved so reopening resumes it.
    pub fn close(&mut self) {
        self.end_session();
        if self.content.is_empty() {
            self.show_onboarding = true;
        }
    }

    /// Tear down the session without touching the draft.
    fn end_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            if let Err(err) = session.engine.stop() {
                error!("failed to stop speech engine: {err}");
            }
        }
    }
}
