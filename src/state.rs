//! Presentation state and the controller that owns it.
//!
//! Every user action is a method on [`Presentation`] that mutates the state
//! and returns a [`StateChange`] describing what happened, so any rendering
//! layer can decide what to redraw. Time is passed in explicitly; the
//! controller never reads the clock itself.
use crate::catalog::{RecordStore, VehicleRecord};
use crate::clipboard::{ClipboardWriter, Notifier};
use crate::error::LookupError;
use crate::search::search;
use log::{debug, warn};
use std::time::{Duration, Instant};

pub const DEFAULT_COPY_FEEDBACK: Duration = Duration::from_secs(2);

/// Primary state, driven only by submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<'a> {
    Idle,
    Showing(&'a VehicleRecord),
    ShowingError(String),
}

/// Transient "copied" marker with its pending clear deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedMarker {
    pub identifier: String,
    pub clear_at: Instant,
}

/// What a handler changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Unchanged,
    InputChanged,
    Found(String),
    SearchFailed(LookupError),
    Copied(String),
    CopyFailed,
    CopyCleared,
    ThemeChanged { dark_mode: bool },
}

#[derive(Debug, Clone)]
pub struct SearchState<'a> {
    input: String,
    view: View<'a>,
    copied: Option<CopiedMarker>,
    dark_mode: bool,
}

impl<'a> SearchState<'a> {
    fn new(dark_mode: bool) -> Self {
        Self {
            input: String::new(),
            view: View::Idle,
            copied: None,
            dark_mode,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn view(&self) -> &View<'a> {
        &self.view
    }

    pub fn matched(&self) -> Option<&'a VehicleRecord> {
        match self.view {
            View::Showing(record) => Some(record),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.view {
            View::ShowingError(message) => Some(message),
            _ => None,
        }
    }

    pub fn copied_identifier(&self) -> Option<&str> {
        self.copied.as_ref().map(|m| m.identifier.as_str())
    }

    pub fn copied_marker(&self) -> Option<&CopiedMarker> {
        self.copied.as_ref()
    }

    pub fn is_copied(&self, identifier: &str) -> bool {
        self.copied_identifier() == Some(identifier)
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }
}

/// Startup options for the presentation component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationOptions {
    pub dark_mode: bool,
    pub show_blurb: bool,
    pub copy_feedback: Duration,
}

impl Default for PresentationOptions {
    fn default() -> Self {
        Self {
            dark_mode: false,
            show_blurb: true,
            copy_feedback: DEFAULT_COPY_FEEDBACK,
        }
    }
}

pub struct Presentation<'a> {
    store: &'a RecordStore,
    state: SearchState<'a>,
    options: PresentationOptions,
}

impl<'a> Presentation<'a> {
    pub fn new(store: &'a RecordStore, options: PresentationOptions) -> Self {
        Self {
            store,
            state: SearchState::new(options.dark_mode),
            options,
        }
    }

    pub fn state(&self) -> &SearchState<'a> {
        &self.state
    }

    pub fn store(&self) -> &'a RecordStore {
        self.store
    }

    pub fn options(&self) -> &PresentationOptions {
        &self.options
    }

    pub fn set_input(&mut self, text: impl Into<String>) -> StateChange {
        let text = text.into();
        if text == self.state.input {
            return StateChange::Unchanged;
        }
        self.state.input = text;
        StateChange::InputChanged
    }

    /// Run a search for the current input and show the result or the error.
    pub fn submit(&mut self) -> StateChange {
        match search(&self.state.input, self.store) {
            Ok(record) => {
                debug!("VIN {} matched {}", record.identifier, record.model);
                self.state.view = View::Showing(record);
                StateChange::Found(record.identifier.clone())
            }
            Err(err) => {
                debug!("Search for {:?} failed: {:?}", self.state.input, err);
                self.state.view = View::ShowingError(err.to_string());
                StateChange::SearchFailed(err)
            }
        }
    }

    /// Copy `identifier` and arm the feedback marker.
    ///
    /// A copy while a marker is still showing replaces it, so the marker
    /// clears one feedback period after the latest successful copy. On
    /// failure the user is alerted and the marker is left alone.
    pub fn copy(
        &mut self,
        identifier: &str,
        clipboard: &mut dyn ClipboardWriter,
        notifier: &mut dyn Notifier,
        now: Instant,
    ) -> StateChange {
        match clipboard.write_text(identifier) {
            Ok(()) => {
                self.state.copied = Some(CopiedMarker {
                    identifier: identifier.to_string(),
                    clear_at: now + self.options.copy_feedback,
                });
                debug!("Copied VIN {identifier}");
                StateChange::Copied(identifier.to_string())
            }
            Err(err) => {
                warn!("Clipboard write failed for VIN {identifier}: {err:?}");
                notifier.alert(&err.to_string());
                StateChange::CopyFailed
            }
        }
    }

    pub fn toggle_theme(&mut self) -> StateChange {
        self.state.dark_mode = !self.state.dark_mode;
        debug!("Dark mode: {}", self.state.dark_mode);
        StateChange::ThemeChanged {
            dark_mode: self.state.dark_mode,
        }
    }

    /// Expire the copied marker once its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> StateChange {
        match &self.state.copied {
            Some(marker) if now >= marker.clear_at => {
                self.state.copied = None;
                StateChange::CopyCleared
            }
            _ => StateChange::Unchanged,
        }
    }
}
