// SPDX-License-Identifier: GPL-3.0-only

//! The keyboard session: one explicit object per keyboard lifetime.
//!
//! A [`KeyboardSession`] owns the context, the resolver chains, the gesture
//! dispatcher, and the handles to the host's collaborators (text proxy,
//! autocomplete, feedback, persistence). Every call is threaded through it;
//! there is no global "current keyboard".
//!
//! # Dispatch model
//!
//! Everything runs on one logical dispatch thread. The host feeds raw touch
//! events and periodic tick polls in; the session classifies them and
//! routes the resulting gestures to the action handling below. Autocomplete
//! completions re-enter through a channel drained on the same thread, with
//! latest-reply-wins staleness checks.
//!
//! # Action handling
//!
//! A pluggable [`KeyboardActionHandler`] is consulted first; whatever it
//! does not consume falls through to the standard behavior (character
//! insertion with one-shot shift release, repeatable backspace, shift
//! tap/long-press, mode switching, callout presentation). Unmatched
//! (gesture, action) combinations are no-ops, and a failing handler is
//! logged and swallowed; it can never prevent `End` bookkeeping or stop
//! the session.

use crate::callout::CalloutResolver;
use crate::config::KeyboardConfig;
use crate::gesture::{Gesture, GestureDispatcher, GestureEvent, Point, Rect};
use crate::input::case::KeyboardCase;
use crate::input::resolver::InputSetResolver;
use crate::layout::generator::{LayoutGenerator, StandardLayoutGenerator};
use crate::layout::paging::{paginate, Page};
use crate::layout::types::{Action, Layout};
use crate::locale::Locale;
use crate::state::{DeviceClass, KeyboardContext, KeyboardMode};
use futures::channel::mpsc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

// ============================================================================
// Host Collaborator Interfaces
// ============================================================================

/// The host text field the keyboard edits through.
pub trait TextEditingProxy {
    /// Inserts text at the cursor.
    fn insert_text(&mut self, text: &str);

    /// Deletes backward from the cursor.
    fn delete_backward(&mut self, count: usize);

    /// Returns the word fragment immediately before the cursor, if the
    /// cursor is mid-word or at a word's end.
    fn current_word_before_cursor(&self) -> Option<String>;

    /// Moves the cursor by a character offset.
    fn move_cursor(&mut self, offset: i32);
}

/// One autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The suggested text.
    pub text: String,
    /// Whether this suggestion would be applied as an autocorrection.
    pub is_autocorrect: bool,
}

impl Suggestion {
    /// Creates a plain suggestion.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_autocorrect: false,
        }
    }
}

/// Error reported by the autocomplete collaborator.
#[derive(Debug)]
pub enum SuggestionError {
    /// The backend failed to produce suggestions
    Backend {
        /// Human-readable failure description
        message: String,
    },
}

impl fmt::Display for SuggestionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionError::Backend { message } => {
                write!(f, "suggestion backend error: {}", message)
            }
        }
    }
}

impl std::error::Error for SuggestionError {}

/// Completion callback for a suggestion fetch.
pub type SuggestionCompletion = Box<dyn FnOnce(Result<Vec<Suggestion>, SuggestionError>) + Send>;

/// The host's autocomplete backend.
///
/// Fetches are asynchronous: the service is handed a completion that will
/// re-enter the dispatch thread. A new fetch does not cancel an in-flight
/// one; replies are latest-wins, and the session discards replies for a
/// word that is no longer current. No timeout is imposed.
pub trait AutocompleteService {
    /// Requests suggestions for a word.
    fn suggestions(&mut self, word: &str, completion: SuggestionCompletion);
}

/// What kind of feedback a key interaction should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    /// An ordinary key press
    KeyPress,
    /// A delete/backspace press
    Delete,
    /// A system key press (shift, mode switches, return)
    System,
}

/// The host's haptic/audio engine. Fire-and-forget.
pub trait FeedbackService {
    /// Triggers haptic feedback.
    fn trigger_haptic(&mut self, kind: FeedbackKind);

    /// Triggers audio feedback.
    fn trigger_audio(&mut self, kind: FeedbackKind);
}

/// A feedback service that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl FeedbackService for NoFeedback {
    fn trigger_haptic(&mut self, _kind: FeedbackKind) {}
    fn trigger_audio(&mut self, _kind: FeedbackKind) {}
}

/// A key-value store for keyboard state that outlives the session.
///
/// Keys are namespaced by setting id plus an optional per-component id,
/// e.g. `"last_page.emoji"` for the emoji grid's page index.
pub trait PersistenceStore {
    /// Returns the stored value for a key.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores a value for a key.
    fn set(&mut self, key: &str, value: &str);
}

/// An in-memory store, the default when the host wires none.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

// ============================================================================
// Pluggable Action Handling
// ============================================================================

/// Error type for custom gesture handlers.
#[derive(Debug)]
pub struct HandlerError {
    /// Human-readable failure description
    pub message: String,
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gesture handler error: {}", self.message)
    }
}

impl std::error::Error for HandlerError {}

/// A host-supplied handler consulted before the standard behavior.
///
/// Return `Ok(true)` to consume the (gesture, action) pair, `Ok(false)` to
/// fall through. Errors are logged and swallowed by the session.
pub trait KeyboardActionHandler {
    /// Handles one classified gesture on one action.
    fn handle(
        &mut self,
        gesture: Gesture,
        action: &Action,
        text: &mut dyn TextEditingProxy,
    ) -> Result<bool, HandlerError>;
}

// ============================================================================
// The Session
// ============================================================================

type SuggestionReply = (String, Result<Vec<Suggestion>, SuggestionError>);

/// A keyboard session: context, strategies, dispatcher, and collaborator
/// handles, constructed once and threaded through every call.
pub struct KeyboardSession {
    context: KeyboardContext,
    config: KeyboardConfig,
    input_sets: InputSetResolver,
    generator: Box<dyn LayoutGenerator>,
    callouts: CalloutResolver,
    dispatcher: GestureDispatcher,
    custom_handler: Option<Box<dyn KeyboardActionHandler>>,
    text: Box<dyn TextEditingProxy>,
    autocomplete: Option<Box<dyn AutocompleteService>>,
    feedback: Box<dyn FeedbackService>,
    store: Box<dyn PersistenceStore>,
    suggestions: Vec<Suggestion>,
    last_requested_word: Option<String>,
    suggestion_tx: mpsc::UnboundedSender<SuggestionReply>,
    suggestion_rx: mpsc::UnboundedReceiver<SuggestionReply>,
    active_callouts: Vec<Action>,
    layout_refresh_needed: bool,
    dismiss_requested: bool,
}

impl KeyboardSession {
    /// Creates a session for a locale and device class.
    ///
    /// Strategies and collaborators start at their standard defaults;
    /// replace them with the `with_*` builders before first use.
    #[must_use]
    pub fn new(locale: Locale, device_class: DeviceClass, text: Box<dyn TextEditingProxy>) -> Self {
        let config = KeyboardConfig::default();
        let (suggestion_tx, suggestion_rx) = mpsc::unbounded();
        Self {
            context: KeyboardContext::new(locale, device_class),
            dispatcher: GestureDispatcher::new(config.gesture_timing()),
            config,
            input_sets: InputSetResolver::standard(),
            generator: Box::new(StandardLayoutGenerator::new()),
            callouts: CalloutResolver::standard(),
            custom_handler: None,
            text,
            autocomplete: None,
            feedback: Box::new(NoFeedback),
            store: Box::new(MemoryStore::new()),
            suggestions: Vec::new(),
            last_requested_word: None,
            suggestion_tx,
            suggestion_rx,
            active_callouts: Vec::new(),
            layout_refresh_needed: false,
            dismiss_requested: false,
        }
    }

    /// Replaces the configuration, re-timing the gesture dispatcher.
    #[must_use]
    pub fn with_config(mut self, config: KeyboardConfig) -> Self {
        self.dispatcher = GestureDispatcher::new(config.gesture_timing());
        self.config = config;
        self
    }

    /// Replaces the input set resolver.
    #[must_use]
    pub fn with_input_sets(mut self, input_sets: InputSetResolver) -> Self {
        self.input_sets = input_sets;
        self
    }

    /// Replaces the layout generation strategy.
    #[must_use]
    pub fn with_generator(mut self, generator: Box<dyn LayoutGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Replaces the callout resolver.
    #[must_use]
    pub fn with_callouts(mut self, callouts: CalloutResolver) -> Self {
        self.callouts = callouts;
        self
    }

    /// Wires the autocomplete backend.
    #[must_use]
    pub fn with_autocomplete(mut self, service: Box<dyn AutocompleteService>) -> Self {
        self.autocomplete = Some(service);
        self
    }

    /// Wires the feedback engine.
    #[must_use]
    pub fn with_feedback(mut self, feedback: Box<dyn FeedbackService>) -> Self {
        self.feedback = feedback;
        self
    }

    /// Wires the persistence store.
    #[must_use]
    pub fn with_store(mut self, store: Box<dyn PersistenceStore>) -> Self {
        self.store = store;
        self
    }

    /// Installs a custom action handler consulted before the standard one.
    #[must_use]
    pub fn with_handler(mut self, handler: Box<dyn KeyboardActionHandler>) -> Self {
        self.custom_handler = Some(handler);
        self
    }

    // ------------------------------------------------------------------
    // External interface
    // ------------------------------------------------------------------

    /// Computes the layout for the current context.
    ///
    /// Layouts are recomputed values, never cached or mutated in place.
    pub fn current_layout(&mut self) -> Layout {
        let set = self.input_sets.input_set(&self.context.mode, &self.context.locale);
        self.generator.layout(&self.context, set)
    }

    /// Arranges a flat catalog into pages.
    #[must_use]
    pub fn current_pages(
        &self,
        catalog: &[Action],
        page_size: usize,
        rows_per_page: usize,
    ) -> Vec<Page> {
        paginate(catalog, page_size, rows_per_page)
    }

    /// Returns the current keyboard case.
    #[must_use]
    pub fn current_case(&self) -> KeyboardCase {
        self.context.case.current()
    }

    /// Returns the session context.
    #[must_use]
    pub fn context(&self) -> &KeyboardContext {
        &self.context
    }

    /// Switches the active locale.
    pub fn set_locale(&mut self, locale: Locale) {
        if self.context.locale != locale {
            self.context.locale = locale;
            self.layout_refresh_needed = true;
        }
    }

    /// Switches the keyboard mode.
    pub fn set_mode(&mut self, mode: KeyboardMode) {
        if self.context.mode != mode {
            self.context.mode = mode;
            self.layout_refresh_needed = true;
        }
    }

    /// Returns and clears the layout-refresh flag.
    ///
    /// Set by every case transition, mode switch, and locale switch; the
    /// host re-requests [`Self::current_layout`] when it reads `true`.
    pub fn take_layout_refresh(&mut self) -> bool {
        std::mem::take(&mut self.layout_refresh_needed)
    }

    /// Returns and clears the dismiss-request flag.
    pub fn take_dismiss_request(&mut self) -> bool {
        std::mem::take(&mut self.dismiss_requested)
    }

    // ------------------------------------------------------------------
    // Touch plumbing
    // ------------------------------------------------------------------

    /// Feeds a touch-down and handles the resulting gestures.
    pub fn touch_down(&mut self, action: &Action, bounds: Rect, location: Point, now: Instant) {
        let events = self.dispatcher.touch_down(action, bounds, location, now);
        self.handle_events(events);
    }

    /// Feeds a touch move and handles the resulting gestures.
    pub fn touch_move(&mut self, action: &Action, location: Point) {
        let events = self.dispatcher.touch_move(action, location);
        self.handle_events(events);
    }

    /// Feeds a touch release and handles the resulting gestures.
    pub fn touch_up(&mut self, action: &Action, location: Point, now: Instant) {
        let events = self.dispatcher.touch_up(action, location, now);
        self.handle_events(events);
    }

    /// Feeds a touch cancellation; `End` is still delivered.
    pub fn touch_cancel(&mut self, action: &Action) {
        let events = self.dispatcher.touch_cancel(action);
        self.handle_events(events);
    }

    /// Polls gesture deadlines; call from the periodic tick.
    ///
    /// Also drains any autocomplete replies that arrived since the last
    /// poll, keeping all state mutation on the dispatch thread.
    pub fn poll(&mut self, now: Instant) {
        let events = self.dispatcher.poll(now);
        self.handle_events(events);
        self.drain_suggestion_replies();
    }

    fn handle_events(&mut self, events: Vec<GestureEvent>) {
        for event in events {
            self.handle(event.gesture, &event.action);
        }
    }

    // ------------------------------------------------------------------
    // Gesture -> action routing
    // ------------------------------------------------------------------

    /// Routes one classified gesture on one action.
    ///
    /// The custom handler is consulted first; unconsumed pairs fall through
    /// to the standard behavior, and unmatched pairs are no-ops. Handler
    /// failures are logged and swallowed; timer bookkeeping already
    /// happened in the dispatcher, so `End` guarantees are unaffected.
    pub fn handle(&mut self, gesture: Gesture, action: &Action) {
        if let Some(handler) = &mut self.custom_handler {
            match handler.handle(gesture, action, self.text.as_mut()) {
                Ok(true) => return,
                Ok(false) => {}
                Err(error) => {
                    tracing::warn!("custom handler failed on ({:?}, {}): {}", gesture, action, error);
                    return;
                }
            }
        }
        self.handle_standard(gesture, action);
    }

    fn handle_standard(&mut self, gesture: Gesture, action: &Action) {
        match (gesture, action) {
            (Gesture::Press, action) if !action.is_filler() => {
                let kind = match action {
                    Action::Backspace => FeedbackKind::Delete,
                    Action::Character(_) | Action::Space | Action::Emoji(_) => {
                        FeedbackKind::KeyPress
                    }
                    _ => FeedbackKind::System,
                };
                self.feedback.trigger_haptic(kind);
                self.feedback.trigger_audio(kind);
            }
            (Gesture::Tap, Action::Character(text)) => {
                self.text.insert_text(text);
                if self.context.case.character_typed() {
                    self.layout_refresh_needed = true;
                }
                self.refresh_autocomplete();
            }
            (Gesture::Tap, Action::Space) => {
                self.text.insert_text(" ");
                self.refresh_autocomplete();
            }
            (Gesture::Tap, Action::Newline) => {
                self.text.insert_text("\n");
                self.refresh_autocomplete();
            }
            (Gesture::Tap, Action::Emoji(emoji)) => {
                self.text.insert_text(emoji);
            }
            (Gesture::Tap | Gesture::Repeat, Action::Backspace) => {
                self.text.delete_backward(1);
                self.refresh_autocomplete();
            }
            (Gesture::Tap | Gesture::Repeat, Action::MoveCursor(offset)) => {
                self.text.move_cursor(*offset);
            }
            (Gesture::Tap, Action::Shift) => {
                if self.context.case.shift_tapped() {
                    self.layout_refresh_needed = true;
                }
            }
            (Gesture::LongPress, Action::Shift) => {
                if self.context.case.shift_long_pressed() {
                    self.layout_refresh_needed = true;
                }
            }
            (Gesture::LongPress, Action::Character(_)) => {
                self.active_callouts = self
                    .callouts
                    .callout_actions(&self.context.locale, action);
            }
            (Gesture::Tap, Action::ModeSwitch(mode)) => {
                self.set_mode(mode.clone());
            }
            (Gesture::Tap, Action::Dismiss) => {
                self.dismiss_requested = true;
            }
            (Gesture::Tap, Action::Image { name, .. }) => {
                // Image selection renders host-side; nothing to edit here.
                tracing::debug!("image '{}' selected", name);
            }
            (Gesture::End, _) => {
                self.active_callouts.clear();
            }
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Callouts
    // ------------------------------------------------------------------

    /// The alternate characters currently presented for a long-pressed key.
    ///
    /// Empty outside an active long press; cleared when the gesture ends.
    #[must_use]
    pub fn active_callouts(&self) -> &[Action] {
        &self.active_callouts
    }

    /// Resolves the callout actions a key would present in the current
    /// locale.
    pub fn callout_actions(&mut self, action: &Action) -> Vec<Action> {
        self.callouts.callout_actions(&self.context.locale, action)
    }

    // ------------------------------------------------------------------
    // Case signals
    // ------------------------------------------------------------------

    /// Reports that the host text context changed, with a preferred case.
    ///
    /// Applied only when the behavior policy allows it: autocapitalization
    /// must be enabled and the cursor must not be mid-word.
    pub fn text_context_changed(&mut self, preferred: KeyboardCase) {
        let mid_word = self.text.current_word_before_cursor().is_some();
        let allowed = self.config.autocapitalize && !mid_word;
        if self.context.case.request_preferred(preferred, allowed) {
            self.layout_refresh_needed = true;
        }
    }

    // ------------------------------------------------------------------
    // Autocomplete
    // ------------------------------------------------------------------

    /// The current suggestions, newest fetch first.
    #[must_use]
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Applies a suggestion reply for a word.
    ///
    /// Replies for a word that is no longer the latest request are stale
    /// and discarded; a new fetch never cancels an in-flight one, so late
    /// replies are expected. Fetch errors clear the suggestion strip and
    /// typing continues uninterrupted.
    pub fn apply_suggestions(
        &mut self,
        word: &str,
        result: Result<Vec<Suggestion>, SuggestionError>,
    ) {
        if self.last_requested_word.as_deref() != Some(word) {
            tracing::debug!("discarding stale suggestions for '{}'", word);
            return;
        }
        match result {
            Ok(suggestions) => self.suggestions = suggestions,
            Err(error) => {
                tracing::warn!("suggestion fetch failed: {}", error);
                self.suggestions.clear();
            }
        }
    }

    /// Drains pending suggestion replies onto the dispatch thread.
    pub fn drain_suggestion_replies(&mut self) {
        while let Ok(Some((word, result))) = self.suggestion_rx.try_next() {
            self.apply_suggestions(&word, result);
        }
    }

    fn refresh_autocomplete(&mut self) {
        let word = self.text.current_word_before_cursor();
        self.last_requested_word = word.clone();

        let Some(service) = self.autocomplete.as_mut() else {
            self.suggestions.clear();
            return;
        };
        let Some(word) = word else {
            self.suggestions.clear();
            return;
        };

        let tx = self.suggestion_tx.clone();
        let reply_word = word.clone();
        service.suggestions(
            &word,
            Box::new(move |result| {
                // The receiver may be gone if the session is tearing down.
                let _ = tx.unbounded_send((reply_word, result));
            }),
        );
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Stores the last viewed page index for a paginated grid.
    pub fn save_last_page(&mut self, grid_id: &str, index: usize) {
        self.store
            .set(&Self::page_key(grid_id), &index.to_string());
    }

    /// Returns the last viewed page index for a paginated grid.
    #[must_use]
    pub fn last_page(&self, grid_id: &str) -> Option<usize> {
        self.store.get(&Self::page_key(grid_id))?.parse().ok()
    }

    fn page_key(grid_id: &str) -> String {
        format!("last_page.{}", grid_id)
    }
}

// ============================================================================
// Tests
// ============================================================================
