//! Dismissal triggers and input handling.
//!
//! | Trigger | Precondition | Callback |
//! |---|---|---|
//! | Backdrop | closable, dismiss_on_backdrop, target is the root itself | on_close |
//! | Escape | closable, dismiss_on_escape, overlay is topmost | on_close |
//! | Close button | closable | on_close |
//! | Confirm | confirm button visible and enabled | on_confirm |
//! | Cancel | cancel button visible and enabled | on_cancel |
//!
//! A callback returning `false` vetoes the close; otherwise the overlay hides.

use pagedom::{Document, Event, EventKind, Key};

use super::Overlay;
use crate::config::Variant;
use crate::form::FormData;

/// Something asking the overlay to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Backdrop,
    Escape,
    CloseButton,
    Confirm,
    Cancel,
}

impl Overlay {
    /// Run a dismissal trigger through its gate.
    /// Returns true if the overlay started (or queued) closing.
    pub fn trigger(&mut self, doc: &mut Document, trigger: Trigger) -> bool {
        if !self.is_visible() {
            log::trace!("[{}] {trigger:?} ignored while {}", self.id, self.lifecycle());
            return false;
        }
        if !self.permits(trigger) {
            log::trace!("[{}] {trigger:?} not permitted by config", self.id);
            return false;
        }

        let proceed = match trigger {
            Trigger::Backdrop | Trigger::Escape | Trigger::CloseButton => {
                self.config.callbacks.on_close.as_mut().is_none_or(|gate| gate())
            }
            Trigger::Confirm => {
                let data = self.form_data(doc);
                self.config
                    .callbacks
                    .on_confirm
                    .as_mut()
                    .is_none_or(|gate| gate(&data))
            }
            Trigger::Cancel => self.config.callbacks.on_cancel.as_mut().is_none_or(|gate| gate()),
        };

        if !proceed {
            log::debug!("[{}] {trigger:?} vetoed by callback", self.id);
            return false;
        }
        log::debug!("[{}] dismissed by {trigger:?}", self.id);
        self.hide(doc);
        true
    }

    fn permits(&self, trigger: Trigger) -> bool {
        let config = &self.config;
        match trigger {
            Trigger::Backdrop => config.closable && config.dismiss_on_backdrop,
            Trigger::Escape => config.closable && config.dismiss_on_escape,
            Trigger::CloseButton => config.closable,
            Trigger::Confirm => config.confirm_button.is_active(),
            Trigger::Cancel => config.cancel_button.is_active(),
        }
    }

    /// Values of named fields in the body. Empty unless this is a form.
    fn form_data(&self, doc: &Document) -> FormData {
        if self.config.variant != Variant::Form {
            return FormData::new();
        }
        doc.get(&self.part_id("body"))
            .map(FormData::collect)
            .unwrap_or_default()
    }

    /// Handle an input event. `topmost` tells whether this overlay is the
    /// active one; keys are ignored otherwise.
    ///
    /// Returns true if the event was consumed.
    pub fn handle_event(&mut self, doc: &mut Document, event: &Event, topmost: bool) -> bool {
        match event {
            Event::Click { target: Some(target), .. } => self.handle_click(doc, target),
            Event::Key { key, .. } if topmost => self.handle_key(doc, *key),
            _ => false,
        }
    }

    fn handle_click(&mut self, doc: &mut Document, target: &str) -> bool {
        if !doc.listening(&self.element_id, EventKind::Click) {
            return false;
        }
        if !doc.is_within(target, &self.element_id) {
            return false;
        }

        if target == self.element_id {
            self.trigger(doc, Trigger::Backdrop);
        } else if let Some(trigger) = self.button_at(doc, target) {
            self.trigger(doc, trigger);
        }
        // Clicks anywhere inside the overlay stay inside it.
        true
    }

    fn handle_key(&mut self, doc: &mut Document, key: Key) -> bool {
        match key {
            Key::Escape => {
                self.trigger(doc, Trigger::Escape);
                true
            }
            Key::Enter => {
                let focused_button = doc
                    .focused()
                    .map(str::to_string)
                    .and_then(|focused| self.button_at(doc, &focused));
                match focused_button {
                    Some(trigger) => {
                        self.trigger(doc, trigger);
                        true
                    }
                    None if self.config.variant == Variant::Confirm => {
                        self.trigger(doc, Trigger::Confirm);
                        true
                    }
                    None => false,
                }
            }
            Key::Tab => {
                doc.focus_next_within(&self.element_id);
                true
            }
            Key::BackTab => {
                doc.focus_prev_within(&self.element_id);
                true
            }
            _ => false,
        }
    }

    /// Which button, if any, contains `target`.
    fn button_at(&self, doc: &Document, target: &str) -> Option<Trigger> {
        [
            ("close", Trigger::CloseButton),
            ("confirm", Trigger::Confirm),
            ("cancel", Trigger::Cancel),
        ]
        .into_iter()
        .find(|(part, _)| doc.is_within(target, &self.part_id(part)))
        .map(|(_, trigger)| trigger)
    }
}
