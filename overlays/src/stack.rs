//! Overlay stack: z-ordering, lifetime and input routing for every active
//! overlay.
//!
//! # Invariants
//!
//! - Entries are ordered by z-index, lowest first; the last entry is active.
//! - z-indices only grow while the stack is busy, so an overlay created later
//!   always renders above one created earlier, even if an overlay in between
//!   was removed. The counter restarts once nothing is tracked.
//! - The stack is the only document-level key subscriber. Keys go to the
//!   active entry only; a hidden active entry lets them fall through.
//! - An overlay that starts closing leaves the stack at once and finishes its
//!   animation in the retiring list.
//!
//! # Failure Modes
//!
//! - `hide` / `get` for an unknown id are no-ops returning nothing.
//! - `show` with a missing mount target returns the error and tracks nothing.

use pagedom::{Document, Event, EventKind, ListenerId, DOCUMENT_TARGET};

use crate::config::{ManagerConfig, OverlayConfig, OverlayOptions, Variant};
use crate::error::Result;
use crate::overlay::{Lifecycle, Overlay, OverlayId};

/// Class set on the mount target while any overlay is visible.
pub const OPEN_CLASS: &str = "overlay-open";

/// An overlay registered with the stack.
#[derive(Debug)]
pub struct StackEntry {
    pub id: OverlayId,
    pub overlay: Overlay,
    pub z_index: i32,
}

#[derive(Debug, Default)]
pub struct OverlayStack {
    config: ManagerConfig,
    /// Registered overlays in z-order (bottom to top).
    entries: Vec<StackEntry>,
    /// Evicted overlays still animating closed.
    retiring: Vec<Overlay>,
    /// Next z slot above `base_z_index`.
    next_slot: i32,
    key_listener: Option<ListenerId>,
}

impl OverlayStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ManagerConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    // --- Stack Operations ---

    /// Register an overlay without showing it.
    pub fn create(&mut self, doc: &mut Document, options: OverlayOptions) -> OverlayId {
        let z_index = self.config.base_z_index + self.next_slot;
        self.next_slot += 1;

        let options = OverlayOptions::new()
            .mount(self.config.mount.clone())
            .merge(options);
        let mut config = OverlayConfig::resolve(options);
        config.z_index_base = z_index;
        config.animation = self.config.animation;

        let overlay = Overlay::new(config);
        let id = overlay.id();
        log::debug!("[stack] create {id} z={z_index} depth={}", self.entries.len() + 1);

        if self.key_listener.is_none() {
            self.key_listener = Some(doc.listen(DOCUMENT_TARGET, EventKind::Key));
        }
        self.entries.push(StackEntry {
            id,
            overlay,
            z_index,
        });
        id
    }

    /// Register an overlay and show it.
    pub fn show(&mut self, doc: &mut Document, options: OverlayOptions) -> Result<OverlayId> {
        let id = self.create(doc, options);
        let shown = match self.entries.last_mut() {
            Some(entry) => entry.overlay.show(doc),
            None => Ok(()),
        };
        if let Err(err) = shown {
            self.entries.retain(|entry| entry.id != id);
            self.sync(doc);
            return Err(err);
        }
        self.sync(doc);
        Ok(id)
    }

    /// Hide an overlay and drop it from the stack. Unknown ids are ignored.
    pub fn hide(&mut self, doc: &mut Document, id: OverlayId) {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            log::trace!("[stack] hide {id}: not tracked");
            return;
        };
        let entry = self.entries.remove(index);
        self.retire(doc, entry.overlay);
        self.sync(doc);
    }

    /// Hide and drop every overlay, topmost first.
    pub fn hide_all(&mut self, doc: &mut Document) {
        log::debug!("[stack] hide all ({})", self.entries.len());
        while let Some(entry) = self.entries.pop() {
            self.retire(doc, entry.overlay);
        }
        self.sync(doc);
    }

    fn retire(&mut self, doc: &mut Document, mut overlay: Overlay) {
        overlay.hide(doc);
        if overlay.lifecycle() == Lifecycle::Closed {
            log::debug!("[stack] {} dropped", overlay.id());
        } else {
            log::debug!("[stack] {} retiring", overlay.id());
            self.retiring.push(overlay);
        }
    }

    // --- Variant Helpers ---

    /// Show a confirmation dialog (small, Yes / No).
    pub fn confirm(&mut self, doc: &mut Document, options: OverlayOptions) -> Result<OverlayId> {
        self.show_variant(doc, Variant::Confirm, options)
    }

    /// Show an alert (small, OK only, severity icon).
    pub fn alert(&mut self, doc: &mut Document, options: OverlayOptions) -> Result<OverlayId> {
        self.show_variant(doc, Variant::Alert, options)
    }

    /// Show a form dialog (medium unless sized, Submit / Cancel).
    pub fn form(&mut self, doc: &mut Document, options: OverlayOptions) -> Result<OverlayId> {
        self.show_variant(doc, Variant::Form, options)
    }

    /// Show a dialog with caller-supplied content.
    pub fn custom(&mut self, doc: &mut Document, options: OverlayOptions) -> Result<OverlayId> {
        self.show_variant(doc, Variant::Custom, options)
    }

    fn show_variant(
        &mut self,
        doc: &mut Document,
        variant: Variant,
        options: OverlayOptions,
    ) -> Result<OverlayId> {
        self.show(doc, OverlayOptions::new().variant(variant).merge(options))
    }

    // --- State Queries ---

    /// The topmost overlay.
    pub fn active(&self) -> Option<OverlayId> {
        self.entries.last().map(|entry| entry.id)
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: OverlayId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    /// A stacked or retiring overlay.
    pub fn get(&self, id: OverlayId) -> Option<&Overlay> {
        self.entries
            .iter()
            .map(|entry| &entry.overlay)
            .chain(self.retiring.iter())
            .find(|overlay| overlay.id() == id)
    }

    /// A stacked overlay. Overlays dismissed through this handle are evicted
    /// on the next `tick` or `handle_event`.
    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut Overlay> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.overlay)
    }

    pub fn z_index(&self, id: OverlayId) -> Option<i32> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.z_index)
    }

    /// Lifecycle of a stacked or retiring overlay.
    pub fn lifecycle(&self, id: OverlayId) -> Option<Lifecycle> {
        self.get(id).map(Overlay::lifecycle)
    }

    /// Overlays still animating closed.
    pub fn retiring(&self) -> usize {
        self.retiring.len()
    }

    // --- Event Handling ---

    /// Advance every overlay's animation and evict overlays that closed
    /// themselves.
    pub fn tick(&mut self, doc: &mut Document) {
        for entry in &mut self.entries {
            entry.overlay.tick(doc);
        }
        for overlay in &mut self.retiring {
            overlay.tick(doc);
        }
        self.retiring
            .retain(|overlay| overlay.lifecycle() != Lifecycle::Closed);
        self.evict_dismissed(doc);
        self.sync(doc);
    }

    /// Route an input event.
    ///
    /// Keys reach the topmost overlay only, and only while it is visible.
    /// Clicks reach the overlay whose element contains the target. Returns
    /// true if an overlay consumed it.
    pub fn handle_event(&mut self, doc: &mut Document, event: &Event) -> bool {
        let consumed = match event {
            Event::Key { .. } => {
                if self.key_listener.is_none() {
                    return false;
                }
                match self.entries.last_mut() {
                    Some(top) if top.overlay.is_visible() => {
                        log::trace!("[stack] key -> {}", top.id);
                        top.overlay.handle_event(doc, event, true)
                    }
                    Some(top) => {
                        log::trace!(
                            "[stack] key falls through, {} is {}",
                            top.id,
                            top.overlay.lifecycle()
                        );
                        false
                    }
                    None => false,
                }
            }
            Event::Click {
                target: Some(target),
                ..
            } => {
                let top = self.entries.len().saturating_sub(1);
                let hit = self
                    .entries
                    .iter()
                    .rposition(|entry| doc.is_within(target, entry.overlay.element_id()));
                match hit {
                    Some(index) => {
                        log::trace!("[stack] click {target} -> {}", self.entries[index].id);
                        self.entries[index]
                            .overlay
                            .handle_event(doc, event, index == top)
                    }
                    None => false,
                }
            }
            _ => false,
        };

        self.evict_dismissed(doc);
        self.sync(doc);
        consumed
    }

    /// Move overlays that closed themselves out of the stack.
    fn evict_dismissed(&mut self, doc: &mut Document) {
        let mut index = 0;
        while index < self.entries.len() {
            if self.entries[index].overlay.is_dismissed() {
                let entry = self.entries.remove(index);
                log::debug!("[stack] evict {}", entry.id);
                self.retire(doc, entry.overlay);
            } else {
                index += 1;
            }
        }
    }

    /// Keep shared resources in line with what is tracked.
    fn sync(&mut self, doc: &mut Document) {
        let idle = self.entries.is_empty() && self.retiring.is_empty();
        if idle {
            self.next_slot = 0;
            if let Some(listener) = self.key_listener.take() {
                doc.unlisten(listener);
            }
        }

        let any_visible = self.entries.iter().any(|entry| entry.overlay.is_visible());
        if let Some(mount) = doc.get_mut(&self.config.mount) {
            if any_visible {
                mount.add_class(OPEN_CLASS);
            } else {
                mount.remove_class(OPEN_CLASS);
            }
        }
    }
}
