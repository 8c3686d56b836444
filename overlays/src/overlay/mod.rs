//! A single overlay (modal dialog) and its open/close state machine.
//!
//! An overlay knows nothing about other overlays. It is driven through a
//! [`Document`]: `show` attaches its element tree, `hide` detaches it, and
//! `tick` completes animation steps once the document clock says they are due.
//!
//! # Invariants
//!
//! - Lifecycle never skips a state, and at most one step is pending.
//! - `show` is a no-op unless `Closed`; `hide` is a no-op when `Closed` or
//!   `Closing`. A `hide` during `Opening` is queued and runs on reaching `Open`.
//! - Focus captured at `show` is restored at `Closed` if that element is still
//!   attached.

mod dismiss;
mod lifecycle;
pub(crate) mod render;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use pagedom::element::collect_ids;
use pagedom::{collect_tabbable, Document, DomError, Element, EventKind, ListenerId};

pub use dismiss::Trigger;
pub use lifecycle::Lifecycle;

use crate::config::{Body, OverlayConfig, OverlayOptions, Variant};
use crate::error::Result;

/// Global counter for unique overlay IDs.
static OVERLAY_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

impl OverlayId {
    fn next() -> Self {
        Self(OVERLAY_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OverlayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "overlay-{}", self.0)
    }
}

/// Mutable state, owned by the overlay alone.
#[derive(Debug, Default)]
pub struct OverlayState {
    pub lifecycle: Lifecycle,
    pub ever_shown: bool,
    /// Element focused before the overlay opened.
    pub prior_focus: Option<String>,
    /// `hide` arrived while opening.
    pub close_queued: bool,
    /// When the pending animation step completes.
    pub deadline: Option<Instant>,
    /// Body ids are prefixed with the root id to avoid clashing with
    /// elements already in the document.
    pub scoped_ids: bool,
}

pub struct Overlay {
    id: OverlayId,
    element_id: String,
    config: OverlayConfig,
    state: OverlayState,
    click_listener: Option<ListenerId>,
}

impl std::fmt::Debug for Overlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overlay")
            .field("id", &self.id)
            .field("variant", &self.config.variant)
            .field("state", &self.state)
            .finish()
    }
}

impl Overlay {
    pub fn new(config: OverlayConfig) -> Self {
        let id = OverlayId::next();
        Self {
            id,
            element_id: id.to_string(),
            config,
            state: OverlayState::default(),
            click_listener: None,
        }
    }

    pub fn from_options(options: OverlayOptions) -> Self {
        Self::new(OverlayConfig::resolve(options))
    }

    /// Create and immediately show an overlay.
    pub fn open(doc: &mut Document, options: OverlayOptions) -> Result<Self> {
        let mut overlay = Self::from_options(options);
        overlay.show(doc)?;
        Ok(overlay)
    }

    /// Shown confirmation dialog (Yes / No).
    pub fn confirm(doc: &mut Document, options: OverlayOptions) -> Result<Self> {
        Self::open(doc, OverlayOptions::new().variant(Variant::Confirm).merge(options))
    }

    /// Shown alert dialog (OK only).
    pub fn alert(doc: &mut Document, options: OverlayOptions) -> Result<Self> {
        Self::open(doc, OverlayOptions::new().variant(Variant::Alert).merge(options))
    }

    /// Shown form dialog (Submit / Cancel).
    pub fn form(doc: &mut Document, options: OverlayOptions) -> Result<Self> {
        Self::open(doc, OverlayOptions::new().variant(Variant::Form).merge(options))
    }

    /// Shown dialog with caller-supplied content and no preset buttons.
    pub fn custom(doc: &mut Document, options: OverlayOptions) -> Result<Self> {
        Self::open(doc, OverlayOptions::new().variant(Variant::Custom).merge(options))
    }

    // --- Accessors ---

    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// ID of the root (backdrop) element.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lifecycle
    }

    pub fn is_visible(&self) -> bool {
        self.state.lifecycle.is_visible()
    }

    /// Whether the overlay has started closing or will as soon as it is open.
    pub fn is_dismissed(&self) -> bool {
        match self.state.lifecycle {
            Lifecycle::Closing => true,
            Lifecycle::Opening => self.state.close_queued,
            Lifecycle::Closed => self.state.ever_shown,
            Lifecycle::Open => false,
        }
    }

    pub(crate) fn part_id(&self, part: &str) -> String {
        render::part_id(&self.element_id, part)
    }

    // --- Lifecycle ---

    /// Attach the overlay and start opening.
    ///
    /// No-op unless `Closed`. Fails only if the mount target is missing.
    pub fn show(&mut self, doc: &mut Document) -> Result<()> {
        if self.state.lifecycle != Lifecycle::Closed {
            log::trace!("[{}] show ignored in {}", self.id, self.state.lifecycle);
            return Ok(());
        }
        if !doc.contains(&self.config.mount) {
            log::error!(
                "[{}] mount target '{}' is not in the document",
                self.id,
                self.config.mount
            );
            return Err(DomError::MissingTarget(self.config.mount.clone()).into());
        }

        let prior_focus = doc.focused().map(str::to_string);
        self.state.scoped_ids = false;
        let element = self.render(doc, Lifecycle::Opening);
        if let Err(err) = doc.append(&self.config.mount, element) {
            log::error!("[{}] failed to attach: {err}", self.id);
            return Err(err.into());
        }

        self.state.prior_focus = prior_focus;
        self.state.ever_shown = true;
        self.state.close_queued = false;
        self.set_lifecycle(doc, Lifecycle::Opening);
        self.click_listener = Some(doc.listen(self.element_id.clone(), EventKind::Click));

        if self.config.auto_focus {
            self.focus_first(doc);
        }
        if let Some(on_show) = self.config.callbacks.on_show.as_mut() {
            on_show();
        }

        self.schedule(doc);
        Ok(())
    }

    /// Start closing.
    ///
    /// No-op when `Closed` or `Closing`; queued when `Opening`.
    pub fn hide(&mut self, doc: &mut Document) {
        match self.state.lifecycle {
            Lifecycle::Closed | Lifecycle::Closing => {
                log::trace!("[{}] hide ignored in {}", self.id, self.state.lifecycle);
            }
            Lifecycle::Opening => {
                log::debug!("[{}] hide queued until open", self.id);
                self.state.close_queued = true;
            }
            Lifecycle::Open => self.begin_close(doc),
        }
    }

    /// Hide if visible, show otherwise.
    pub fn toggle(&mut self, doc: &mut Document) -> Result<()> {
        if self.is_visible() {
            self.hide(doc);
            Ok(())
        } else {
            self.show(doc)
        }
    }

    /// Complete a due animation step. Returns true if the lifecycle changed.
    pub fn tick(&mut self, doc: &mut Document) -> bool {
        match self.state.deadline {
            Some(deadline) if doc.now() >= deadline => {}
            _ => return false,
        }
        match self.state.lifecycle {
            Lifecycle::Opening => self.finish_opening(doc),
            Lifecycle::Closing => self.finish_closing(doc),
            Lifecycle::Open | Lifecycle::Closed => self.state.deadline = None,
        }
        true
    }

    fn schedule(&mut self, doc: &mut Document) {
        let delay = self.config.step_delay();
        if delay.is_zero() {
            self.state.deadline = None;
            match self.state.lifecycle {
                Lifecycle::Opening => self.finish_opening(doc),
                Lifecycle::Closing => self.finish_closing(doc),
                _ => {}
            }
        } else {
            self.state.deadline = Some(doc.now() + delay);
        }
    }

    fn finish_opening(&mut self, doc: &mut Document) {
        self.state.deadline = None;
        self.set_lifecycle(doc, Lifecycle::Open);
        if std::mem::take(&mut self.state.close_queued) {
            self.begin_close(doc);
        }
    }

    fn begin_close(&mut self, doc: &mut Document) {
        self.set_lifecycle(doc, Lifecycle::Closing);
        if let Some(on_hide) = self.config.callbacks.on_hide.as_mut() {
            on_hide();
        }
        self.schedule(doc);
    }

    fn finish_closing(&mut self, doc: &mut Document) {
        self.state.deadline = None;
        if let Some(listener) = self.click_listener.take() {
            doc.unlisten(listener);
        }
        if doc.remove(&self.element_id).is_none() {
            log::warn!("[{}] element already detached", self.id);
        }
        if let Some(prior) = self.state.prior_focus.take() {
            if doc.contains(&prior) {
                doc.focus(&prior);
            } else {
                log::debug!("[{}] prior focus {prior} is gone, not restoring", self.id);
            }
        }
        self.set_lifecycle(doc, Lifecycle::Closed);
    }

    fn set_lifecycle(&mut self, doc: &mut Document, lifecycle: Lifecycle) {
        log::debug!("[{}] {} -> {}", self.id, self.state.lifecycle, lifecycle);
        self.state.lifecycle = lifecycle;
        if let Some(root) = doc.get_mut(&self.element_id) {
            render::apply_state(root, lifecycle);
        }
    }

    /// Focus the first tabbable descendant, else the root itself.
    fn focus_first(&self, doc: &mut Document) {
        let first = doc
            .get(&self.element_id)
            .and_then(|root| collect_tabbable(root).into_iter().next());
        match first {
            Some(id) => doc.focus(&id),
            None => doc.focus(&self.element_id),
        };
    }

    // --- Mutation ---

    /// Replace the title. Re-renders in place when attached; values typed
    /// into body fields survive.
    pub fn set_title(&mut self, doc: &mut Document, title: Option<String>) {
        self.config.title = title;
        self.rerender(doc);
    }

    /// Replace the body content. Re-renders in place when attached.
    pub fn set_content(&mut self, doc: &mut Document, body: impl Into<Body>) {
        self.config.body = body.into();
        self.rerender(doc);
    }

    pub fn set_z_index(&mut self, doc: &mut Document, z_index: i32) {
        self.config.z_index_base = z_index;
        if let Some(root) = doc.get_mut(&self.element_id) {
            root.z_index = z_index;
        }
    }

    fn rerender(&mut self, doc: &mut Document) {
        if !doc.contains(&self.element_id) {
            return;
        }
        let mut element = self.render(doc, self.state.lifecycle);
        if let Some(old) = doc.get(&self.element_id) {
            render::carry_field_values(old, &mut element);
        }
        if let Err(err) = doc.replace(&self.element_id, element) {
            log::warn!("[{}] re-render failed: {err}", self.id);
        }
    }

    /// Build the element tree, scoping body ids once any of them is taken
    /// by an element outside this overlay.
    fn render(&mut self, doc: &Document, lifecycle: Lifecycle) -> Element {
        let mut element = render::build(&self.element_id, &self.config, lifecycle);
        if !self.state.scoped_ids {
            let clash = collect_ids(&element)
                .into_iter()
                .find(|id| doc.contains(id) && !doc.is_within(id, &self.element_id));
            if let Some(id) = clash {
                log::debug!("[{}] body id {id} already taken, scoping body ids", self.id);
                self.state.scoped_ids = true;
            }
        }
        if self.state.scoped_ids {
            render::scope_body_ids(&mut element);
        }
        element
    }
}
