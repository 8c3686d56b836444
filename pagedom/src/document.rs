use std::time::{Duration, Instant};

use crate::clock::Clock;
use crate::element::{collect_ids, find_element, find_element_mut, path_to, Content, Element};
use crate::error::DomError;
use crate::focus::FocusState;
use crate::listener::{EventKind, ListenerId, Listeners};
use crate::markup::to_markup;

/// ID of the document's root element.
pub const ROOT_ID: &str = "body";

/// A retained element tree plus the singleton resources shared by everything
/// mounted in it: focus, event subscriptions, and the clock.
#[derive(Debug)]
pub struct Document {
    root: Element,
    focus: FocusState,
    listeners: Listeners,
    clock: Clock,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_clock(Clock::System)
    }

    /// Create a document driven by the given clock.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            root: Element::new("body").id(ROOT_ID),
            focus: FocusState::new(),
            listeners: Listeners::new(),
            clock,
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_element_mut(&mut self.root, id)
    }

    /// Whether an element with this id is attached.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// IDs from the root down to `id`, or None if `id` is detached.
    pub fn path_to(&self, id: &str) -> Option<Vec<String>> {
        path_to(&self.root, id)
    }

    /// Whether `id` is `ancestor` or one of its descendants.
    pub fn is_within(&self, id: &str, ancestor: &str) -> bool {
        self.path_to(id)
            .map(|path| path.iter().any(|p| p == ancestor))
            .unwrap_or(false)
    }

    // Tree mutation

    /// Attach `element` as the last child of `parent`.
    pub fn append(&mut self, parent: &str, element: Element) -> Result<(), DomError> {
        for id in collect_ids(&element) {
            if self.contains(&id) {
                return Err(DomError::DuplicateId(id));
            }
        }
        let target = self
            .get_mut(parent)
            .ok_or_else(|| DomError::MissingTarget(parent.to_string()))?;
        log::trace!("[dom] append {} -> {}", element.id, parent);
        target.push_child(element);
        Ok(())
    }

    /// Detach the element with `id` and return it.
    /// Focus inside the subtree is cleared and its listeners are dropped.
    /// The root cannot be removed.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let removed = remove_descendant(&mut self.root, id)?;
        let ids = collect_ids(&removed);
        let dropped = self.listeners.remove_targets(&ids);
        if dropped > 0 {
            log::debug!("[dom] removed {id} with {dropped} dangling listener(s)");
        }
        self.focus.validate(&self.root);
        Some(removed)
    }

    /// Swap the element with `id` for `element`, keeping its position.
    /// Returns the previous element.
    pub fn replace(&mut self, id: &str, element: Element) -> Result<Element, DomError> {
        let target = self
            .get_mut(id)
            .ok_or_else(|| DomError::NotFound(id.to_string()))?;
        let previous = std::mem::replace(target, element);
        self.focus.validate(&self.root);
        Ok(previous)
    }

    // Focus

    pub fn focused(&self) -> Option<&str> {
        self.focus.focused()
    }

    /// Focus an attached element. Returns false if it is not attached
    /// or already focused.
    pub fn focus(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            log::warn!("[dom] focus on detached element {id} ignored");
            return false;
        }
        self.focus.focus(id)
    }

    pub fn blur(&mut self) -> bool {
        self.focus.blur()
    }

    /// Tab navigation constrained to the subtree at `scope`.
    pub fn focus_next_within(&mut self, scope: &str) -> Option<String> {
        let scope = find_element(&self.root, scope)?;
        self.focus.focus_next(scope)
    }

    /// Shift+Tab navigation constrained to the subtree at `scope`.
    pub fn focus_prev_within(&mut self, scope: &str) -> Option<String> {
        let scope = find_element(&self.root, scope)?;
        self.focus.focus_prev(scope)
    }

    // Listeners

    pub fn listen(&mut self, target: impl Into<String>, kind: EventKind) -> ListenerId {
        self.listeners.add(target, kind)
    }

    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listening(&self, target: &str, kind: EventKind) -> bool {
        self.listeners.is_listening(target, kind)
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    // Time

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Advance a manual clock. No-op on the system clock.
    pub fn advance(&mut self, by: Duration) {
        self.clock.advance(by);
    }

    /// Serialize the tree for debugging and snapshot assertions.
    pub fn markup(&self) -> String {
        to_markup(&self.root)
    }
}

fn remove_descendant(parent: &mut Element, id: &str) -> Option<Element> {
    let Content::Children(children) = &mut parent.content else {
        return None;
    };
    if let Some(index) = children.iter().position(|c| c.id == id) {
        return Some(children.remove(index));
    }
    children
        .iter_mut()
        .find_map(|child| remove_descendant(child, id))
}
