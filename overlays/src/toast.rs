use std::time::{Duration, Instant};

use pagedom::{Document, DomError, Element};

use crate::config::Severity;

/// Default duration for toast notifications.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);

/// A toast notification.
///
/// Toasts display temporary messages next to, not inside, the overlay stack.
/// Overlays never raise toasts themselves; callers do.
///
/// # Example
///
/// ```ignore
/// toasts.push(&mut doc, Toast::success("Record saved"))?;
/// toasts.push(&mut doc, Toast::error("Save failed").with_duration(Duration::from_secs(8)))?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub level: Severity,
    pub message: String,
    /// How long to show the toast.
    pub duration: Duration,
}

impl Toast {
    pub fn new(level: Severity, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Set a custom duration for this toast.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Build the toast's element.
    pub fn element(&self, id: impl Into<String>) -> Element {
        let role = match self.level {
            Severity::Error | Severity::Warning => "alert",
            Severity::Info | Severity::Success => "status",
        };
        Element::div()
            .id(id)
            .class("toast")
            .class(format!("toast--{}", self.level.as_str()))
            .attr("role", role)
            .child(Element::text(self.message.clone()).class("toast-message"))
    }
}

impl From<String> for Toast {
    fn from(message: String) -> Self {
        Toast::info(message)
    }
}

impl From<&str> for Toast {
    fn from(message: &str) -> Self {
        Toast::info(message)
    }
}

/// Toasts currently shown in a container element, oldest first.
#[derive(Debug)]
pub struct ToastQueue {
    container: String,
    active: Vec<(String, Instant)>,
    next_id: u64,
}

impl ToastQueue {
    /// Queue rendering into the element with id `container`.
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            active: Vec::new(),
            next_id: 0,
        }
    }

    /// Attach the container under `parent` if it isn't attached yet.
    pub fn mount(&self, doc: &mut Document, parent: &str) -> Result<(), DomError> {
        if doc.contains(&self.container) {
            return Ok(());
        }
        doc.append(
            parent,
            Element::div()
                .id(self.container.clone())
                .class("toast-container")
                .attr("aria-live", "polite"),
        )
    }

    /// Show a toast. Returns the id of its element.
    pub fn push(&mut self, doc: &mut Document, toast: impl Into<Toast>) -> Result<String, DomError> {
        let toast = toast.into();
        let id = format!("{}-{}", self.container, self.next_id);
        doc.append(&self.container, toast.element(id.clone()))?;
        self.next_id += 1;

        log::debug!("[toast] {id} {:?}: {}", toast.level, toast.message);
        self.active.push((id.clone(), doc.now() + toast.duration));
        Ok(id)
    }

    /// Remove expired toasts. Returns how many were removed.
    pub fn tick(&mut self, doc: &mut Document) -> usize {
        let now = doc.now();
        let before = self.active.len();
        self.active.retain(|(id, expires)| {
            if now >= *expires {
                doc.remove(id);
                false
            } else {
                true
            }
        });
        before - self.active.len()
    }

    /// Remove a toast before it expires.
    pub fn dismiss(&mut self, doc: &mut Document, id: &str) -> bool {
        let Some(index) = self.active.iter().position(|(active, _)| active == id) else {
            return false;
        };
        self.active.remove(index);
        doc.remove(id);
        true
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
