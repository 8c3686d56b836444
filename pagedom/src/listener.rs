use std::collections::HashMap;

/// Pseudo target id used for listeners registered on the document itself.
pub const DOCUMENT_TARGET: &str = "#document";

/// Event category a listener subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Key,
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Clone)]
struct Registration {
    target: String,
    kind: EventKind,
}

/// Registry of event subscriptions, keyed by target element id.
///
/// The registry only records who listens to what; owners of a registration
/// perform the dispatch themselves.
#[derive(Debug, Default)]
pub struct Listeners {
    registrations: HashMap<ListenerId, Registration>,
    next_id: u64,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, target: impl Into<String>, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.registrations.insert(
            id,
            Registration {
                target: target.into(),
                kind,
            },
        );
        id
    }

    /// Returns true if the listener existed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.registrations.remove(&id).is_some()
    }

    /// Drop every registration whose target is one of `targets`.
    pub fn remove_targets(&mut self, targets: &[String]) -> usize {
        let before = self.registrations.len();
        self.registrations
            .retain(|_, reg| !targets.iter().any(|t| *t == reg.target));
        before - self.registrations.len()
    }

    pub fn is_listening(&self, target: &str, kind: EventKind) -> bool {
        self.registrations
            .values()
            .any(|reg| reg.target == target && reg.kind == kind)
    }

    /// Number of registrations for `target` and `kind`.
    pub fn count(&self, target: &str, kind: EventKind) -> usize {
        self.registrations
            .values()
            .filter(|reg| reg.target == target && reg.kind == kind)
            .count()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
