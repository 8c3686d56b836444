use crate::element::{find_element, Element};

/// Tracks which element is currently focused.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused element ID.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Programmatically focus an element by ID.
    /// Returns true if focus changed.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.focused.as_deref() == Some(id) {
            return false;
        }
        self.focused = Some(id.to_string());
        true
    }

    /// Clear focus.
    /// Returns true if there was something focused.
    pub fn blur(&mut self) -> bool {
        self.focused.take().is_some()
    }

    /// Focus the next tabbable element inside `scope` (Tab navigation).
    /// Wraps around at the end. Returns the newly focused element ID if focus changed.
    pub fn focus_next(&mut self, scope: &Element) -> Option<String> {
        let tabbable = collect_tabbable(scope);
        if tabbable.is_empty() {
            return None;
        }

        let new_focus = match &self.focused {
            None => tabbable[0].clone(),
            Some(current) => match tabbable.iter().position(|id| id == current) {
                Some(i) => tabbable[(i + 1) % tabbable.len()].clone(),
                None => tabbable[0].clone(),
            },
        };

        self.set_if_changed(new_focus)
    }

    /// Focus the previous tabbable element inside `scope` (Shift+Tab navigation).
    /// Returns the newly focused element ID if focus changed.
    pub fn focus_prev(&mut self, scope: &Element) -> Option<String> {
        let tabbable = collect_tabbable(scope);
        let last = tabbable.last()?.clone();

        let new_focus = match &self.focused {
            None => last,
            Some(current) => match tabbable.iter().position(|id| id == current) {
                Some(0) | None => last,
                Some(i) => tabbable[i - 1].clone(),
            },
        };

        self.set_if_changed(new_focus)
    }

    /// Drop focus if the focused element is no longer in the tree.
    pub fn validate(&mut self, root: &Element) {
        if let Some(id) = &self.focused {
            if find_element(root, id).is_none() {
                log::debug!("[focus] focused element {id} detached, clearing focus");
                self.focused = None;
            }
        }
    }

    fn set_if_changed(&mut self, new_focus: String) -> Option<String> {
        if self.focused.as_ref() != Some(&new_focus) {
            self.focused = Some(new_focus.clone());
            Some(new_focus)
        } else {
            None
        }
    }
}

/// Whether an element takes part in sequential (Tab) focus navigation.
///
/// Buttons, links with an href, inputs, selects and textareas are tabbable
/// unless disabled; any element with a non-negative tabindex is too. A
/// negative tabindex always opts out.
pub fn is_tabbable(element: &Element) -> bool {
    if element.disabled {
        return false;
    }
    match element.tabindex {
        Some(index) => index >= 0,
        None => match element.tag.as_str() {
            "button" | "input" | "select" | "textarea" => true,
            "a" => element.attrs.contains_key("href"),
            _ => false,
        },
    }
}

/// Collect all tabbable element IDs in document order.
pub fn collect_tabbable(element: &Element) -> Vec<String> {
    let mut result = Vec::new();
    collect_tabbable_recursive(element, &mut result);
    result
}

fn collect_tabbable_recursive(element: &Element, result: &mut Vec<String>) {
    if is_tabbable(element) {
        result.push(element.id.clone());
    }
    for child in element.children() {
        collect_tabbable_recursive(child, result);
    }
}
