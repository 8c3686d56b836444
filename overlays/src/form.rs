//! Values of named form fields inside an overlay.

use std::collections::BTreeMap;

use pagedom::Element;

/// Field values keyed by `name`, in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: BTreeMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every named `input`, `select` and `textarea` under `root`.
    /// Disabled fields are skipped; a later field with the same name wins.
    pub fn collect(root: &Element) -> Self {
        let mut data = Self::new();
        collect_recursive(root, &mut data);
        data
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn collect_recursive(element: &Element, data: &mut FormData) {
    let is_field = matches!(element.tag.as_str(), "input" | "select" | "textarea");
    if is_field && !element.disabled {
        if let Some(name) = element.get_attr("name") {
            let value = element.get_attr("value").unwrap_or_default();
            data.insert(name, value);
        }
    }
    for child in element.children() {
        collect_recursive(child, data);
    }
}
