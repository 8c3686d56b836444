//! Element tree of an overlay.
//!
//! ```text
//! div#overlay-N.overlay            backdrop, root
//!   div#overlay-N-dialog           role=dialog
//!     div#overlay-N-header         iff title or closable
//!     div#overlay-N-body
//!     div#overlay-N-footer         iff confirm/alert or a button is visible
//! ```
//!
//! Child ids derive from the root id so a re-render keeps them stable.
//! Caller-supplied body content keeps its own ids unless they would clash
//! with the document, in which case they are scoped under the root.

use std::collections::HashMap;

use pagedom::element::find_element_mut;
use pagedom::{Content, Element};

use super::Lifecycle;
use crate::config::{Body, Button, OverlayConfig};

pub(crate) const STATE_CLASSES: [&str; 4] = [
    "overlay--closed",
    "overlay--opening",
    "overlay--open",
    "overlay--closing",
];

pub(crate) fn part_id(root: &str, part: &str) -> String {
    format!("{root}-{part}")
}

pub(crate) fn state_class(lifecycle: Lifecycle) -> &'static str {
    match lifecycle {
        Lifecycle::Closed => STATE_CLASSES[0],
        Lifecycle::Opening => STATE_CLASSES[1],
        Lifecycle::Open => STATE_CLASSES[2],
        Lifecycle::Closing => STATE_CLASSES[3],
    }
}

/// Reflect `lifecycle` on an attached root element.
pub(crate) fn apply_state(root: &mut Element, lifecycle: Lifecycle) {
    for class in STATE_CLASSES {
        root.remove_class(class);
    }
    root.add_class(state_class(lifecycle));
    root.set_attr("data-state", lifecycle.as_str());
}

pub(crate) fn build(id: &str, config: &OverlayConfig, lifecycle: Lifecycle) -> Element {
    let mut root = Element::div()
        .id(id)
        .class("overlay")
        .class(format!("overlay--{}", config.position.as_str()))
        .z_index(config.z_index_base)
        .tabindex(-1);
    if config.animated {
        root.add_class("overlay--animated");
    }
    apply_state(&mut root, lifecycle);

    let role = if config.variant.is_prompt() {
        "alertdialog"
    } else {
        "dialog"
    };
    let mut dialog = Element::div()
        .id(part_id(id, "dialog"))
        .class("overlay-dialog")
        .class(format!("overlay-dialog--{}", config.size.as_str()))
        .class(format!("overlay-dialog--{}", config.variant.as_str()))
        .attr("role", role)
        .attr("aria-modal", "true");
    if config.title.is_some() {
        dialog.set_attr("aria-labelledby", part_id(id, "title"));
    }

    if config.title.is_some() || config.closable {
        dialog.push_child(header(id, config));
    }
    dialog.push_child(body(id, config));
    if has_footer(config) {
        dialog.push_child(footer(id, config));
    }

    root.child(dialog)
}

pub(crate) fn has_footer(config: &OverlayConfig) -> bool {
    config.variant.is_prompt() || config.confirm_button.visible || config.cancel_button.visible
}

fn header(id: &str, config: &OverlayConfig) -> Element {
    let mut header = Element::div().id(part_id(id, "header")).class("overlay-header");
    if let Some(title) = &config.title {
        header.push_child(
            Element::new("h2")
                .id(part_id(id, "title"))
                .class("overlay-title")
                .text_content(title.clone()),
        );
    }
    if config.closable {
        header.push_child(
            Element::button("\u{00d7}")
                .id(part_id(id, "close"))
                .class("overlay-close")
                .attr("aria-label", "Close"),
        );
    }
    header
}

fn body(id: &str, config: &OverlayConfig) -> Element {
    let body = Element::div().id(part_id(id, "body")).class("overlay-body");

    if config.variant.is_prompt() {
        let mut body = body;
        if let Some(icon) = &config.icon {
            body.push_child(
                Element::span()
                    .id(part_id(id, "icon"))
                    .class("overlay-icon")
                    .class(icon.clone())
                    .attr("aria-hidden", "true"),
            );
        }
        let message = Element::div().id(part_id(id, "message")).class("overlay-message");
        return body.child(with_content(message, &config.body));
    }

    with_content(body, &config.body)
}

fn with_content(container: Element, content: &Body) -> Element {
    match content {
        Body::Empty => container,
        Body::Text(text) => container.text_content(text.clone()),
        Body::Node(node) => container.child(node.clone()),
        Body::Children(children) => container.with_children(children.iter().cloned()),
    }
}

fn footer(id: &str, config: &OverlayConfig) -> Element {
    let mut footer = Element::div().id(part_id(id, "footer")).class("overlay-footer");
    if config.cancel_button.visible {
        footer.push_child(button(id, "cancel", &config.cancel_button));
    }
    if config.confirm_button.visible {
        footer.push_child(button(id, "confirm", &config.confirm_button));
    }
    footer
}

fn button(id: &str, role: &str, config: &Button) -> Element {
    let mut button = Element::button(config.label.clone())
        .id(part_id(id, role))
        .class(format!("overlay-{role}"))
        .disabled(config.disabled);
    for class in config.class.split_whitespace() {
        button.add_class(class);
    }
    button
}

const FIELD_TAGS: [&str; 3] = ["input", "select", "textarea"];

/// Prefix every caller-supplied id in the body with the root id.
/// Ids generated here already carry the prefix and are left alone.
pub(crate) fn scope_body_ids(root: &mut Element) {
    let prefix = format!("{}-", root.id);
    let body_id = part_id(&root.id, "body");
    if let Some(body) = find_element_mut(root, &body_id) {
        for child in children_mut(body) {
            scope_ids(child, &prefix);
        }
    }
}

fn scope_ids(element: &mut Element, prefix: &str) {
    if !element.id.starts_with(prefix) {
        element.id = format!("{prefix}{}", element.id);
    }
    for child in children_mut(element) {
        scope_ids(child, prefix);
    }
}

fn children_mut(element: &mut Element) -> &mut [Element] {
    match &mut element.content {
        Content::Children(children) => children.as_mut_slice(),
        _ => &mut [],
    }
}

/// Copy the live `value` of every form field in `old` onto the field with
/// the same id in `new`.
pub(crate) fn carry_field_values(old: &Element, new: &mut Element) {
    let mut values = HashMap::new();
    collect_values(old, &mut values);
    if !values.is_empty() {
        apply_values(new, &values);
    }
}

fn collect_values(element: &Element, values: &mut HashMap<String, String>) {
    if FIELD_TAGS.contains(&element.tag.as_str()) {
        if let Some(value) = element.get_attr("value") {
            values.insert(element.id.clone(), value.to_string());
        }
    }
    for child in element.children() {
        collect_values(child, values);
    }
}

fn apply_values(element: &mut Element, values: &HashMap<String, String>) {
    if FIELD_TAGS.contains(&element.tag.as_str()) {
        if let Some(value) = values.get(&element.id) {
            element.set_attr("value", value.clone());
        }
    }
    for child in children_mut(element) {
        apply_values(child, values);
    }
}
