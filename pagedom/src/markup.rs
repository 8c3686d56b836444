use std::fmt::Write;

use crate::element::{Content, Element};

/// Serialize an element tree to HTML-like markup on a single line.
pub fn to_markup(root: &Element) -> String {
    let mut out = String::new();
    write_element(root, &mut out);
    out
}

fn write_element(element: &Element, out: &mut String) {
    let _ = write!(out, "<{} id=\"{}\"", element.tag, escape(&element.id));
    if !element.classes.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape(&element.classes.join(" ")));
    }
    for (name, value) in &element.attrs {
        let _ = write!(out, " {}=\"{}\"", name, escape(value));
    }
    if element.z_index != 0 {
        let _ = write!(out, " style=\"z-index: {}\"", element.z_index);
    }
    if let Some(index) = element.tabindex {
        let _ = write!(out, " tabindex=\"{index}\"");
    }
    if element.disabled {
        out.push_str(" disabled");
    }
    out.push('>');

    match &element.content {
        Content::None => {}
        Content::Text(text) => out.push_str(&escape(text)),
        Content::Children(children) => {
            for child in children {
                write_element(child, out);
            }
        }
    }

    let _ = write!(out, "</{}>", element.tag);
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_markup_nested() {
        let root = Element::div()
            .id("root")
            .class("panel")
            .child(Element::button("OK").id("ok").disabled(true));
        assert_eq!(
            to_markup(&root),
            "<div id=\"root\" class=\"panel\"><button id=\"ok\" type=\"button\" disabled>OK</button></div>"
        );
    }
}
