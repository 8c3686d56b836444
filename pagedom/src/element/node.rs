use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: String,

    // Content
    pub content: Content,

    // Presentation
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub z_index: i32,

    // Interaction
    /// Explicit tab order. `Some(n)` with `n >= 0` makes any element tabbable,
    /// a negative value makes it focusable only programmatically.
    pub tabindex: Option<i32>,
    /// Whether this element is disabled. Disabled elements don't receive input.
    pub disabled: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: "div".to_string(),
            content: Content::None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            z_index: 0,
            tabindex: None,
            disabled: false,
        }
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            id: generate_id(&tag),
            tag,
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    /// Inline text element.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new("span").text_content(content)
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self::new("button").attr("type", "button").text_content(label)
    }

    pub fn link(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new("a").attr("href", href).text_content(label)
    }

    /// Form input carrying `name` and an initial empty value.
    pub fn input(name: impl Into<String>) -> Self {
        Self::new("input").attr("name", name).attr("value", "")
    }

    pub fn select(name: impl Into<String>) -> Self {
        Self::new("select").attr("name", name).attr("value", "")
    }

    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new("textarea").attr("name", name).attr("value", "")
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Presentation
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    // Interaction
    pub fn tabindex(mut self, tabindex: i32) -> Self {
        self.tabindex = Some(tabindex);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    // Content
    pub fn text_content(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    pub fn with_children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }

    /// Text of this element and all descendants, concatenated in document order.
    pub fn text_of(&self) -> String {
        match &self.content {
            Content::None => String::new(),
            Content::Text(s) => s.clone(),
            Content::Children(children) => children.iter().map(Element::text_of).collect(),
        }
    }

    // Mutation (for elements already attached to a document)
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn push_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
    }
}
