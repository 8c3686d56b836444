use pagedom::{collect_tabbable, is_tabbable, Document, Element, ROOT_ID};

fn form() -> Element {
    Element::div()
        .id("form")
        .child(Element::text("Label").id("label"))
        .child(Element::input("name").id("name"))
        .child(Element::link("/help", "Help").id("help"))
        .child(Element::new("a").id("anchor"))
        .child(Element::button("Disabled").id("off").disabled(true))
        .child(Element::div().id("custom").tabindex(0))
        .child(Element::button("Skip").id("skip").tabindex(-1))
        .child(Element::textarea("notes").id("notes"))
}

// ============================================================================
// Tabbable Collection
// ============================================================================

#[test]
fn test_collect_tabbable_document_order() {
    assert_eq!(
        collect_tabbable(&form()),
        vec!["name", "help", "custom", "notes"]
    );
}

#[test]
fn test_is_tabbable_rules() {
    assert!(is_tabbable(&Element::button("x")));
    assert!(is_tabbable(&Element::select("s")));
    assert!(!is_tabbable(&Element::new("a")));
    assert!(!is_tabbable(&Element::div()));
    assert!(is_tabbable(&Element::div().tabindex(2)));
    assert!(!is_tabbable(&Element::input("i").tabindex(-1)));
    assert!(!is_tabbable(&Element::input("i").disabled(true)));
}

// ============================================================================
// Focus State
// ============================================================================

#[test]
fn test_focus_requires_attached_element() {
    let mut doc = Document::new();
    assert!(!doc.focus("name"));

    doc.append(ROOT_ID, form()).unwrap();
    assert!(doc.focus("name"));
    assert_eq!(doc.focused(), Some("name"));
    assert!(!doc.focus("name"), "refocusing is not a change");
}

#[test]
fn test_removing_focused_element_clears_focus() {
    let mut doc = Document::new();
    doc.append(ROOT_ID, form()).unwrap();
    doc.focus("notes");

    doc.remove("form");
    assert_eq!(doc.focused(), None);
}

#[test]
fn test_focus_next_wraps_within_scope() {
    let mut doc = Document::new();
    doc.append(ROOT_ID, Element::button("Outside").id("outside"))
        .unwrap();
    doc.append(ROOT_ID, form()).unwrap();

    doc.focus("notes");
    assert_eq!(doc.focus_next_within("form"), Some("name".to_string()));
    assert_eq!(doc.focus_next_within("form"), Some("help".to_string()));
}

#[test]
fn test_focus_prev_from_outside_scope_goes_to_last() {
    let mut doc = Document::new();
    doc.append(ROOT_ID, Element::button("Outside").id("outside"))
        .unwrap();
    doc.append(ROOT_ID, form()).unwrap();

    doc.focus("outside");
    assert_eq!(doc.focus_prev_within("form"), Some("notes".to_string()));
    assert_eq!(doc.focus_prev_within("form"), Some("custom".to_string()));
}

#[test]
fn test_focus_next_empty_scope() {
    let mut doc = Document::new();
    doc.append(ROOT_ID, Element::div().id("empty")).unwrap();
    assert_eq!(doc.focus_next_within("empty"), None);
    assert_eq!(doc.focus_next_within("missing"), None);
}
