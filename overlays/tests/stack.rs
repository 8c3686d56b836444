use std::cell::Cell;
use std::rc::Rc;

use overlays::config::DEFAULT_ANIMATION;
use overlays::prelude::*;
use overlays::stack::OPEN_CLASS;
use pagedom::{Clock, EventKind, DOCUMENT_TARGET, ROOT_ID};

fn doc() -> Document {
    Document::with_clock(Clock::manual())
}

/// Let every pending animation step complete.
fn settle(doc: &mut Document, stack: &mut OverlayStack) {
    doc.advance(DEFAULT_ANIMATION);
    stack.tick(doc);
}

fn part(id: OverlayId, name: &str) -> String {
    format!("{id}-{name}")
}

fn titled(title: &str) -> OverlayOptions {
    OverlayOptions::new().title(title)
}

// ============================================================================
// Z-Order
// ============================================================================

#[test]
fn test_z_index_increases_with_each_overlay() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();

    let a = stack.show(&mut doc, titled("A")).unwrap();
    let b = stack.show(&mut doc, titled("B")).unwrap();
    let c = stack.show(&mut doc, titled("C")).unwrap();

    assert_eq!(stack.z_index(a), Some(1000));
    assert_eq!(stack.z_index(b), Some(1001));
    assert_eq!(stack.z_index(c), Some(1002));
    assert_eq!(doc.get(&c.to_string()).unwrap().z_index, 1002);
}

#[test]
fn test_z_index_stays_above_after_middle_removal() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();

    let a = stack.show(&mut doc, titled("A")).unwrap();
    let b = stack.show(&mut doc, titled("B")).unwrap();
    let c = stack.show(&mut doc, titled("C")).unwrap();
    settle(&mut doc, &mut stack);

    stack.hide(&mut doc, b);
    let d = stack.show(&mut doc, titled("D")).unwrap();

    let za = stack.z_index(a).unwrap();
    let zc = stack.z_index(c).unwrap();
    let zd = stack.z_index(d).unwrap();
    assert!(za < zc && zc < zd, "{za} < {zc} < {zd}");
    assert_eq!(stack.active(), Some(d));
}

#[test]
fn test_z_index_base_is_configurable() {
    let mut doc = doc();
    let mut stack = OverlayStack::with_config(ManagerConfig::new().base_z_index(50));

    let a = stack.show(&mut doc, titled("A")).unwrap();
    let b = stack.show(&mut doc, titled("B")).unwrap();
    assert_eq!(stack.z_index(a), Some(50));
    assert_eq!(stack.z_index(b), Some(51));
}

#[test]
fn test_z_index_restarts_once_idle() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();

    let a = stack.show(&mut doc, titled("A")).unwrap();
    settle(&mut doc, &mut stack);
    stack.hide(&mut doc, a);

    // Still animating closed, so the slot is not reused yet
    let b = stack.show(&mut doc, titled("B")).unwrap();
    assert_eq!(stack.z_index(b), Some(1001));

    stack.hide_all(&mut doc);
    settle(&mut doc, &mut stack);
    settle(&mut doc, &mut stack);
    assert_eq!(stack.retiring(), 0);

    let c = stack.show(&mut doc, titled("C")).unwrap();
    assert_eq!(stack.z_index(c), Some(1000));
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_create_registers_without_showing() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();

    let id = stack.create(&mut doc, titled("Later"));
    assert_eq!(stack.depth(), 1);
    assert!(stack.contains(id));
    assert_eq!(stack.lifecycle(id), Some(Lifecycle::Closed));
    assert!(!doc.contains(&id.to_string()));

    stack.get_mut(id).unwrap().show(&mut doc).unwrap();
    assert!(doc.contains(&id.to_string()));
}

#[test]
fn test_active_is_topmost() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();
    assert_eq!(stack.active(), None);

    let a = stack.show(&mut doc, titled("A")).unwrap();
    let b = stack.show(&mut doc, titled("B")).unwrap();
    assert_eq!(stack.active(), Some(b));

    stack.hide(&mut doc, b);
    assert_eq!(stack.active(), Some(a));
}

#[test]
fn test_hide_unknown_id_is_noop() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();
    let a = stack.show(&mut doc, titled("A")).unwrap();
    settle(&mut doc, &mut stack);

    let stray = Overlay::from_options(OverlayOptions::new()).id();
    stack.hide(&mut doc, stray);
    assert_eq!(stack.depth(), 1);

    stack.hide(&mut doc, a);
    stack.hide(&mut doc, a);
    assert_eq!(stack.depth(), 0);
    assert_eq!(stack.retiring(), 1);
    assert_eq!(stack.lifecycle(a), Some(Lifecycle::Closing));
}

#[test]
fn test_show_with_missing_mount_tracks_nothing() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();

    let result = stack.show(&mut doc, titled("Lost").mount("nowhere"));
    assert!(matches!(result, Err(OverlayError::Dom(_))));
    assert_eq!(stack.depth(), 0);
    assert!(!doc.listening(DOCUMENT_TARGET, EventKind::Key));
}

#[test]
fn test_manager_mount_applies_to_every_overlay() {
    let mut doc = doc();
    doc.append(ROOT_ID, Element::div().id("layer")).unwrap();
    let mut stack = OverlayStack::with_config(ManagerConfig::new().mount("layer"));

    let id = stack.show(&mut doc, titled("Inside layer")).unwrap();
    assert!(doc.is_within(&id.to_string(), "layer"));
    assert!(doc.get("layer").unwrap().has_class(OPEN_CLASS));
}

// ============================================================================
// Shared Resources
// ============================================================================

#[test]
fn test_key_listener_registered_once_and_released() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();

    let a = stack.show(&mut doc, titled("A")).unwrap();
    let b = stack.show(&mut doc, titled("B")).unwrap();
    assert_eq!(doc.listeners().count(DOCUMENT_TARGET, EventKind::Key), 1);

    settle(&mut doc, &mut stack);
    stack.hide(&mut doc, a);
    stack.hide(&mut doc, b);
    assert!(doc.listening(DOCUMENT_TARGET, EventKind::Key), "still animating");

    settle(&mut doc, &mut stack);
    assert!(!doc.listening(DOCUMENT_TARGET, EventKind::Key));
    assert!(!stack.handle_event(&mut doc, &Event::key(Key::Escape)));
}

#[test]
fn test_open_class_tracks_visibility() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();

    let a = stack.show(&mut doc, titled("A")).unwrap();
    assert!(doc.root().has_class(OPEN_CLASS));

    settle(&mut doc, &mut stack);
    stack.hide(&mut doc, a);
    assert!(!doc.root().has_class(OPEN_CLASS));
}

// ============================================================================
// Input Routing
// ============================================================================

#[test]
fn test_escape_reaches_topmost_only() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();

    let a = stack.show(&mut doc, titled("A")).unwrap();
    let b = stack.show(&mut doc, titled("B")).unwrap();
    settle(&mut doc, &mut stack);

    assert!(stack.handle_event(&mut doc, &Event::key(Key::Escape)));
    assert_eq!(stack.lifecycle(b), Some(Lifecycle::Closing));
    assert_eq!(stack.lifecycle(a), Some(Lifecycle::Open));
    assert_eq!(stack.active(), Some(a));

    assert!(stack.handle_event(&mut doc, &Event::key(Key::Escape)));
    assert_eq!(stack.lifecycle(a), Some(Lifecycle::Closing));
    assert!(stack.is_empty());
}

#[test]
fn test_escape_falls_through_when_top_is_not_shown() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();

    let a = stack.show(&mut doc, titled("A")).unwrap();
    settle(&mut doc, &mut stack);
    let b = stack.create(&mut doc, titled("B"));
    assert_eq!(stack.active(), Some(b));

    assert!(!stack.handle_event(&mut doc, &Event::key(Key::Escape)));
    assert_eq!(stack.lifecycle(a), Some(Lifecycle::Open));
    assert_eq!(stack.lifecycle(b), Some(Lifecycle::Closed));
}

#[test]
fn test_click_routes_to_containing_overlay() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();

    let a = stack.show(&mut doc, titled("A")).unwrap();
    let b = stack.show(&mut doc, titled("B")).unwrap();
    settle(&mut doc, &mut stack);

    assert!(stack.handle_event(&mut doc, &Event::click(part(a, "close"))));
    assert_eq!(stack.lifecycle(a), Some(Lifecycle::Closing));
    assert_eq!(stack.lifecycle(b), Some(Lifecycle::Open));
    assert!(!stack.contains(a));
    assert_eq!(stack.depth(), 1);
}

#[test]
fn test_click_outside_every_overlay_is_not_consumed() {
    let mut doc = doc();
    doc.append(ROOT_ID, Element::button("Page").id("page-button"))
        .unwrap();
    let mut stack = OverlayStack::new();
    stack.show(&mut doc, titled("A")).unwrap();
    settle(&mut doc, &mut stack);

    assert!(!stack.handle_event(&mut doc, &Event::click("page-button")));
    assert_eq!(stack.depth(), 1);
}

#[test]
fn test_dismissed_through_handle_is_evicted_on_tick() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();
    let a = stack.show(&mut doc, titled("A")).unwrap();
    settle(&mut doc, &mut stack);

    stack.get_mut(a).unwrap().hide(&mut doc);
    assert!(stack.contains(a));

    stack.tick(&mut doc);
    assert!(!stack.contains(a));
    assert_eq!(stack.lifecycle(a), Some(Lifecycle::Closing));

    settle(&mut doc, &mut stack);
    assert_eq!(stack.lifecycle(a), None);
    assert!(!doc.contains(&a.to_string()));
}

// ============================================================================
// Variants
// ============================================================================

#[test]
fn test_confirm_yes_closes_and_detaches() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();
    let confirmed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&confirmed);

    let id = stack
        .confirm(
            &mut doc,
            OverlayOptions::new()
                .title("Delete?")
                .message("Remove item?")
                .on_confirm(move |_| {
                    flag.set(true);
                    true
                }),
        )
        .unwrap();

    let yes = doc.get(&part(id, "confirm")).unwrap();
    assert_eq!(yes.text_of(), "Yes");
    assert_eq!(doc.get(&part(id, "cancel")).unwrap().text_of(), "No");
    assert_eq!(doc.get(&part(id, "message")).unwrap().text_of(), "Remove item?");
    assert_eq!(
        doc.get(&part(id, "dialog")).unwrap().get_attr("role"),
        Some("alertdialog")
    );
    settle(&mut doc, &mut stack);

    stack.handle_event(&mut doc, &Event::click(part(id, "confirm")));
    assert!(confirmed.get());
    assert_eq!(stack.lifecycle(id), Some(Lifecycle::Closing));

    settle(&mut doc, &mut stack);
    assert_eq!(stack.lifecycle(id), None);
    assert!(!doc.contains(&id.to_string()));
    assert!(stack.is_empty());
}

#[test]
fn test_error_alert_has_ok_only() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();

    let id = stack
        .alert(
            &mut doc,
            OverlayOptions::new()
                .title("Error")
                .message("Failed")
                .severity(Severity::Error),
        )
        .unwrap();

    assert!(!doc.contains(&part(id, "cancel")));
    assert_eq!(doc.get(&part(id, "confirm")).unwrap().text_of(), "OK");
    assert!(doc.get(&part(id, "icon")).unwrap().has_class("icon-error"));
    assert!(
        doc.get(&part(id, "dialog"))
            .unwrap()
            .has_class("overlay-dialog--small")
    );
}

#[test]
fn test_form_size_override() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();

    let id = stack
        .form(
            &mut doc,
            OverlayOptions::new()
                .size(Size::Large)
                .body(Element::input("name")),
        )
        .unwrap();

    let dialog = doc.get(&part(id, "dialog")).unwrap();
    assert!(dialog.has_class("overlay-dialog--large"));
    assert!(dialog.has_class("overlay-dialog--form"));
    assert_eq!(doc.get(&part(id, "confirm")).unwrap().text_of(), "Submit");
}

#[test]
fn test_one_body_element_serves_two_forms() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();
    let body = Element::div()
        .id("shared")
        .child(Element::input("name").id("shared-name"));

    let a = stack
        .form(&mut doc, titled("A").body(body.clone()))
        .unwrap();
    let b = stack.form(&mut doc, titled("B").body(body)).unwrap();
    settle(&mut doc, &mut stack);

    // The first keeps the caller's ids, the second gets its own
    assert!(doc.is_within("shared-name", &a.to_string()));
    let scoped = format!("{b}-shared-name");
    assert!(doc.is_within(&format!("{b}-shared"), &b.to_string()));
    assert!(doc.is_within(&scoped, &b.to_string()));

    doc.get_mut(&scoped).unwrap().set_attr("value", "Grace");
    stack
        .get_mut(b)
        .unwrap()
        .set_title(&mut doc, Some("B2".to_string()));
    assert_eq!(doc.get(&scoped).unwrap().get_attr("value"), Some("Grace"));
    assert_eq!(doc.get("shared-name").unwrap().get_attr("value"), Some(""));
}

#[test]
fn test_custom_has_no_footer() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();

    let id = stack
        .custom(
            &mut doc,
            OverlayOptions::new().body(Element::div().class("picker").text_content("Pick one")),
        )
        .unwrap();

    assert!(!doc.contains(&part(id, "footer")));
    assert_eq!(doc.get(&part(id, "body")).unwrap().text_of(), "Pick one");
}

#[test]
fn test_hide_all_closes_everything() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();

    let ids: Vec<_> = ["A", "B", "C"]
        .into_iter()
        .map(|title| stack.show(&mut doc, titled(title)).unwrap())
        .collect();
    settle(&mut doc, &mut stack);

    stack.hide_all(&mut doc);
    assert_eq!(stack.depth(), 0);
    for id in &ids {
        assert_eq!(stack.lifecycle(*id), Some(Lifecycle::Closing));
    }

    settle(&mut doc, &mut stack);
    for id in &ids {
        assert_eq!(stack.lifecycle(*id), None);
        assert!(!doc.contains(&id.to_string()));
    }
    assert!(!doc.root().has_class(OPEN_CLASS));
}

#[test]
fn test_hide_all_while_opening_closes_after_open() {
    let mut doc = doc();
    let mut stack = OverlayStack::new();

    let id = stack.show(&mut doc, titled("Quick")).unwrap();
    stack.hide_all(&mut doc);
    assert_eq!(stack.depth(), 0);
    assert_eq!(stack.lifecycle(id), Some(Lifecycle::Opening));

    settle(&mut doc, &mut stack);
    assert_eq!(stack.lifecycle(id), Some(Lifecycle::Closing));
    settle(&mut doc, &mut stack);
    assert_eq!(stack.lifecycle(id), None);
}
