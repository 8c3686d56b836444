use std::time::Duration;

use overlays::prelude::*;
use overlays::toast::DEFAULT_TOAST_DURATION;
use pagedom::{Clock, DomError, ROOT_ID};

fn mounted() -> (Document, ToastQueue) {
    let mut doc = Document::with_clock(Clock::manual());
    let queue = ToastQueue::new("toasts");
    queue.mount(&mut doc, ROOT_ID).unwrap();
    (doc, queue)
}

#[test]
fn test_push_renders_into_container() {
    let (mut doc, mut queue) = mounted();

    let id = queue.push(&mut doc, Toast::success("Saved")).unwrap();
    assert!(doc.is_within(&id, "toasts"));
    let toast = doc.get(&id).unwrap();
    assert!(toast.has_class("toast--success"));
    assert_eq!(toast.get_attr("role"), Some("status"));
    assert_eq!(toast.text_of(), "Saved");
    assert_eq!(queue.len(), 1);
}

#[test]
fn test_error_toast_is_an_alert() {
    let (mut doc, mut queue) = mounted();
    let id = queue.push(&mut doc, Toast::error("Failed")).unwrap();
    assert_eq!(doc.get(&id).unwrap().get_attr("role"), Some("alert"));
}

#[test]
fn test_toasts_expire_on_tick() {
    let (mut doc, mut queue) = mounted();

    let short = queue
        .push(
            &mut doc,
            Toast::info("Short").with_duration(Duration::from_secs(1)),
        )
        .unwrap();
    let long = queue.push(&mut doc, "Default length").unwrap();

    doc.advance(Duration::from_secs(1));
    assert_eq!(queue.tick(&mut doc), 1);
    assert!(!doc.contains(&short));
    assert!(doc.contains(&long));

    doc.advance(DEFAULT_TOAST_DURATION);
    assert_eq!(queue.tick(&mut doc), 1);
    assert!(queue.is_empty());
}

#[test]
fn test_dismiss_early() {
    let (mut doc, mut queue) = mounted();
    let id = queue.push(&mut doc, Toast::warning("Careful")).unwrap();

    assert!(queue.dismiss(&mut doc, &id));
    assert!(!doc.contains(&id));
    assert!(!queue.dismiss(&mut doc, &id));
}

#[test]
fn test_mount_is_idempotent() {
    let (mut doc, queue) = mounted();
    queue.mount(&mut doc, ROOT_ID).unwrap();
    assert_eq!(doc.root().children().len(), 1);
}

#[test]
fn test_push_without_container_fails() {
    let mut doc = Document::with_clock(Clock::manual());
    let mut queue = ToastQueue::new("toasts");

    let result = queue.push(&mut doc, "Nowhere");
    assert!(matches!(result, Err(DomError::MissingTarget(_))));
    assert!(queue.is_empty());
}
