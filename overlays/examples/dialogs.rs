//! Scripted walk through the overlay stack.
//!
//! Opens a form, stacks a confirmation on top of it, answers with the
//! keyboard, and prints the document after each step. Logs go to
//! `dialogs.log`.

use std::fs::File;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use overlays::prelude::*;
use pagedom::{from_crossterm_key, ROOT_ID};
use simplelog::{Config, LevelFilter, WriteLogger};

const FRAME: Duration = Duration::from_millis(16);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("dialogs.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut doc = Document::new();
    doc.append(ROOT_ID, Element::button("Add contact").id("add-contact"))?;
    doc.focus("add-contact");

    let mut stack = OverlayStack::new();
    let mut toasts = ToastQueue::new("toasts");
    toasts.mount(&mut doc, ROOT_ID)?;

    let form = stack.form(
        &mut doc,
        OverlayOptions::new()
            .title("New contact")
            .body(vec![
                Element::input("name").id("contact-name"),
                Element::input("email").id("contact-email"),
            ])
            .on_confirm(|data| {
                println!("submitted: {:?}", data.iter().collect::<Vec<_>>());
                data.get("name").is_some_and(|name| !name.is_empty())
            }),
    )?;
    settle(&mut doc, &mut stack, &mut toasts).await;
    step("form open", &doc);

    if let Some(field) = doc.get_mut("contact-name") {
        field.set_attr("value", "Ada Lovelace");
    }

    // A second overlay stacks above the first
    let discard = stack.confirm(
        &mut doc,
        OverlayOptions::new()
            .title("Discard changes?")
            .message("The contact has not been saved."),
    )?;
    settle(&mut doc, &mut stack, &mut toasts).await;
    step("confirm stacked above form", &doc);
    println!(
        "z-order: form={:?} confirm={:?}",
        stack.z_index(form),
        stack.z_index(discard)
    );

    // Escape reaches the confirmation only
    press(&mut doc, &mut stack, KeyCode::Esc);
    settle(&mut doc, &mut stack, &mut toasts).await;
    step("confirm dismissed", &doc);

    // Tab stays inside the form, then Enter on Submit
    press(&mut doc, &mut stack, KeyCode::Tab);
    println!("after tab: {:?}", doc.focused());
    let submit = format!("{form}-confirm");
    if !doc.focus(&submit) {
        return Err(format!("{submit} is not focusable").into());
    }
    println!("focused: {:?}", doc.focused());
    press(&mut doc, &mut stack, KeyCode::Enter);

    if !stack.contains(form) {
        toasts.push(&mut doc, Toast::success("Contact saved"))?;
    }
    settle(&mut doc, &mut stack, &mut toasts).await;
    step("form submitted", &doc);
    println!("focus restored to: {:?}", doc.focused());

    Ok(())
}

fn press(doc: &mut Document, stack: &mut OverlayStack, code: KeyCode) {
    let key = KeyEvent::new(code, KeyModifiers::NONE);
    let target = doc.focused().map(str::to_string);
    if let Some(event) = from_crossterm_key(&key, target) {
        let consumed = stack.handle_event(doc, &event);
        log::info!("{code:?} consumed={consumed}");
    }
}

/// Run frames until no overlay is mid-animation.
async fn settle(doc: &mut Document, stack: &mut OverlayStack, toasts: &mut ToastQueue) {
    loop {
        tokio::time::sleep(FRAME).await;
        stack.tick(doc);
        toasts.tick(doc);
        let animating = stack.retiring() > 0
            || stack
                .entries()
                .iter()
                .any(|entry| entry.overlay.lifecycle().is_transitioning());
        if !animating {
            break;
        }
    }
}

fn step(title: &str, doc: &Document) {
    println!("--- {title} ---");
    println!("{}\n", doc.markup());
}
