pub mod clock;
pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod focus;
pub mod listener;
pub mod markup;

pub use clock::Clock;
pub use document::{Document, ROOT_ID};
pub use element::{Content, Element};
pub use error::DomError;
pub use event::{from_crossterm_key, from_crossterm_mouse, Event, Key, Modifiers, MouseButton};
pub use focus::{collect_tabbable, is_tabbable, FocusState};
pub use listener::{EventKind, ListenerId, Listeners, DOCUMENT_TARGET};
pub use markup::to_markup;
