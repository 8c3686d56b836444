//! Overlay (modal dialog) lifecycle and stacking.
//!
//! [`Overlay`] is a single dialog with its own open/close state machine.
//! [`OverlayStack`] owns every active overlay: it hands out z-indices, routes
//! keys to the topmost overlay, and builds the confirm / alert / form / custom
//! variants from one primitive.
//!
//! ```ignore
//! let mut doc = Document::new();
//! let mut overlays = OverlayStack::new();
//!
//! let id = overlays.confirm(
//!     &mut doc,
//!     OverlayOptions::new()
//!         .title("Delete?")
//!         .message("Remove item?")
//!         .on_confirm(|_| true),
//! )?;
//!
//! // In the event loop
//! overlays.handle_event(&mut doc, &event);
//! overlays.tick(&mut doc);
//! ```

pub mod config;
pub mod error;
pub mod form;
pub mod overlay;
pub mod stack;
pub mod toast;

pub use config::{
    Body, Button, ButtonOptions, Callbacks, ManagerConfig, OverlayConfig, OverlayOptions,
    Position, Severity, Size, Variant,
};
pub use error::{OverlayError, Result};
pub use form::FormData;
pub use overlay::{Lifecycle, Overlay, OverlayId, OverlayState, Trigger};
pub use stack::{OverlayStack, StackEntry};
pub use toast::{Toast, ToastQueue};

pub mod prelude {
    pub use crate::config::{
        Body, ButtonOptions, ManagerConfig, OverlayOptions, Position, Severity, Size, Variant,
    };
    pub use crate::error::OverlayError;
    pub use crate::form::FormData;
    pub use crate::overlay::{Lifecycle, Overlay, OverlayId, Trigger};
    pub use crate::stack::OverlayStack;
    pub use crate::toast::{Toast, ToastQueue};

    pub use pagedom::{Document, Element, Event, Key};
}
