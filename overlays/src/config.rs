//! Overlay configuration.
//!
//! Callers describe an overlay with [`OverlayOptions`], where every field is
//! optional. Options are layered with [`OverlayOptions::merge`] (a pure merge,
//! later layers win) and resolved into an [`OverlayConfig`] once, at creation.
//! Variant defaults are built fresh for every overlay, so no two overlays ever
//! share a mutable template.

use std::time::Duration;

use pagedom::{Element, ROOT_ID};
use serde::Deserialize;

use crate::form::FormData;

/// Delay between `Opening` and `Open`, and between `Closing` and `Closed`.
pub const DEFAULT_ANIMATION: Duration = Duration::from_millis(150);

/// Lowest z-index handed out by the stack.
pub const DEFAULT_BASE_Z_INDEX: i32 = 1000;

/// Dialog box size preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
    Fullscreen,
}

impl Size {
    pub fn as_str(self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
            Size::Fullscreen => "fullscreen",
        }
    }
}

impl From<String> for Size {
    fn from(s: String) -> Self {
        match s.as_str() {
            "small" | "sm" => Size::Small,
            "medium" | "md" => Size::Medium,
            "large" | "lg" => Size::Large,
            "fullscreen" | "full" => Size::Fullscreen,
            other => {
                log::warn!("unknown overlay size '{other}', using medium");
                Size::Medium
            }
        }
    }
}

/// Vertical placement of the dialog box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum Position {
    #[default]
    Center,
    Top,
    Bottom,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Center => "center",
            Position::Top => "top",
            Position::Bottom => "bottom",
        }
    }
}

impl From<String> for Position {
    fn from(s: String) -> Self {
        match s.as_str() {
            "top" => Position::Top,
            "bottom" => Position::Bottom,
            "center" | "centered" => Position::Center,
            other => {
                log::warn!("unknown overlay position '{other}', using center");
                Position::Center
            }
        }
    }
}

/// Preconfigured dialog shape. Unknown names resolve to `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum Variant {
    #[default]
    Default,
    Confirm,
    Alert,
    Form,
    Custom,
}

impl Variant {
    pub fn parse(s: &str) -> Self {
        match s {
            "default" => Variant::Default,
            "confirm" => Variant::Confirm,
            "alert" => Variant::Alert,
            "form" => Variant::Form,
            "custom" => Variant::Custom,
            other => {
                log::warn!("unknown overlay variant '{other}', using default");
                Variant::Default
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Default => "default",
            Variant::Confirm => "confirm",
            Variant::Alert => "alert",
            Variant::Form => "form",
            Variant::Custom => "custom",
        }
    }

    /// Confirm and alert dialogs always render a footer and an icon.
    pub fn is_prompt(self) -> bool {
        matches!(self, Variant::Confirm | Variant::Alert)
    }
}

impl From<String> for Variant {
    fn from(s: String) -> Self {
        Variant::parse(&s)
    }
}

/// Alert severity. Picks the alert's icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            Severity::Info => "icon-info",
            Severity::Success => "icon-success",
            Severity::Warning => "icon-warning",
            Severity::Error => "icon-error",
        }
    }
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        match s.as_str() {
            "success" => Severity::Success,
            "warning" | "warn" => Severity::Warning,
            "error" | "danger" => Severity::Error,
            _ => Severity::Info,
        }
    }
}

/// Body content of an overlay. Exactly one form per instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    Text(String),
    Node(Element),
    Children(Vec<Element>),
}

impl From<&str> for Body {
    fn from(s: &str) -> Self {
        Body::Text(s.to_string())
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Body::Text(s)
    }
}

impl From<Element> for Body {
    fn from(element: Element) -> Self {
        Body::Node(element)
    }
}

impl From<Vec<Element>> for Body {
    fn from(children: Vec<Element>) -> Self {
        Body::Children(children)
    }
}

/// Side-effect hook (`on_show`, `on_hide`).
pub type Hook = Box<dyn FnMut()>;

/// Cancellable hook. Returning `false` keeps the overlay open.
pub type Gate = Box<dyn FnMut() -> bool>;

/// Cancellable confirm hook, handed the values of named form fields.
pub type ConfirmGate = Box<dyn FnMut(&FormData) -> bool>;

/// Lifecycle and dismissal callbacks.
#[derive(Default)]
pub struct Callbacks {
    pub on_show: Option<Hook>,
    pub on_hide: Option<Hook>,
    pub on_confirm: Option<ConfirmGate>,
    pub on_cancel: Option<Gate>,
    pub on_close: Option<Gate>,
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_show", &self.on_show.is_some())
            .field("on_hide", &self.on_hide.is_some())
            .field("on_confirm", &self.on_confirm.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

impl Callbacks {
    /// Callbacks set in `over` replace those in `self`.
    pub fn merge(self, over: Callbacks) -> Callbacks {
        Callbacks {
            on_show: over.on_show.or(self.on_show),
            on_hide: over.on_hide.or(self.on_hide),
            on_confirm: over.on_confirm.or(self.on_confirm),
            on_cancel: over.on_cancel.or(self.on_cancel),
            on_close: over.on_close.or(self.on_close),
        }
    }
}

/// Partial button descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonOptions {
    pub label: Option<String>,
    #[serde(alias = "styleClass")]
    pub class: Option<String>,
    pub visible: Option<bool>,
    pub disabled: Option<bool>,
}

impl ButtonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn merge(self, over: ButtonOptions) -> ButtonOptions {
        ButtonOptions {
            label: over.label.or(self.label),
            class: over.class.or(self.class),
            visible: over.visible.or(self.visible),
            disabled: over.disabled.or(self.disabled),
        }
    }
}

/// Resolved button descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub class: String,
    pub visible: bool,
    pub disabled: bool,
}

impl Button {
    fn resolve(options: Option<ButtonOptions>, label: &str, class: &str) -> Self {
        let options = options.unwrap_or_default();
        Self {
            label: options.label.unwrap_or_else(|| label.to_string()),
            class: options.class.unwrap_or_else(|| class.to_string()),
            visible: options.visible.unwrap_or(false),
            disabled: options.disabled.unwrap_or(false),
        }
    }

    /// Visible and enabled.
    pub fn is_active(&self) -> bool {
        self.visible && !self.disabled
    }
}

/// Caller-facing overlay description. Every field is optional; unset fields
/// fall back to the variant's defaults and then to the global defaults.
///
/// Deserializable from camelCase data. Unknown fields are ignored, and
/// callbacks or pre-built nodes can only be supplied in code.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayOptions {
    pub title: Option<String>,
    /// Plain-text body, used when `body` is not set.
    pub message: Option<String>,
    #[serde(skip)]
    pub body: Option<Body>,
    pub size: Option<Size>,
    pub variant: Option<Variant>,
    #[serde(rename = "type", alias = "severity")]
    pub severity: Option<Severity>,
    /// Icon class override for confirm/alert dialogs.
    pub icon: Option<String>,
    pub closable: Option<bool>,
    pub dismiss_on_backdrop: Option<bool>,
    pub dismiss_on_escape: Option<bool>,
    pub auto_focus: Option<bool>,
    pub animated: Option<bool>,
    pub position: Option<Position>,
    /// ID of the element the overlay is attached to.
    pub mount: Option<String>,
    pub confirm: Option<ButtonOptions>,
    pub cancel: Option<ButtonOptions>,
    #[serde(skip)]
    pub callbacks: Callbacks,
}

macro_rules! option_setters {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            pub fn $name(mut self, $name: $ty) -> Self {
                self.$name = Some($name);
                self
            }
        )*
    };
}

impl OverlayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    option_setters! {
        size: Size,
        variant: Variant,
        severity: Severity,
        closable: bool,
        dismiss_on_backdrop: bool,
        dismiss_on_escape: bool,
        auto_focus: bool,
        animated: bool,
        position: Position,
        confirm: ButtonOptions,
        cancel: ButtonOptions,
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = Some(mount.into());
        self
    }

    pub fn on_show(mut self, hook: impl FnMut() + 'static) -> Self {
        self.callbacks.on_show = Some(Box::new(hook));
        self
    }

    pub fn on_hide(mut self, hook: impl FnMut() + 'static) -> Self {
        self.callbacks.on_hide = Some(Box::new(hook));
        self
    }

    pub fn on_confirm(mut self, gate: impl FnMut(&FormData) -> bool + 'static) -> Self {
        self.callbacks.on_confirm = Some(Box::new(gate));
        self
    }

    pub fn on_cancel(mut self, gate: impl FnMut() -> bool + 'static) -> Self {
        self.callbacks.on_cancel = Some(Box::new(gate));
        self
    }

    pub fn on_close(mut self, gate: impl FnMut() -> bool + 'static) -> Self {
        self.callbacks.on_close = Some(Box::new(gate));
        self
    }

    /// Layer `over` on top of `self`. Fields set in `over` win.
    pub fn merge(self, over: OverlayOptions) -> OverlayOptions {
        OverlayOptions {
            title: over.title.or(self.title),
            message: over.message.or(self.message),
            body: over.body.or(self.body),
            size: over.size.or(self.size),
            variant: over.variant.or(self.variant),
            severity: over.severity.or(self.severity),
            icon: over.icon.or(self.icon),
            closable: over.closable.or(self.closable),
            dismiss_on_backdrop: over.dismiss_on_backdrop.or(self.dismiss_on_backdrop),
            dismiss_on_escape: over.dismiss_on_escape.or(self.dismiss_on_escape),
            auto_focus: over.auto_focus.or(self.auto_focus),
            animated: over.animated.or(self.animated),
            position: over.position.or(self.position),
            mount: over.mount.or(self.mount),
            confirm: merge_buttons(self.confirm, over.confirm),
            cancel: merge_buttons(self.cancel, over.cancel),
            callbacks: self.callbacks.merge(over.callbacks),
        }
    }

    /// Fresh defaults for a variant.
    ///
    /// | Variant | Size | Buttons |
    /// |---|---|---|
    /// | confirm | small | Yes / No |
    /// | alert | small | OK, no cancel |
    /// | form | medium | Submit / Cancel |
    pub fn defaults_for(variant: Variant) -> OverlayOptions {
        match variant {
            Variant::Confirm => OverlayOptions::new()
                .size(Size::Small)
                .confirm(ButtonOptions::new().label("Yes").visible(true))
                .cancel(ButtonOptions::new().label("No").visible(true)),
            Variant::Alert => OverlayOptions::new()
                .size(Size::Small)
                .confirm(ButtonOptions::new().label("OK").visible(true))
                .cancel(ButtonOptions::new().visible(false)),
            Variant::Form => OverlayOptions::new()
                .size(Size::Medium)
                .confirm(ButtonOptions::new().label("Submit").visible(true))
                .cancel(ButtonOptions::new().label("Cancel").visible(true)),
            Variant::Default | Variant::Custom => OverlayOptions::new(),
        }
    }
}

fn merge_buttons(
    base: Option<ButtonOptions>,
    over: Option<ButtonOptions>,
) -> Option<ButtonOptions> {
    match (base, over) {
        (Some(base), Some(over)) => Some(base.merge(over)),
        (base, over) => over.or(base),
    }
}

/// Resolved configuration of a single overlay.
///
/// Fixed at creation. Only `title`, `body` and `z_index_base` change
/// afterwards, through the overlay's setters.
#[derive(Debug)]
pub struct OverlayConfig {
    pub title: Option<String>,
    pub body: Body,
    pub size: Size,
    pub variant: Variant,
    pub severity: Severity,
    pub icon: Option<String>,
    pub closable: bool,
    pub dismiss_on_backdrop: bool,
    pub dismiss_on_escape: bool,
    pub auto_focus: bool,
    pub animated: bool,
    pub position: Position,
    pub z_index_base: i32,
    pub mount: String,
    pub animation: Duration,
    pub confirm_button: Button,
    pub cancel_button: Button,
    pub callbacks: Callbacks,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::resolve(OverlayOptions::new())
    }
}

impl OverlayConfig {
    /// Resolve options against the defaults of their variant.
    pub fn resolve(options: OverlayOptions) -> Self {
        let variant = options.variant.unwrap_or_default();
        let options = OverlayOptions::defaults_for(variant).merge(options);

        let body = match (options.body, options.message) {
            (Some(body), _) => body,
            (None, Some(message)) => Body::Text(message),
            (None, None) => Body::Empty,
        };
        let icon = options.icon.or_else(|| match variant {
            Variant::Confirm => Some("icon-question".to_string()),
            Variant::Alert => Some(options.severity.unwrap_or_default().icon_class().to_string()),
            _ => None,
        });

        Self {
            title: options.title,
            body,
            size: options.size.unwrap_or_default(),
            variant,
            severity: options.severity.unwrap_or_default(),
            icon,
            closable: options.closable.unwrap_or(true),
            dismiss_on_backdrop: options.dismiss_on_backdrop.unwrap_or(true),
            dismiss_on_escape: options.dismiss_on_escape.unwrap_or(true),
            auto_focus: options.auto_focus.unwrap_or(true),
            animated: options.animated.unwrap_or(true),
            position: options.position.unwrap_or_default(),
            z_index_base: DEFAULT_BASE_Z_INDEX,
            mount: options.mount.unwrap_or_else(|| ROOT_ID.to_string()),
            animation: DEFAULT_ANIMATION,
            confirm_button: Button::resolve(options.confirm, "OK", "btn btn-primary"),
            cancel_button: Button::resolve(options.cancel, "Cancel", "btn btn-secondary"),
            callbacks: options.callbacks,
        }
    }

    /// Delay of one animation step; zero when animations are off.
    pub fn step_delay(&self) -> Duration {
        if self.animated {
            self.animation
        } else {
            Duration::ZERO
        }
    }
}

/// Stack-wide settings.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// z-index of the first overlay; later overlays stack above it.
    pub base_z_index: i32,
    /// Duration of each open/close animation step.
    pub animation: Duration,
    /// Default mount target for overlays that don't name one.
    pub mount: String,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            base_z_index: DEFAULT_BASE_Z_INDEX,
            animation: DEFAULT_ANIMATION,
            mount: ROOT_ID.to_string(),
        }
    }
}

impl ManagerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_z_index(mut self, base: i32) -> Self {
        self.base_z_index = base;
        self
    }

    pub fn animation(mut self, animation: Duration) -> Self {
        self.animation = animation;
        self
    }

    pub fn mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into();
        self
    }
}
