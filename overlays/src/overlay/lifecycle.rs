/// Overlay lifecycle.
///
/// Transitions only ever go `Closed → Opening → Open → Closing → Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl Lifecycle {
    /// Opening or open.
    pub fn is_visible(self) -> bool {
        matches!(self, Lifecycle::Opening | Lifecycle::Open)
    }

    /// Mid-animation.
    pub fn is_transitioning(self) -> bool {
        matches!(self, Lifecycle::Opening | Lifecycle::Closing)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lifecycle::Closed => "closed",
            Lifecycle::Opening => "opening",
            Lifecycle::Open => "open",
            Lifecycle::Closing => "closing",
        }
    }
}

impl std::fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
