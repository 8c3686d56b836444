#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    #[default]
    None,
    Text(String),
    Children(Vec<super::Element>),
}

impl Content {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(s) => s.is_empty(),
            Self::Children(c) => c.is_empty(),
        }
    }
}
