//! Visual theme preference.
//!
//! Independent of the task collection; persisted in its own slot on the
//! shared storage medium. Absence or an unrecognized value falls back to
//! dark.

/// Light/dark preference for the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Light background.
    Light,
    /// Dark background. The default when nothing is persisted.
    Dark,
}

impl Theme {
    /// Literal persisted form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses the persisted literal; `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Dark
    }
}
