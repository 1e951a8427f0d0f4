//! Shared domain enumerations.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Home,
    About,
    Service,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Home => "home",
            DocumentKind::About => "about",
            DocumentKind::Service => "service",
        }
    }

    /// Singleton kinds have exactly one row, created on first read.
    pub fn is_singleton(self) -> bool {
        matches!(self, DocumentKind::Home | DocumentKind::About)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
