use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    Id,
    Class,
    Tag,
}

/// A simple selector: `#id`, `.class` or a lowercase tag, optionally `:hover`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    pub kind: SelectorKind,
    pub name: String,
    pub hover: bool,
}

impl Selector {
    pub fn id(name: impl Into<String>) -> Self {
        Self { kind: SelectorKind::Id, name: name.into(), hover: false }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self { kind: SelectorKind::Class, name: name.into(), hover: false }
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Self {
            kind: SelectorKind::Tag,
            name: name.into().to_ascii_lowercase(),
            hover: false,
        }
    }

    pub fn hovered(mut self) -> Self {
        self.hover = true;
        self
    }

    /// Parse one selector. Returns `None` for anything outside the supported
    /// grammar (combinators, attribute selectors, other pseudo classes).
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let (base, hover) = match text.strip_suffix(":hover") {
            Some(base) => (base, true),
            None => (text, false),
        };
        let (kind, name) = if let Some(rest) = base.strip_prefix('#') {
            (SelectorKind::Id, rest)
        } else if let Some(rest) = base.strip_prefix('.') {
            (SelectorKind::Class, rest)
        } else {
            (SelectorKind::Tag, base)
        };
        if name.is_empty() || !name.chars().all(is_name_char) {
            return None;
        }
        if kind == SelectorKind::Tag && !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }
        let name = match kind {
            SelectorKind::Tag => name.to_ascii_lowercase(),
            _ => name.to_string(),
        };
        Some(Self { kind, name, hover })
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SelectorKind::Id => write!(f, "#{}", self.name)?,
            SelectorKind::Class => write!(f, ".{}", self.name)?,
            SelectorKind::Tag => write!(f, "{}", self.name)?,
        }
        if self.hover {
            write!(f, ":hover")?;
        }
        Ok(())
    }
}
