use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

/// Whether verbose diagnostics for `category` were requested through
/// `MKML_DIAGNOSTICS` (comma separated, `all` enables every category).
pub fn diagnostics_enabled(category: &str) -> bool {
    static SET: OnceLock<HashSet<String>> = OnceLock::new();
    let set = SET.get_or_init(|| {
        let raw = std::env::var("MKML_DIAGNOSTICS").unwrap_or_default();
        raw.split(',')
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<String>>()
    });
    set.contains("all") || set.contains(&category.to_ascii_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Input was skipped or degraded; the result is still usable.
    Warning,
    /// A value was malformed; the enclosing rule or token was dropped.
    Error,
}

/// A recoverable problem found while ingesting style text or grid templates.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDiagnostic {
    pub severity: Severity,
    pub selector: Option<String>,
    pub property: Option<String>,
    pub value: String,
    pub message: String,
}

impl StyleDiagnostic {
    pub fn warning(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            selector: None,
            property: None,
            value: value.into(),
            message: message.into(),
        }
    }

    pub fn error(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            ..Self::warning(value, message)
        }
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Forward to the tracing pipeline at a level matching the severity.
    pub fn emit(&self) {
        let selector = self.selector.as_deref().unwrap_or("-");
        let property = self.property.as_deref().unwrap_or("-");
        match self.severity {
            Severity::Warning => tracing::warn!(
                selector,
                property,
                value = %self.value,
                "{}",
                self.message
            ),
            Severity::Error => tracing::error!(
                selector,
                property,
                value = %self.value,
                "{}",
                self.message
            ),
        }
    }
}

impl fmt::Display for StyleDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "[css {level}]")?;
        if let Some(sel) = &self.selector {
            write!(f, " {sel}")?;
        }
        if let Some(prop) = &self.property {
            write!(f, " {prop}:")?;
        }
        write!(f, " {:?}: {}", self.value, self.message)
    }
}
