use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::diagnostics::{StyleDiagnostic, diagnostics_enabled};
use crate::error::StyleError;
use crate::parser::{Applied, apply_property, parse_declarations, split_rules};
use crate::selector::{Selector, SelectorKind};
use crate::types::StyleRecord;

#[derive(Debug, Clone, Default)]
struct RuleSlot {
    normal: Option<StyleRecord>,
    hover: Option<StyleRecord>,
}

impl RuleSlot {
    fn is_empty(&self) -> bool {
        self.normal.is_none() && self.hover.is_none()
    }

    fn variant(&self, hover: bool) -> Option<&StyleRecord> {
        if hover { self.hover.as_ref() } else { self.normal.as_ref() }
    }

    fn variant_mut(&mut self, hover: bool) -> &mut Option<StyleRecord> {
        if hover { &mut self.hover } else { &mut self.normal }
    }
}

#[derive(Debug, Clone, Default)]
struct RuleIndex {
    by_id: HashMap<String, RuleSlot>,    // id value → records
    by_class: HashMap<String, RuleSlot>, // class → records
    by_tag: HashMap<String, RuleSlot>,   // lowercase tag → records
}

impl RuleIndex {
    fn map(&self, kind: SelectorKind) -> &HashMap<String, RuleSlot> {
        match kind {
            SelectorKind::Id => &self.by_id,
            SelectorKind::Class => &self.by_class,
            SelectorKind::Tag => &self.by_tag,
        }
    }

    fn map_mut(&mut self, kind: SelectorKind) -> &mut HashMap<String, RuleSlot> {
        match kind {
            SelectorKind::Id => &mut self.by_id,
            SelectorKind::Class => &mut self.by_class,
            SelectorKind::Tag => &mut self.by_tag,
        }
    }

    fn insert(&mut self, selector: &Selector, record: StyleRecord) -> Option<StyleRecord> {
        let slot = self.map_mut(selector.kind).entry(selector.name.clone()).or_default();
        slot.variant_mut(selector.hover).replace(record)
    }

    fn remove(&mut self, selector: &Selector) -> Option<StyleRecord> {
        let map = self.map_mut(selector.kind);
        let slot = map.get_mut(&selector.name)?;
        let removed = slot.variant_mut(selector.hover).take();
        if slot.is_empty() {
            map.remove(&selector.name);
        }
        removed
    }

    fn get(&self, kind: SelectorKind, key: &str, hover: bool) -> Option<&StyleRecord> {
        if key.is_empty() {
            return None;
        }
        self.map(kind).get(key)?.variant(hover)
    }

    // Hover variant first, then the plain rule, at one specificity level.
    fn level(&self, kind: SelectorKind, key: &str, hover: bool) -> Option<&StyleRecord> {
        if hover {
            if let Some(rec) = self.get(kind, key, true) {
                return Some(rec);
            }
        }
        self.get(kind, key, false)
    }

    fn len(&self) -> usize {
        [&self.by_id, &self.by_class, &self.by_tag]
            .iter()
            .flat_map(|m| m.values())
            .map(|slot| slot.normal.is_some() as usize + slot.hover.is_some() as usize)
            .sum()
    }
}

/// Parsed mini-CSS rules keyed by simple selector.
///
/// Built wholesale from style text and queried read-only afterwards. Lookups go
/// through [`StyleSheet::resolve`], which applies the fixed cascade.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    index: RuleIndex,
    defaults: StyleRecord,
}

impl StyleSheet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Strict parse: the first malformed numeric value aborts with an error.
    pub fn parse(text: &str) -> Result<Self, StyleError> {
        Self::parse_with(text, true).map(|(sheet, _)| sheet)
    }

    /// Lenient parse: a rule containing a malformed numeric value is dropped
    /// and reported; every other rule is kept.
    pub fn parse_lenient(text: &str) -> (Self, Vec<StyleDiagnostic>) {
        let mut sheet = StyleSheet::empty();
        let diagnostics = sheet.ingest(text, false).unwrap_or_default();
        (sheet, diagnostics)
    }

    /// Parse in either mode, returning the warnings collected along the way.
    pub fn parse_with(text: &str, strict: bool) -> Result<(Self, Vec<StyleDiagnostic>), StyleError> {
        let mut sheet = StyleSheet::empty();
        let diagnostics = sheet.ingest(text, strict)?;
        Ok((sheet, diagnostics))
    }

    /// Read style text from disk and parse it.
    pub fn load(
        path: impl AsRef<Path>,
        strict: bool,
    ) -> Result<(Self, Vec<StyleDiagnostic>), StyleError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::parse_with(&text, strict)
    }

    fn ingest(&mut self, text: &str, strict: bool) -> Result<Vec<StyleDiagnostic>, StyleError> {
        let mut diagnostics = Vec::new();
        'rules: for rule in split_rules(text) {
            let mut record = StyleRecord::default();
            for (name, value) in parse_declarations(&rule.body) {
                match apply_property(&mut record, &name, &value) {
                    Ok(Applied::Set) => {}
                    Ok(Applied::Unknown) => {
                        if diagnostics_enabled("css") {
                            tracing::debug!(selector = %rule.selectors, property = %name, "ignoring unknown property");
                        }
                    }
                    Err(_) => {
                        if strict {
                            return Err(StyleError::InvalidNumber {
                                selector: rule.selectors.clone(),
                                property: name,
                                value,
                            });
                        }
                        let diag = StyleDiagnostic::error(value, "malformed numeric value; rule skipped")
                            .with_selector(rule.selectors.clone())
                            .with_property(name);
                        diag.emit();
                        diagnostics.push(diag);
                        continue 'rules;
                    }
                }
            }
            for text in rule.selectors.split(',') {
                match Selector::parse(text) {
                    Some(selector) => {
                        if self.index.insert(&selector, record.clone()).is_some()
                            && diagnostics_enabled("css")
                        {
                            tracing::debug!(%selector, "later rule replaces earlier one");
                        }
                    }
                    None => {
                        let diag = StyleDiagnostic::warning(text.trim(), "unsupported selector skipped");
                        diag.emit();
                        diagnostics.push(diag);
                    }
                }
            }
        }
        Ok(diagnostics)
    }

    /// Register `record` under `selector`, returning the record it replaced.
    pub fn insert(&mut self, selector: Selector, record: StyleRecord) -> Option<StyleRecord> {
        self.index.insert(&selector, record)
    }

    pub fn remove(&mut self, selector: &Selector) -> Option<StyleRecord> {
        self.index.remove(selector)
    }

    /// Exact lookup of one selector, without cascading.
    pub fn get(&self, selector: &Selector) -> Option<&StyleRecord> {
        self.index.get(selector.kind, &selector.name, selector.hover)
    }

    /// Number of registered selectors, counting hover variants separately.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The record returned when nothing matches.
    pub fn defaults(&self) -> &StyleRecord {
        &self.defaults
    }

    /// Resolve the effective record for an element.
    ///
    /// Levels are tried in order `#id`, `.class`, tag, engine default; the first
    /// level with a match wins outright and levels are never merged. Within a
    /// level the `:hover` variant is consulted first when `hover` is set. Empty
    /// `id` or `class` strings skip their level.
    pub fn resolve(&self, id: &str, class: &str, tag: &str, hover: bool) -> &StyleRecord {
        let tag = tag.to_ascii_lowercase();
        let levels = [
            (SelectorKind::Id, id),
            (SelectorKind::Class, class),
            (SelectorKind::Tag, tag.as_str()),
        ];
        for (kind, key) in levels {
            if let Some(rec) = self.index.level(kind, key, hover) {
                if diagnostics_enabled("css") {
                    tracing::trace!(?kind, key, hover, "cascade match");
                }
                return rec;
            }
        }
        &self.defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use mkml_core::Color;

    #[test]
    fn selector_list_registers_each_selector() {
        let sheet = StyleSheet::parse("h1, .title, #main:hover { color: red; }").unwrap();
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.get(&Selector::tag("h1")).unwrap().text_color, Color::RED);
        assert_eq!(sheet.get(&Selector::class("title")).unwrap().text_color, Color::RED);
        assert!(sheet.get(&Selector::id("main")).is_none());
        assert!(sheet.get(&Selector::id("main").hovered()).is_some());
    }

    #[test]
    fn later_block_replaces_earlier_record() {
        let sheet = StyleSheet::parse("p { color: red; padding: 9 } p { font-size: 12 }").unwrap();
        let rec = sheet.get(&Selector::tag("p")).unwrap();
        assert_eq!(rec.font_size, 12);
        assert_eq!(rec.text_color, Color::BLACK);
        assert_eq!(rec.padding, 5.0);
    }

    #[test]
    fn empty_body_registers_defaults() {
        let sheet = StyleSheet::parse(".plain {}").unwrap();
        assert_eq!(sheet.get(&Selector::class("plain")), Some(&StyleRecord::default()));
    }

    #[test]
    fn strict_parse_fails_on_malformed_number() {
        let err = StyleSheet::parse("#a { padding: wide; }").unwrap_err();
        match err {
            StyleError::InvalidNumber { selector, property, value } => {
                assert_eq!(selector, "#a");
                assert_eq!(property, "padding");
                assert_eq!(value, "wide");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn lenient_parse_skips_only_the_bad_rule() {
        let (sheet, diags) =
            StyleSheet::parse_lenient("#a { padding: wide; } #b { padding: 3px; }");
        assert!(sheet.get(&Selector::id("a")).is_none());
        assert_eq!(sheet.get(&Selector::id("b")).unwrap().padding, 3.0);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].property.as_deref(), Some("padding"));
    }

    #[test]
    fn unsupported_selectors_warn_without_failing() {
        let (sheet, diags) = StyleSheet::parse_with("div p, .ok { color: blue }", true).unwrap();
        assert_eq!(sheet.len(), 1);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].value, "div p");
    }

    #[test]
    fn remove_drops_only_one_variant() {
        let mut sheet = StyleSheet::parse("#x { color: red } #x:hover { color: blue }").unwrap();
        assert_eq!(sheet.remove(&Selector::id("x")).unwrap().text_color, Color::RED);
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.resolve("x", "", "p", false), sheet.defaults());
        assert_eq!(sheet.resolve("x", "", "p", true).text_color, Color::BLUE);
    }

    #[test]
    fn tag_lookup_ignores_case() {
        let sheet = StyleSheet::parse("Button { font-size: 30 }").unwrap();
        assert_eq!(sheet.resolve("", "", "BUTTON", false).font_size, 30);
    }

    #[test]
    fn empty_sheet_resolves_defaults() {
        let sheet = StyleSheet::empty();
        assert!(sheet.is_empty());
        assert_eq!(sheet.resolve("a", "b", "c", true), &StyleRecord::default());
    }
}
