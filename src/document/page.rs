/*!
 * JSON-serializable page document.
 *
 * `StaticPage` describes a page as its elements, language controls, page
 * language attribute and the notices posted while it was open. It is what
 * the command line reads and writes, and what the tests drive the session
 * against.
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::DocumentError;
use super::Document;

/// A page element carrying text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageElement {
    /// Stable element id
    pub id: String,

    /// Whether the element is marked for translation
    #[serde(default = "default_true")]
    pub translatable: bool,

    /// Current display text
    pub text: String,
}

/// A language selector control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageControl {
    /// Language code the control switches to
    pub lang: String,

    /// Whether the control is shown as the active language
    #[serde(default)]
    pub active: bool,

    /// Whether the control accepts interaction
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Static page with translatable elements and language controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticPage {
    /// Page language attribute
    #[serde(default)]
    pub lang: String,

    /// Elements in document order
    #[serde(default)]
    pub elements: Vec<PageElement>,

    /// Language controls in document order
    #[serde(default)]
    pub controls: Vec<LanguageControl>,

    /// Notices shown to the visitor
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl StaticPage {
    /// Create an empty page in the given language
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            ..Self::default()
        }
    }

    /// Add a translatable element
    pub fn with_element(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.elements.push(PageElement {
            id: id.into(),
            translatable: true,
            text: text.into(),
        });
        self
    }

    /// Add an element that is not marked for translation
    pub fn with_fixed_element(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.elements.push(PageElement {
            id: id.into(),
            translatable: false,
            text: text.into(),
        });
        self
    }

    /// Add one enabled, inactive control per language code
    pub fn with_controls(mut self, codes: &[&str]) -> Self {
        self.controls.extend(codes.iter().map(|code| LanguageControl {
            lang: code.to_string(),
            active: false,
            enabled: true,
        }));
        self
    }

    /// Parse a page from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse page JSON")
    }

    /// Serialize the page as pretty JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize page")
    }

    /// Load a page from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read page file: {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Invalid page file: {}", path.display()))
    }

    /// Write the page to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json_pretty()?)
            .with_context(|| format!("Failed to write page file: {}", path.display()))
    }

    /// Display text of an element, if it exists
    pub fn element_text(&self, id: &str) -> Option<&str> {
        self.elements.iter().find(|e| e.id == id).map(|e| e.text.as_str())
    }

    /// Codes of the controls currently marked active
    pub fn active_controls(&self) -> Vec<&str> {
        self.controls.iter().filter(|c| c.active).map(|c| c.lang.as_str()).collect()
    }

    /// Whether every control accepts interaction
    pub fn controls_enabled(&self) -> bool {
        self.controls.iter().all(|c| c.enabled)
    }

    fn element_mut(&mut self, id: &str) -> Result<&mut PageElement, DocumentError> {
        self.elements
            .iter_mut()
            .find(|e| e.id == id && e.translatable)
            .ok_or_else(|| DocumentError::UnknownElement(id.to_string()))
    }
}

impl Document for StaticPage {
    fn translatable_elements(&self) -> Vec<String> {
        self.elements.iter().filter(|e| e.translatable).map(|e| e.id.clone()).collect()
    }

    fn text(&self, id: &str) -> Result<String, DocumentError> {
        self.elements
            .iter()
            .find(|e| e.id == id && e.translatable)
            .map(|e| e.text.clone())
            .ok_or_else(|| DocumentError::UnknownElement(id.to_string()))
    }

    fn set_text(&mut self, id: &str, text: &str) -> Result<(), DocumentError> {
        self.element_mut(id)?.text = text.to_string();
        Ok(())
    }

    fn language_controls(&self) -> Vec<String> {
        self.controls.iter().map(|c| c.lang.clone()).collect()
    }

    fn set_control_active(&mut self, code: &str, active: bool) {
        for control in self.controls.iter_mut().filter(|c| c.lang == code) {
            control.active = active;
        }
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        for control in &mut self.controls {
            control.enabled = enabled;
        }
    }

    fn page_language(&self) -> String {
        self.lang.clone()
    }

    fn set_page_language(&mut self, code: &str) {
        self.lang = code.to_string();
    }

    fn show_notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
