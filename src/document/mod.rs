/*!
 * Document boundary of the translation session.
 *
 * A `Document` is the page the session translates. The session never creates
 * or removes anything in it: it reads and replaces element text, toggles the
 * language controls, updates the page language attribute and posts notices.
 *
 * - `page`: `StaticPage`, a JSON-serializable document
 */

use crate::errors::DocumentError;

/// Page content the session can read and mutate
pub trait Document: Send {
    /// Ids of every element marked translatable, in document order
    fn translatable_elements(&self) -> Vec<String>;

    /// Current display text of an element
    fn text(&self, id: &str) -> Result<String, DocumentError>;

    /// Replace the display text of an element
    fn set_text(&mut self, id: &str, text: &str) -> Result<(), DocumentError>;

    /// Language codes of every language control, in document order
    fn language_controls(&self) -> Vec<String>;

    /// Mark a language control active or inactive
    fn set_control_active(&mut self, code: &str, active: bool);

    /// Enable or disable interaction with all language controls
    fn set_controls_enabled(&mut self, enabled: bool);

    /// Language the page declares, empty when it declares none
    fn page_language(&self) -> String;

    /// Update the page-level language attribute
    fn set_page_language(&mut self, code: &str);

    /// Show a short-lived message to the visitor
    fn show_notice(&mut self, message: &str);
}

pub mod page;

pub use page::{LanguageControl, PageElement, StaticPage};
