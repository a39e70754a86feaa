//! Element lookups by id against the live page.
//!
//! The dashboard utilities only ever touch a handful of elements by id, so the
//! page is modelled as a small trait: [`BrowserPage`] reads the real document,
//! [`StaticPage`] is an in-memory stand-in.

use std::collections::HashMap;

/// Input holding the HeyReach API key.
pub const API_KEY_INPUT_ID: &str = "api_key";

pub const STAT_TOTAL_ID: &str = "stat-total";
pub const STAT_REPLY_RATE_ID: &str = "stat-reply-rate";
pub const STAT_HOT_LEADS_ID: &str = "stat-hot-leads";
pub const STAT_AVG_MESSAGES_ID: &str = "stat-avg-messages";

pub trait Page {
    fn has_element(&self, id: &str) -> bool;

    /// Text content of the element, `None` when it does not exist.
    fn text_content(&self, id: &str) -> Option<String>;

    /// Sets the `value` of an input element. Returns `false` when the element
    /// does not exist or is not an input.
    fn set_input_value(&mut self, id: &str, value: &str) -> bool;

    fn input_value(&self, id: &str) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StaticElement {
    Text(String),
    Input(String),
}

/// In-memory page used for tests and non-browser targets.
#[derive(Debug, Clone, Default)]
pub struct StaticPage {
    elements: HashMap<String, StaticElement>,
}

impl StaticPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.elements
            .insert(id.into(), StaticElement::Text(text.into()));
        self
    }

    pub fn with_input(mut self, id: impl Into<String>) -> Self {
        self.elements
            .insert(id.into(), StaticElement::Input(String::new()));
        self
    }

    pub fn remove(&mut self, id: &str) {
        self.elements.remove(id);
    }
}

impl Page for StaticPage {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn text_content(&self, id: &str) -> Option<String> {
        match self.elements.get(id)? {
            StaticElement::Text(text) => Some(text.clone()),
            // Inputs have no child text.
            StaticElement::Input(_) => Some(String::new()),
        }
    }

    fn set_input_value(&mut self, id: &str, value: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(StaticElement::Input(current)) => {
                *current = value.to_string();
                true
            }
            _ => false,
        }
    }

    fn input_value(&self, id: &str) -> Option<String> {
        match self.elements.get(id)? {
            StaticElement::Input(value) => Some(value.clone()),
            StaticElement::Text(_) => None,
        }
    }
}

/// The document of the current browser window.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct BrowserPage {
    document: web_sys::Document,
}

#[cfg(target_arch = "wasm32")]
impl BrowserPage {
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    fn input(&self, id: &str) -> Option<web_sys::HtmlInputElement> {
        use wasm_bindgen::JsCast;

        self.document
            .get_element_by_id(id)?
            .dyn_into::<web_sys::HtmlInputElement>()
            .ok()
    }
}

#[cfg(target_arch = "wasm32")]
impl Page for BrowserPage {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn text_content(&self, id: &str) -> Option<String> {
        let element = self.document.get_element_by_id(id)?;
        Some(element.text_content().unwrap_or_default())
    }

    fn set_input_value(&mut self, id: &str, value: &str) -> bool {
        match self.input(id) {
            Some(input) => {
                input.set_value(value);
                true
            }
            None => false,
        }
    }

    fn input_value(&self, id: &str) -> Option<String> {
        self.input(id).map(|input| input.value())
    }
}
