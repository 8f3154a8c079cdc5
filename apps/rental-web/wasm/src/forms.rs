//! Auto-save forms backed by the DOM

use form_state::FormFields;
use shared_types::FormSnapshot;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

/// Forms whose drafts are saved
pub const AUTO_SAVE_SELECTOR: &str = "form.auto-save";

const FIELD_SELECTOR: &str = "input[name], textarea[name], select[name]";

/// Input types that never contribute a value
const SKIPPED_INPUT_TYPES: &[&str] = &["submit", "button", "reset", "file", "image"];

/// A live `<form>` element
pub struct DomForm {
    form: HtmlFormElement,
}

impl DomForm {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }

    /// The form's `id` attribute, if set
    pub fn explicit_id(&self) -> Option<String> {
        Some(self.form.id()).filter(|id| !id.trim().is_empty())
    }

    pub fn element(&self) -> &HtmlFormElement {
        &self.form
    }

    fn fields(&self) -> Vec<Element> {
        let Ok(nodes) = self.form.query_selector_all(FIELD_SELECTOR) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn fields_named(&self, name: &str) -> Vec<Element> {
        self.fields()
            .into_iter()
            .filter(|el| el.get_attribute("name").as_deref() == Some(name))
            .collect()
    }
}

/// Name and submitted value of one control, following form submission rules
fn submitted_value(el: &Element) -> Option<(String, String)> {
    let name = el.get_attribute("name").filter(|n| !n.is_empty())?;

    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        let kind = input.type_().to_lowercase();
        if input.disabled() || SKIPPED_INPUT_TYPES.contains(&kind.as_str()) {
            return None;
        }
        if (kind == "checkbox" || kind == "radio") && !input.checked() {
            return None;
        }
        return Some((name, input.value()));
    }
    if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        return (!area.disabled()).then(|| (name, area.value()));
    }
    if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        return (!select.disabled()).then(|| (name, select.value()));
    }
    None
}

/// Write a saved value into one control; checkable inputs are checked by value
fn apply_value(el: &Element, value: &str) -> bool {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        let kind = input.type_().to_lowercase();
        if kind == "checkbox" || kind == "radio" {
            input.set_checked(input.value() == value);
        } else if kind != "file" {
            input.set_value(value);
        }
        return true;
    }
    if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
        return true;
    }
    if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
        return true;
    }
    false
}

impl FormFields for DomForm {
    fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in self.fields().iter().filter_map(|el| el.get_attribute("name")) {
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    fn has_field(&self, name: &str) -> bool {
        !self.fields_named(name).is_empty()
    }

    fn set_field(&mut self, name: &str, value: &str) -> bool {
        let mut applied = false;
        for el in self.fields_named(name) {
            applied |= apply_value(&el, value);
        }
        applied
    }

    fn snapshot(&self) -> FormSnapshot {
        self.fields().iter().filter_map(submitted_value).collect()
    }
}
