//! Browser bindings for the rental dashboard
//!
//! The host page owns event wiring and calls into a [`RentalPage`]:
//!
//! ```js
//! const page = RentalPage.onReady(configJson);
//! form.addEventListener('change', () => page.onFieldChange(form));
//! form.addEventListener('submit', () => page.onSubmit(form));
//! search.addEventListener('keyup', () => page.filterTable(search));
//! ```

use chrono::NaiveDate;
use expiry_engine::{EngineConfig, ExpiryBoard, ExpiryEngine, LeaseCalendar};
use form_state::{FormFields, FormIdResolver, FormStateStore, FormStoreConfig, ThemePreference};
use serde::{Deserialize, Serialize};
use shared_types::FormId;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlFormElement, HtmlInputElement};

pub mod dom;
pub mod forms;
pub mod storage;

pub use forms::DomForm;
pub use storage::LocalStorage;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Alquileres WASM initialized".into());
}

/// Configuration accepted by `RentalPage.onReady`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RentalConfig {
    pub engine: EngineConfig,
    pub forms: FormStoreConfig,
}

impl RentalConfig {
    /// Parse host configuration; a missing or blank string means defaults
    pub fn from_json(json: Option<&str>) -> Result<Self, String> {
        let Some(json) = json.filter(|j| !j.trim().is_empty()) else {
            return Ok(Self::default());
        };
        let config: RentalConfig =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse config: {}", e))?;
        config
            .engine
            .validate()
            .map_err(|e| format!("Invalid config: {}", e))?;
        Ok(config)
    }
}

fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

fn document() -> Result<Document, JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    window.document().ok_or_else(|| "No document".into())
}

/// Derived state of one page load
#[wasm_bindgen]
pub struct RentalPage {
    engine: ExpiryEngine,
    board: ExpiryBoard,
    forms: FormStoreConfig,
    resolver: FormIdResolver,
    reference: NaiveDate,
}

impl RentalPage {
    pub fn new(
        config: &RentalConfig,
        page_path: &str,
        reference: NaiveDate,
    ) -> Result<Self, String> {
        let engine = ExpiryEngine::with_config(&config.engine).map_err(|e| e.to_string())?;
        Ok(Self {
            engine,
            board: ExpiryBoard::new(),
            forms: config.forms.clone(),
            resolver: FormIdResolver::new(config.forms.anonymous_policy, page_path),
            reference,
        })
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference
    }

    fn drafts(&self) -> Option<FormStateStore<LocalStorage>> {
        match LocalStorage::open() {
            Ok(store) => Some(FormStateStore::new(store, &self.forms)),
            Err(e) => {
                warn(&e.to_string());
                None
            }
        }
    }

    /// Identifier of a tracked form: its position among `form.auto-save` decides anonymous ids.
    /// `None` for forms that are not tracked.
    fn form_id(&self, document: &Document, form: &DomForm) -> Option<FormId> {
        let index = dom_index_of(document, form.element())?;
        Some(
            self.resolver
                .resolve(form.explicit_id().as_deref(), index, &form.field_names()),
        )
    }

    /// Badges, board and status colors from a fresh row snapshot
    fn paint(&mut self, document: &Document) {
        dom::paint_badges(document, &self.engine, self.reference);
        dom::paint_status_badges(document, &self.engine);

        let rows = dom::read_contract_rows(document);
        let builder = self.engine.builder();
        let board = self.board.rebuild(&builder, &rows, self.reference);
        dom::render_board(document, board, &self.engine);
    }

    /// One restore pass per tracked form
    fn restore_forms(&self, document: &Document) {
        let Some(drafts) = self.drafts() else {
            return;
        };
        for (index, element) in tracked_forms(document).into_iter().enumerate() {
            let mut form = DomForm::new(element);
            let id = self
                .resolver
                .resolve(form.explicit_id().as_deref(), index, &form.field_names());
            drafts.restore_into(&id, &mut form);
        }
    }
}

/// `form.auto-save` elements in document order
fn tracked_forms(document: &Document) -> Vec<HtmlFormElement> {
    let Ok(nodes) = document.query_selector_all(forms::AUTO_SAVE_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<HtmlFormElement>().ok())
        .collect()
}

fn dom_index_of(document: &Document, form: &HtmlFormElement) -> Option<usize> {
    tracked_forms(document).iter().position(|f| f == form)
}

// WASM bindings
#[wasm_bindgen]
impl RentalPage {
    /// Page-ready entry point: paints derived state and restores saved drafts
    #[wasm_bindgen(js_name = onReady)]
    pub fn on_ready(config_json: Option<String>) -> Result<RentalPage, JsValue> {
        let config = RentalConfig::from_json(config_json.as_deref()).unwrap_or_else(|e| {
            warn(&format!("{}; using defaults", e));
            RentalConfig::default()
        });

        let document = document()?;
        let path = web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default();

        let mut page = RentalPage::new(&config, &path, LeaseCalendar::today())
            .map_err(|e| JsValue::from_str(&e))?;
        page.paint(&document);
        page.restore_forms(&document);

        if let Ok(store) = LocalStorage::open() {
            dom::apply_theme(&document, ThemePreference::is_dark(&store));
        }

        Ok(page)
    }

    /// Recompute badges and the board, e.g. after rows were replaced
    #[wasm_bindgen]
    pub fn refresh(&mut self) -> Result<(), JsValue> {
        let document = document()?;
        self.paint(&document);
        Ok(())
    }

    /// Override the reference date (`YYYY-MM-DD`) and repaint
    #[wasm_bindgen(js_name = setReferenceDate)]
    pub fn set_reference_date(&mut self, date: &str) -> Result<(), JsValue> {
        self.reference = LeaseCalendar::parse_end_date(date)
            .ok_or_else(|| JsValue::from_str(&format!("Invalid date: {}", date)))?;
        self.refresh()
    }

    /// Field-change entry point: saves the whole form
    #[wasm_bindgen(js_name = onFieldChange)]
    pub fn on_field_change(&self, form: HtmlFormElement) -> Result<(), JsValue> {
        let document = document()?;
        let form = DomForm::new(form);
        let Some(id) = self.form_id(&document, &form) else {
            return Ok(());
        };

        if let Some(mut drafts) = self.drafts() {
            if let Err(e) = drafts.persist_form(&id, &form) {
                warn(&format!("Could not save draft {}: {}", id, e));
            }
        }
        Ok(())
    }

    /// Submit entry point: drops the draft when configured to
    #[wasm_bindgen(js_name = onSubmit)]
    pub fn on_submit(&self, form: HtmlFormElement) -> Result<(), JsValue> {
        if !self.forms.clear_on_submit {
            return Ok(());
        }
        let document = document()?;
        let form = DomForm::new(form);
        let Some(id) = self.form_id(&document, &form) else {
            return Ok(());
        };

        if let Some(mut drafts) = self.drafts() {
            if let Err(e) = drafts.clear(&id) {
                warn(&format!("Could not clear draft {}: {}", id, e));
            }
        }
        Ok(())
    }

    /// Search-input entry point; returns the number of visible rows
    #[wasm_bindgen(js_name = filterTable)]
    pub fn filter_table(&self, input: HtmlInputElement) -> u32 {
        dom::apply_row_filter(&input, &self.engine).unwrap_or(0) as u32
    }

    /// Flip dark mode, persist it and return the new state
    #[wasm_bindgen(js_name = toggleDarkMode)]
    pub fn toggle_dark_mode(&self) -> Result<bool, JsValue> {
        let mut store = LocalStorage::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let dark =
            ThemePreference::toggle(&mut store).map_err(|e| JsValue::from_str(&e.to_string()))?;
        dom::apply_theme(&document()?, dark);
        Ok(dark)
    }

    /// Current board as JSON (`null` before the first paint)
    #[wasm_bindgen(js_name = getBoardJson)]
    pub fn get_board_json(&self) -> Result<String, JsValue> {
        self.board
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = getCriticalCount)]
    pub fn get_critical_count(&self) -> u32 {
        self.board.critical_count() as u32
    }

    #[wasm_bindgen(js_name = getWarningCount)]
    pub fn get_warning_count(&self) -> u32 {
        self.board.warning_count() as u32
    }
}

/// Classify a single end date against today (JSON `Urgency`)
#[wasm_bindgen]
pub fn classify_end_date(end_date: Option<String>) -> Result<String, JsValue> {
    let urgency = ExpiryEngine::new().classify(LeaseCalendar::today(), end_date.as_deref());
    serde_json::to_string(&urgency)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize urgency: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_defaults() {
        assert_eq!(RentalConfig::from_json(None).unwrap(), RentalConfig::default());
        assert_eq!(RentalConfig::from_json(Some("  ")).unwrap(), RentalConfig::default());
    }

    #[test]
    fn test_config_sections() {
        let config = RentalConfig::from_json(Some(
            r#"{"engine": {"labels": {"expired": "Expired"}}, "forms": {"clear_on_submit": true}}"#,
        ))
        .unwrap();
        assert_eq!(config.engine.labels.expired, "Expired");
        assert!(config.forms.clear_on_submit);
        assert_eq!(config.forms.key_prefix, "form_");
    }

    #[test]
    fn test_config_errors() {
        assert!(RentalConfig::from_json(Some("{")).is_err());
        let err = RentalConfig::from_json(Some(
            r#"{"engine": {"thresholds": {"critical_days": 40}}}"#,
        ))
        .unwrap_err();
        assert!(err.contains("Invalid config"));
    }

    #[test]
    fn test_page_starts_without_board() {
        let reference = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let page = RentalPage::new(&RentalConfig::default(), "/", reference).unwrap();
        assert_eq!(page.get_board_json().unwrap(), "null");
        assert_eq!(page.reference_date(), reference);
    }
}
