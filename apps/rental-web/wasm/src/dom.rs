//! Reads contract rows out of the rendered tables and writes derived state back
//!
//! Every writer treats a missing element as a no-op for that element only.

use chrono::NaiveDate;
use expiry_engine::patterns::status_badge_class;
use expiry_engine::{Board, ExpiryEngine};
use shared_types::ContractRow;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

/// Cell holding the end date attribute and the days-remaining badge
pub const DAYS_CELL_SELECTOR: &str = ".dias-restantes";
pub const END_DATE_ATTR: &str = "data-fecha-fin";
pub const CONTRACT_ID_ATTR: &str = "data-contract-id";
pub const STATUS_BADGE_SELECTOR: &str = ".status-badge";
pub const BOARD_CONTAINER_ID: &str = "contratos-por-vencer";

/// Elements matching `selector` under `root`, skipping non-elements
fn select_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn select_all_in_document(document: &Document, selector: &str) -> Vec<Element> {
    document
        .document_element()
        .map(|root| select_all(&root, selector))
        .unwrap_or_default()
}

/// Trimmed text of the first match of `selector` under `root`
fn text_of(root: &Element, selector: &str) -> Option<String> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.text_content())
        .map(|text| text.trim().to_string())
}

/// Snapshot of one table row, if it is a contract row
pub fn contract_row(row: &Element) -> Option<ContractRow> {
    let days_cell = row.query_selector(DAYS_CELL_SELECTOR).ok().flatten()?;
    let status = text_of(row, STATUS_BADGE_SELECTOR)?;

    let id = row
        .get_attribute(CONTRACT_ID_ATTR)
        .map(|id| id.trim().to_string())
        .or_else(|| text_of(row, "td:first-child"))
        .filter(|id| !id.is_empty())?;

    Some(ContractRow {
        id,
        end_date: days_cell.get_attribute(END_DATE_ATTR),
        status,
        address: text_of(row, "td:nth-child(2)").unwrap_or_default(),
        tenant_name: text_of(row, "td:nth-child(3)").unwrap_or_default(),
    })
}

/// Immutable snapshot of every contract row on the page, in document order
pub fn read_contract_rows(document: &Document) -> Vec<ContractRow> {
    select_all_in_document(document, "tbody tr")
        .iter()
        .filter_map(contract_row)
        .collect()
}

/// Paint each days-remaining badge; returns how many badges were updated
pub fn paint_badges(document: &Document, engine: &ExpiryEngine, reference: NaiveDate) -> usize {
    document
        .document_element()
        .map_or(0, |root| paint_badges_in(&root, engine, reference))
}

/// Paint the days-remaining badges under `root`; cells without a badge are skipped
pub fn paint_badges_in(root: &Element, engine: &ExpiryEngine, reference: NaiveDate) -> usize {
    let mut painted = 0;
    for cell in select_all(root, DAYS_CELL_SELECTOR) {
        let Some(badge) = cell.query_selector(".badge").ok().flatten() else {
            continue;
        };

        let end_date = cell.get_attribute(END_DATE_ATTR);
        let state = engine.badge_for(reference, end_date.as_deref());
        badge.set_class_name(&state.class_name);
        if let Some(label) = state.label {
            badge.set_text_content(Some(&label));
        }
        painted += 1;
    }
    painted
}

/// Replace the board container's contents; `false` when the page has no board
pub fn render_board(document: &Document, board: &Board, engine: &ExpiryEngine) -> bool {
    match document.get_element_by_id(BOARD_CONTAINER_ID) {
        Some(container) => {
            container.set_inner_html(&board.to_html(engine.labels()));
            true
        }
        None => false,
    }
}

/// Recolor status badges by tone; returns how many were updated
pub fn paint_status_badges(document: &Document, engine: &ExpiryEngine) -> usize {
    let badges = select_all_in_document(document, STATUS_BADGE_SELECTOR);
    for badge in &badges {
        let status = badge.text_content().unwrap_or_default();
        badge.set_class_name(&status_badge_class(engine.status_tone(&status)));
    }
    badges.len()
}

/// Show only the rows of the search input's table that match its value.
///
/// Returns the number of visible rows, or `None` when the input is not
/// inside a card with a table.
pub fn apply_row_filter(input: &HtmlInputElement, engine: &ExpiryEngine) -> Option<usize> {
    let card = input.closest(".card").ok().flatten()?;
    let table = card.query_selector("table").ok().flatten()?;
    let rows = select_all(&table, "tbody tr");

    let texts: Vec<String> = rows
        .iter()
        .map(|row| row.text_content().unwrap_or_default())
        .collect();
    let visible = engine.filter_rows(&texts, &input.value());

    for (row, show) in rows.iter().zip(&visible) {
        if let Some(row) = row.dyn_ref::<HtmlElement>() {
            let display = if *show { "" } else { "none" };
            let _ = row.style().set_property("display", display);
        }
    }

    Some(visible.iter().filter(|v| **v).count())
}

/// Reflect the stored theme on `<body>`
pub fn apply_theme(document: &Document, dark: bool) {
    if let Some(body) = document.body() {
        let _ = body.class_list().toggle_with_force("dark-mode", dark);
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Mount a fixture under a fresh container and return it
    fn mount(html: &str) -> Element {
        let doc = document();
        let container = doc.create_element("div").unwrap();
        container.set_inner_html(html);
        doc.body().unwrap().append_child(&container).unwrap();
        container
    }

    const CONTRACTS_TABLE: &str = r#"
        <div class="card">
          <input class="table-search" id="buscar">
          <table><tbody>
            <tr>
              <td>12</td><td>Calle Falsa 123</td><td>Juan Pérez</td>
              <td><span class="status-badge">Activo</span></td>
              <td class="dias-restantes" data-fecha-fin="2024-01-08"><span class="badge">-</span></td>
            </tr>
            <tr>
              <td>13</td><td>Av. Siempreviva 742</td><td>Ana Gómez</td>
              <td><span class="status-badge">Inactivo</span></td>
              <td class="dias-restantes" data-fecha-fin="2024-01-04"><span class="badge">-</span></td>
            </tr>
            <tr data-contract-id="C-14">
              <td>14</td><td>Mitre 50</td><td>Luis Díaz</td>
              <td><span class="status-badge">Activo</span></td>
              <td class="dias-restantes" data-fecha-fin="not-a-date"><span class="badge">s/d</span></td>
            </tr>
            <tr>
              <td>15</td><td>Sin fecha</td><td>Nadie</td>
              <td><span class="status-badge">Activo</span></td>
              <td class="dias-restantes"></td>
            </tr>
          </tbody></table>
        </div>
    "#;

    #[wasm_bindgen_test]
    fn test_reads_contract_rows() {
        let container = mount(CONTRACTS_TABLE);
        let rows: Vec<_> = select_all(&container, "tbody tr")
            .iter()
            .filter_map(contract_row)
            .collect();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].id, "12");
        assert_eq!(rows[0].address, "Calle Falsa 123");
        assert_eq!(rows[0].tenant_name, "Juan Pérez");
        assert_eq!(rows[0].end_date.as_deref(), Some("2024-01-08"));
        assert_eq!(rows[2].id, "C-14");
        assert_eq!(rows[3].end_date, None);
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_paints_badges_and_skips_missing() {
        let container = mount(CONTRACTS_TABLE);
        let engine = ExpiryEngine::new();
        let painted = paint_badges_in(&container, &engine, date(2024, 1, 1));

        // Row 15 has no badge element
        let cells = select_all(&container, DAYS_CELL_SELECTOR);
        assert_eq!(cells.len(), 4);
        assert_eq!(painted, 3);
        assert_eq!(cells[3].inner_html(), "");
        let badges = select_all(&container, ".dias-restantes .badge");
        assert_eq!(badges.len(), 3);
        assert_eq!(badges[0].text_content().unwrap(), "7 días");
        assert!(badges[0].class_name().contains("urgency-critical"));
        assert_eq!(badges[2].text_content().unwrap(), "s/d");
        assert!(badges[2].class_name().contains("urgency-unknown"));
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_board_replaces_container() {
        let container = mount(&format!(
            r#"{}<div id="{}"><p>cargando</p></div>"#,
            CONTRACTS_TABLE, BOARD_CONTAINER_ID
        ));
        let engine = ExpiryEngine::new();
        let rows = read_contract_rows(&document());
        let board = engine.build_board(&rows, date(2024, 1, 1));
        assert!(render_board(&document(), &board, &engine));

        let html = document()
            .get_element_by_id(BOARD_CONTAINER_ID)
            .unwrap()
            .inner_html();
        assert!(!html.contains("cargando"));
        assert!(html.contains("Contrato #12"));
        assert!(!html.contains("Contrato #13"));
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_row_filter() {
        let container = mount(CONTRACTS_TABLE);
        let input: HtmlInputElement = container
            .query_selector("#buscar")
            .unwrap()
            .unwrap()
            .dyn_into()
            .unwrap();
        let engine = ExpiryEngine::new();

        input.set_value("siempreviva");
        assert_eq!(apply_row_filter(&input, &engine), Some(1));

        input.set_value("");
        assert_eq!(apply_row_filter(&input, &engine), Some(4));
        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_status_badges_recolored() {
        let container = mount(CONTRACTS_TABLE);
        paint_status_badges(&document(), &ExpiryEngine::new());
        let badges = select_all(&container, ".status-badge");
        assert!(badges[0].class_name().contains("bg-success"));
        assert!(badges[1].class_name().contains("bg-danger"));
        container.remove();
    }
}
