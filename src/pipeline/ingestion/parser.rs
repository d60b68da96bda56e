use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::error::{Result, StatsError};
use crate::types::RawTable;

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("valid selector"));
static HEADER_CELLS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("thead th").expect("valid selector"));
static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("tbody").expect("valid selector"));
static ROWS: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("valid selector"));
static DATA_CELLS: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("valid selector"));
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid selector"));

/// Turns a fetched page into header cell texts and row cell texts.
pub trait TableParser: Send + Sync {
    fn parse(&self, html: &str) -> Result<RawTable>;
}

/// Reads the first `<table>` of an HTML page.
///
/// Header labels come from `thead th`. Data rows are the `tr`s of the
/// `tbody` sections, or of the whole table outside `tfoot` when there is no
/// `tbody`; rows without a `td` are dropped. Cell text is the concatenation of its trimmed text nodes,
/// so a cell holding `<span>Bills</span><span>Bills</span>` reads
/// `"BillsBills"` and is left for canonicalization to collapse.
#[derive(Debug, Clone)]
pub struct HtmlTableParser {
    pub source_name: String,
    /// Read a cell's first link text instead of the whole cell when present
    pub prefer_link_text: bool,
}

impl HtmlTableParser {
    pub fn new(source_name: impl Into<String>, prefer_link_text: bool) -> Self {
        Self {
            source_name: source_name.into(),
            prefer_link_text,
        }
    }

    fn data_cell_text(&self, cell: ElementRef) -> String {
        if self.prefer_link_text {
            if let Some(link) = cell.select(&LINK).next() {
                return element_text(link);
            }
        }
        element_text(cell)
    }
}

impl TableParser for HtmlTableParser {
    fn parse(&self, html: &str) -> Result<RawTable> {
        debug!("Parsing {} bytes of {} markup", html.len(), self.source_name);
        let document = Html::parse_document(html);

        let table = document
            .select(&TABLE)
            .next()
            .ok_or_else(|| StatsError::TableNotFound {
                source_name: self.source_name.clone(),
            })?;

        let headers: Vec<String> = table.select(&HEADER_CELLS).map(element_text).collect();
        if headers.is_empty() {
            return Err(StatsError::HeadersNotFound {
                source_name: self.source_name.clone(),
            });
        }

        let rows: Vec<Vec<String>> = data_rows(table)
            .into_iter()
            .map(|tr| {
                tr.select(&DATA_CELLS)
                    .map(|td| self.data_cell_text(td))
                    .collect::<Vec<_>>()
            })
            .filter(|cells| !cells.is_empty())
            .collect();

        info!(
            "Parsed {} table: {} header cells, {} rows",
            self.source_name,
            headers.len(),
            rows.len()
        );
        Ok(RawTable { headers, rows })
    }
}

fn data_rows(table: ElementRef) -> Vec<ElementRef> {
    let bodies: Vec<ElementRef> = table.select(&BODY).collect();
    if bodies.is_empty() {
        return table.select(&ROWS).filter(|tr| !in_footer(*tr)).collect();
    }
    bodies.into_iter().flat_map(|body| body.select(&ROWS)).collect()
}

fn in_footer(row: ElementRef) -> bool {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .take_while(|el| el.value().name() != "table")
        .any(|el| el.value().name() == "tfoot")
}

/// Trimmed text nodes joined without a separator, inner whitespace collapsed.
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .map(|fragment| fragment.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|fragment| !fragment.is_empty())
        .collect()
}
