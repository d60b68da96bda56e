// Ingestion: turning fetched pages into raw tables

pub mod parser;

pub use parser::{HtmlTableParser, TableParser};
