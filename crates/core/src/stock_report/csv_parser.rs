//! Parsing of stock and mapping extracts.
//!
//! Extracts come from different tools, so the delimiter (`,` or `;`) is
//! sniffed and columns are found by header aliases.

use csv::{ReaderBuilder, StringRecord, Trim};

use super::stock_report_model::{StockReport, StockReportRow};
use crate::constants::THOUSANDS_SEPARATOR;
use crate::errors::{Error, ValidationError};
use crate::Result;

const SKU_ALIASES: &[&str] = &["sku", "codigo", "cod", "codigo_sku"];
const NAME_ALIASES: &[&str] = &["name", "nome", "produto", "product", "descricao"];
const QUANTITY_ALIASES: &[&str] = &["quantity", "quantidade", "estoque", "qtd", "stock"];
const INTERNAL_SKU_ALIASES: &[&str] = &["internal_sku", "sku_interno", "sku", "codigo"];
const EXTERNAL_SKU_ALIASES: &[&str] = &[
    "external_sku",
    "sku_externo",
    "sku_marketplace",
    "marketplace_sku",
];

fn csv_error(msg: impl Into<String>) -> Error {
    Error::Validation(ValidationError::Csv(msg.into()))
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

/// Picks `;` when the header line has more semicolons than commas.
fn detect_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or_default();
    if header.matches(';').count() > header.matches(',').count() {
        b';'
    } else {
        b','
    }
}

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ã' | 'â' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'õ' | 'ô' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            ' ' | '-' | '.' => '_',
            other => other,
        })
        .collect()
}

fn find_column(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
    aliases
        .iter()
        .find_map(|alias| normalized.iter().position(|h| h == alias))
}

fn read_records(content: &str) -> Result<(StringRecord, Vec<StringRecord>)> {
    let content = strip_bom(content);
    let mut reader = ReaderBuilder::new()
        .delimiter(detect_delimiter(content))
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(csv_error("CSV file is empty or has no header row"));
    }
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        records.push(record);
    }
    Ok((headers, records))
}

/// Parses a whole-unit quantity such as `1.234`, `15` or `12,00`.
fn parse_quantity(raw: &str, line: usize) -> Result<i64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Ok(0);
    }
    let whole = match cleaned.split_once(',') {
        Some((int_part, frac)) if frac.chars().all(|c| c == '0') => int_part,
        Some(_) => {
            return Err(csv_error(format!(
                "Line {}: quantity '{}' is not a whole number",
                line, raw
            )))
        }
        None => cleaned.as_str(),
    };
    whole.parse::<i64>().map_err(|_| {
        csv_error(format!("Line {}: invalid quantity '{}'", line, raw))
    })
}

/// Parses a `(SKU, name, quantity)` extract into a labelled report.
///
/// Rows without a SKU are skipped. The name column is optional.
pub fn parse_stock_report(label: &str, content: &str) -> Result<StockReport> {
    let (headers, records) = read_records(content)?;
    let sku_col = find_column(&headers, SKU_ALIASES)
        .ok_or_else(|| csv_error("Missing SKU column"))?;
    let qty_col = find_column(&headers, QUANTITY_ALIASES)
        .ok_or_else(|| csv_error("Missing quantity column"))?;
    let name_col = find_column(&headers, NAME_ALIASES);

    let mut rows = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        let sku = record.get(sku_col).unwrap_or_default();
        if sku.is_empty() {
            continue;
        }
        let quantity = parse_quantity(record.get(qty_col).unwrap_or_default(), line)?;
        let name = name_col
            .and_then(|c| record.get(c))
            .unwrap_or_default()
            .to_string();
        rows.push(StockReportRow {
            sku: sku.to_string(),
            name,
            quantity,
        });
    }
    Ok(StockReport {
        label: label.to_string(),
        rows,
    })
}

/// Parses a mapping extract into `(internal SKU, external SKU)` pairs.
///
/// An empty external SKU is kept; it means "remove the mapping".
pub fn parse_mapping_csv(content: &str) -> Result<Vec<(String, String)>> {
    let (headers, records) = read_records(content)?;
    let external_col = find_column(&headers, EXTERNAL_SKU_ALIASES)
        .ok_or_else(|| csv_error("Missing external SKU column"))?;
    let internal_col = find_column(&headers, INTERNAL_SKU_ALIASES)
        .filter(|c| *c != external_col)
        .ok_or_else(|| csv_error("Missing internal SKU column"))?;

    Ok(records
        .iter()
        .filter_map(|record| {
            let internal = record.get(internal_col).unwrap_or_default();
            if internal.is_empty() {
                return None;
            }
            Some((
                internal.to_string(),
                record.get(external_col).unwrap_or_default().to_string(),
            ))
        })
        .collect())
}
