use csv::{ByteRecord, ReaderBuilder};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::holding::{Holding, HoldingTable};
use crate::storage::holding_store::HoldingStore;

/// The three columns every holdings file must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Symbol,
    Shares,
    BuyPrice,
}

impl Column {
    const ALL: [Column; 3] = [Column::Symbol, Column::Shares, Column::BuyPrice];

    /// Header text after normalization (trimmed + lowercased).
    fn key(self) -> &'static str {
        match self {
            Column::Symbol => "symbol",
            Column::Shares => "shares",
            Column::BuyPrice => "buyprice",
        }
    }

    /// Name reported back to the user.
    fn display_name(self) -> &'static str {
        match self {
            Column::Symbol => "symbol",
            Column::Shares => "shares",
            Column::BuyPrice => "buyPrice",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Header aliases, applied in this order and only while the canonical
/// column is still unresolved.
const HEADER_ALIASES: &[(&str, Column)] = &[
    ("ticker", Column::Symbol),
    ("stock", Column::Symbol),
    ("quantity", Column::Shares),
    ("qty", Column::Shares),
    ("amount", Column::Shares),
    ("price", Column::BuyPrice),
    ("cost", Column::BuyPrice),
    ("buy_price", Column::BuyPrice),
    ("purchase_price", Column::BuyPrice),
];

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Outcome of one successful ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    /// Id of the table that was built
    pub snapshot_id: Uuid,
    /// Data rows seen (header excluded)
    pub rows_read: usize,
    /// Rows that became holdings
    pub rows_admitted: usize,
    /// Rows discarded for empty cells, bad numbers or non-positive values
    pub rows_dropped: usize,
}

/// Turns loosely-structured CSV bytes into a `HoldingTable`.
///
/// Header names are matched case- and whitespace-insensitively, with a fixed
/// alias map (`Ticker`, `Qty`, `Cost`, ...). A missing required column aborts
/// the ingestion; anything wrong inside a single row only drops that row.
pub struct CsvIngestor;

impl CsvIngestor {
    pub fn new() -> Self {
        Self
    }

    /// Parse `raw` into a fresh table without touching any store.
    pub fn ingest(&self, raw: &[u8]) -> Result<(HoldingTable, IngestReport), CoreError> {
        let raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(raw);

        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).trim().to_lowercase())
            .collect();

        let columns = resolve_columns(&headers)?;

        let mut holdings = Vec::new();
        let mut rows_read = 0usize;
        let mut record = ByteRecord::new();

        loop {
            match reader.read_byte_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    rows_read += 1;
                    log::debug!("Dropping unreadable CSV row {rows_read}: {e}");
                    continue;
                }
            }
            rows_read += 1;

            match parse_row(&record, &columns) {
                Some(holding) => holdings.push(holding),
                None => log::debug!("Dropping CSV row {rows_read}: empty or invalid cell"),
            }
        }

        let table = HoldingTable::new(holdings);
        let report = IngestReport {
            snapshot_id: table.snapshot_id,
            rows_read,
            rows_admitted: table.len(),
            rows_dropped: rows_read - table.len(),
        };

        Ok((table, report))
    }

    /// Parse `raw` and, on success, replace the store's table wholesale.
    /// On a schema error the store keeps its previous table.
    pub fn ingest_into(&self, store: &HoldingStore, raw: &[u8]) -> Result<IngestReport, CoreError> {
        let (table, report) = self.ingest(raw)?;
        store.replace(table);
        log::info!(
            "Loaded holdings snapshot {}: {} admitted, {} dropped",
            report.snapshot_id,
            report.rows_admitted,
            report.rows_dropped
        );
        Ok(report)
    }
}

impl Default for CsvIngestor {
    fn default() -> Self {
        Self::new()
    }
}

/// Map each required column to its index in the normalized header row.
fn resolve_columns(headers: &[String]) -> Result<[usize; 3], CoreError> {
    let mut slots: [Option<usize>; 3] = [None; 3];

    for column in Column::ALL {
        slots[column.slot()] = headers.iter().position(|h| h == column.key());
    }

    for (alias, column) in HEADER_ALIASES {
        if slots[column.slot()].is_none() {
            slots[column.slot()] = headers.iter().position(|h| h == alias);
        }
    }

    match slots {
        [Some(symbol), Some(shares), Some(buy_price)] => Ok([symbol, shares, buy_price]),
        _ => {
            let missing = Column::ALL
                .iter()
                .filter(|c| slots[c.slot()].is_none())
                .map(|c| c.display_name().to_string())
                .collect();
            Err(CoreError::MissingColumns {
                missing,
                found: headers.to_vec(),
            })
        }
    }
}

/// Build a holding from one record, or `None` if any cell is empty, non-numeric
/// or out of range.
fn parse_row(record: &ByteRecord, columns: &[usize; 3]) -> Option<Holding> {
    let cell = |idx: usize| -> Option<String> {
        let text = String::from_utf8_lossy(record.get(idx)?).trim().to_string();
        (!text.is_empty()).then_some(text)
    };

    let symbol = cell(columns[Column::Symbol.slot()])?;
    let shares: f64 = cell(columns[Column::Shares.slot()])?.parse().ok()?;
    let buy_price: f64 = cell(columns[Column::BuyPrice.slot()])?.parse().ok()?;

    Holding::new(symbol, shares, buy_price).ok()
}
