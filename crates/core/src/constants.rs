// Column limits shared by validation and the SQLite schema.
pub const SKU_MAX_LEN: usize = 50;
pub const PRODUCT_NAME_MAX_LEN: usize = 200;
pub const PRODUCT_DESCRIPTION_MAX_LEN: usize = 500;
pub const WAREHOUSE_NAME_MAX_LEN: usize = 100;
pub const WAREHOUSE_NOTES_MAX_LEN: usize = 200;
pub const MOVEMENT_NOTE_MAX_LEN: usize = 200;

/// Thousands separator used when formatting quantities for display.
pub const THOUSANDS_SEPARATOR: char = '.';

/// Default timeout applied to outbound stock report requests.
pub const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 30;

/// Label of the report built from own-warehouse ledger balances.
pub const LEDGER_REPORT_LABEL: &str = "ledger";
