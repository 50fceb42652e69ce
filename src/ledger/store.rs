//! CSV-backed trade ledger
//!
//! Every write loads the whole table, applies the change in memory, writes
//! the result to a temporary file next to the ledger, renames it over the
//! original and syncs the directory. Readers only ever see the previous or
//! the next complete table.

use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::error::{LedgerError, StorageOp};
use super::id::TradeId;
use super::record::{check_cell, NewTrade, TradeRecord};
use super::schema::{self, FieldRegistry, SchemaMigration};

/// Result of a successful field update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Columns the update introduced, if any
    pub migration: Option<SchemaMigration>,
}

/// Result of a successful append
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    /// Identifier assigned to the new trade
    pub id: TradeId,
    /// Columns the appended journal fields introduced, if any
    pub migration: Option<SchemaMigration>,
}

/// In-memory copy of the ledger file
#[derive(Debug, Clone)]
struct Table {
    registry: FieldRegistry,
    rows: Vec<Vec<String>>,
    /// id -> row index, first occurrence wins
    index: HashMap<String, usize>,
}

impl Table {
    fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let registry = FieldRegistry::from_header(header);
        let mut index = HashMap::with_capacity(rows.len());
        if let Some(id_col) = registry.position(schema::ID) {
            for (i, row) in rows.iter().enumerate() {
                if let Some(id) = row.get(id_col) {
                    index.entry(id.clone()).or_insert(i);
                }
            }
        }
        Self {
            registry,
            rows,
            index,
        }
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.registry.position(name)
    }

    /// Add columns for unseen names and pad every row to the new width
    fn migrate<'a, I>(&mut self, names: I) -> Option<SchemaMigration>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let migration = self.registry.migrate(names)?;
        let width = self.registry.len();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
        Some(migration)
    }

    fn count_on_date(&self, date_cell: &str) -> usize {
        match self.column(schema::DATE) {
            Some(col) => self
                .rows
                .iter()
                .filter(|row| row.get(col).map(String::as_str) == Some(date_cell))
                .count(),
            None => 0,
        }
    }

    fn records(&self) -> Result<Vec<TradeRecord>, LedgerError> {
        self.rows
            .iter()
            .map(|row| TradeRecord::from_row(self.registry.fields(), row))
            .collect()
    }
}

/// Durable, appendable, amendable store of trade records
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// Open a ledger at `path`; the file is created on first append
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a trade and return its identifier
    pub fn append(&self, trade: &NewTrade) -> Result<TradeId, LedgerError> {
        self.append_with_outcome(trade).map(|outcome| outcome.id)
    }

    /// Append a trade, also reporting any columns its journal fields added
    pub fn append_with_outcome(&self, trade: &NewTrade) -> Result<AppendOutcome, LedgerError> {
        if trade.extra.iter().any(|(name, _)| name == schema::ID) {
            return Err(LedgerError::ImmutableField(schema::ID.to_string()));
        }
        for (name, value) in &trade.extra {
            check_cell(name, value)?;
        }

        let mut table = self.load()?;

        // Sequence is recomputed from the file on every append; a row removed
        // by hand can make the count collide, so skip taken ids.
        let mut sequence = table.count_on_date(&trade.date_cell()) + 1;
        let mut id = TradeId::new(trade.date, trade.time, sequence);
        while table.index.contains_key(id.as_str()) {
            sequence += 1;
            id = TradeId::new(trade.date, trade.time, sequence);
        }

        let cells = trade.cells();
        let migration = table.migrate(cells.iter().map(|(name, _)| *name));
        if let Some(ref m) = migration {
            log_migration(&self.path, m);
        }

        let mut row = vec![String::new(); table.registry.len()];
        if let Some(col) = table.column(schema::ID) {
            row[col] = id.to_string();
        }
        for (name, value) in cells {
            if let Some(col) = table.column(name) {
                row[col] = value;
            }
        }
        table.index.insert(id.to_string(), table.rows.len());
        table.rows.push(row);

        self.store(&table)?;

        tracing::info!(
            id = %id,
            sequence,
            path = %self.path.display(),
            "Appended trade"
        );

        Ok(AppendOutcome { id, migration })
    }

    /// Merge `fields` into the trade identified by `id`.
    ///
    /// Unknown column names become new columns for every row. Fails without
    /// touching the file when no trade carries `id` ([`LedgerError::NotFound`])
    /// or a typed column would not read back ([`LedgerError::InvalidValue`]).
    pub fn update_fields<I, K, V>(&self, id: &str, fields: I) -> Result<UpdateOutcome, LedgerError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields: Vec<(String, String)> = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        if fields.iter().any(|(name, _)| name == schema::ID) {
            return Err(LedgerError::ImmutableField(schema::ID.to_string()));
        }
        for (name, value) in &fields {
            check_cell(name, value)?;
        }

        let mut table = self.load()?;
        let row_idx = *table
            .index
            .get(id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;

        let migration = table.migrate(fields.iter().map(|(name, _)| name.as_str()));
        if let Some(ref m) = migration {
            log_migration(&self.path, m);
        }

        for (name, value) in fields {
            if let Some(col) = table.column(&name) {
                table.rows[row_idx][col] = value;
            }
        }

        self.store(&table)?;

        tracing::info!(id, path = %self.path.display(), "Updated trade");

        Ok(UpdateOutcome { migration })
    }

    /// All trades in append order
    pub fn records(&self) -> Result<Vec<TradeRecord>, LedgerError> {
        self.load()?.records()
    }

    /// Trades without an exit price
    pub fn open_trades(&self) -> Result<Vec<TradeRecord>, LedgerError> {
        Ok(self
            .records()?
            .into_iter()
            .filter(TradeRecord::is_open)
            .collect())
    }

    /// Look up one trade
    pub fn get(&self, id: &str) -> Result<Option<TradeRecord>, LedgerError> {
        let table = self.load()?;
        match table.index.get(id) {
            Some(&i) => TradeRecord::from_row(table.registry.fields(), &table.rows[i]).map(Some),
            None => Ok(None),
        }
    }

    /// Current header; empty when the ledger does not exist yet
    pub fn header(&self) -> Result<Vec<String>, LedgerError> {
        if !self.exists() {
            return Ok(Vec::new());
        }
        let table = self.load()?;
        Ok(table.registry.fields().to_vec())
    }

    /// Number of stored trades
    pub fn len(&self) -> Result<usize, LedgerError> {
        Ok(self.load()?.rows.len())
    }

    pub fn is_empty(&self) -> Result<bool, LedgerError> {
        Ok(self.len()? == 0)
    }

    pub fn exists(&self) -> bool {
        self.path
            .metadata()
            .map(|m| m.len() > 0)
            .unwrap_or(false)
    }

    fn load(&self) -> Result<Table, LedgerError> {
        if !self.path.exists() {
            return Ok(Table::new(Vec::new(), Vec::new()));
        }

        let file = File::open(&self.path)
            .map_err(|e| LedgerError::storage(StorageOp::Read, &self.path, e))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut header: Vec<String> = Vec::new();
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| LedgerError::csv(StorageOp::Read, &self.path, e))?;
            let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
            if header.is_empty() {
                header = cells;
                continue;
            }
            // Short rows are padded; cells beyond the header have no column.
            cells.resize(header.len(), String::new());
            rows.push(cells);
        }

        tracing::debug!(rows = rows.len(), path = %self.path.display(), "Loaded ledger");
        Ok(Table::new(header, rows))
    }

    fn store(&self, table: &Table) -> Result<(), LedgerError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .map_err(|e| LedgerError::storage(StorageOp::CreateDir, &self.path, e))?;

        let mut tmp = NamedTempFile::new_in(&dir)
            .map_err(|e| LedgerError::storage(StorageOp::Write, &self.path, e))?;
        {
            let mut writer = csv::Writer::from_writer(tmp.as_file_mut());
            writer
                .write_record(table.registry.fields())
                .map_err(|e| LedgerError::csv(StorageOp::Write, &self.path, e))?;
            for row in &table.rows {
                writer
                    .write_record(row)
                    .map_err(|e| LedgerError::csv(StorageOp::Write, &self.path, e))?;
            }
            writer
                .flush()
                .map_err(|e| LedgerError::storage(StorageOp::Write, &self.path, e))?;
        }
        tmp.as_file()
            .sync_all()
            .map_err(|e| LedgerError::storage(StorageOp::Write, &self.path, e))?;

        // Dropping `tmp` on any earlier return removes the temporary file.
        tmp.persist(&self.path)
            .map_err(|e| LedgerError::storage(StorageOp::Replace, &self.path, e.error))?;
        sync_dir(&dir).map_err(|e| LedgerError::storage(StorageOp::Replace, &self.path, e))?;

        tracing::debug!(
            rows = table.rows.len(),
            columns = table.registry.len(),
            path = %self.path.display(),
            "Wrote ledger"
        );
        Ok(())
    }
}

/// Flush the directory entry so the rename survives a crash
#[cfg(unix)]
fn sync_dir(dir: &Path) -> std::io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

fn log_migration(path: &Path, migration: &SchemaMigration) {
    for name in &migration.added {
        if !schema::is_known_field(name) {
            tracing::warn!(column = %name, "Adding column outside the journal field set");
        }
    }
    tracing::info!(
        added = ?migration.added,
        from_version = migration.from_version,
        to_version = migration.to_version,
        path = %path.display(),
        "Ledger schema migrated"
    );
}
