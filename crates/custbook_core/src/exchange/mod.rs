//! Bulk CSV import/export for customer records.
//!
//! # Responsibility
//! - Load customers from a line-oriented CSV file with upsert semantics.
//! - Dump the full customer listing to CSV in name order.
//!
//! # Invariants
//! - Each imported row is committed on its own; an aborted import keeps the
//!   rows written before the failure.
//! - Import never writes a row that fails normalization/validation.
//! - Export is best effort; a failed export may leave a partial file.

mod csv_line;
mod physical_lines;

pub use csv_line::{csv_field, csv_line, parse_csv_line};
pub use physical_lines::PhysicalLines;

use crate::model::customer::{
    is_blank, normalize_email, normalize_phone, normalize_text, Customer,
};
use crate::repo::customer_repo::{CustomerRepository, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

/// Header line written at the top of every export.
pub const EXPORT_HEADER: &str = "Phone,Name,Address,Email";
/// Number of columns in an import row.
pub const IMPORT_COLUMNS: usize = 4;

/// Failure that aborts a bulk import or export.
#[derive(Debug)]
pub enum ExchangeError {
    Io(std::io::Error),
    Storage(RepoError),
}

impl Display for ExchangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ExchangeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ExchangeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RepoError> for ExchangeError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Counters reported by a completed import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Physical lines read, blank ones included.
    pub total: usize,
    pub added: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl Display for ImportSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Total: {} | Added: {} | Updated: {} | Skipped: {}",
            self.total, self.added, self.updated, self.skipped
        )
    }
}

enum RowOutcome {
    Added,
    Updated,
    Skipped,
}

/// Imports every line of `path` through `repo`.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. Blank, malformed and invalid
/// lines are counted as skipped. Valid rows are inserted, or updated when the
/// phone already exists.
///
/// # Errors
/// - `ExchangeError::Io` when the file cannot be opened or read.
/// - `ExchangeError::Storage` on the first storage failure; earlier rows stay committed.
pub fn import_csv<R: CustomerRepository>(
    repo: &R,
    path: impl AsRef<Path>,
) -> Result<ImportSummary, ExchangeError> {
    let started_at = Instant::now();
    let lines = PhysicalLines::new(BufReader::new(File::open(path)?));
    let mut summary = ImportSummary::default();

    for line in lines {
        let line = line?;
        summary.total += 1;

        match import_line(repo, &line)? {
            RowOutcome::Added => summary.added += 1,
            RowOutcome::Updated => summary.updated += 1,
            RowOutcome::Skipped => summary.skipped += 1,
        }
    }

    info!(
        "event=csv_import module=exchange status=ok duration_ms={} total={} added={} updated={} skipped={}",
        started_at.elapsed().as_millis(),
        summary.total,
        summary.added,
        summary.updated,
        summary.skipped
    );
    Ok(summary)
}

fn import_line<R: CustomerRepository>(repo: &R, line: &str) -> Result<RowOutcome, RepoError> {
    let Some(customer) = parse_import_row(line) else {
        return Ok(RowOutcome::Skipped);
    };

    if repo.insert(&customer)? {
        Ok(RowOutcome::Added)
    } else if repo.update(&customer)? {
        Ok(RowOutcome::Updated)
    } else {
        Ok(RowOutcome::Skipped)
    }
}

/// Parses, normalizes and validates one import line.
///
/// Returns `None` for blank lines, lines without exactly four fields, and
/// rows that fail validation.
pub fn parse_import_row(line: &str) -> Option<Customer> {
    if is_blank(line) {
        return None;
    }

    let fields = parse_csv_line(line);
    let [phone, name, address, email]: [String; IMPORT_COLUMNS] = fields.try_into().ok()?;

    let customer = Customer {
        phone: normalize_phone(&phone),
        name: normalize_text(Some(&name)),
        address: normalize_text(Some(&address)),
        email: normalize_email(Some(&email)),
    };
    customer.validate().ok()?;
    Some(customer)
}

/// Writes the header and every stored customer to `path`.
///
/// Returns the number of data rows written.
///
/// # Errors
/// - `ExchangeError::Storage` when the listing cannot be read; nothing is written.
/// - `ExchangeError::Io` when the file cannot be created or written.
pub fn export_csv<R: CustomerRepository>(
    repo: &R,
    path: impl AsRef<Path>,
) -> Result<usize, ExchangeError> {
    let started_at = Instant::now();
    let customers = repo.list_all()?;

    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{EXPORT_HEADER}")?;
    for customer in &customers {
        let line = csv_line([
            customer.phone.as_str(),
            customer.name.as_str(),
            customer.address.as_str(),
            customer.email_or_empty(),
        ]);
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;

    info!(
        "event=csv_export module=exchange status=ok duration_ms={} rows={}",
        started_at.elapsed().as_millis(),
        customers.len()
    );
    Ok(customers.len())
}
