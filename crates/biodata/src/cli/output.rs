//! Plain-text rendering for CLI output.

use std::fmt::Write;

use crate::record::Record;
use crate::storage::StoreStats;
use crate::validate::ValidationError;

/// Shown when a search finds nothing.
pub const NO_MATCHES: &str = "Tidak ada data yang cocok.";

/// Shown when the store holds no records.
pub const EMPTY_STORE: &str = "Belum ada data.";

const HEADERS: [&str; 7] = ["#", "Nama", "NIM", "Prodi", "Gender", "Hobi", "Waktu"];

/// Render records as an aligned text table.
///
/// Multi-line addresses are not shown; the table mirrors the listing columns.
/// Returns `empty_message` instead when there is nothing to show.
#[must_use]
pub fn render_table(records: &[Record], empty_message: &str) -> String {
    if records.is_empty() {
        return format!("{empty_message}\n");
    }

    let rows: Vec<[String; 7]> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            [
                (i + 1).to_string(),
                r.name.clone(),
                r.student_id.clone(),
                r.program.clone(),
                r.gender.clone(),
                r.hobbies_display(),
                r.timestamp.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

/// Render a stored record for confirmation, one field per line.
#[must_use]
pub fn render_record(record: &Record) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Nama:    {}", record.name);
    let _ = writeln!(out, "NIM:     {}", record.student_id);
    let _ = writeln!(out, "Prodi:   {}", record.program);
    let _ = writeln!(out, "Gender:  {}", record.gender);
    let _ = writeln!(out, "Hobi:    {}", record.hobbies_display());
    let _ = writeln!(out, "Alamat:  {}", record.address.replace('\n', "\n         "));
    let _ = writeln!(out, "Waktu:   {}", record.timestamp);
    out
}

/// Render validation errors, one message per line.
#[must_use]
pub fn render_errors(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| format!("{e}\n")).collect()
}

/// Render store statistics.
#[must_use]
pub fn render_stats(stats: &StoreStats, path: &std::path::Path) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "biodata status");
    let _ = writeln!(out, "--------------");
    let _ = writeln!(out, "Store:         {}", path.display());
    let _ = writeln!(out, "Records:       {}", stats.total_records);
    let _ = writeln!(out, "Size (bytes):  {}", stats.size_bytes);
    if let Some(first) = &stats.first_timestamp {
        let _ = writeln!(out, "Earliest:      {first}");
    }
    if let Some(last) = &stats.last_timestamp {
        let _ = writeln!(out, "Latest:        {last}");
    }
    out
}
