//! Listing and substring search over stored records.

use crate::record::Record;

/// Return records whose name, student id, or program contains `query`.
///
/// Matching is case-insensitive using Unicode lowercasing, and the query is
/// trimmed first. Gender, hobbies, address and timestamp are never searched.
/// Results keep store order. A blank query matches every record.
#[must_use]
pub fn search(records: &[Record], query: &str) -> Vec<Record> {
    let needle = query.trim().to_lowercase();
    records
        .iter()
        .filter(|record| matches(record, &needle))
        .cloned()
        .collect()
}

/// Return every record in store order.
#[must_use]
pub fn list(records: &[Record]) -> Vec<Record> {
    records.to_vec()
}

/// `needle` must already be lowercased.
fn matches(record: &Record, needle: &str) -> bool {
    [&record.name, &record.student_id, &record.program]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, student_id: &str, program: &str) -> Record {
        Record {
            timestamp: "2025-10-17T09:30:00+07:00".to_string(),
            name: name.to_string(),
            student_id: student_id.to_string(),
            program: program.to_string(),
            gender: "Laki-laki".to_string(),
            hobbies: vec!["Coding".to_string()],
            address: "Jl. Informatika".to_string(),
        }
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_case_insensitive() {
        let records = vec![record("Jamaludin", "3337240000", "Teknik Elektro")];
        assert_eq!(search(&records, "jama").len(), 1);
        assert_eq!(search(&records, "JAMA").len(), 1);
        assert_eq!(search(&records, "JaMaLuDiN").len(), 1);
    }

    #[test]
    fn test_matches_each_field_independently() {
        let records = vec![
            record("Rin", "111", "Informatika"),
            record("Budi", "3337240002", "Sistem Informasi"),
            record("Format Man", "999", "Teknik Elektro"),
        ];

        assert_eq!(
            names(&search(&records, "format")),
            vec!["Rin", "Budi", "Format Man"]
        );
        assert_eq!(names(&search(&records, "33372")), vec!["Budi"]);
        assert_eq!(names(&search(&records, "elektro")), vec!["Format Man"]);
    }

    #[test]
    fn test_unsearched_fields_ignored() {
        let mut rec = record("Rin", "1", "Informatika");
        rec.gender = "Perempuan".to_string();
        rec.hobbies = vec!["Gaming".to_string()];
        rec.address = "Jl. Serang".to_string();

        let records = vec![rec];
        assert!(search(&records, "perempuan").is_empty());
        assert!(search(&records, "gaming").is_empty());
        assert!(search(&records, "serang").is_empty());
        assert!(search(&records, "2025").is_empty());
    }

    #[test]
    fn test_preserves_store_order() {
        let records = vec![
            record("Ana", "3", "X"),
            record("Dana", "1", "X"),
            record("Hana", "2", "X"),
        ];
        assert_eq!(names(&search(&records, "ana")), vec!["Ana", "Dana", "Hana"]);
    }

    #[test]
    fn test_unicode_case_folding() {
        let records = vec![record("Ömer Çelik", "1", "X"), record("ΣΟΦΙΑ", "2", "X")];
        assert_eq!(names(&search(&records, "ömer")), vec!["Ömer Çelik"]);
        assert_eq!(names(&search(&records, "ÇELIK")), vec!["Ömer Çelik"]);
        assert_eq!(names(&search(&records, "σοφ")), vec!["ΣΟΦΙΑ"]);
    }

    #[test]
    fn test_query_is_trimmed() {
        let records = vec![record("Rin", "1", "X")];
        assert_eq!(search(&records, "  rin \n").len(), 1);
    }

    #[test]
    fn test_no_matches() {
        let records = vec![record("Rin", "1", "Informatika")];
        assert!(search(&records, "nonexistent").is_empty());
    }

    #[test]
    fn test_blank_query_matches_all() {
        let records = vec![record("A", "1", "X"), record("B", "2", "Y")];
        assert_eq!(search(&records, "   ").len(), 2);
    }

    #[test]
    fn test_search_empty_store() {
        assert!(search(&[], "rin").is_empty());
    }

    #[test]
    fn test_list() {
        let records = vec![record("B", "1", "X"), record("A", "2", "Y")];
        assert_eq!(names(&list(&records)), vec!["B", "A"]);
        assert!(list(&[]).is_empty());
    }
}
