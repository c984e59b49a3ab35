//! Archiver - names and persists the finished report.

use anyhow::{Context, Result};
use rand::Rng;
use tracing::info;

use crate::common::Checklist;
use crate::kernel::BaseObjectStore;

/// Length of the random suffix appended to every archived name.
const SUFFIX_LENGTH: usize = 10;

const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random lowercase-alphanumeric suffix.
///
/// No uniqueness registry exists, so collision resistance is probabilistic:
/// 36^10 names make a repeat negligible, not impossible.
pub fn random_suffix(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

/// Assign the authoritative archive name and persist both artifacts.
///
/// The synthesizer-suggested `file_name` is never used directly; the suffix
/// is appended first, and the report carries the final name into its own
/// serialization. The JSON and document uploads target distinct names and
/// run concurrently. If either fails the archival fails; an object the
/// sibling upload already persisted is left in place, since archived
/// artifacts have no delete path.
pub async fn archive_report(
    report: &mut Checklist,
    document: &[u8],
    object_store: &dyn BaseObjectStore,
) -> Result<()> {
    report.file_name = format!("{}{}", report.file_name, random_suffix(SUFFIX_LENGTH));

    let json =
        serde_json::to_string_pretty(report).context("failed to serialize report for archival")?;

    let json_name = format!("{}.json", report.file_name);
    let document_name = format!("{}.pdf", report.file_name);

    tokio::try_join!(
        object_store.put_object(&json_name, json.into_bytes(), "application/json"),
        object_store.put_object(&document_name, document.to_vec(), "application/pdf"),
    )
    .context("archival upload failed")?;

    info!(file_name = %report.file_name, "Report archived");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::MockObjectStore;

    fn report_fixture() -> Checklist {
        Checklist {
            summary: "A verbose narrative.".to_string(),
            sections: vec![],
            original_document: serde_json::json!({"text_content": "Cash Count"}),
            file_name: "bangkok_august_2021".to_string(),
        }
    }

    #[test]
    fn test_suffix_length_and_alphabet() {
        let suffix = random_suffix(10);

        assert_eq!(suffix.len(), 10);
        assert!(suffix
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_final_name_is_base_plus_suffix() {
        let store = MockObjectStore::new();
        let mut report = report_fixture();

        archive_report(&mut report, b"%PDF-", &store).await.unwrap();

        assert!(report.file_name.starts_with("bangkok_august_2021"));
        assert_eq!(report.file_name.len(), "bangkok_august_2021".len() + 10);
        assert_ne!(report.file_name, "bangkok_august_2021");
    }

    #[tokio::test]
    async fn test_both_artifacts_persisted() {
        let store = MockObjectStore::new();
        let mut report = report_fixture();

        archive_report(&mut report, b"%PDF-", &store).await.unwrap();

        let puts = store.puts();
        assert_eq!(puts.len(), 2);

        let json_put = puts.iter().find(|o| o.name.ends_with(".json")).unwrap();
        let pdf_put = puts.iter().find(|o| o.name.ends_with(".pdf")).unwrap();

        assert_eq!(json_put.name, format!("{}.json", report.file_name));
        assert_eq!(json_put.content_type, "application/json");
        assert_eq!(pdf_put.name, format!("{}.pdf", report.file_name));
        assert_eq!(pdf_put.content_type, "application/pdf");
        assert_eq!(pdf_put.bytes, b"%PDF-");
    }

    #[tokio::test]
    async fn test_archived_json_carries_final_name() {
        let store = MockObjectStore::new();
        let mut report = report_fixture();

        archive_report(&mut report, b"%PDF-", &store).await.unwrap();

        let puts = store.puts();
        let json_put = puts.iter().find(|o| o.name.ends_with(".json")).unwrap();
        let archived: Checklist = serde_json::from_slice(&json_put.bytes).unwrap();

        assert_eq!(archived, report);
    }

    #[tokio::test]
    async fn test_document_upload_failure_fails_archival() {
        let store = MockObjectStore::failing_when_name_contains(".pdf");
        let mut report = report_fixture();

        let result = archive_report(&mut report, b"%PDF-", &store).await;

        assert!(result.is_err());
        // The sibling JSON upload already landed and stays in place.
        let names = store.stored_names();
        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with(".json"));
    }
}
