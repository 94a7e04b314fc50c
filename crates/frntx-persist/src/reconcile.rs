//! Merchant file reconciliation: make the stored set match the desired set.

use crate::error::Result;
use crate::models::MerchantFileRecord;
use crate::trait_client::MirrorStore;

/// Changes needed to turn `existing` into `desired`, keyed by file id.
#[derive(Debug, Default)]
pub struct FileChanges {
    pub to_add: Vec<MerchantFileRecord>,
    pub to_remove: Vec<String>,
}

impl FileChanges {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Pure diff: files present in `desired` but not `existing` are added,
/// files present in `existing` but not `desired` are removed. Files in both
/// are left alone.
pub fn diff_merchant_files(
    existing: &[MerchantFileRecord],
    desired: &[MerchantFileRecord],
) -> FileChanges {
    let to_add = desired
        .iter()
        .filter(|file| !existing.iter().any(|e| e.id == file.id))
        .cloned()
        .collect();

    let to_remove = existing
        .iter()
        .filter(|file| !desired.iter().any(|d| d.id == file.id))
        .map(|file| file.id.clone())
        .collect();

    FileChanges { to_add, to_remove }
}

/// Apply the diff against the store. Removals run first so a replaced file
/// never coexists with its successor.
pub async fn reconcile_merchant_files(
    store: &dyn MirrorStore,
    merchant_id: &str,
    desired: Vec<MerchantFileRecord>,
) -> Result<()> {
    let existing = store.list_merchant_files(merchant_id).await?;
    let changes = diff_merchant_files(&existing, &desired);

    if changes.is_empty() {
        return Ok(());
    }

    tracing::debug!(
        merchant_id,
        adding = changes.to_add.len(),
        removing = changes.to_remove.len(),
        "reconciling merchant files"
    );

    for file_id in &changes.to_remove {
        store.delete_merchant_file(file_id).await?;
    }
    for file in changes.to_add {
        store.add_merchant_file(file).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(id: &str) -> MerchantFileRecord {
        let mut record = MerchantFileRecord::new("m1", id, "http://x/", 1, "application/pdf");
        record.id = id.to_string();
        record
    }

    #[test]
    fn identical_sets_need_no_changes() {
        let existing = vec![file("a"), file("b")];
        let desired = vec![file("a"), file("b")];

        let changes = diff_merchant_files(&existing, &desired);
        assert!(changes.is_empty());
    }

    #[test]
    fn new_files_are_added_and_missing_files_removed() {
        let existing = vec![file("a"), file("b")];
        let desired = vec![file("b"), file("c")];

        let changes = diff_merchant_files(&existing, &desired);
        assert_eq!(changes.to_add.len(), 1);
        assert_eq!(changes.to_add[0].id, "c");
        assert_eq!(changes.to_remove, vec!["a".to_string()]);
    }

    #[test]
    fn empty_desired_removes_everything() {
        let existing = vec![file("a"), file("b")];
        let changes = diff_merchant_files(&existing, &[]);

        assert!(changes.to_add.is_empty());
        assert_eq!(changes.to_remove.len(), 2);
    }

    #[test]
    fn diff_is_stable_across_repeated_calls() {
        let existing = vec![file("a")];
        let desired = vec![file("a"), file("b")];

        let first = diff_merchant_files(&existing, &desired);
        let second = diff_merchant_files(&existing, &desired);
        assert_eq!(first.to_add.len(), second.to_add.len());
        assert_eq!(first.to_remove, second.to_remove);
    }
}
