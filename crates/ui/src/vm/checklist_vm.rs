use checklist_core::model::{ChecklistSnapshot, EntrySnapshot, ItemId, MasterItemId};
use services::{ChecklistService, ChecklistServiceError};

use crate::i18n::{Locale, overall_label, progress_label};
use crate::views::ViewError;

/// What a checkbox row controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowTarget {
    Item(ItemId),
    Master(MasterItemId),
}

/// A user toggling one checkbox row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowToggle {
    pub target: RowTarget,
    pub done: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowVm {
    pub key: String,
    pub target: RowTarget,
    pub label: String,
    pub done: bool,
    /// Target section progress, shown next to master rows.
    pub status_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionVm {
    pub key: String,
    pub title: String,
    pub progress_label: String,
    pub rollup: bool,
    pub rows: Vec<RowVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChecklistVm {
    pub title: String,
    pub overall_label: String,
    pub sections: Vec<SectionVm>,
}

#[must_use]
pub fn map_checklist(snapshot: &ChecklistSnapshot, locale: Locale) -> ChecklistVm {
    let sections = snapshot
        .sections
        .iter()
        .map(|section| SectionVm {
            key: section.id.to_string(),
            title: section.title.clone(),
            progress_label: progress_label(locale, &section.progress),
            rollup: section.rollup,
            rows: section
                .entries
                .iter()
                .map(|entry| map_entry(entry, locale))
                .collect(),
        })
        .collect();

    ChecklistVm {
        title: snapshot.title.clone(),
        overall_label: overall_label(locale, &snapshot.overall),
        sections,
    }
}

fn map_entry(entry: &EntrySnapshot, locale: Locale) -> RowVm {
    match entry {
        EntrySnapshot::Item { id, label, done } => RowVm {
            key: id.to_string(),
            target: RowTarget::Item(id.clone()),
            label: label.clone(),
            done: *done,
            status_label: None,
        },
        EntrySnapshot::Master {
            id,
            label,
            done,
            progress,
            ..
        } => RowVm {
            key: id.to_string(),
            target: RowTarget::Master(id.clone()),
            label: label.clone(),
            done: *done,
            status_label: Some(progress_label(locale, progress)),
        },
    }
}

/// Forward a row toggle to the service.
///
/// # Errors
///
/// Returns `ViewError::SaveFailed` when the change was applied but not
/// saved, `ViewError::Unknown` for anything else.
pub async fn apply_toggle(
    checklist: &ChecklistService,
    toggle: &RowToggle,
) -> Result<(), ViewError> {
    let result = match &toggle.target {
        RowTarget::Item(id) => checklist.set_item_done(id, toggle.done).await,
        RowTarget::Master(id) => checklist.set_master_done(id, toggle.done).await,
    };
    result.map_err(view_error)
}

/// Reset after the user confirmed.
///
/// # Errors
///
/// Same mapping as [`apply_toggle`].
pub async fn apply_reset(checklist: &ChecklistService) -> Result<(), ViewError> {
    checklist.reset().await.map_err(view_error)
}

fn view_error(err: ChecklistServiceError) -> ViewError {
    if err.is_persistence_unavailable() {
        ViewError::SaveFailed
    } else {
        tracing::warn!(error = %err, "checklist intent rejected");
        ViewError::Unknown
    }
}
