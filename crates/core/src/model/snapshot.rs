use crate::model::ids::{ItemId, MasterItemId, SectionId};
use crate::model::progress::{OverallProgress, SectionProgress};

/// Read model handed to presentation layers after each change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistSnapshot {
    pub title: String,
    pub sections: Vec<SectionSnapshot>,
    pub overall: OverallProgress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSnapshot {
    pub id: SectionId,
    pub title: String,
    pub rollup: bool,
    pub progress: SectionProgress,
    pub entries: Vec<EntrySnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySnapshot {
    Item {
        id: ItemId,
        label: String,
        done: bool,
    },
    Master {
        id: MasterItemId,
        label: String,
        target: SectionId,
        done: bool,
        /// Progress of the target section.
        progress: SectionProgress,
    },
}

impl EntrySnapshot {
    #[must_use]
    pub fn done(&self) -> bool {
        match self {
            EntrySnapshot::Item { done, .. } | EntrySnapshot::Master { done, .. } => *done,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            EntrySnapshot::Item { label, .. } | EntrySnapshot::Master { label, .. } => label,
        }
    }
}

impl ChecklistSnapshot {
    #[must_use]
    pub fn section(&self, id: &SectionId) -> Option<&SectionSnapshot> {
        self.sections.iter().find(|section| &section.id == id)
    }
}
