mod checklist;
mod ids;
mod progress;
mod snapshot;

pub use ids::{ItemId, MasterItemId, ParseIdError, SectionId};

pub use checklist::{
    Checklist, ChecklistDraft, ChecklistError, Item, ItemDraft, MasterItem, MasterItemDraft,
    Section, SectionDraft, SectionKind,
};
pub use progress::{FlagMap, OverallProgress, SectionProgress};
pub use snapshot::{ChecklistSnapshot, EntrySnapshot, SectionSnapshot};
