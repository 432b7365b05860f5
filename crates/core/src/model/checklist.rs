use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{ItemId, MasterItemId, ParseIdError, SectionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChecklistError {
    #[error("checklist title cannot be empty")]
    EmptyTitle,

    #[error("section {0} has an empty title")]
    EmptySectionTitle(SectionId),

    #[error("entry {0} has an empty label")]
    EmptyLabel(String),

    #[error(transparent)]
    InvalidId(#[from] ParseIdError),

    #[error("section id {0} is used more than once")]
    DuplicateSection(SectionId),

    #[error("checkbox id {0} is used more than once")]
    DuplicateEntry(String),

    #[error("roll-up section {section} cannot hold item {item}")]
    ItemInRollup { section: SectionId, item: ItemId },

    #[error("section {section} is not a roll-up section and cannot hold master item {master}")]
    MasterOutsideRollup {
        section: SectionId,
        master: MasterItemId,
    },

    #[error("master item {master} targets unknown section {target}")]
    UnknownTarget {
        master: MasterItemId,
        target: SectionId,
    },

    #[error("master item {master} targets roll-up section {target}")]
    RollupTarget {
        master: MasterItemId,
        target: SectionId,
    },
}

//
// ─── DRAFTS ────────────────────────────────────────────────────────────────────
//

/// Unvalidated checklist definition, usually read from a JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistDraft {
    pub title: String,
    #[serde(default)]
    pub sections: Vec<SectionDraft>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDraft {
    pub id: String,
    pub title: String,
    /// Marks the roll-up section. Its entries are master items and it is
    /// left out of the overall tally.
    #[serde(default)]
    pub rollup: bool,
    #[serde(default)]
    pub items: Vec<ItemDraft>,
    #[serde(default)]
    pub masters: Vec<MasterItemDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterItemDraft {
    pub id: String,
    pub label: String,
    pub target: String,
}

impl ItemDraft {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

impl MasterItemDraft {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            target: target.into(),
        }
    }
}

impl SectionDraft {
    /// Ordinary section holding the given items.
    #[must_use]
    pub fn ordinary(id: impl Into<String>, title: impl Into<String>, items: Vec<ItemDraft>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            rollup: false,
            items,
            masters: Vec::new(),
        }
    }

    /// Roll-up section holding the given master items.
    #[must_use]
    pub fn rollup(
        id: impl Into<String>,
        title: impl Into<String>,
        masters: Vec<MasterItemDraft>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            rollup: true,
            items: Vec::new(),
            masters,
        }
    }
}

impl ChecklistDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, sections: Vec<SectionDraft>) -> Self {
        Self {
            title: title.into(),
            sections,
        }
    }

    /// Validate the draft into a checklist a tracker can be built from.
    ///
    /// # Errors
    ///
    /// Returns `ChecklistError` if ids are blank or reused, labels/titles are
    /// empty, entries sit in the wrong kind of section, or a master item
    /// targets a missing or roll-up section.
    pub fn validate(self) -> Result<Checklist, ChecklistError> {
        let title = normalize(self.title).ok_or(ChecklistError::EmptyTitle)?;

        let mut kinds: HashMap<SectionId, SectionKind> = HashMap::new();
        let mut entry_ids: HashSet<String> = HashSet::new();
        let mut sections = Vec::with_capacity(self.sections.len());

        for draft in self.sections {
            let id = SectionId::new(&draft.id)?;
            let section_title = normalize(draft.title)
                .ok_or_else(|| ChecklistError::EmptySectionTitle(id.clone()))?;
            let kind = if draft.rollup {
                SectionKind::Rollup
            } else {
                SectionKind::Ordinary
            };
            if kinds.insert(id.clone(), kind).is_some() {
                return Err(ChecklistError::DuplicateSection(id));
            }

            let mut items = Vec::with_capacity(draft.items.len());
            for item in draft.items {
                let item_id = ItemId::new(&item.id)?;
                if kind == SectionKind::Rollup {
                    return Err(ChecklistError::ItemInRollup {
                        section: id,
                        item: item_id,
                    });
                }
                if !entry_ids.insert(item_id.as_str().to_owned()) {
                    return Err(ChecklistError::DuplicateEntry(item_id.into()));
                }
                let label = normalize(item.label)
                    .ok_or_else(|| ChecklistError::EmptyLabel(item_id.to_string()))?;
                items.push(Item {
                    id: item_id,
                    label,
                    section_id: id.clone(),
                });
            }

            let mut masters = Vec::with_capacity(draft.masters.len());
            for master in draft.masters {
                let master_id = MasterItemId::new(&master.id)?;
                if kind == SectionKind::Ordinary {
                    return Err(ChecklistError::MasterOutsideRollup {
                        section: id,
                        master: master_id,
                    });
                }
                if !entry_ids.insert(master_id.as_str().to_owned()) {
                    return Err(ChecklistError::DuplicateEntry(master_id.into()));
                }
                let label = normalize(master.label)
                    .ok_or_else(|| ChecklistError::EmptyLabel(master_id.to_string()))?;
                let target = SectionId::new(&master.target)?;
                masters.push(MasterItem {
                    id: master_id,
                    label,
                    target,
                });
            }

            sections.push(Section {
                id,
                title: section_title,
                kind,
                items,
                masters,
            });
        }

        // Targets can point forward, so they are checked once every section is known.
        for master in sections.iter().flat_map(|section| section.masters.iter()) {
            match kinds.get(&master.target) {
                None => {
                    return Err(ChecklistError::UnknownTarget {
                        master: master.id.clone(),
                        target: master.target.clone(),
                    });
                }
                Some(SectionKind::Rollup) => {
                    return Err(ChecklistError::RollupTarget {
                        master: master.id.clone(),
                        target: master.target.clone(),
                    });
                }
                Some(SectionKind::Ordinary) => {}
            }
        }

        Ok(Checklist { title, sections })
    }
}

//
// ─── VALIDATED MODEL ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Ordinary,
    Rollup,
}

/// A trackable checkbox belonging to exactly one ordinary section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    label: String,
    section_id: SectionId,
}

impl Item {
    #[must_use]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn section_id(&self) -> &SectionId {
        &self.section_id
    }
}

/// Derived proxy for a whole ordinary section.
///
/// It carries no completion flag of its own; the tracker derives it from
/// the target section after every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterItem {
    id: MasterItemId,
    label: String,
    target: SectionId,
}

impl MasterItem {
    #[must_use]
    pub fn id(&self) -> &MasterItemId {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn target(&self) -> &SectionId {
        &self.target
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    id: SectionId,
    title: String,
    kind: SectionKind,
    items: Vec<Item>,
    masters: Vec<MasterItem>,
}

impl Section {
    #[must_use]
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    #[must_use]
    pub fn is_rollup(&self) -> bool {
        self.kind == SectionKind::Rollup
    }

    /// Items in display order. Always empty for roll-up sections.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Master items in display order. Always empty for ordinary sections.
    #[must_use]
    pub fn masters(&self) -> &[MasterItem] {
        &self.masters
    }
}

/// A validated checklist definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checklist {
    title: String,
    sections: Vec<Section>,
}

impl Checklist {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.sections.iter().flat_map(|section| section.items.iter())
    }

    pub fn masters(&self) -> impl Iterator<Item = &MasterItem> {
        self.sections.iter().flat_map(|section| section.masters.iter())
    }
}

fn normalize(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
