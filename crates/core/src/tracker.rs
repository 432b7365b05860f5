use std::collections::HashMap;

use thiserror::Error;

use crate::model::{
    Checklist, ChecklistSnapshot, EntrySnapshot, FlagMap, ItemId, MasterItemId,
    OverallProgress, Section, SectionId, SectionKind, SectionProgress, SectionSnapshot,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Lookup failures. Mutations check ids before touching any flag.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrackerError {
    #[error("unknown item: {0}")]
    UnknownItem(ItemId),

    #[error("unknown section: {0}")]
    UnknownSection(SectionId),

    #[error("unknown master item: {0}")]
    UnknownMasterItem(MasterItemId),
}

//
// ─── TRACKER ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
struct MasterState {
    target: SectionId,
    done: bool,
}

/// Owns the completion state of one checklist.
///
/// Item flags are the only stored facts. Section status and master item
/// flags are projections, recomputed after every mutation.
#[derive(Debug, Clone)]
pub struct Tracker {
    checklist: Checklist,
    sections: HashMap<SectionId, usize>,
    done: HashMap<ItemId, bool>,
    masters: HashMap<MasterItemId, MasterState>,
}

impl Tracker {
    /// Creates a tracker with every item unchecked.
    #[must_use]
    pub fn new(checklist: Checklist) -> Self {
        let sections = checklist
            .sections()
            .iter()
            .enumerate()
            .map(|(idx, section)| (section.id().clone(), idx))
            .collect();
        let done = checklist
            .items()
            .map(|item| (item.id().clone(), false))
            .collect();
        let masters = checklist
            .masters()
            .map(|master| {
                (
                    master.id().clone(),
                    MasterState {
                        target: master.target().clone(),
                        done: false,
                    },
                )
            })
            .collect();

        let mut tracker = Self {
            checklist,
            sections,
            done,
            masters,
        };
        tracker.recompute_masters();
        tracker
    }

    /// Creates a tracker and applies previously persisted flags.
    #[must_use]
    pub fn with_flags(checklist: Checklist, flags: &FlagMap) -> Self {
        let mut tracker = Self::new(checklist);
        tracker.apply_flag_map(flags);
        tracker
    }

    #[must_use]
    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    /// # Errors
    ///
    /// Returns `TrackerError::UnknownItem` if the id is not part of the checklist.
    pub fn item_done(&self, id: &ItemId) -> Result<bool, TrackerError> {
        self.done
            .get(id)
            .copied()
            .ok_or_else(|| TrackerError::UnknownItem(id.clone()))
    }

    /// # Errors
    ///
    /// Returns `TrackerError::UnknownMasterItem` if the id is not part of the checklist.
    pub fn master_done(&self, id: &MasterItemId) -> Result<bool, TrackerError> {
        self.masters
            .get(id)
            .map(|state| state.done)
            .ok_or_else(|| TrackerError::UnknownMasterItem(id.clone()))
    }

    /// Set one item's flag. No other item changes.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownItem` without changing state if the id is unknown.
    pub fn set_item_done(&mut self, id: &ItemId, value: bool) -> Result<(), TrackerError> {
        let flag = self
            .done
            .get_mut(id)
            .ok_or_else(|| TrackerError::UnknownItem(id.clone()))?;
        *flag = value;
        self.recompute_masters();
        Ok(())
    }

    /// Set every item of a section. A roll-up section owns no items, so
    /// nothing changes for it.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownSection` without changing state if the id is unknown.
    pub fn set_section_done(&mut self, id: &SectionId, value: bool) -> Result<(), TrackerError> {
        let idx = *self
            .sections
            .get(id)
            .ok_or_else(|| TrackerError::UnknownSection(id.clone()))?;
        for item in self.checklist.sections()[idx].items() {
            if let Some(flag) = self.done.get_mut(item.id()) {
                *flag = value;
            }
        }
        self.recompute_masters();
        Ok(())
    }

    /// Toggling a master item cascades to its target section.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownMasterItem` if the id is unknown.
    pub fn set_master_done(&mut self, id: &MasterItemId, value: bool) -> Result<(), TrackerError> {
        let target = self.master_target(id)?.clone();
        self.set_section_done(&target, value)
    }

    /// # Errors
    ///
    /// Returns `TrackerError::UnknownSection` if the id is unknown.
    pub fn section_progress(&self, id: &SectionId) -> Result<SectionProgress, TrackerError> {
        let section = self.section(id)?;
        Ok(self.progress_of(section))
    }

    /// Sum over ordinary sections. Roll-up entries would count twice.
    #[must_use]
    pub fn overall_progress(&self) -> OverallProgress {
        self.checklist
            .sections()
            .iter()
            .filter(|section| !section.is_rollup())
            .fold(OverallProgress::default(), |acc, section| {
                acc.add(self.progress_of(section))
            })
    }

    /// Progress of the section a master item mirrors.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::UnknownMasterItem` or `TrackerError::UnknownSection`.
    pub fn master_status(&self, id: &MasterItemId) -> Result<SectionProgress, TrackerError> {
        let target = self.master_target(id)?;
        self.section_progress(target)
    }

    /// Uncheck every item.
    pub fn reset(&mut self) {
        for flag in self.done.values_mut() {
            *flag = false;
        }
        self.recompute_masters();
    }

    /// Current flags of every ordinary item.
    #[must_use]
    pub fn flag_map(&self) -> FlagMap {
        self.done
            .iter()
            .map(|(id, done)| (id.clone(), *done))
            .collect()
    }

    /// Apply persisted flags. Ids that are not in the checklist are ignored
    /// and items missing from the map keep their current value.
    ///
    /// Returns how many flags were applied.
    pub fn apply_flag_map(&mut self, flags: &FlagMap) -> usize {
        let mut applied = 0;
        for (id, value) in flags {
            if let Some(flag) = self.done.get_mut(id) {
                *flag = *value;
                applied += 1;
            }
        }
        self.recompute_masters();
        applied
    }

    #[must_use]
    pub fn snapshot(&self) -> ChecklistSnapshot {
        let sections = self
            .checklist
            .sections()
            .iter()
            .map(|section| self.section_snapshot(section))
            .collect();

        ChecklistSnapshot {
            title: self.checklist.title().to_owned(),
            sections,
            overall: self.overall_progress(),
        }
    }

    fn section_snapshot(&self, section: &Section) -> SectionSnapshot {
        let entries = match section.kind() {
            SectionKind::Ordinary => section
                .items()
                .iter()
                .map(|item| EntrySnapshot::Item {
                    id: item.id().clone(),
                    label: item.label().to_owned(),
                    done: self.done.get(item.id()).copied().unwrap_or(false),
                })
                .collect(),
            SectionKind::Rollup => section
                .masters()
                .iter()
                .map(|master| EntrySnapshot::Master {
                    id: master.id().clone(),
                    label: master.label().to_owned(),
                    target: master.target().clone(),
                    done: self.masters.get(master.id()).is_some_and(|state| state.done),
                    progress: self.section_progress(master.target()).unwrap_or_default(),
                })
                .collect(),
        };

        SectionSnapshot {
            id: section.id().clone(),
            title: section.title().to_owned(),
            rollup: section.is_rollup(),
            progress: self.progress_of(section),
            entries,
        }
    }

    fn section(&self, id: &SectionId) -> Result<&Section, TrackerError> {
        self.sections
            .get(id)
            .map(|&idx| &self.checklist.sections()[idx])
            .ok_or_else(|| TrackerError::UnknownSection(id.clone()))
    }

    fn master_target(&self, id: &MasterItemId) -> Result<&SectionId, TrackerError> {
        self.masters
            .get(id)
            .map(|state| &state.target)
            .ok_or_else(|| TrackerError::UnknownMasterItem(id.clone()))
    }

    fn progress_of(&self, section: &Section) -> SectionProgress {
        match section.kind() {
            SectionKind::Ordinary => ordinary_progress(section, &self.done),
            SectionKind::Rollup => {
                let total = section.masters().len();
                let checked = section
                    .masters()
                    .iter()
                    .filter(|master| self.masters.get(master.id()).is_some_and(|s| s.done))
                    .count();
                SectionProgress::from_counts(checked, total)
            }
        }
    }

    // Targets are always ordinary sections, so one pass settles every master.
    fn recompute_masters(&mut self) {
        let Self {
            checklist,
            sections,
            done,
            masters,
        } = self;
        let done: &HashMap<ItemId, bool> = done;
        for state in masters.values_mut() {
            state.done = sections
                .get(&state.target)
                .map(|&idx| &checklist.sections()[idx])
                .is_some_and(|section| ordinary_progress(section, done).is_complete);
        }
    }
}

fn ordinary_progress(section: &Section, done: &HashMap<ItemId, bool>) -> SectionProgress {
    let total = section.items().len();
    let checked = section
        .items()
        .iter()
        .filter(|item| done.get(item.id()).copied().unwrap_or(false))
        .count();
    SectionProgress::from_counts(checked, total)
}
