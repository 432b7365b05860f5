use std::collections::BTreeMap;

use crate::model::ids::ItemId;

/// Persisted shape of the tracker: completion flag per ordinary item.
pub type FlagMap = BTreeMap<ItemId, bool>;

/// Completion counts for a single section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SectionProgress {
    pub checked: usize,
    pub total: usize,
    pub is_complete: bool,
}

impl SectionProgress {
    /// An empty section is never complete.
    #[must_use]
    pub fn from_counts(checked: usize, total: usize) -> Self {
        Self {
            checked,
            total,
            is_complete: total > 0 && checked == total,
        }
    }
}

/// Raw fraction across all ordinary sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OverallProgress {
    pub checked: usize,
    pub total: usize,
}

impl OverallProgress {
    #[must_use]
    pub fn new(checked: usize, total: usize) -> Self {
        Self { checked, total }
    }

    /// Adds one section's counts to the running total.
    #[must_use]
    pub fn add(self, section: SectionProgress) -> Self {
        Self {
            checked: self.checked + section.checked,
            total: self.total + section.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_section_is_never_complete() {
        let progress = SectionProgress::from_counts(0, 0);
        assert!(!progress.is_complete);
    }

    #[test]
    fn complete_only_when_all_checked() {
        assert!(!SectionProgress::from_counts(2, 3).is_complete);
        assert!(SectionProgress::from_counts(3, 3).is_complete);
    }

    #[test]
    fn overall_sums_sections() {
        let overall = OverallProgress::default()
            .add(SectionProgress::from_counts(1, 3))
            .add(SectionProgress::from_counts(2, 2));
        assert_eq!(overall, OverallProgress::new(3, 5));
    }
}
