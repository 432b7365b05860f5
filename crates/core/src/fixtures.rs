//! Shared sample data for tests and demos.

use crate::model::{ChecklistDraft, ItemDraft, MasterItemDraft, SectionDraft};

/// A small game checklist: three ordinary sections and a roll-up section
/// with master items for the first two.
#[must_use]
pub fn sample_draft() -> ChecklistDraft {
    ChecklistDraft::new(
        "Hollow Depths 100%",
        vec![
            SectionDraft::ordinary(
                "act1",
                "Act I",
                vec![
                    ItemDraft::new("act1-boss", "Defeat the Warden"),
                    ItemDraft::new("act1-chest", "Open the sunken chest"),
                    ItemDraft::new("act1-npc", "Talk to the ferryman"),
                ],
            ),
            SectionDraft::ordinary(
                "act2",
                "Act II",
                vec![
                    ItemDraft::new("act2-boss", "Defeat the Choir"),
                    ItemDraft::new("act2-shop", "Buy the lantern upgrade"),
                ],
            ),
            SectionDraft::ordinary(
                "secrets",
                "Secrets",
                vec![
                    ItemDraft::new("secret-wall", "Find the false wall"),
                    ItemDraft::new("secret-bell", "Ring the drowned bell"),
                ],
            ),
            SectionDraft::rollup(
                "master",
                "Master checklist",
                vec![
                    MasterItemDraft::new("master-act1", "Act I complete", "act1"),
                    MasterItemDraft::new("master-act2", "Act II complete", "act2"),
                ],
            ),
        ],
    )
}
