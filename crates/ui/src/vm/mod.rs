mod checklist_vm;

pub use checklist_vm::{
    ChecklistVm, RowTarget, RowToggle, RowVm, SectionVm, apply_reset, apply_toggle,
    map_checklist,
};
