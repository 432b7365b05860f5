//! Plain-text rendering of the checklist for the non-UI subcommands.

use std::fmt::Write as _;

use ui::vm::ChecklistVm;

/// One line per section and row, followed by the overall line.
#[must_use]
pub fn render_status(vm: &ChecklistVm) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", vm.title);
    for section in &vm.sections {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} {}", section.title, section.progress_label);
        for row in &section.rows {
            let mark = if row.done { 'x' } else { ' ' };
            match &row.status_label {
                Some(status) => {
                    let _ = writeln!(out, "  [{mark}] {} {status} ({})", row.label, row.key);
                }
                None => {
                    let _ = writeln!(out, "  [{mark}] {} ({})", row.label, row.key);
                }
            }
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", vm.overall_label);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use checklist_core::fixtures::sample_draft;
    use checklist_core::model::ItemId;
    use services::AppServices;
    use ui::Locale;
    use ui::vm::map_checklist;

    #[tokio::test]
    async fn renders_marks_progress_and_overall() {
        let services = AppServices::in_memory(sample_draft()).await.unwrap();
        let checklist = services.checklist();
        checklist
            .set_item_done(&ItemId::new("act2-boss").unwrap(), true)
            .await
            .unwrap();
        checklist
            .set_item_done(&ItemId::new("act2-shop").unwrap(), true)
            .await
            .unwrap();

        let vm = map_checklist(&checklist.snapshot().await, Locale::En);
        let text = render_status(&vm);

        assert!(text.starts_with(&format!("{}\n", vm.title)));
        assert!(text.contains("  [x] "));
        assert!(text.contains("(act2-boss)"));
        assert!(text.contains("[Done]"));
        assert!(text.contains("[0/3]"));
        assert!(text.trim_end().ends_with("Overall progress: 2/7"));
    }
}
