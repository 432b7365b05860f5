use std::sync::Arc;

use checklist_core::model::{ItemId, MasterItemId, SectionId};
use storage::repository::{ProgressRepository, Storage, StorageKey};

use super::checklist::ChecklistIntent;
use super::test_harness::{FailingStoreRepo, setup_view_harness, setup_view_harness_with};
use crate::i18n::Locale;
use crate::vm::{RowTarget, RowToggle};

#[tokio::test(flavor = "current_thread")]
async fn checklist_view_smoke_renders_stored_progress() {
    let stored = r#"{"act1-boss": true, "act1-chest": true, "act1-npc": true, "act2-shop": true}"#;
    let mut harness = setup_view_harness(Locale::En, Some(stored)).await;
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Hollow Depths 100%"), "missing title in {html}");
    assert!(html.contains("Overall progress: 4/7"), "missing overall in {html}");
    assert!(html.contains("[Done]"), "missing done marker in {html}");
    assert!(html.contains("[1/2]"), "missing act II progress in {html}");
    assert!(html.contains("Defeat the Warden"), "missing item label in {html}");
    assert!(html.contains("item done"), "missing struck item in {html}");
    assert!(html.contains("Reset"), "missing reset button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn checklist_view_smoke_renders_korean_labels() {
    let mut harness = setup_view_harness(Locale::Ko, None).await;
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("전체 진행도: 0/7"), "missing overall in {html}");
    assert!(html.contains("초기화"), "missing reset button in {html}");
    assert!(html.contains("English"), "missing language switch in {html}");
    assert!(!html.contains("[완료]"), "nothing should be complete in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn checklist_view_smoke_reflects_service_changes_after_rebuild() {
    let mut harness = setup_view_harness(Locale::En, None).await;
    harness
        .checklist
        .set_item_done(&ItemId::new("secret-wall").unwrap(), true)
        .await
        .unwrap();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Overall progress: 1/7"), "missing overall in {html}");
    assert!(!html.contains("confirm-yes"), "dialog should start closed in {html}");
}

fn master(id: &str) -> RowToggle {
    RowToggle {
        target: RowTarget::Master(MasterItemId::new(id).unwrap()),
        done: true,
    }
}

fn item(id: &str, done: bool) -> RowToggle {
    RowToggle {
        target: RowTarget::Item(ItemId::new(id).unwrap()),
        done,
    }
}

const STORED: &str = r#"{"act1-boss": true, "act1-chest": true, "act1-npc": true, "act2-shop": true}"#;

#[tokio::test(flavor = "current_thread")]
async fn checklist_view_smoke_cancel_keeps_progress() {
    let mut harness = setup_view_harness(Locale::En, Some(STORED)).await;
    harness.settle().await;

    harness.dispatch(ChecklistIntent::RequestReset).await;
    let html = harness.render();
    assert!(html.contains("Really clear the whole checklist?"), "dialog missing in {html}");
    assert!(html.contains("confirm-yes"), "confirm button missing in {html}");

    harness.dispatch(ChecklistIntent::CancelReset).await;
    let html = harness.render();
    assert!(!html.contains("confirm-yes"), "dialog should be closed in {html}");
    assert!(html.contains("Overall progress: 4/7"), "progress changed in {html}");
    assert!(!html.contains("has been reset"), "unexpected notice in {html}");
    let blob = harness.storage.progress.load(&StorageKey::default()).await.unwrap();
    assert!(blob.is_some());
}

#[tokio::test(flavor = "current_thread")]
async fn checklist_view_smoke_confirmed_reset_clears_rows() {
    let mut harness = setup_view_harness(Locale::En, Some(STORED)).await;
    harness.settle().await;
    assert!(harness.render().contains("item done"));

    harness.dispatch(ChecklistIntent::RequestReset).await;
    harness.dispatch(ChecklistIntent::ConfirmReset).await;

    let html = harness.render();
    assert!(html.contains("The checklist has been reset!"), "notice missing in {html}");
    assert!(html.contains("Overall progress: 0/7"), "progress not cleared in {html}");
    assert!(!html.contains("item done"), "rows still struck in {html}");
    assert!(!html.contains("confirm-yes"), "dialog should be closed in {html}");
    let blob = harness.storage.progress.load(&StorageKey::default()).await.unwrap();
    assert_eq!(blob, None);
}

#[tokio::test(flavor = "current_thread")]
async fn checklist_view_smoke_warns_when_saving_fails() {
    let storage = Storage {
        progress: Arc::new(FailingStoreRepo),
    };
    let mut harness = setup_view_harness_with(Locale::En, storage).await;
    harness.settle().await;

    harness
        .dispatch(ChecklistIntent::Toggle(item("act1-boss", true)))
        .await;

    let html = harness.render();
    assert!(
        html.contains("Progress could not be saved and may be lost on restart."),
        "save warning missing in {html}"
    );
    assert!(html.contains("item done"), "row should stay checked in {html}");
    assert!(html.contains("Overall progress: 1/7"), "missing overall in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn checklist_view_smoke_master_row_completes_section() {
    let mut harness = setup_view_harness(Locale::En, None).await;
    harness.settle().await;
    assert!(!harness.render().contains("[Done]"));

    harness.dispatch(ChecklistIntent::Toggle(master("master-act1"))).await;

    let html = harness.render();
    assert!(html.contains("[Done]"), "section not marked done in {html}");
    assert!(html.contains("Overall progress: 3/7"), "missing overall in {html}");
    assert!(!html.contains("notice warning"), "unexpected warning in {html}");
    assert!(harness
        .checklist
        .section_progress(&SectionId::new("act1").unwrap())
        .await
        .unwrap()
        .is_complete);
}

#[tokio::test(flavor = "current_thread")]
async fn checklist_view_smoke_switches_language() {
    let mut harness = setup_view_harness(Locale::En, None).await;
    harness.settle().await;

    harness.dispatch(ChecklistIntent::SwitchLanguage).await;

    let html = harness.render();
    assert!(html.contains("전체 진행도: 0/7"), "labels not switched in {html}");
    assert!(html.contains("English"), "switch label not flipped in {html}");
}
