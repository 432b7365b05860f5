use std::sync::Arc;

use checklist_core::model::ChecklistSnapshot;
use dioxus::prelude::*;
use services::ChecklistService;

use crate::context::AppContext;
use crate::i18n::{Locale, TextKey, text};
use crate::views::{ResetControls, ViewError, ViewState, view_state_from_resource};
use crate::vm::{RowToggle, RowVm, SectionVm, apply_reset, apply_toggle, map_checklist};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Notice {
    ResetDone,
    Failed(ViewError),
}

/// Everything the user can do on the checklist page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ChecklistIntent {
    Toggle(RowToggle),
    SwitchLanguage,
    RequestReset,
    CancelReset,
    ConfirmReset,
}

#[derive(Clone)]
pub(crate) struct ChecklistState {
    pub locale: Signal<Locale>,
    pub revision: Signal<u64>,
    pub notice: Signal<Option<Notice>>,
    pub confirming: Signal<bool>,
    pub snapshot: Resource<Result<ChecklistSnapshot, ViewError>>,
}

impl PartialEq for ChecklistState {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
            && self.revision == other.revision
            && self.notice == other.notice
            && self.confirming == other.confirming
    }
}

pub(crate) fn use_checklist_state(
    checklist: &Arc<ChecklistService>,
    initial: Locale,
) -> ChecklistState {
    let locale = use_signal(|| initial);
    let revision = use_signal(|| 0_u64);
    let notice = use_signal(|| None::<Notice>);
    let confirming = use_signal(|| false);

    let snapshot = use_resource({
        let checklist = Arc::clone(checklist);
        move || {
            let checklist = Arc::clone(&checklist);
            // Re-read after every applied intent.
            let _ = revision();
            async move { Ok::<_, ViewError>(checklist.snapshot().await) }
        }
    });

    ChecklistState {
        locale,
        revision,
        notice,
        confirming,
        snapshot,
    }
}

pub(crate) fn use_checklist_dispatcher(
    state: &ChecklistState,
    checklist: &Arc<ChecklistService>,
) -> Callback<ChecklistIntent> {
    let ChecklistState {
        mut locale,
        mut revision,
        mut notice,
        mut confirming,
        ..
    } = state.clone();
    let checklist = Arc::clone(checklist);

    use_callback(move |intent: ChecklistIntent| match intent {
        ChecklistIntent::Toggle(toggle) => {
            let checklist = Arc::clone(&checklist);
            spawn(async move {
                let result = apply_toggle(&checklist, &toggle).await;
                notice.set(result.err().map(Notice::Failed));
                revision += 1;
            });
        }
        ChecklistIntent::SwitchLanguage => {
            let next = locale.cloned().toggled();
            locale.set(next);
        }
        ChecklistIntent::RequestReset => {
            notice.set(None);
            confirming.set(true);
        }
        ChecklistIntent::CancelReset => confirming.set(false),
        ChecklistIntent::ConfirmReset => {
            let checklist = Arc::clone(&checklist);
            spawn(async move {
                let outcome = match apply_reset(&checklist).await {
                    Ok(()) => Notice::ResetDone,
                    Err(err) => Notice::Failed(err),
                };
                notice.set(Some(outcome));
                confirming.set(false);
                revision += 1;
            });
        }
    })
}

#[component]
pub fn ChecklistView() -> Element {
    let ctx = use_context::<AppContext>();
    let checklist = ctx.checklist();
    let state = use_checklist_state(&checklist, ctx.locale());
    let dispatch = use_checklist_dispatcher(&state, &checklist);

    rsx! {
        ChecklistPage { state, dispatch }
    }
}

#[component]
pub(crate) fn ChecklistPage(state: ChecklistState, dispatch: Callback<ChecklistIntent>) -> Element {
    let current = state.locale.cloned();
    let notice = state.notice.cloned();
    let confirming = state.confirming.cloned();

    let body = match view_state_from_resource(&state.snapshot) {
        ViewState::Idle | ViewState::Loading => {
            let loading = text(current, TextKey::Loading);
            rsx! {
                p { "{loading}" }
            }
        }
        ViewState::Error(err) => {
            let message = text(current, err.text_key());
            rsx! {
                p { class: "notice warning", "{message}" }
            }
        }
        ViewState::Ready(snapshot) => {
            let vm = map_checklist(&snapshot, current);
            let switch_label = text(current, TextKey::SwitchLanguage);
            rsx! {
                header { class: "toolbar",
                    h1 { "{vm.title}" }
                    button {
                        class: "language",
                        onclick: move |_| dispatch.call(ChecklistIntent::SwitchLanguage),
                        "{switch_label}"
                    }
                }
                p { class: "overall", "{vm.overall_label}" }
                NoticeBanner { notice, locale: current }
                for section in vm.sections {
                    SectionBlock {
                        key: "{section.key}",
                        section: section.clone(),
                        on_toggle: move |toggle: RowToggle| dispatch.call(ChecklistIntent::Toggle(toggle)),
                    }
                }
                ResetControls {
                    locale: current,
                    confirming,
                    on_request: move |()| dispatch.call(ChecklistIntent::RequestReset),
                    on_confirm: move |()| dispatch.call(ChecklistIntent::ConfirmReset),
                    on_cancel: move |()| dispatch.call(ChecklistIntent::CancelReset),
                }
            }
        }
    };

    rsx! {
        div { class: "page", {body} }
    }
}

#[component]
fn NoticeBanner(#[props(!optional)] notice: Option<Notice>, locale: Locale) -> Element {
    let Some(notice) = notice else {
        return rsx! {};
    };
    let (class, key) = match notice {
        Notice::ResetDone => ("notice", TextKey::ResetDone),
        Notice::Failed(err) => ("notice warning", err.text_key()),
    };
    let message = text(locale, key);

    rsx! {
        p { class: "{class}", "{message}" }
    }
}

#[component]
fn SectionBlock(section: SectionVm, on_toggle: EventHandler<RowToggle>) -> Element {
    let class = if section.rollup {
        "section rollup"
    } else {
        "section"
    };

    rsx! {
        div { class: "{class}",
            h2 {
                span { "{section.title}" }
                span { class: "progress", "{section.progress_label}" }
            }
            ul {
                for row in section.rows {
                    ItemRow { key: "{row.key}", row: row.clone(), on_toggle }
                }
            }
        }
    }
}

#[component]
fn ItemRow(row: RowVm, on_toggle: EventHandler<RowToggle>) -> Element {
    let class = if row.done { "item done" } else { "item" };
    let status = row.status_label.clone().unwrap_or_default();
    let target = row.target.clone();

    rsx! {
        li { class: "{class}",
            label {
                input {
                    r#type: "checkbox",
                    checked: row.done,
                    onchange: move |evt: FormEvent| {
                        on_toggle.call(RowToggle {
                            target: target.clone(),
                            done: evt.checked(),
                        });
                    },
                }
                span { class: "label", "{row.label}" }
                if !status.is_empty() {
                    span { class: "status", "{status}" }
                }
            }
        }
    }
}
