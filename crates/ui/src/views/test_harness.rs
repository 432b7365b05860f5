use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{AppServices, ChecklistService};
use storage::repository::{ProgressRepository, Storage, StorageError, StorageKey};

use checklist_core::fixtures::sample_draft;

use crate::context::{UiApp, build_app_context};
use crate::i18n::Locale;

use super::checklist::{
    ChecklistIntent, ChecklistPage, use_checklist_dispatcher, use_checklist_state,
};

#[derive(Clone)]
struct TestApp {
    title: String,
    locale: Locale,
    checklist: Arc<ChecklistService>,
}

impl UiApp for TestApp {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn locale(&self) -> Locale {
        self.locale
    }

    fn checklist(&self) -> Arc<ChecklistService> {
        Arc::clone(&self.checklist)
    }
}

#[derive(Clone, Default)]
struct HarnessHandles {
    dispatch: Rc<RefCell<Option<Callback<ChecklistIntent>>>>,
}

impl HarnessHandles {
    fn dispatch(&self) -> Callback<ChecklistIntent> {
        self.dispatch
            .borrow()
            .clone()
            .expect("dispatch registered")
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: HarnessHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    let checklist = ctx.checklist();
    let state = use_checklist_state(&checklist, ctx.locale());
    let dispatch = use_checklist_dispatcher(&state, &checklist);
    use_hook(|| {
        *props.handles.dispatch.borrow_mut() = Some(dispatch);
    });
    rsx! { ChecklistPage { state, dispatch } }
}

/// Loads fine and accepts deletes, but every `store` fails.
#[derive(Default)]
pub struct FailingStoreRepo;

#[async_trait]
impl ProgressRepository for FailingStoreRepo {
    async fn load(&self, _key: &StorageKey) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn store(&self, _key: &StorageKey, _blob: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("disk full".into()))
    }

    async fn delete(&self, _key: &StorageKey) -> Result<(), StorageError> {
        Ok(())
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub checklist: Arc<ChecklistService>,
    pub storage: Storage,
    handles: HarnessHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let pending resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        self.drain().await;
    }

    /// Send an intent as if the user clicked, then let the spawned work and
    /// the resource refresh finish.
    pub async fn dispatch(&mut self, intent: ChecklistIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
        self.drain().await;
    }

    async fn drain(&mut self) {
        for _ in 0..6 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Harness over the sample checklist, optionally seeded with a stored blob.
pub async fn setup_view_harness(locale: Locale, stored: Option<&str>) -> ViewHarness {
    let storage = Storage::in_memory();
    if let Some(blob) = stored {
        storage
            .progress
            .store(&StorageKey::default(), blob)
            .await
            .expect("seed stored progress");
    }
    setup_view_harness_with(locale, storage).await
}

/// Harness over the sample checklist backed by `storage`.
pub async fn setup_view_harness_with(locale: Locale, storage: Storage) -> ViewHarness {
    let services = AppServices::from_storage(&storage, sample_draft(), StorageKey::default())
        .await
        .expect("build services");
    let checklist = services.checklist();

    let app = Arc::new(TestApp {
        title: services.title().to_owned(),
        locale,
        checklist: Arc::clone(&checklist),
    });
    let handles = HarnessHandles::default();

    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        checklist,
        storage,
        handles,
    }
}
