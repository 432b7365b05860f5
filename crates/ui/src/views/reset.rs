use dioxus::prelude::*;

use crate::i18n::{Locale, TextKey, text};

/// Reset button plus the confirmation dialog that must be accepted first.
#[component]
pub fn ResetControls(
    locale: Locale,
    confirming: bool,
    on_request: EventHandler<()>,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let button_text = text(locale, TextKey::ResetButton);
    let question = text(locale, TextKey::ResetConfirm);
    let yes = text(locale, TextKey::ConfirmYes);
    let no = text(locale, TextKey::ConfirmNo);

    rsx! {
        div { class: "reset",
            button {
                class: "reset-button",
                disabled: confirming,
                onclick: move |_| on_request.call(()),
                "{button_text}"
            }
            if confirming {
                div { class: "confirm",
                    div { class: "dialog",
                        p { "{question}" }
                        button { class: "confirm-yes", onclick: move |_| on_confirm.call(()), "{yes}" }
                        button { class: "confirm-no", onclick: move |_| on_cancel.call(()), "{no}" }
                    }
                }
            }
        }
    }
}
