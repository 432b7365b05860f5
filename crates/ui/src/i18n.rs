//! UI text per locale.
//!
//! Every rendered string is addressed by a `TextKey`; progress labels are
//! formatted by the functions below rather than patched into markup.

use std::fmt;
use std::str::FromStr;

use checklist_core::model::{OverallProgress, SectionProgress};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    En,
    Ko,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported language: {0} (expected en or ko)")]
pub struct UnknownLocale(pub String);

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ko];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ko => "ko",
        }
    }

    /// The other locale, for the two-way language switch.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Locale::En => Locale::Ko,
            Locale::Ko => Locale::En,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "ko" | "kr" | "korean" => Ok(Locale::Ko),
            other => Err(UnknownLocale(other.to_owned())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextKey {
    OverallProgress,
    SectionDone,
    ResetButton,
    ResetConfirm,
    ConfirmYes,
    ConfirmNo,
    ResetDone,
    SaveFailed,
    Loading,
    LoadFailed,
    /// Label of the button that switches to the other language.
    SwitchLanguage,
}

/// Fixed text for `key` in `locale`.
#[must_use]
pub fn text(locale: Locale, key: TextKey) -> &'static str {
    match locale {
        Locale::En => match key {
            TextKey::OverallProgress => "Overall progress",
            TextKey::SectionDone => "Done",
            TextKey::ResetButton => "Reset",
            TextKey::ResetConfirm => "Really clear the whole checklist?",
            TextKey::ConfirmYes => "Yes, reset",
            TextKey::ConfirmNo => "Cancel",
            TextKey::ResetDone => "The checklist has been reset!",
            TextKey::SaveFailed => "Progress could not be saved and may be lost on restart.",
            TextKey::Loading => "Loading...",
            TextKey::LoadFailed => "Something went wrong. Please try again.",
            TextKey::SwitchLanguage => "한국어",
        },
        Locale::Ko => match key {
            TextKey::OverallProgress => "전체 진행도",
            TextKey::SectionDone => "완료",
            TextKey::ResetButton => "초기화",
            TextKey::ResetConfirm => "정말 모든 체크리스트를 초기화하시겠습니까?",
            TextKey::ConfirmYes => "초기화",
            TextKey::ConfirmNo => "취소",
            TextKey::ResetDone => "체크리스트가 초기화되었습니다!",
            TextKey::SaveFailed => "진행 상황을 저장하지 못했습니다. 다시 시작하면 사라질 수 있습니다.",
            TextKey::Loading => "불러오는 중...",
            TextKey::LoadFailed => "문제가 발생했습니다. 다시 시도해 주세요.",
            TextKey::SwitchLanguage => "English",
        },
    }
}

/// `[checked/total]`, or the localized done marker once the section is complete.
#[must_use]
pub fn progress_label(locale: Locale, progress: &SectionProgress) -> String {
    if progress.is_complete {
        format!("[{}]", text(locale, TextKey::SectionDone))
    } else {
        format!("[{}/{}]", progress.checked, progress.total)
    }
}

#[must_use]
pub fn overall_label(locale: Locale, overall: &OverallProgress) -> String {
    format!(
        "{}: {}/{}",
        text(locale, TextKey::OverallProgress),
        overall.checked,
        overall.total
    )
}
