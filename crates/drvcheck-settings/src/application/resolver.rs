//! Interactive resolver port.
//!
//! When a setting is missing the store builds a prompt for it and hands the
//! prompt to an [`InteractiveResolver`].  Three prompt shapes cover every
//! recognized key:
//!
//! | Prompt            | Used for                             | Answer          |
//! |-------------------|--------------------------------------|-----------------|
//! | [`ConfirmPrompt`] | `Check for Updates`, `Minimal install` | yes / no      |
//! | [`ChoicePrompt`]  | `Driver type`, `GPU ID` with a GPU list | option tag   |
//! | [`TextPrompt`]    | `Download location`, `GPU ID` without a list | text    |
//!
//! Resolvers also receive operator-facing [`Notice`]s, e.g. when a key is
//! unknown or the settings file had to be wiped.
//!
//! All calls block until the operator answers.

use std::fmt;
use std::path::PathBuf;

use drvcheck_core::SettingKey;

/// A yes/no question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    /// Setting being provisioned.
    pub key: SettingKey,
    pub question: &'static str,
}

/// One selectable option of a [`ChoicePrompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Text shown to the operator.
    pub label: String,
    /// Value returned when this option is chosen.
    pub tag: String,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tag: tag.into(),
        }
    }
}

/// A selection among a fixed list of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoicePrompt {
    /// Setting being provisioned.
    pub key: SettingKey,
    pub heading: &'static str,
    /// Longer explanation shown under the heading.  May be empty.
    pub text: &'static str,
    /// Never empty.
    pub options: Vec<ChoiceOption>,
}

/// A free-form text entry, e.g. a directory path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPrompt {
    /// Setting being provisioned.
    pub key: SettingKey,
    pub heading: &'static str,
    /// Value proposed to the operator, returned on empty input.
    pub suggestion: Option<String>,
}

/// Operator-facing message that needs no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// No settings file existed; the mandatory keys are about to be asked.
    GeneratingConfig { path: PathBuf },
    /// A key was missing on read and is about to be provisioned.
    RepairingKey { key: SettingKey },
    /// Setup was requested for a key the application does not know.
    UnknownKey { key: String },
    /// A write failed; the settings file was deleted and the run must stop.
    ConfigWiped { path: PathBuf, reason: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::GeneratingConfig { path } => {
                write!(f, "Generating configuration file at {}.", path.display())
            }
            Notice::RepairingKey { key } => write!(
                f,
                "Error reading configuration file, attempting to repair key '{key}' . . ."
            ),
            Notice::UnknownKey { key } => write!(f, "Unknown key '{key}'"),
            Notice::ConfigWiped { path, reason } => write!(
                f,
                "{reason}\n\nThe config file {} has been wiped due to a possible syntax error, \
                 please run the application again and setup your values.",
                path.display()
            ),
        }
    }
}

/// Obtains setting values from the operator.
///
/// The production implementation is
/// `infrastructure::resolver::console::ConsoleResolver`; tests use
/// `infrastructure::resolver::scripted::ScriptedResolver` or the generated
/// `MockInteractiveResolver`.
#[cfg_attr(test, mockall::automock)]
pub trait InteractiveResolver {
    /// Asks a yes/no question.  Returns `true` for yes.
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool;

    /// Asks the operator to pick one option and returns its tag.
    fn choose(&mut self, prompt: &ChoicePrompt) -> String;

    /// Asks for free-form text.
    fn free_text(&mut self, prompt: &TextPrompt) -> String;

    /// Shows a message that needs no answer.
    fn notify(&mut self, notice: &Notice);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_notice_names_the_key() {
        let notice = Notice::UnknownKey {
            key: "Theme".to_string(),
        };
        assert_eq!(notice.to_string(), "Unknown key 'Theme'");
    }

    #[test]
    fn test_wiped_notice_tells_operator_to_run_again() {
        let notice = Notice::ConfigWiped {
            path: PathBuf::from("app.config"),
            reason: "malformed".to_string(),
        };
        let text = notice.to_string();
        assert!(text.starts_with("malformed"));
        assert!(text.contains("please run the application again"));
    }
}
