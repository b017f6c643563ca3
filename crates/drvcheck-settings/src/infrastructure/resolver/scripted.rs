//! Scripted resolver for tests and headless runs.
//!
//! Answers come from a key → string script.  Yes/no prompts treat the
//! scripted string `"true"` as yes; choice prompts return the scripted string
//! as the tag; text prompts return it verbatim.  Unscripted keys fall back to
//! no / the first option / the suggestion.

use std::collections::HashMap;

use drvcheck_core::{decode_bool, SettingKey};

use crate::application::resolver::{
    ChoicePrompt, ConfirmPrompt, InteractiveResolver, Notice, TextPrompt,
};

/// An [`InteractiveResolver`] that answers from a script and records calls.
#[derive(Debug, Default, Clone)]
pub struct ScriptedResolver {
    answers: HashMap<SettingKey, String>,
    prompted: Vec<SettingKey>,
    notices: Vec<Notice>,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an answer for `key`.
    pub fn with_answer(mut self, key: SettingKey, answer: impl Into<String>) -> Self {
        self.answers.insert(key, answer.into());
        self
    }

    /// Keys prompted so far, in order.
    pub fn prompted(&self) -> &[SettingKey] {
        &self.prompted
    }

    /// How many times `key` has been prompted.
    pub fn prompt_count(&self, key: &SettingKey) -> usize {
        self.prompted.iter().filter(|k| *k == key).count()
    }

    /// Notices received so far, in order.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    fn answer(&mut self, key: &SettingKey) -> Option<String> {
        self.prompted.push(key.clone());
        self.answers.get(key).cloned()
    }
}

impl InteractiveResolver for ScriptedResolver {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool {
        self.answer(&prompt.key)
            .as_deref()
            .and_then(decode_bool)
            .unwrap_or(false)
    }

    fn choose(&mut self, prompt: &ChoicePrompt) -> String {
        match self.answer(&prompt.key) {
            Some(tag) => tag,
            None => prompt
                .options
                .first()
                .map(|option| option.tag.clone())
                .unwrap_or_default(),
        }
    }

    fn free_text(&mut self, prompt: &TextPrompt) -> String {
        self.answer(&prompt.key)
            .or_else(|| prompt.suggestion.clone())
            .unwrap_or_default()
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}
