use std::collections::VecDeque;
use std::sync::Mutex;

use super::console::{is_affirmative, Console};
use crate::common::result::WspaceResult;

/// Console double that answers prompts from a fixed script and records
/// everything written to it.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: Mutex<VecDeque<String>>,
    output: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let console = Self::default();
        *console.answers.lock().unwrap() = answers.into_iter().map(Into::into).collect();
        console
    }

    pub fn output(&self) -> Vec<String> {
        self.output.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next_answer(&self, prompt: &str) -> String {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected prompt: {prompt:?}"))
    }
}

impl Console for ScriptedConsole {
    fn section(&self, title: &str) {
        self.output.lock().unwrap().push(title.to_string());
    }

    fn info(&self, message: &str) {
        self.output.lock().unwrap().push(message.to_string());
    }

    fn notice(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, prompt: &str) -> WspaceResult<bool> {
        Ok(is_affirmative(&self.next_answer(prompt)))
    }

    fn read_line(&self, prompt: &str) -> WspaceResult<String> {
        Ok(self.next_answer(prompt).trim().to_string())
    }
}
