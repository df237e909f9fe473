use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::outbound::UserPrompt;

/// Prompt with canned confirmation answers that records everything it was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<bool>>,
    default_answer: bool,
    questions: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    /// Answer every confirmation with `answer`.
    pub fn always(answer: bool) -> Self {
        Self {
            default_answer: answer,
            ..Self::default()
        }
    }

    /// Answer confirmations in order, then fall back to "no".
    pub fn with_answers(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn questions(&self) -> Vec<String> {
        locked(&self.questions).clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        locked(&self.alerts).clone()
    }
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().expect("scripted prompt lock poisoned")
}

#[async_trait]
impl UserPrompt for ScriptedPrompt {
    async fn confirm(&self, message: &str) -> bool {
        locked(&self.questions).push(message.to_string());
        locked(&self.answers)
            .pop_front()
            .unwrap_or(self.default_answer)
    }

    async fn alert(&self, message: &str) {
        locked(&self.alerts).push(message.to_string());
    }
}
