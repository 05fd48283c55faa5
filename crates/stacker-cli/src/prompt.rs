//! Interactive prompts
//!
//! Commands ask through the [`Prompt`] trait so the workflow can run against
//! scripted answers in tests.

use dialoguer::{Input, Select};

use crate::error::Result;

pub trait Prompt {
    /// Read a line of free text.
    fn input(&self, prompt: &str) -> Result<String>;

    /// Pick one of `items`, returning its index.
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize>;
}

/// Prompts on the controlling terminal via dialoguer.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn input(&self, prompt: &str) -> Result<String> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer.trim().to_string())
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        Ok(Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?)
    }
}

/// Answers prompts from a fixed script, in order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: std::cell::RefCell<std::collections::VecDeque<String>>,
    asked: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: std::cell::RefCell::new(answers.into_iter().map(Into::into).collect()),
            asked: Default::default(),
        }
    }

    /// Prompts shown so far.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    fn next(&self, prompt: &str) -> Result<String> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| crate::error::CliError::user(format!("no scripted answer for `{prompt}`")))
    }
}

#[cfg(test)]
impl Prompt for ScriptedPrompt {
    fn input(&self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        let answer = self.next(prompt)?;
        answer
            .parse::<usize>()
            .ok()
            .filter(|&i| i < items.len())
            .ok_or_else(|| crate::error::CliError::user(format!("invalid scripted selection `{answer}`")))
    }
}
