//! Terminal access for the interactive workflow.

use dialoguer::{Input, Select};
use thiserror::Error;
use tracing::debug;

/// The operator closed the terminal or interrupted a prompt.
#[derive(Debug, Error)]
#[error("console session closed")]
pub struct SessionClosed;

/// Line-oriented operator I/O.
pub trait Console {
    /// Write one line of output.
    fn println(&mut self, line: &str);

    /// Ask a question and block until the operator answers. An empty answer
    /// yields `default` when one is given.
    fn read_line(&mut self, prompt: &str, default: Option<&str>) -> anyhow::Result<String>;

    /// Offer a list of choices; `None` when the operator cancels.
    fn select(&mut self, prompt: &str, items: &[&str]) -> anyhow::Result<Option<usize>>;
}

/// Console backed by the real terminal.
#[derive(Debug, Default)]
pub struct TermConsole;

impl Console for TermConsole {
    fn println(&mut self, line: &str) {
        println!("{}", line);
    }

    fn read_line(&mut self, prompt: &str, default: Option<&str>) -> anyhow::Result<String> {
        let input = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true);
        let input = match default {
            Some(value) => input.default(value.to_string()),
            None => input,
        };

        input.interact_text().map_err(|e| {
            debug!("prompt aborted: {}", e);
            SessionClosed.into()
        })
    }

    fn select(&mut self, prompt: &str, items: &[&str]) -> anyhow::Result<Option<usize>> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(|e| {
                debug!("selection aborted: {}", e);
                SessionClosed.into()
            })
    }
}
