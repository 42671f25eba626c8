//! Line editing for the shell
//!
//! Wraps a rustyline editor. The prompt follows the active section and the
//! line history survives between runs when a path is configured.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::warn;

use crate::repl::session::Section;

/// Result of one read from the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Trimmed line, possibly empty
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D
    Eof,
}

/// Readline front end
pub struct InputHandler {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
    section: Section,
}

impl InputHandler {
    /// Open an editor, loading line history from `history_path` if it exists
    pub fn open(history_path: Option<PathBuf>) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        if let Some(path) = history_path.as_deref().filter(|p| p.exists()) {
            if let Err(err) = editor.load_history(path) {
                warn!(path = %path.display(), error = %err, "Could not load line history");
            }
        }

        Ok(InputHandler {
            editor,
            history_path,
            section: Section::Dashboard,
        })
    }

    pub fn set_section(&mut self, section: Section) {
        self.section = section;
    }

    pub fn prompt(&self) -> String {
        prompt_for(self.section)
    }

    /// Read a shell line. Non-empty lines are added to the history.
    pub fn read_line(&mut self) -> Result<ReadOutcome> {
        let prompt = self.prompt();
        self.read(&prompt, true)
    }

    /// Read one form field. Answers stay out of the history.
    pub fn read_field(&mut self, label: &str) -> Result<ReadOutcome> {
        self.read(&format!("  {}: ", label), false)
    }

    fn read(&mut self, prompt: &str, remember: bool) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(raw) => {
                let line = raw.trim().to_string();
                if remember && !line.is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(err) => Err(err.into()),
        }
    }

    /// Write the line history, creating its directory if needed
    pub fn save_history(&mut self) -> Result<()> {
        let Some(path) = &self.history_path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        self.editor.save_history(path)?;
        Ok(())
    }

    pub fn history_len(&self) -> usize {
        self.editor.history().len()
    }
}

/// Prompt text for a section, e.g. "healthai[bmi]> "
pub fn prompt_for(section: Section) -> String {
    format!("healthai[{}]> ", section.tag())
}
