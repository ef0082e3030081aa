use std::path::Path;

use anyhow::Context;
use reedline::{
    ColumnarMenu, DefaultCompleter, Emacs, ExampleHighlighter, FileBackedHistory, KeyCode,
    KeyModifiers, Reedline, ReedlineEvent, ReedlineMenu, Signal,
};

use crate::prompt::BookSearchPrompt;

const HISTORY_SIZE: usize = 1000;

pub struct Repl {
    reedline: Reedline,
    prompt:   BookSearchPrompt,
}

impl Repl {
    pub fn new(commands: Vec<String>, history_file: &Path) -> anyhow::Result<Self> {
        let history = Box::new(
            FileBackedHistory::with_file(HISTORY_SIZE, history_file.to_path_buf())
                .with_context(|| format!("Opening history file {}", history_file.display()))?,
        );

        let completer = Box::new(DefaultCompleter::new_with_wordlen(commands.clone(), 1));

        let completion_menu = Box::new(ColumnarMenu::default().with_name("completion_menu"));

        let mut keybindings = reedline::default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu("completion_menu".to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let line_editor = Reedline::create()
            .with_history(history)
            .with_highlighter(Box::new(ExampleHighlighter::new(commands)))
            .with_completer(completer)
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        Ok(Repl {
            reedline: line_editor,
            prompt:   BookSearchPrompt::default(),
        })
    }

    pub fn read_line(&mut self) -> anyhow::Result<Signal> {
        Ok(self.reedline.read_line(&self.prompt)?)
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.prompt.status = status.into();
    }
}
