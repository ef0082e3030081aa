use std::borrow::Cow;

use reedline::{Prompt, PromptEditMode, PromptHistorySearchStatus, PromptViMode};

/// Left side names the tool, right side summarizes the last search.
#[derive(Default)]
pub struct BookSearchPrompt {
    pub status: String,
}

impl Prompt for BookSearchPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        Cow::Borrowed("Books ")
    }

    fn render_prompt_right(&self) -> Cow<str> {
        Cow::Borrowed(&self.status)
    }

    fn render_prompt_indicator(&self, prompt_mode: PromptEditMode) -> Cow<str> {
        match prompt_mode {
            PromptEditMode::Default | PromptEditMode::Emacs => "> ".into(),
            PromptEditMode::Vi(PromptViMode::Normal) => ": ".into(),
            PromptEditMode::Vi(PromptViMode::Insert) => "> ".into(),
            PromptEditMode::Custom(str) => format!("({})", str).into(),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed(":> ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: reedline::PromptHistorySearch,
    ) -> Cow<str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            prefix, history_search.term
        ))
    }
}
