use crate::command::Command;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect, Size},
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use std::borrow::Cow;

/// Pop-up telling the player that the high score could not be read from or
/// written to disk.  Play goes on with the in-memory high score once it is
/// dismissed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
}

impl Warning {
    const MAX_LINES: usize = 12;
    const TEXT_WIDTH: usize = 44;
    const WIDTH: u16 = 48;

    /// Build the pop-up from the payload of a
    /// [`GameEvent::StorageFailed`][crate::game::GameEvent::StorageFailed]:
    /// the error's message followed by those of its sources
    pub(crate) fn storage_failure(msgs: Vec<String>) -> Warning {
        let mut msgs = msgs.into_iter();
        let mut lines = Vec::new();
        if let Some(error) = msgs.next() {
            lines.extend(wrap(&error, "", ""));
        }
        for cause in msgs {
            lines.extend(wrap(&cause, "  - ", "    "));
        }
        if lines.len() > Warning::MAX_LINES {
            lines.truncate(Warning::MAX_LINES - 1);
            lines.push(String::from("    ..."));
        }
        Warning { lines }
    }

    pub(crate) fn handle_command(&self, cmd: Command) -> Option<WarningOutcome> {
        match cmd {
            Command::Enter | Command::Esc => Some(WarningOutcome::Dismissed),
            Command::Quit => Some(WarningOutcome::Quit),
            _ => None,
        }
    }
}

fn wrap(text: &str, initial_indent: &str, subsequent_indent: &str) -> Vec<String> {
    let opts = textwrap::Options::new(Warning::TEXT_WIDTH)
        .break_words(true)
        .initial_indent(initial_indent)
        .subsequent_indent(subsequent_indent);
    textwrap::wrap(text, opts)
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl Widget for &Warning {
    // `area` is the whole display, not just the pop-up.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text_height = u16::try_from(self.lines.len()).unwrap_or(u16::MAX);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH,
                height: text_height.saturating_add(4),
            },
        );
        let block = Block::bordered()
            .title(" STORAGE ERROR ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, hint_area] =
            Layout::vertical([Constraint::Length(text_height), Constraint::Length(1)])
                .spacing(1)
                .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        Text::from_iter(self.lines.iter().map(String::as_str)).render(text_area, buf);
        Line::from("[Enter] Continue").centered().render(hint_area, buf);
    }
}
