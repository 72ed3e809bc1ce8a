//! Plain terminal rendering of a conversation.
//!
//! Everything here turns state into text. Nothing reads input or touches
//! the conversation.

use std::fmt::{Display, Write as _};

use chatline_core::{ConversationView, Message, Sender};
use chrono::{DateTime, Local, TimeZone, Utc};
use owo_colors::OwoColorize;

const BAR_CHAR: &str = "▎";

/// Title printed when a session starts.
pub const TITLE: &str = "AI Assistant";
/// Subtitle printed under the title.
pub const SUBTITLE: &str = "Ready to help";
/// Shown while the transcript is empty.
pub const EMPTY_TITLE: &str = "Start a conversation";
/// Shown under [`EMPTY_TITLE`].
pub const EMPTY_TEXT: &str = "Ask me anything and I'll do my best to help.";
/// Shown next to the spinner while a reply is pending.
pub const COMPOSING: &str = "🤔 Thinking...";
/// Input hint.
pub const PLACEHOLDER: &str =
    "Type your message... (end a line with \\ for a new line)";

/// Formats a timestamp as local `hh:mm AM`.
#[inline]
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    format_time_in(timestamp, &Local)
}

/// Formats a timestamp as `hh:mm AM` in the given time zone.
pub fn format_time_in<Tz: TimeZone>(
    timestamp: DateTime<Utc>,
    tz: &Tz,
) -> String
where
    Tz::Offset: Display,
{
    timestamp.with_timezone(tz).format("%I:%M %p").to_string()
}

/// Renders the session header.
pub fn header(colored: bool) -> String {
    if colored {
        format!("{}\n{}\n", TITLE.bold(), SUBTITLE.dimmed())
    } else {
        format!("{TITLE}\n{SUBTITLE}\n")
    }
}

/// Renders the placeholder for an empty transcript.
pub fn empty_state(colored: bool) -> String {
    if colored {
        format!("💬 {}\n{}\n", EMPTY_TITLE.bold(), EMPTY_TEXT.dimmed())
    } else {
        format!("💬 {EMPTY_TITLE}\n{EMPTY_TEXT}\n")
    }
}

/// Renders one message as a block of bar-prefixed lines.
pub fn message(msg: &Message, colored: bool) -> String {
    let time = format_time(msg.timestamp());
    render_message(msg, &time, colored)
}

fn render_message(msg: &Message, time: &str, colored: bool) -> String {
    let (label, bar) = match (msg.sender(), colored) {
        (Sender::User, true) => {
            ("🧑 You", BAR_CHAR.bright_green().to_string())
        }
        (Sender::Assistant, true) => {
            ("🤖 Assistant", BAR_CHAR.bright_cyan().to_string())
        }
        (Sender::User, false) => ("🧑 You", BAR_CHAR.to_owned()),
        (Sender::Assistant, false) => ("🤖 Assistant", BAR_CHAR.to_owned()),
    };

    let mut out = String::new();
    if colored {
        writeln!(out, "{bar}{} {}", label.bold(), time.dimmed()).ok();
    } else {
        writeln!(out, "{bar}{label} {time}").ok();
    }
    for line in msg.text().lines() {
        if colored {
            writeln!(out, "{bar}{}", line.bright_white()).ok();
        } else {
            writeln!(out, "{bar}{line}").ok();
        }
    }
    out
}

/// Renders the whole conversation: the placeholder when empty, otherwise
/// every message in order, followed by a composing line while a reply is
/// pending.
pub fn transcript(view: &ConversationView, colored: bool) -> String {
    if view.is_empty() {
        return empty_state(colored);
    }
    let mut out = String::new();
    for msg in view.messages() {
        out.push_str(&message(msg, colored));
    }
    if view.pending() {
        out.push_str(BAR_CHAR);
        out.push_str(COMPOSING);
        out.push('\n');
    }
    out
}

/// Remembers how much of the transcript has been printed, so a terminal
/// can print only what is new.
#[derive(Clone, Copy, Default, Debug)]
pub struct Printer {
    printed: usize,
}

impl Printer {
    /// Returns the messages that haven't been returned before.
    pub fn take_new<'a>(
        &mut self,
        view: &'a ConversationView,
    ) -> &'a [Message] {
        let messages = view.messages();
        let start = self.printed.min(messages.len());
        self.printed = messages.len();
        &messages[start..]
    }
}

#[cfg(test)]
mod tests {
    use chatline_core::message::IdSequence;

    use super::*;

    #[test]
    fn test_format_time() {
        let morning = Utc.with_ymd_and_hms(2024, 1, 1, 9, 5, 0).unwrap();
        assert_eq!(format_time_in(morning, &Utc), "09:05 AM");

        let evening = Utc.with_ymd_and_hms(2024, 1, 1, 21, 30, 0).unwrap();
        assert_eq!(format_time_in(evening, &Utc), "09:30 PM");
    }

    #[test]
    fn test_message_lines() {
        let mut ids = IdSequence::new();
        let msg =
            Message::new(ids.next_id(), "line one\nline two", Sender::User);
        let rendered = render_message(&msg, "10:00 AM", false);
        assert_eq!(
            rendered,
            "▎🧑 You 10:00 AM\n▎line one\n▎line two\n"
        );

        let reply = Message::new(ids.next_id(), "Hello", Sender::Assistant);
        let rendered = render_message(&reply, "10:01 AM", false);
        assert_eq!(rendered, "▎🤖 Assistant 10:01 AM\n▎Hello\n");
    }

    #[test]
    fn test_plain_header() {
        assert_eq!(header(false), "AI Assistant\nReady to help\n");
        assert!(empty_state(false).contains(EMPTY_TITLE));
    }
}
