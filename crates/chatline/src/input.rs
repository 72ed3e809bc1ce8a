//! Line-based message composing.
//!
//! Pressing Enter sends the message. A line ending with a backslash
//! continues the message on the next line instead, which is how a
//! terminal spells Shift+Enter.

const CONTINUATION: char = '\\';

/// The result of feeding one line to a [`Composer`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Composed {
    /// The message continues on the next line.
    Continue,
    /// The message is complete.
    Ready(String),
}

/// Accumulates terminal lines into one message.
#[derive(Clone, Default, Debug)]
pub struct Composer {
    buffer: String,
}

impl Composer {
    /// Feeds one line, with or without its line terminator.
    pub fn push_line(&mut self, line: &str) -> Composed {
        let line = line.trim_end_matches(['\n', '\r']);
        if let Some(head) = line.strip_suffix(CONTINUATION) {
            self.buffer.push_str(head);
            self.buffer.push('\n');
            return Composed::Continue;
        }
        self.buffer.push_str(line);
        Composed::Ready(std::mem::take(&mut self.buffer))
    }

    /// The text composed so far.
    #[inline]
    pub fn draft(&self) -> &str {
        &self.buffer
    }

    /// Returns `true` if a multi-line message is being composed.
    #[inline]
    pub fn is_composing(&self) -> bool {
        !self.buffer.is_empty()
    }
}

/// Returns `true` if `line` asks to end the session.
pub fn is_quit_command(line: &str) -> bool {
    let line = line.trim();
    let word = line.strip_prefix('/').unwrap_or(line);
    ["bye", "exit", "quit"]
        .iter()
        .any(|cmd| word.eq_ignore_ascii_case(cmd))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let mut composer = Composer::default();
        assert_eq!(
            composer.push_line("Hello there\n"),
            Composed::Ready("Hello there".to_owned())
        );
        assert!(!composer.is_composing());
    }

    #[test]
    fn test_continuation() {
        let mut composer = Composer::default();
        assert_eq!(composer.push_line("first line\\\n"), Composed::Continue);
        assert_eq!(composer.draft(), "first line\n");
        assert!(composer.is_composing());
        assert_eq!(composer.push_line("second\\\r\n"), Composed::Continue);
        assert_eq!(
            composer.push_line("third\n"),
            Composed::Ready("first line\nsecond\nthird".to_owned())
        );
        assert_eq!(composer.draft(), "");
    }

    #[test]
    fn test_blank_line_is_ready() {
        let mut composer = Composer::default();
        assert_eq!(composer.push_line("\n"), Composed::Ready(String::new()));
    }

    #[test]
    fn test_quit_commands() {
        assert!(is_quit_command("/quit\n"));
        assert!(is_quit_command("  /exit "));
        assert!(is_quit_command("quit"));
        assert!(is_quit_command("Bye\n"));
        assert!(is_quit_command("EXIT"));
        assert!(!is_quit_command("/quitter"));
        assert!(!is_quit_command("bye now"));
        assert!(!is_quit_command("//quit"));
    }
}
