//! Sentence buffering: reassembling raw key events into committed text units.

use crate::source::TextUnit;

/// Accumulates printable characters until the dispatcher commits them as
/// one keyboard-tagged [`TextUnit`].
///
/// The buffer has two logical states, accumulating and just-committed;
/// [`commit`](Self::commit) is the only transition back to empty.
#[derive(Debug, Default)]
pub struct SentenceBuffer {
    current: Vec<char>,
}

impl SentenceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a printable character, space, or tab.
    pub fn append(&mut self, ch: char) {
        self.current.push(ch);
    }

    /// Remove the last character. No-op on an empty buffer.
    pub fn backspace(&mut self) {
        self.current.pop();
    }

    /// The accumulated text so far, used for the raw keystroke audit line.
    pub fn contents(&self) -> String {
        self.current.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Commit the buffered characters as a trimmed keyboard text unit and
    /// clear the buffer. The result may be empty; empty units are filtered
    /// downstream by the pipeline.
    pub fn commit(&mut self) -> TextUnit {
        let text: String = self.current.drain(..).collect();
        TextUnit::keyboard(text.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TextSource;

    #[test]
    fn test_commit_joins_in_append_order() {
        let mut buffer = SentenceBuffer::new();
        for ch in "hello world".chars() {
            buffer.append(ch);
        }
        let unit = buffer.commit();
        assert_eq!(unit.text, "hello world");
        assert_eq!(unit.source, TextSource::Keyboard);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_commit_trims_whitespace() {
        let mut buffer = SentenceBuffer::new();
        for ch in "  padded  ".chars() {
            buffer.append(ch);
        }
        assert_eq!(buffer.commit().text, "padded");
    }

    #[test]
    fn test_backspace_removes_last_character() {
        let mut buffer = SentenceBuffer::new();
        buffer.append('a');
        buffer.append('b');
        buffer.backspace();
        assert_eq!(buffer.contents(), "a");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut buffer = SentenceBuffer::new();
        buffer.backspace();
        assert!(buffer.is_empty());
        assert_eq!(buffer.contents(), "");
    }

    #[test]
    fn test_commit_of_empty_buffer_yields_empty_unit() {
        let mut buffer = SentenceBuffer::new();
        let unit = buffer.commit();
        assert_eq!(unit.text, "");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_buffer_is_reusable_after_commit() {
        let mut buffer = SentenceBuffer::new();
        buffer.append('x');
        buffer.commit();
        buffer.append('y');
        assert_eq!(buffer.commit().text, "y");
    }
}
