//! Fixed-height window over rendered chat lines that follows the newest entry.

use crate::domain::ids::ConversationId;

/// Scroll state of the chat area.
#[derive(Clone, Debug)]
pub struct Viewport {
    height: usize,
    // Lines hidden below the window; 0 means pinned to the newest line.
    offset_from_bottom: usize,
    seen: Option<(ConversationId, usize)>,
}

impl Viewport {
    /// Create a viewport showing `height` lines (at least one).
    #[must_use]
    pub fn new(height: usize) -> Self {
        Self {
            height: height.max(1),
            offset_from_bottom: 0,
            seen: None,
        }
    }

    /// Report the displayed conversation and its message count. Any change
    /// snaps the window back to the newest entry.
    pub fn sync(&mut self, conversation: ConversationId, message_count: usize) {
        let current = Some((conversation, message_count));
        if self.seen != current {
            self.seen = current;
            self.offset_from_bottom = 0;
        }
    }

    /// Scroll towards older lines.
    pub fn scroll_up(&mut self, lines: usize, total: usize) {
        let max_offset = total.saturating_sub(self.height);
        self.offset_from_bottom = self.offset_from_bottom.saturating_add(lines).min(max_offset);
    }

    /// Scroll towards newer lines.
    pub fn scroll_down(&mut self, lines: usize) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_sub(lines);
    }

    /// Whether the newest line is in view.
    #[must_use]
    pub const fn is_following(&self) -> bool {
        self.offset_from_bottom == 0
    }

    /// Slice of `lines` currently in view.
    #[must_use]
    pub fn visible<'a>(&self, lines: &'a [String]) -> &'a [String] {
        let end = lines.len().saturating_sub(self.offset_from_bottom);
        let start = end.saturating_sub(self.height);
        &lines[start..end]
    }
}
