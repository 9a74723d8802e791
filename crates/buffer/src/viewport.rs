use super::TextStore;

/// Lines materialized when a document is opened
pub const INITIAL_WINDOW: usize = 50;
/// Lines added to the window per scroll expansion
pub const SCROLL_INCREMENT: usize = 20;
/// Fraction of the scrollable height that triggers an expansion
pub const EXPAND_THRESHOLD: f64 = 0.8;

/// Line window `[1, last_line]` exposed to the UI.
///
/// The window always starts at line 1, so any offset into the rendered text
/// is also an absolute document offset.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Upper bound of the materialized window (1-based, inclusive)
    last_line: usize,
    initial_window: usize,
    scroll_increment: usize,
    expand_threshold: f64,
}

impl Viewport {
    /// Create a new viewport
    pub fn new(initial_window: usize, scroll_increment: usize, expand_threshold: f64) -> Self {
        let initial_window = initial_window.max(1);
        Self {
            last_line: initial_window,
            initial_window,
            scroll_increment: scroll_increment.max(1),
            expand_threshold: expand_threshold.clamp(0.0, 1.0),
        }
    }

    /// Reset the window for a freshly loaded document
    pub fn initialize(&mut self) {
        self.last_line = self.initial_window;
    }

    pub fn last_line(&self) -> usize {
        self.last_line
    }

    /// Grow the window by one scroll increment.
    /// Returns true if the window changed.
    pub fn expand(&mut self, line_count: usize) -> bool {
        let next = (self.last_line + self.scroll_increment).min(self.ceiling(line_count));
        let changed = next != self.last_line;
        self.last_line = next;
        changed
    }

    /// Follow an edit that changed the line count from `old_count` to
    /// `new_count` and left the caret on `caret_line`.
    ///
    /// Lines added by the edit stay inside the window, and so does the caret.
    /// Returns true if the window changed.
    pub fn resync(&mut self, old_count: usize, new_count: usize, caret_line: usize) -> bool {
        let mut next = self.last_line;
        if new_count > old_count {
            next += new_count - old_count;
        }
        next = next.max(caret_line).min(self.ceiling(new_count));

        let changed = next != self.last_line;
        self.last_line = next;
        changed
    }

    /// Check whether a scroll position asks for more content
    pub fn should_expand(&self, scroll_position: f64, scrollable_height: f64) -> bool {
        if scrollable_height <= 0.0 {
            return false;
        }
        scroll_position / scrollable_height >= self.expand_threshold
    }

    /// Concatenate lines `start..=min(end, line_count)`.
    ///
    /// Every line is followed by `\n` except the document's last one, so the
    /// result is always an exact prefix of the document text.
    pub fn materialize<S: TextStore + ?Sized>(store: &S, start: usize, end: usize) -> String {
        let line_count = store.line_count();
        let start = start.max(1);
        let end = end.min(line_count);
        let mut content = String::new();
        if start > end {
            return content;
        }

        for line in start..=end {
            if let Some(text) = store.line_content(line) {
                content.push_str(&text);
            }
            if line < line_count {
                content.push('\n');
            }
        }
        content
    }

    /// Materialize the current window `[1, last_line]`
    pub fn render<S: TextStore + ?Sized>(&self, store: &S) -> String {
        Self::materialize(store, 1, self.last_line)
    }

    fn ceiling(&self, line_count: usize) -> usize {
        line_count.max(self.initial_window)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(INITIAL_WINDOW, SCROLL_INCREMENT, EXPAND_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RopeStore;

    fn numbered(lines: usize) -> RopeStore {
        let text: Vec<String> = (1..=lines).map(|i| format!("line {i}")).collect();
        RopeStore::from_text(&text.join("\n"))
    }

    #[test]
    fn test_materialize_whole_document() {
        let store = RopeStore::from_text("abc\ndef\n");
        assert_eq!(Viewport::materialize(&store, 1, 3), "abc\ndef\n");
        assert_eq!(Viewport::materialize(&store, 1, 100), store.text());
    }

    #[test]
    fn test_materialize_prefix() {
        let store = numbered(5);
        assert_eq!(Viewport::materialize(&store, 1, 2), "line 1\nline 2\n");
        assert_eq!(Viewport::materialize(&store, 4, 9), "line 4\nline 5");
    }

    #[test]
    fn test_materialize_past_end_is_empty() {
        let store = numbered(3);
        assert_eq!(Viewport::materialize(&store, 4, 10), "");
    }

    #[test]
    fn test_initial_window_renders_prefix() {
        let store = numbered(200);
        let vp = Viewport::default();
        let rendered = vp.render(&store);
        assert_eq!(rendered.lines().count(), INITIAL_WINDOW);
        assert!(store.text().starts_with(&rendered));
    }

    #[test]
    fn test_expand_grows_by_increment() {
        let mut vp = Viewport::new(10, 5, 0.8);
        assert!(vp.expand(100));
        assert_eq!(vp.last_line(), 15);
    }

    #[test]
    fn test_expand_limit() {
        let mut vp = Viewport::new(10, 5, 0.8);
        assert!(vp.expand(12));
        assert_eq!(vp.last_line(), 12);
        assert!(!vp.expand(12));
        assert_eq!(vp.last_line(), 12);
    }

    #[test]
    fn test_expand_short_document_keeps_initial_window() {
        let mut vp = Viewport::new(10, 5, 0.8);
        assert!(!vp.expand(3));
        assert_eq!(vp.last_line(), 10);
        let store = numbered(3);
        assert_eq!(vp.render(&store), store.text());
    }

    #[test]
    fn test_initialize_resets_window() {
        let mut vp = Viewport::new(10, 5, 0.8);
        vp.expand(100);
        vp.initialize();
        assert_eq!(vp.last_line(), 10);
    }

    #[test]
    fn test_resync_grows_with_added_lines() {
        let mut vp = Viewport::new(10, 5, 0.8);
        vp.expand(100);
        assert!(vp.resync(100, 102, 3));
        assert_eq!(vp.last_line(), 17);
    }

    #[test]
    fn test_resync_follows_caret() {
        let mut vp = Viewport::new(10, 5, 0.8);
        assert!(vp.resync(100, 100, 42));
        assert_eq!(vp.last_line(), 42);
    }

    #[test]
    fn test_resync_shrinks_to_line_count() {
        let mut vp = Viewport::new(10, 5, 0.8);
        vp.expand(30);
        vp.expand(30);
        assert_eq!(vp.last_line(), 20);
        assert!(vp.resync(30, 12, 1));
        assert_eq!(vp.last_line(), 12);
    }

    #[test]
    fn test_should_expand_threshold() {
        let vp = Viewport::default();
        assert!(!vp.should_expand(790.0, 1000.0));
        assert!(vp.should_expand(800.0, 1000.0));
        assert!(!vp.should_expand(10.0, 0.0));
    }
}
