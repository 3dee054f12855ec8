/// 1-based cursor over a list of `len` controls, with the last clicked index.
///
/// Moves are clamped to `[1, len]`. A move resets `clicked` only when the
/// cursor actually moves, so pressing against a bound keeps the clicked state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    selected: usize,
    clicked: usize,
    len: usize,
}

impl Selection {
    pub fn new(len: usize) -> Self {
        Self::with_selected(len, 1)
    }

    pub fn with_selected(len: usize, selected: usize) -> Self {
        Self {
            selected: selected.clamp(1, len.max(1)),
            clicked: 0,
            len,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Clicked index, `0` when nothing is clicked.
    pub fn clicked(&self) -> usize {
        self.clicked
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 0-based index of the selected entry, `None` for an empty list.
    pub fn index(&self) -> Option<usize> {
        (self.len > 0).then(|| self.selected - 1)
    }

    /// Moves the cursor by `delta` if the result stays inside `[1, len]`.
    pub fn shift(&mut self, delta: isize) -> bool {
        let Some(target) = self.selected.checked_add_signed(delta) else {
            return false;
        };
        self.select(target)
    }

    /// Selects `index` if it is inside `[1, len]`.
    pub fn select(&mut self, index: usize) -> bool {
        if index == self.selected || index == 0 || index > self.len {
            return false;
        }
        self.selected = index;
        self.clicked = 0;
        true
    }

    pub fn previous(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn next(&mut self) -> bool {
        self.shift(1)
    }

    /// Marks the selected entry clicked and returns its index.
    pub fn click(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.clicked = self.selected;
        Some(self.selected)
    }

    /// Updates the list length after entries were removed, re-clamping the cursor.
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        self.selected = self.selected.clamp(1, len.max(1));
        if self.clicked > len {
            self.clicked = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_leaves_bounds() {
        let mut selection = Selection::new(4);
        for _ in 0..10 {
            selection.next();
        }
        assert_eq!(selection.selected(), 4);
        for _ in 0..10 {
            selection.previous();
        }
        assert_eq!(selection.selected(), 1);
        assert!(!selection.shift(-3));
        assert!(!selection.shift(7));
    }

    #[test]
    fn blocked_moves_keep_the_clicked_state() {
        let mut selection = Selection::new(3);
        selection.click();
        assert!(!selection.previous());
        assert_eq!(selection.clicked(), 1);

        assert!(selection.next());
        assert_eq!(selection.clicked(), 0);
    }

    #[test]
    fn empty_lists_select_nothing() {
        let mut selection = Selection::new(0);
        assert_eq!(selection.index(), None);
        assert_eq!(selection.click(), None);
        assert!(!selection.next());
    }

    #[test]
    fn resize_clamps_the_cursor() {
        let mut selection = Selection::with_selected(3, 3);
        selection.click();
        selection.resize(2);
        assert_eq!(selection.selected(), 2);
        assert_eq!(selection.clicked(), 0);
    }
}
