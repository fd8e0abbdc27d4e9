/// One flag per horizontal edgel: index `y * w + x` stands for the edgel
/// joining samples `(x, y)` and `(x + 1, y)`.
///
/// Set indices are journaled so that clearing costs only what was marked and
/// the marks of a single aborted trace can be undone or moved elsewhere.
pub(crate) struct EdgelBitmap {
    width: usize,
    flags: Vec<bool>,
    journal: Vec<usize>,
}

impl EdgelBitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            flags: vec![false; width * height],
            journal: Vec::with_capacity(256),
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn is_visited(&self, x: usize, y: usize) -> bool {
        self.flags[self.index(x, y)]
    }

    /// Mark the edgel and return whether it was already marked.
    #[inline]
    pub fn visit(&mut self, x: usize, y: usize) -> bool {
        let idx = self.index(x, y);
        let seen = self.flags[idx];
        if !seen {
            self.flags[idx] = true;
            self.journal.push(idx);
        }
        seen
    }

    pub fn checkpoint(&self) -> usize {
        self.journal.len()
    }

    /// Unmark everything marked since `checkpoint`.
    pub fn rollback(&mut self, checkpoint: usize) {
        for idx in self.journal.drain(checkpoint..) {
            self.flags[idx] = false;
        }
    }

    /// Move everything marked since `checkpoint` over to `other`.
    pub fn move_since(&mut self, checkpoint: usize, other: &mut EdgelBitmap) {
        for idx in self.journal.drain(checkpoint..) {
            self.flags[idx] = false;
            if !other.flags[idx] {
                other.flags[idx] = true;
                other.journal.push(idx);
            }
        }
    }

    pub fn clear(&mut self) {
        self.rollback(0);
    }

    #[cfg(test)]
    pub fn marked(&self) -> usize {
        self.journal.len()
    }
}

#[cfg(test)]
mod tests {
    use super::EdgelBitmap;

    #[test]
    fn visit_reports_second_pass() {
        let mut bitmap = EdgelBitmap::new(4, 3);
        assert!(!bitmap.visit(1, 2));
        assert!(bitmap.visit(1, 2));
        assert!(bitmap.is_visited(1, 2));
        assert!(!bitmap.is_visited(2, 1));
        assert_eq!(bitmap.marked(), 1);
    }

    #[test]
    fn rollback_only_undoes_recent_marks() {
        let mut bitmap = EdgelBitmap::new(4, 3);
        bitmap.visit(0, 0);
        let cp = bitmap.checkpoint();
        bitmap.visit(1, 0);
        bitmap.visit(2, 1);
        bitmap.rollback(cp);
        assert!(bitmap.is_visited(0, 0));
        assert!(!bitmap.is_visited(1, 0));
        assert!(!bitmap.is_visited(2, 1));
        bitmap.clear();
        assert!(!bitmap.is_visited(0, 0));
        assert_eq!(bitmap.marked(), 0);
    }

    #[test]
    fn move_since_transfers_recent_marks() {
        let mut bitmap = EdgelBitmap::new(4, 3);
        let mut dead = EdgelBitmap::new(4, 3);
        bitmap.visit(0, 0);
        dead.visit(2, 1);
        let cp = bitmap.checkpoint();
        bitmap.visit(1, 0);
        bitmap.visit(2, 1);
        bitmap.move_since(cp, &mut dead);
        assert!(bitmap.is_visited(0, 0));
        assert!(!bitmap.is_visited(1, 0) && !bitmap.is_visited(2, 1));
        assert!(dead.is_visited(1, 0) && dead.is_visited(2, 1));
        assert_eq!(bitmap.marked(), 1);
        assert_eq!(dead.marked(), 2);
    }
}
