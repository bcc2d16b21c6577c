use crate::skeleton::SegmentId;

/// Cursor over the segments a user can drive; wraps at both ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    items: Vec<SegmentId>,
    index: usize,
}

impl Selection {
    pub fn new() -> Self {
        Self {
            items: SegmentId::ALL.to_vec(),
            index: 0,
        }
    }

    /// Custom ordering; `None` for an empty list
    pub fn with_items(items: Vec<SegmentId>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items, index: 0 })
        }
    }

    pub fn items(&self) -> &[SegmentId] {
        &self.items
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> SegmentId {
        self.items[self.index]
    }

    pub fn next(&mut self) -> SegmentId {
        self.index = (self.index + 1) % self.items.len();
        self.current()
    }

    pub fn previous(&mut self) -> SegmentId {
        self.index = (self.index + self.items.len() - 1) % self.items.len();
        self.current()
    }

    /// Jump straight to a segment; false if it is not selectable
    pub fn select(&mut self, id: SegmentId) -> bool {
        match self.items.iter().position(|&item| item == id) {
            Some(i) => {
                self.index = i;
                true
            }
            None => false,
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}
