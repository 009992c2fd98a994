/// The player's in-progress answer: an ordered list of distinct labels with a fixed capacity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    picks: Vec<String>,
    capacity: usize,
}

impl Selection {
    /// Creates an empty selection that holds at most `capacity` labels.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            picks: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `label` unless it is already picked or the selection is full.
    ///
    /// Returns `true` if the selection changed.
    pub fn push(&mut self, label: &str) -> bool {
        if self.is_full() || self.contains(label) {
            return false;
        }
        self.picks.push(label.to_string());
        true
    }

    pub fn clear(&mut self) {
        self.picks.clear();
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.picks.iter().any(|p| p == label)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.picks.len() >= self.capacity
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.picks.len()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.picks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_duplicates_and_overflow() {
        let mut selection = Selection::with_capacity(2);
        assert!(selection.push("A"));
        assert!(!selection.push("A"));
        assert!(selection.push("B"));
        assert!(selection.is_full());
        assert!(!selection.push("C"));
        assert_eq!(selection.as_slice(), ["A", "B"]);
    }

    #[test]
    fn clear_empties_but_keeps_capacity() {
        let mut selection = Selection::with_capacity(3);
        selection.push("A");
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.capacity(), 3);
        assert!(selection.push("A"));
    }
}
