//! Bounded, ordered staging list for a single turn.

/// Maximum number of pieces (and of targets) staged per turn.
pub const STAGING_CAPACITY: usize = 2;

/// Why [`Staging::try_push`] refused a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushRejection {
    /// The list already holds [`STAGING_CAPACITY`] entries.
    Full,
    /// The position is already in the list.
    Duplicate,
}

/// Up to two positions in insertion order.
///
/// Insertion order matters: the i-th selected piece is paired with the i-th
/// target when a move is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Staging<T> {
    slots: [Option<T>; STAGING_CAPACITY],
    len: usize,
}

impl<T: Copy + PartialEq> Staging<T> {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self {
            slots: [None; STAGING_CAPACITY],
            len: 0,
        }
    }

    /// Number of staged entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when no more entries fit.
    pub fn is_full(&self) -> bool {
        self.len == STAGING_CAPACITY
    }

    /// True if `item` is staged.
    pub fn contains(&self, item: T) -> bool {
        self.iter().any(|staged| staged == item)
    }

    /// Entry at insertion index `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.slots.get(index).copied().flatten()
    }

    /// Staged entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.slots.iter().take(self.len).filter_map(|slot| *slot)
    }

    /// Copies the entries out in insertion order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Appends `item`. Duplicates are reported before capacity.
    ///
    /// # Errors
    ///
    /// Returns [`PushRejection`] and leaves the list unchanged when `item`
    /// is already staged or the list is full.
    pub fn try_push(&mut self, item: T) -> Result<(), PushRejection> {
        if self.contains(item) {
            return Err(PushRejection::Duplicate);
        }
        if self.is_full() {
            return Err(PushRejection::Full);
        }
        self.slots[self.len] = Some(item);
        self.len += 1;
        Ok(())
    }

    /// Empties the list.
    pub fn clear(&mut self) {
        self.slots = [None; STAGING_CAPACITY];
        self.len = 0;
    }
}

impl<T: Copy + PartialEq> Default for Staging<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut staging = Staging::new();
        staging.try_push(7).unwrap();
        staging.try_push(3).unwrap();
        assert_eq!(staging.to_vec(), vec![7, 3]);
        assert_eq!(staging.get(0), Some(7));
        assert_eq!(staging.get(1), Some(3));
        assert!(staging.is_full());
    }

    #[test]
    fn test_third_push_is_full() {
        let mut staging = Staging::new();
        staging.try_push(1).unwrap();
        staging.try_push(2).unwrap();
        assert_eq!(staging.try_push(3), Err(PushRejection::Full));
        assert_eq!(staging.to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut staging = Staging::new();
        staging.try_push(1).unwrap();
        assert_eq!(staging.try_push(1), Err(PushRejection::Duplicate));
        assert_eq!(staging.len(), 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut staging = Staging::new();
        staging.try_push(1).unwrap();
        staging.clear();
        let once = staging;
        staging.clear();
        assert_eq!(staging, once);
        assert!(staging.is_empty());
        assert_eq!(staging.get(0), None);
    }
}
