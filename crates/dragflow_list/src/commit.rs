//! Reorder commit

/// Result of a completed drag
#[derive(Debug, Clone, PartialEq)]
pub struct DragEnd<T> {
    /// Index the item was grabbed from
    pub from: usize,
    /// Index the item was dropped at
    pub to: usize,
    /// Data with the item moved from `from` to `to`
    pub data: Vec<T>,
}

/// Move the element at `from` to `to`, shifting the elements in between.
///
/// `from == to` returns an identical copy. Out-of-range indices leave the
/// sequence unchanged.
pub fn reorder<T: Clone>(data: &[T], from: usize, to: usize) -> Vec<T> {
    let mut next = data.to_vec();
    if from == to || from >= next.len() || to >= next.len() {
        return next;
    }
    let item = next.remove(from);
    next.insert(to, item);
    next
}
