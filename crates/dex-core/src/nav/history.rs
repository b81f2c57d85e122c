//! Navigation history.

/// Immutable back stack of screens to return to.
///
/// Every mutation returns a **new** `History` instance. Entries are whatever
/// the caller needs to restore a screen (see
/// [`ReturnState`](crate::view::route::ReturnState)).
#[derive(Debug, Clone, PartialEq)]
pub struct History<T> {
    back_stack: Vec<T>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self {
            back_stack: Vec::new(),
        }
    }
}

impl<T: Clone> History<T> {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `entry` onto the back stack.
    pub fn push(&self, entry: T) -> Self {
        let mut back_stack = self.back_stack.clone();
        back_stack.push(entry);
        Self { back_stack }
    }

    /// Go back one step. Returns the new History and the entry to restore,
    /// or `None` if the back stack is empty.
    pub fn go_back(&self) -> Option<(Self, T)> {
        let mut back_stack = self.back_stack.clone();
        let entry = back_stack.pop()?;
        Some((Self { back_stack }, entry))
    }

    /// The entry [`History::go_back`] would return.
    pub fn peek(&self) -> Option<&T> {
        self.back_stack.last()
    }

    /// Returns `true` if there is at least one entry on the back stack.
    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.back_stack.len()
    }
}
