//! Generic LIFO used for every pushable engine context.

/// LIFO of context items.
///
/// The only mutation points are [`push`](Self::push), [`pop`](Self::pop) and
/// [`set`](Self::set). `set` replaces the top atomically; on an empty stack
/// it inserts the first element instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Create an empty stack.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create a stack holding a single item.
    pub fn with(item: T) -> Self {
        Self { items: vec![item] }
    }

    /// Number of items on the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Peek at the top item.
    #[inline]
    pub fn top(&self) -> Option<&T> {
        self.items.last()
    }

    #[inline]
    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    #[inline]
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Replace the top item, returning the one it displaced.
    ///
    /// On an empty stack this pushes `item` and returns `None`.
    pub fn set(&mut self, item: T) -> Option<T> {
        match self.items.last_mut() {
            Some(top) => Some(std::mem::replace(top, item)),
            None => {
                self.items.push(item);
                None
            }
        }
    }

    /// Iterate from the top of the stack down to the bottom.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    /// Items are pushed in iteration order; the last one ends up on top.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
