//! A doubly-linked deque whose nodes live in a vector-backed arena.
//!
//! Links between nodes are arena indices rather than pointers.  Slots
//! [`HEAD`] and [`TAIL`] are sentinels that bound the list; they never hold a
//! value and are never handed out to callers.
use std::fmt;
use std::iter::FusedIterator;

/// Arena index of the sentinel before the first element
const HEAD: usize = 0;

/// Arena index of the sentinel after the last element
const TAIL: usize = 1;

/// A handle to a node returned by the push methods.
///
/// A handle stays valid until its node is popped; after that,
/// [`Deque::get()`] returns `None` for it even if the arena slot has since
/// been reused for another node.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct NodeId {
    index: usize,
    generation: u32,
}

#[derive(Clone, Debug)]
struct Node<T> {
    /// `None` for sentinels and for slots on the free list
    value: Option<T>,
    generation: u32,
    prev: usize,
    next: usize,
}

impl<T> Node<T> {
    fn sentinel(prev: usize, next: usize) -> Node<T> {
        Node {
            value: None,
            generation: 0,
            prev,
            next,
        }
    }
}

/// A double-ended queue with O(1) insertion & removal at either end
#[derive(Clone)]
pub(crate) struct Deque<T> {
    nodes: Vec<Node<T>>,
    /// Indices of vacated slots available for reuse
    free: Vec<usize>,
    len: usize,
}

impl<T> Deque<T> {
    pub(crate) fn new() -> Deque<T> {
        // The sentinels point at each other.  `HEAD.prev` and `TAIL.next` are
        // never followed.
        Deque {
            nodes: vec![Node::sentinel(HEAD, TAIL), Node::sentinel(HEAD, TAIL)],
            free: Vec::new(),
            len: 0,
        }
    }

    /// Return the number of elements in the deque
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `value` at the front of the deque and return a handle to its
    /// node
    pub(crate) fn push_front(&mut self, value: T) -> NodeId {
        let next = self.nodes[HEAD].next;
        self.link(value, HEAD, next)
    }

    /// Insert `value` at the back of the deque and return a handle to its
    /// node
    pub(crate) fn push_back(&mut self, value: T) -> NodeId {
        let prev = self.nodes[TAIL].prev;
        self.link(value, prev, TAIL)
    }

    /// Remove & return the element at the front of the deque, or `None` if
    /// it is empty
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        let first = self.nodes[HEAD].next;
        self.unlink(first)
    }

    /// Remove & return the element at the back of the deque, or `None` if it
    /// is empty
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        let last = self.nodes[TAIL].prev;
        self.unlink(last)
    }

    pub(crate) fn peek_front(&self) -> Option<&T> {
        self.nodes[self.nodes[HEAD].next].value.as_ref()
    }

    pub(crate) fn peek_back(&self) -> Option<&T> {
        self.nodes[self.nodes[TAIL].prev].value.as_ref()
    }

    /// Return the element whose node is identified by `id`, or `None` if that
    /// node has been removed
    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        if id.index == HEAD || id.index == TAIL {
            return None;
        }
        self.nodes
            .get(id.index)
            .filter(|node| node.generation == id.generation)
            .and_then(|node| node.value.as_ref())
    }

    /// Remove every element from the deque
    pub(crate) fn clear(&mut self) {
        while self.pop_front().is_some() {}
        debug_assert_eq!(self.len, 0, "Deque length nonzero after clear()");
    }

    /// Iterate over the elements from front to back
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            front: self.nodes[HEAD].next,
            back: self.nodes[TAIL].prev,
            remaining: self.len,
        }
    }

    fn link(&mut self, value: T, prev: usize, next: usize) -> NodeId {
        let index = if let Some(index) = self.free.pop() {
            let node = &mut self.nodes[index];
            node.value = Some(value);
            node.prev = prev;
            node.next = next;
            index
        } else {
            self.nodes.push(Node {
                value: Some(value),
                generation: 0,
                prev,
                next,
            });
            self.nodes.len() - 1
        };
        self.nodes[prev].next = index;
        self.nodes[next].prev = index;
        self.len += 1;
        NodeId {
            index,
            generation: self.nodes[index].generation,
        }
    }

    fn unlink(&mut self, index: usize) -> Option<T> {
        if index == HEAD || index == TAIL {
            return None;
        }
        let node = &mut self.nodes[index];
        let value = node.value.take()?;
        let (prev, next) = (node.prev, node.next);
        node.generation = node.generation.wrapping_add(1);
        node.prev = index;
        node.next = index;
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.free.push(index);
        self.len -= 1;
        Some(value)
    }
}

impl<T: PartialEq> Deque<T> {
    /// Test whether any element of the deque equals `value`.  This is a
    /// linear scan.
    pub(crate) fn contains(&self, value: &T) -> bool {
        self.iter().any(|v| v == value)
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Deque<T> {
        Deque::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Deque<T>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Deque<T> {
        let mut deque = Deque::new();
        deque.extend(iter);
        deque
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            let _ = self.push_back(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Iter<'a, T> {
    nodes: &'a [Node<T>],
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.front];
        self.front = node.next;
        self.remaining -= 1;
        node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.back];
        self.back = node.prev;
        self.remaining -= 1;
        node.value.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
