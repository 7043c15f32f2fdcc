extern crate alloc;

use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};

/// Stable handle to a node stored in a [`List`].
///
/// A handle stays valid until its node is removed. After that the slot may be
/// reused by a later `add`, so callers must drop handles of removed nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// A slot in the arena. `val` is `None` while the slot sits on the free list.
struct Node<T> {
    val: Option<T>,
    prev: Option<usize>,
    next: Option<usize>,
}

impl<T> Node<T> {
    fn new(val: T) -> Self {
        Node {
            val: Some(val),
            prev: None,
            next: None,
        }
    }
}

/// A doubly linked list whose nodes live in a `Vec` and link to each other by index.
///
/// The front of the list is the most recently attached node and the back is the
/// oldest one. Every operation that takes a [`NodeId`] is O(1). Freed slots are
/// recycled, so a list that reaches a steady size stops allocating.
///
/// # Examples
///
/// ```ignore
/// let mut list = List::new();
/// let a = list.add("a");
/// let _b = list.add("b");
///
/// // front -> b -> a -> back
/// list.move_to_front(a);
/// // front -> a -> b -> back
/// assert_eq!(list.remove_last(), Some("b"));
/// ```
pub(crate) struct List<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list. Does not allocate.
    pub fn new() -> List<T> {
        List {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the current number of items in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn is_linked(&self, idx: usize) -> bool {
        self.nodes.get(idx).is_some_and(|node| node.val.is_some())
    }

    /// Links the node at `idx` in front of the current head.
    ///
    /// The node must not be linked already.
    fn attach(&mut self, idx: usize) {
        self.nodes[idx].prev = None;
        self.nodes[idx].next = self.head;
        match self.head {
            Some(head) => self.nodes[head].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    /// Unlinks the node at `idx`, patching its neighbours (or head/tail) around it.
    fn detach(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }
        self.nodes[idx].prev = None;
        self.nodes[idx].next = None;
    }

    /// Adds a value to the front of the list and returns its handle.
    pub fn add(&mut self, v: T) -> NodeId {
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Node::new(v);
                idx
            }
            None => {
                self.nodes.push(Node::new(v));
                self.nodes.len() - 1
            }
        };
        self.attach(idx);
        self.len += 1;
        NodeId(idx)
    }

    /// Moves a node to the front of the list. Unknown handles are ignored.
    pub fn move_to_front(&mut self, node: NodeId) {
        if !self.is_linked(node.0) || self.head == Some(node.0) {
            return;
        }
        self.detach(node.0);
        self.attach(node.0);
    }

    /// Unlinks a node and returns its value, freeing the slot for reuse.
    pub fn remove(&mut self, node: NodeId) -> Option<T> {
        if !self.is_linked(node.0) {
            return None;
        }
        self.detach(node.0);
        self.len -= 1;
        self.free.push(node.0);
        self.nodes[node.0].val.take()
    }

    /// Removes the last (least recently attached) item from the list.
    pub fn remove_last(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.remove(NodeId(tail))
    }

    /// Gets a reference to the value behind a handle.
    pub fn get(&self, node: NodeId) -> Option<&T> {
        self.nodes.get(node.0)?.val.as_ref()
    }

    /// Gets a mutable reference to the value behind a handle.
    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(node.0)?.val.as_mut()
    }

    /// Clears the list, dropping all values and releasing the arena's slots.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates from the front (newest) to the back (oldest).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }
}

/// Panics if the handle's node has been removed.
impl<T> Index<NodeId> for List<T> {
    type Output = T;

    fn index(&self, node: NodeId) -> &T {
        match self.get(node) {
            Some(val) => val,
            None => panic!("stale list handle {node:?}"),
        }
    }
}

impl<T> IndexMut<NodeId> for List<T> {
    fn index_mut(&mut self, node: NodeId) -> &mut T {
        match self.get_mut(node) {
            Some(val) => val,
            None => panic!("stale list handle {node:?}"),
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        List::new()
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("length", &self.len)
            .field("slots", &self.nodes.len())
            .finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub(crate) struct Iter<'a, T> {
    list: &'a List<T>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let idx = self.next?;
        let node = &self.list.nodes[idx];
        self.next = node.next;
        self.remaining -= 1;
        node.val.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            list: self.list,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}
