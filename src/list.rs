use alloc::vec::Vec;
use core::num::NonZeroUsize;

/// A slot in the list's backing storage.
///
/// Vacant slots keep `val == None` and are threaded onto the free list
/// through `next`.
struct Slot<T> {
    val: Option<T>,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A doubly linked list with fixed capacity, stored in a slab.
///
/// Nodes are addressed by the slot index returned from [`List::add`]; an
/// index stays valid until the node is removed. The front of the list is the
/// most recently added or moved node, the back is the oldest.
///
/// # Examples
///
/// ```ignore
/// use range_memo::list::List;
/// use core::num::NonZeroUsize;
///
/// let mut list = List::new(NonZeroUsize::new(2).unwrap());
/// let a = list.add(10).unwrap();
/// let _b = list.add(20).unwrap();
/// assert!(list.add(30).is_none());
///
/// list.move_to_front(a);
/// assert_eq!(list.remove_last(), Some(20));
/// ```
pub(crate) struct List<T> {
    cap: NonZeroUsize,
    len: usize,
    slots: Vec<Slot<T>>,
    /// Head of the chain of vacant slots.
    free: Option<usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<T> List<T> {
    /// Creates a new list that holds at most `cap` items.
    pub(crate) fn new(cap: NonZeroUsize) -> List<T> {
        List {
            cap,
            len: 0,
            slots: Vec::new(),
            free: None,
            head: None,
            tail: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len == self.cap.get()
    }

    /// Adds a value to the front of the list.
    ///
    /// Returns the slot index of the new node, or `None` if the list is full.
    pub(crate) fn add(&mut self, v: T) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let slot = Slot {
            val: Some(v),
            prev: None,
            next: None,
        };
        let idx = match self.free {
            Some(idx) => {
                self.free = self.slots[idx].next;
                self.slots[idx] = slot;
                idx
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        };
        self.attach(idx);
        self.len += 1;
        Some(idx)
    }

    /// Returns the value stored at `idx`, if that slot is occupied.
    pub(crate) fn get(&self, idx: usize) -> Option<&T> {
        self.slots.get(idx)?.val.as_ref()
    }

    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.slots.get_mut(idx)?.val.as_mut()
    }

    /// Moves an occupied node to the front of the list.
    pub(crate) fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) || self.get(idx).is_none() {
            return;
        }
        self.detach(idx);
        self.attach(idx);
    }

    /// Removes the node at `idx` and returns its value.
    pub(crate) fn remove(&mut self, idx: usize) -> Option<T> {
        let val = self.slots.get_mut(idx)?.val.take()?;
        self.detach(idx);
        self.slots[idx].next = self.free;
        self.free = Some(idx);
        self.len -= 1;
        Some(val)
    }

    /// Removes the back (least recently used) node.
    pub(crate) fn remove_last(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.remove(tail)
    }

    /// Drops every node and releases the backing storage.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates `(slot index, value)` pairs from front to back.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Links a detached slot in as the new head.
    fn attach(&mut self, idx: usize) {
        self.slots[idx].prev = None;
        self.slots[idx].next = self.head;
        match self.head {
            Some(old) => self.slots[old].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    /// Unlinks a slot from its neighbours without vacating it.
    fn detach(&mut self, idx: usize) {
        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tail = prev,
        }
        self.slots[idx].prev = None;
        self.slots[idx].next = None;
    }
}

impl<T> core::fmt::Debug for List<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("List")
            .field("cap", &self.cap)
            .field("len", &self.len)
            .finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub(crate) struct Iter<'a, T> {
    list: &'a List<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let slot = &self.list.slots[idx];
        self.cursor = slot.next;
        self.remaining -= 1;
        slot.val.as_ref().map(|v| (idx, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
