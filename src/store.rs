use std::fmt::Formatter;
use std::hash::{Hash, Hasher};
use std::iter::repeat;
use std::ops::{Index, IndexMut, Range};
use std::rc::Rc;

use crate::Digit;

// Either a couple of digits kept inline, or a heap buffer shared by every clone
// of this store until one of them writes to it.
#[derive(Clone)]
enum Repr {
    Inline {
        len: usize,
        digits: [Digit; DigitStore::INLINE_CAPACITY],
    },
    Heap(Rc<Vec<Digit>>),
}

/// Little-endian sequence of digits with value semantics.
///
/// Up to `INLINE_CAPACITY` digits live inside the store itself. Beyond that the
/// digits move to a reference-counted heap buffer. Cloning a heap-backed store
/// only bumps the count; the first mutating access through a store whose buffer
/// is shared clones the buffer, so no clone ever observes another's writes.
///
/// The store knows nothing about numbers. Trimming zero digits is the caller's job.
#[derive(Clone)]
pub struct DigitStore {
    repr: Repr,
}

impl Default for DigitStore {
    fn default() -> Self {
        DigitStore::new()
    }
}

impl DigitStore {
    /// Number of digits held without a heap allocation.
    pub const INLINE_CAPACITY: usize = 2;

    pub fn new() -> Self {
        DigitStore {
            repr: Repr::Inline { len: 0, digits: [0; Self::INLINE_CAPACITY] },
        }
    }

    /// A store of `n` copies of `value`.
    pub fn from_elem(value: Digit, n: usize) -> Self {
        let mut s = DigitStore::new();
        s.resize(n, value);
        s
    }

    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Inline { len, .. } => *len,
            Repr::Heap(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Digits the store can hold before it must grow: the inline array, or the heap buffer.
    pub fn capacity(&self) -> usize {
        match &self.repr {
            Repr::Inline { .. } => Self::INLINE_CAPACITY,
            Repr::Heap(v) => v.capacity(),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self.repr, Repr::Inline { .. })
    }

    /// true when another store holds the same heap buffer.
    pub fn is_shared(&self) -> bool {
        self.ref_count() > 1
    }

    /// Number of stores holding this store's buffer; always 1 for inline storage.
    pub fn ref_count(&self) -> usize {
        match &self.repr {
            Repr::Inline { .. } => 1,
            Repr::Heap(v) => Rc::strong_count(v),
        }
    }

    pub fn as_slice(&self) -> &[Digit] {
        match &self.repr {
            Repr::Inline { len, digits } => &digits[..*len],
            Repr::Heap(v) => v.as_slice(),
        }
    }

    /// Mutable view of the digits. Un-shares a shared heap buffer first.
    pub fn as_mut_slice(&mut self) -> &mut [Digit] {
        match &mut self.repr {
            Repr::Inline { len, digits } => &mut digits[..*len],
            Repr::Heap(v) => Self::unshare(v).as_mut_slice(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Digit> {
        self.as_slice().iter()
    }

    // panics if 'i' is out of range
    pub fn get(&self, i: usize) -> Digit {
        self.as_slice()[i]
    }

    pub fn set(&mut self, i: usize, x: Digit) {
        self.as_mut_slice()[i] = x;
    }

    pub fn last(&self) -> Option<Digit> {
        self.as_slice().last().copied()
    }

    pub fn push(&mut self, x: Digit) {
        if let Repr::Inline { len, digits } = &mut self.repr {
            if *len < Self::INLINE_CAPACITY {
                digits[*len] = x;
                *len += 1;
                return;
            }
        }
        self.heap_mut().push(x);
    }

    pub fn pop(&mut self) -> Option<Digit> {
        match &mut self.repr {
            Repr::Inline { len, digits } => {
                if *len == 0 {
                    None
                } else {
                    *len -= 1;
                    Some(digits[*len])
                }
            }
            Repr::Heap(v) => Self::unshare(v).pop(),
        }
    }

    /// Inserts `count` copies of `value` in front of position `pos`.
    pub fn insert(&mut self, pos: usize, count: usize, value: Digit) {
        assert!(pos <= self.len(), "DigitStore::insert - position {pos} > {}", self.len());
        if count == 0 {
            return;
        }
        if let Repr::Inline { len, digits } = &mut self.repr {
            if *len + count <= Self::INLINE_CAPACITY {
                digits.copy_within(pos..*len, pos + count);
                digits[pos..pos + count].fill(value);
                *len += count;
                return;
            }
        }
        self.heap_mut().splice(pos..pos, repeat(value).take(count));
    }

    /// Removes the digits in `range`, shifting the tail down.
    pub fn erase(&mut self, range: Range<usize>) {
        assert!(range.start <= range.end && range.end <= self.len(),
                "DigitStore::erase - bad range {range:?} for {} digits", self.len());
        if range.is_empty() {
            return;
        }
        match &mut self.repr {
            Repr::Inline { len, digits } => {
                digits.copy_within(range.end..*len, range.start);
                *len -= range.len();
            }
            Repr::Heap(v) => {
                Self::unshare(v).drain(range);
            }
        }
    }

    pub fn truncate(&mut self, n: usize) {
        if n < self.len() {
            let len = self.len();
            self.erase(n..len);
        }
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }

    pub fn resize(&mut self, n: usize, value: Digit) {
        let len = self.len();
        if n > len {
            self.insert(len, n - len, value);
        } else {
            self.truncate(n);
        }
    }

    pub fn reverse(&mut self) {
        self.as_mut_slice().reverse();
    }

    pub fn swap(&mut self, other: &mut DigitStore) {
        std::mem::swap(&mut self.repr, &mut other.repr);
    }

    /// Copy-and-swap assignment: `self` is left untouched unless the copy succeeds.
    pub fn assign_from(&mut self, other: &DigitStore) {
        let mut tmp = other.clone();
        self.swap(&mut tmp);
    }

    // promotes inline digits to the heap (once; a heap store never goes back)
    // and returns an exclusively owned buffer.
    fn heap_mut(&mut self) -> &mut Vec<Digit> {
        if let Repr::Inline { len, digits } = &self.repr {
            let mut v = Vec::with_capacity(2 * Self::INLINE_CAPACITY);
            v.extend_from_slice(&digits[..*len]);
            log::trace!("store - promote {} inline digits to the heap", len);
            self.repr = Repr::Heap(Rc::new(v));
        }
        match &mut self.repr {
            Repr::Heap(v) => Self::unshare(v),
            Repr::Inline { .. } => unreachable!("DigitStore::heap_mut - store is inline after promotion"),
        }
    }

    fn unshare(v: &mut Rc<Vec<Digit>>) -> &mut Vec<Digit> {
        if Rc::strong_count(v) > 1 {
            log::trace!("store - copy shared buffer of {} digits before write", v.len());
        }
        Rc::make_mut(v)
    }
}

impl From<Vec<Digit>> for DigitStore {
    fn from(v: Vec<Digit>) -> Self {
        if v.len() <= Self::INLINE_CAPACITY {
            let mut digits = [0; Self::INLINE_CAPACITY];
            digits[..v.len()].copy_from_slice(&v);
            DigitStore { repr: Repr::Inline { len: v.len(), digits } }
        } else {
            DigitStore { repr: Repr::Heap(Rc::new(v)) }
        }
    }
}

impl From<&[Digit]> for DigitStore {
    fn from(s: &[Digit]) -> Self {
        DigitStore::from(s.to_vec())
    }
}

impl FromIterator<Digit> for DigitStore {
    fn from_iter<I: IntoIterator<Item = Digit>>(iter: I) -> Self {
        DigitStore::from(iter.into_iter().collect::<Vec<Digit>>())
    }
}

impl Index<usize> for DigitStore {
    type Output = Digit;

    fn index(&self, i: usize) -> &Digit {
        &self.as_slice()[i]
    }
}

impl IndexMut<usize> for DigitStore {
    fn index_mut(&mut self, i: usize) -> &mut Digit {
        &mut self.as_mut_slice()[i]
    }
}

impl PartialEq for DigitStore {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for DigitStore {}

impl Hash for DigitStore {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl std::fmt::Debug for DigitStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:X?}", if self.is_inline() { "inline" } else { "heap" }, self.as_slice())
    }
}
