use std::{
    fmt::{self, Debug, Formatter},
    mem::{self, MaybeUninit},
    ops::{Index, IndexMut},
    ptr::addr_of_mut,
};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingBufferError {
    #[error("The ring buffer is empty")]
    Empty,
    #[error("Index {index} is out of range for a ring buffer holding {len} elements")]
    IndexOutOfRange { index: usize, len: usize },
}

type Error = RingBufferError;
type Result<T> = std::result::Result<T, Error>;

/// Fixed-capacity double-ended ring buffer.
///
/// Storage is `N` inline slots. `head` is the slot of the front element and
/// `tail` the slot of the back element; both are only meaningful while `count > 0`.
/// Pushing onto a full buffer overwrites the element at the opposite end.
pub struct RingBuffer<T, const N: usize> {
    storage: [MaybeUninit<T>; N],
    head: usize,
    tail: usize,
    count: usize,
}

impl<T, const N: usize> RingBuffer<T, N> {
    const ASSERTS: () = {
        assert!(N != 0, "\nCapacity (N) must be greater than zero");
    };

    /// Allocates a new `RingBuffer<T, N>` on the heap
    ///
    /// ```
    /// use circular_buffer::RingBuffer;
    ///
    /// let rb = RingBuffer::<usize, 4096>::new_heap();
    ///
    /// assert_eq!(4096, rb.capacity());
    /// ```
    pub fn new_heap() -> Box<Self> {
        let () = Self::ASSERTS;

        // Initialize directly into the heap allocation, only the cursors need writing.
        // `Box::new(Self::new_inline())` may go through the stack and overflow it for large N
        let mut data: Box<MaybeUninit<RingBuffer<T, N>>> = Box::new_uninit();
        unsafe {
            let slot = data.as_mut_ptr();
            addr_of_mut!((*slot).head).write(0);
            addr_of_mut!((*slot).tail).write(0);
            addr_of_mut!((*slot).count).write(0);
            data.assume_init()
        }
    }

    /// Creates a new `RingBuffer<T, N>` inline (on the stack, or in a `static`)
    ///
    /// ```
    /// use circular_buffer::RingBuffer;
    ///
    /// let mut rb = RingBuffer::<usize, 8>::new_inline();
    /// assert!(rb.push_back(1337));
    ///
    /// println!("{rb:?}");
    /// ```
    pub const fn new_inline() -> Self {
        let () = Self::ASSERTS;

        Self {
            storage: [const { MaybeUninit::uninit() }; N],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Adds `value` after the back element.
    ///
    /// Returns `false` if the buffer was full, in which case the front element
    /// was dropped to make room.
    ///
    /// ```
    /// use circular_buffer::RingBuffer;
    ///
    /// let mut rb = RingBuffer::<usize, 2>::new_inline();
    /// assert!(rb.push_back(1));
    /// assert!(rb.push_back(2));
    /// assert!(!rb.push_back(3));
    /// assert_eq!(Ok(&2), rb.front());
    /// ```
    pub fn push_back(&mut self, value: T) -> bool {
        self.tail = Self::next(self.tail);

        if self.is_full() {
            // The slot after a full buffer's tail is its head
            let old = unsafe { mem::replace(self.storage[self.tail].assume_init_mut(), value) };
            self.head = Self::next(self.head);
            trace!(end = "back", capacity = N, "overwrote front element");
            drop(old);
            return false;
        }

        self.storage[self.tail].write(value);
        if self.count == 0 {
            self.head = self.tail;
        }
        self.count += 1;
        true
    }

    /// Adds `value` before the front element.
    ///
    /// Returns `false` if the buffer was full, in which case the back element
    /// was dropped to make room.
    pub fn push_front(&mut self, value: T) -> bool {
        self.head = Self::prev(self.head);

        if self.is_full() {
            // The slot before a full buffer's head is its tail
            let old = unsafe { mem::replace(self.storage[self.head].assume_init_mut(), value) };
            self.tail = Self::prev(self.tail);
            trace!(end = "front", capacity = N, "overwrote back element");
            drop(old);
            return false;
        }

        self.storage[self.head].write(value);
        if self.count == 0 {
            self.tail = self.head;
        }
        self.count += 1;
        true
    }

    /// Removes and returns the front element
    ///
    /// ```
    /// use circular_buffer::{RingBuffer, RingBufferError};
    /// use std::error::Error;
    ///
    /// fn main() -> Result<(), Box<dyn Error>> {
    ///     let mut rb = RingBuffer::<usize, 256>::new_inline();
    ///
    ///     rb.push_back(1337);
    ///     assert_eq!(1337, rb.pop_front()?);
    ///     assert_eq!(Err(RingBufferError::Empty), rb.pop_front());
    ///     Ok(())
    /// }
    /// ```
    pub fn pop_front(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::Empty);
        }

        Ok(unsafe { self.pop_front_unchecked() })
    }

    /// Removes and returns the back element
    pub fn pop_back(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::Empty);
        }

        Ok(unsafe { self.pop_back_unchecked() })
    }

    /// Removes and returns the front element without checking for emptiness.
    ///
    /// # Safety
    ///
    /// The buffer must not be empty.
    pub unsafe fn pop_front_unchecked(&mut self) -> T {
        debug_assert!(!self.is_empty(), "pop_front_unchecked on an empty ring buffer");

        let value = self.storage[self.head].assume_init_read();
        self.head = Self::next(self.head);
        self.count -= 1;
        if self.count == 0 {
            self.tail = self.head;
        }
        value
    }

    /// Removes and returns the back element without checking for emptiness.
    ///
    /// # Safety
    ///
    /// The buffer must not be empty.
    pub unsafe fn pop_back_unchecked(&mut self) -> T {
        debug_assert!(!self.is_empty(), "pop_back_unchecked on an empty ring buffer");

        let value = self.storage[self.tail].assume_init_read();
        self.tail = Self::prev(self.tail);
        self.count -= 1;
        if self.count == 0 {
            self.head = self.tail;
        }
        value
    }

    pub fn front(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(Error::Empty);
        }

        Ok(unsafe { self.storage[self.head].assume_init_ref() })
    }

    pub fn front_mut(&mut self) -> Result<&mut T> {
        if self.is_empty() {
            return Err(Error::Empty);
        }

        Ok(unsafe { self.storage[self.head].assume_init_mut() })
    }

    pub fn back(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(Error::Empty);
        }

        Ok(unsafe { self.storage[self.tail].assume_init_ref() })
    }

    pub fn back_mut(&mut self) -> Result<&mut T> {
        if self.is_empty() {
            return Err(Error::Empty);
        }

        Ok(unsafe { self.storage[self.tail].assume_init_mut() })
    }

    /// Returns the element `index` positions after the front
    ///
    /// ```
    /// use circular_buffer::{RingBuffer, RingBufferError};
    ///
    /// let mut rb = RingBuffer::<char, 3>::new_inline();
    /// rb.push_back('b');
    /// rb.push_front('a');
    ///
    /// assert_eq!(Ok(&'a'), rb.at(0));
    /// assert_eq!(Ok(&'b'), rb.at(1));
    /// assert_eq!(Err(RingBufferError::IndexOutOfRange { index: 2, len: 2 }), rb.at(2));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T> {
        let slot = self.slot_of(index)?;
        Ok(unsafe { self.storage[slot].assume_init_ref() })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let slot = self.slot_of(index)?;
        Ok(unsafe { self.storage[slot].assume_init_mut() })
    }

    /// Returns the number of elements in the `RingBuffer<T, N>`
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns how many elements can be pushed before one gets overwritten
    #[inline(always)]
    pub fn available(&self) -> usize {
        N - self.count
    }

    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.count == N
    }

    /// Drops every element and resets the cursors, leaving the buffer as if freshly constructed
    pub fn clear(&mut self) {
        let released = self.release();
        if released > 0 {
            debug!(released, capacity = N, "cleared ring buffer");
        }
    }

    /// Element held in a storage slot, or `None` when the slot is vacant
    #[cfg_attr(not(feature = "dump"), allow(dead_code))]
    pub(crate) fn slot_ref(&self, slot: usize) -> Option<&T> {
        if slot >= N || self.count == 0 {
            return None;
        }

        let offset = (slot + N - self.head) % N;
        if offset >= self.count {
            return None;
        }

        Some(unsafe { self.storage[slot].assume_init_ref() })
    }

    /// `(head, tail)` slots while the buffer holds anything
    #[cfg_attr(not(feature = "dump"), allow(dead_code))]
    pub(crate) fn cursors(&self) -> Option<(usize, usize)> {
        if self.is_empty() {
            return None;
        }

        Some((self.head, self.tail))
    }

    fn slot_of(&self, index: usize) -> Result<usize> {
        if index >= self.count {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.count,
            });
        }

        Ok((self.head + index) % N)
    }

    // Cursors are reset before any element is dropped, a panicking Drop leaks the rest instead of double dropping
    fn release(&mut self) -> usize {
        let (head, count) = (self.head, self.count);
        self.head = 0;
        self.tail = 0;
        self.count = 0;

        for offset in 0..count {
            unsafe { self.storage[(head + offset) % N].assume_init_drop() };
        }

        count
    }

    #[inline(always)]
    fn next(index: usize) -> usize {
        if index + 1 == N {
            0
        } else {
            index + 1
        }
    }

    #[inline(always)]
    fn prev(index: usize) -> usize {
        if index == 0 {
            N - 1
        } else {
            index - 1
        }
    }
}

impl<T, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new_inline()
    }
}

impl<T, const N: usize> Drop for RingBuffer<T, N> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T: Clone, const N: usize> Clone for RingBuffer<T, N> {
    fn clone(&self) -> Self {
        let mut clone = Self::new_inline();
        clone.head = self.head;
        clone.tail = self.tail;

        // `count` grows one element at a time so a panicking `T::clone` only drops what was written
        for offset in 0..self.count {
            let slot = (self.head + offset) % N;
            let value = unsafe { self.storage[slot].assume_init_ref() };
            clone.storage[slot].write(value.clone());
            clone.count += 1;
        }

        clone
    }
}

impl<T, const N: usize> Index<usize> for RingBuffer<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.at(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T, const N: usize> IndexMut<usize> for RingBuffer<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: Debug, const N: usize> Debug for RingBuffer<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("elements", &Elements(self))
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("len", &self.count)
            .field("capacity", &N)
            .finish()
    }
}

struct Elements<'a, T, const N: usize>(&'a RingBuffer<T, N>);

impl<T: Debug, const N: usize> Debug for Elements<'_, T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rb = self.0;
        f.debug_list().entries((0..rb.len()).map(|i| &rb[i])).finish()
    }
}
