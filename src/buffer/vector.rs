//! Growable vector: Amortized-growth array backing line storage.
//!
//! Capacity is managed explicitly rather than left to `Vec`'s own policy:
//! it starts at [`VECTOR_MIN_CAPACITY`] on first use and multiplies by
//! [`VECTOR_EXTEND_RATE`] whenever it is exhausted. It never shrinks unless
//! [`GrowableVector::shrink_to_fit`] is called.
//!
//! Any push or insert may relocate the backing storage. Element references
//! are ordinary borrows of the vector, so they cannot outlive the next
//! mutating call.

use crate::error::AllocError;
use std::ops::Index;

/// Capacity allocated on the first push.
pub const VECTOR_MIN_CAPACITY: usize = 16;

/// Factor applied to the capacity when it is exhausted.
pub const VECTOR_EXTEND_RATE: usize = 2;

/// An amortized O(1) append array with a predictable growth schedule.
#[derive(PartialEq, Eq)]
pub struct GrowableVector<T> {
    /// Element storage. Its real capacity is at least `capacity`.
    data: Vec<T>,
    /// Logical capacity following the growth schedule.
    capacity: usize,
}

impl<T> GrowableVector<T> {
    /// Create an empty vector. No storage is allocated until the first push.
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            capacity: 0,
        }
    }

    /// Number of stored elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the vector holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Logical capacity. Always `>= len()`.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Make room for one more element.
    ///
    /// Initializes the capacity to [`VECTOR_MIN_CAPACITY`] on first use and
    /// multiplies it by [`VECTOR_EXTEND_RATE`] when full. Existing elements
    /// are moved into the new allocation.
    pub fn ensure_capacity(&mut self) -> Result<(), AllocError> {
        let target = if self.capacity == 0 {
            VECTOR_MIN_CAPACITY
        } else if self.data.len() >= self.capacity {
            self.capacity.saturating_mul(VECTOR_EXTEND_RATE)
        } else {
            return Ok(());
        };

        let additional = target - self.data.len();
        self.data
            .try_reserve_exact(additional)
            .map_err(|source| AllocError {
                requested: target,
                source,
            })?;
        self.capacity = target;
        Ok(())
    }

    /// Make room for `additional` more elements, following the same
    /// growth schedule as repeated pushes.
    pub fn reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        let needed = self.data.len().saturating_add(additional);
        if additional == 0 || needed <= self.capacity {
            return Ok(());
        }
        let mut target = self.capacity.max(VECTOR_MIN_CAPACITY);
        while target < needed {
            target = target.saturating_mul(VECTOR_EXTEND_RATE);
        }
        self.data
            .try_reserve_exact(target - self.data.len())
            .map_err(|source| AllocError {
                requested: target,
                source,
            })?;
        self.capacity = target;
        Ok(())
    }

    /// Append an element.
    pub fn push(&mut self, value: T) -> Result<(), AllocError> {
        self.ensure_capacity()?;
        self.data.push(value);
        Ok(())
    }

    /// Insert an element at `index`, shifting later elements right.
    ///
    /// `index` is clamped to `len()`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), AllocError> {
        self.ensure_capacity()?;
        let index = index.min(self.data.len());
        self.data.insert(index, value);
        Ok(())
    }

    /// Remove and return the element at `index`, shifting later elements left.
    ///
    /// Returns `None` if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.data.len()).then(|| self.data.remove(index))
    }

    /// Remove and return the last element.
    pub fn pop(&mut self) -> Option<T> {
        self.data.pop()
    }

    /// Get a reference to the element at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Get a mutable reference to the element at `index`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    /// Get the last element.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.data.last()
    }

    /// Shorten the vector to `len` elements. Capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    /// Remove all elements. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Release unused capacity.
    ///
    /// This is the only way capacity goes down. An empty vector returns to
    /// the unallocated state and restarts the growth schedule.
    pub fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
        self.capacity = self.data.len();
    }

    /// View the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// View the elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Iterate mutably over the elements.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }
}

impl<T> Default for GrowableVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for GrowableVector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<'a, T> IntoIterator for &'a GrowableVector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowableVector<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

impl<T: Clone> Clone for GrowableVector<T> {
    /// The copy reserves the full logical capacity.
    fn clone(&self) -> Self {
        let mut data = Vec::with_capacity(self.capacity);
        data.extend_from_slice(&self.data);
        Self {
            data,
            capacity: self.capacity,
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for GrowableVector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrowableVector")
            .field("len", &self.data.len())
            .field("capacity", &self.capacity)
            .field("data", &self.data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_vector_starts_unallocated() {
        let vec: GrowableVector<u32> = GrowableVector::new();
        assert_eq!(vec.len(), 0);
        assert_eq!(vec.capacity(), 0);
    }

    #[test]
    fn test_vector_first_push_uses_min_capacity() {
        let mut vec = GrowableVector::new();
        vec.push(1).unwrap();
        assert_eq!(vec.capacity(), VECTOR_MIN_CAPACITY);
    }

    #[test]
    fn test_vector_growth_schedule() {
        let mut vec = GrowableVector::new();
        for i in 0..=VECTOR_MIN_CAPACITY {
            vec.push(i).unwrap();
        }
        assert_eq!(vec.capacity(), VECTOR_MIN_CAPACITY * VECTOR_EXTEND_RATE);
        assert_eq!(vec.len(), VECTOR_MIN_CAPACITY + 1);
    }

    #[test]
    fn test_vector_never_auto_shrinks() {
        let mut vec = GrowableVector::new();
        for i in 0..40 {
            vec.push(i).unwrap();
        }
        let cap = vec.capacity();
        while vec.pop().is_some() {}
        assert_eq!(vec.capacity(), cap);

        vec.shrink_to_fit();
        assert_eq!(vec.capacity(), 0);
    }

    #[test]
    fn test_vector_clone_keeps_reservation() {
        let mut vec = GrowableVector::new();
        for i in 0..20 {
            vec.push(i).unwrap();
        }
        assert_eq!(vec.capacity(), 32);

        let copy = vec.clone();
        assert_eq!(copy, vec);
        assert_eq!(copy.capacity(), 32);
        assert!(copy.data.capacity() >= copy.capacity());

        let empty: GrowableVector<u8> = GrowableVector::new();
        assert_eq!(empty.clone().capacity(), 0);
    }

    #[test]
    fn test_vector_insert_remove() {
        let mut vec = GrowableVector::new();
        vec.push('a').unwrap();
        vec.push('c').unwrap();
        vec.insert(1, 'b').unwrap();
        assert_eq!(vec.as_slice(), &['a', 'b', 'c']);

        assert_eq!(vec.remove(0), Some('a'));
        assert_eq!(vec.remove(5), None);
        assert_eq!(vec.as_slice(), &['b', 'c']);

        // Out-of-range insert appends.
        vec.insert(99, 'd').unwrap();
        assert_eq!(vec[2], 'd');
    }

    #[test]
    fn test_vector_reserve_follows_schedule() {
        let mut vec: GrowableVector<u8> = GrowableVector::new();
        vec.reserve(0).unwrap();
        assert_eq!(vec.capacity(), 0);
        vec.reserve(40).unwrap();
        assert_eq!(vec.capacity(), 64);
        vec.reserve(10).unwrap();
        assert_eq!(vec.capacity(), 64);
    }

    proptest! {
        #[test]
        fn prop_vector_preserves_values(values in proptest::collection::vec(any::<u64>(), 0..300)) {
            let mut vec = GrowableVector::new();
            for v in &values {
                vec.push(*v).unwrap();
                prop_assert!(vec.capacity() >= vec.len());
            }
            prop_assert_eq!(vec.len(), values.len());
            prop_assert_eq!(vec.as_slice(), values.as_slice());
        }
    }
}
