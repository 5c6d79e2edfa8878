use super::ValidationError;
use serde::{Serialize, Serializer};
use std::ops::Deref;

/// Validated collection with const-generic length bounds
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedVec<T, const MIN: usize, const MAX: usize> {
    items: Vec<T>,
}

impl<T, const MIN: usize, const MAX: usize> BoundedVec<T, MIN, MAX> {
    /// Create a new bounded vector with validation
    pub fn new(items: Vec<T>) -> Result<Self, ValidationError> {
        if items.len() < MIN || items.len() > MAX {
            return Err(ValidationError::BoundsViolation {
                actual: items.len(),
                min: MIN,
                max: MAX,
            });
        }
        Ok(Self { items })
    }

    /// Keeps at most `MAX` items from the front of `items`.
    ///
    /// Fails only when fewer than `MIN` items are available.
    pub fn truncating(mut items: Vec<T>) -> Result<Self, ValidationError> {
        items.truncate(MAX);
        Self::new(items)
    }

    /// Get as slice
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Into inner vector
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }

    /// Upper bound of this collection type
    pub const fn capacity_bound() -> usize {
        MAX
    }
}

impl<T, const MAX: usize> Default for BoundedVec<T, 0, MAX> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T, const MIN: usize, const MAX: usize> Deref for BoundedVec<T, MIN, MAX> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T, const MIN: usize, const MAX: usize> IntoIterator for BoundedVec<T, MIN, MAX> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T, const MIN: usize, const MAX: usize> IntoIterator for &'a BoundedVec<T, MIN, MAX> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize, const MIN: usize, const MAX: usize> Serialize for BoundedVec<T, MIN, MAX> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.items.serialize(serializer)
    }
}

/// Limited size vector for query result constraints
pub type LimitedVec<T, const MAX: usize> = BoundedVec<T, 0, MAX>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_vec() {
        let vec: BoundedVec<i32, 1, 5> = BoundedVec::new(vec![1, 2, 3]).unwrap();
        assert_eq!(vec.len(), 3);

        let result: Result<BoundedVec<i32, 2, 5>, _> = BoundedVec::new(vec![1]);
        assert!(result.is_err());

        let result: Result<BoundedVec<i32, 1, 3>, _> = BoundedVec::new(vec![1, 2, 3, 4]);
        assert!(result.is_err());
    }

    #[test]
    fn test_truncating_keeps_front() {
        let vec: LimitedVec<i32, 4> = LimitedVec::truncating(vec![5, 4, 3, 2, 1]).unwrap();
        assert_eq!(vec.as_slice(), &[5, 4, 3, 2]);
        assert_eq!(LimitedVec::<i32, 4>::capacity_bound(), 4);
    }

    #[test]
    fn test_limited_vec_default_is_empty() {
        let vec: LimitedVec<&str, 4> = LimitedVec::default();
        assert!(vec.is_empty());
    }
}
