use crate::error::{GalleryError, Result};

/// Called with the new position every time the index changes.
pub type Reaction = Box<dyn FnMut(usize) -> Result<()>>;

/// A position inside `[min, max]` that never leaves those bounds.
///
/// Requests outside the range are dropped without calling the reaction.
/// There is no wraparound at either end.
pub struct BoundedIndex<F> {
    min: usize,
    max: usize,
    value: usize,
    react: F,
}

impl<F> BoundedIndex<F>
where
    F: FnMut(usize) -> Result<()>,
{
    /// Builds the index and reacts once to the starting position.
    pub fn new(min: usize, max: usize, initial: usize, mut react: F) -> Result<Self> {
        if max < min {
            return Err(GalleryError::InvalidBounds { min, max });
        }
        let value = initial.clamp(min, max);
        react(value)?;
        Ok(Self {
            min,
            max,
            value,
            react,
        })
    }

    /// Returns `Ok(false)` when `value` was out of range.
    pub fn set(&mut self, value: usize) -> Result<bool> {
        if value < self.min || value > self.max {
            return Ok(false);
        }
        self.value = value;
        (self.react)(value)?;
        Ok(true)
    }

    pub fn increment(&mut self) -> Result<bool> {
        match self.value.checked_add(1) {
            Some(v) => self.set(v),
            None => Ok(false),
        }
    }

    pub fn decrement(&mut self) -> Result<bool> {
        match self.value.checked_sub(1) {
            Some(v) => self.set(v),
            None => Ok(false),
        }
    }

    pub fn value(&self) -> usize {
        self.value
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<usize>>>, impl FnMut(usize) -> Result<()>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |v| {
            sink.borrow_mut().push(v);
            Ok(())
        })
    }

    #[test]
    fn construction_reacts_to_initial_value() {
        let (seen, react) = recorder();
        let index = BoundedIndex::new(0, 4, 2, react).unwrap();
        assert_eq!(index.value(), 2);
        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn initial_value_is_clamped() {
        let (seen, react) = recorder();
        let index = BoundedIndex::new(0, 2, 9, react).unwrap();
        assert_eq!(index.value(), 2);
        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let (seen, react) = recorder();
        let err = BoundedIndex::new(1, 0, 0, react).err().unwrap();
        assert!(matches!(err, GalleryError::InvalidBounds { min: 1, max: 0 }));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn out_of_range_set_is_ignored() {
        let (seen, react) = recorder();
        let mut index = BoundedIndex::new(0, 3, 1, react).unwrap();
        assert!(!index.set(4).unwrap());
        assert!(!index.set(usize::MAX).unwrap());
        assert_eq!(index.value(), 1);
        assert_eq!(*seen.borrow(), vec![1]);
    }

    #[test]
    fn set_within_range_reacts() {
        let (seen, react) = recorder();
        let mut index = BoundedIndex::new(0, 3, 0, react).unwrap();
        assert!(index.set(3).unwrap());
        assert!(index.set(3).unwrap());
        assert_eq!(*seen.borrow(), vec![0, 3, 3]);
    }

    #[test]
    fn boundaries_do_not_wrap() {
        let (seen, react) = recorder();
        let mut index = BoundedIndex::new(0, 1, 0, react).unwrap();
        assert!(!index.decrement().unwrap());
        assert!(index.increment().unwrap());
        assert!(!index.increment().unwrap());
        assert_eq!(index.value(), 1);
        assert_eq!(*seen.borrow(), vec![0, 1]);
    }

    #[test]
    fn walking_out_and_back_returns_to_start() {
        for len in 1..6usize {
            for start in 0..len {
                let (seen, react) = recorder();
                let max = len - 1;
                let mut index = BoundedIndex::new(0, max, start, react).unwrap();

                for _ in 0..(max - start) {
                    assert!(index.increment().unwrap());
                    assert!(index.value() <= max);
                }
                assert_eq!(index.value(), max);
                assert!(!index.increment().unwrap());

                for _ in 0..(max - start) {
                    assert!(index.decrement().unwrap());
                }
                assert_eq!(index.value(), start);

                let expected: Vec<usize> = std::iter::once(start)
                    .chain(start + 1..=max)
                    .chain((start..max).rev())
                    .collect();
                assert_eq!(*seen.borrow(), expected);
            }
        }
    }

    #[test]
    fn reaction_errors_propagate() {
        let mut index = BoundedIndex::new(0, 2, 0, |v| {
            if v == 2 {
                Err(GalleryError::UnrecognizedMedia("c.txt".into()))
            } else {
                Ok(())
            }
        })
        .unwrap();
        assert!(index.increment().unwrap());
        assert!(index.increment().is_err());
        assert_eq!(index.min(), 0);
        assert_eq!(index.max(), 2);
    }
}
