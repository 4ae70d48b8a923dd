//! Fallible buffer allocation.

use crate::{Error, Result};

/// Empty vector with room for exactly `capacity` items.
pub(crate) fn try_with_capacity<T>(capacity: usize, frame_length: usize) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(capacity)
        .map_err(|source| Error::Allocation {
            frame_length,
            source,
        })?;
    Ok(buffer)
}

/// Allocate `len` copies of `value`, reporting failure instead of aborting.
pub(crate) fn try_filled<T: Clone>(len: usize, value: T, frame_length: usize) -> Result<Vec<T>> {
    let mut buffer = try_with_capacity(len, frame_length)?;
    buffer.resize(len, value);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled() {
        let buffer = try_filled(4, 1.5f32, 8).unwrap();
        assert_eq!(buffer, vec![1.5; 4]);
    }

    #[test]
    fn test_with_capacity() {
        let buffer: Vec<f32> = try_with_capacity(16, 32).unwrap();
        assert!(buffer.is_empty());
        assert!(buffer.capacity() >= 16);

        let result = try_with_capacity::<u64>(usize::MAX, 3);
        assert!(matches!(
            result,
            Err(Error::Allocation { frame_length: 3, .. })
        ));
    }

    #[test]
    fn test_capacity_overflow_reported() {
        let result = try_filled(usize::MAX, 0u64, 7);
        assert!(matches!(
            result,
            Err(Error::Allocation { frame_length: 7, .. })
        ));
    }
}
