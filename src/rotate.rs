//! Rotate Module — fixed-size visible window over a circular collection.
//!
//! Responsibilities:
//! - `rotate`: move the last `n mod len` items to the front
//! - `compute_visible`: rotated collection truncated to the window size
//! - `RotationState`: the (rotate_index, highlighted_index) pair lists keep
//!
//! Rotation never resizes the window, so the highlighted index range stays
//! `[0, window_size - 1]` while the contents slide.

use crate::error::{InputError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RotationState {
    pub rotate_index: i64,
    pub highlighted_index: usize,
}

impl RotationState {
    pub fn new(highlighted_index: usize) -> Self {
        Self {
            rotate_index: 0,
            highlighted_index,
        }
    }
}

/// Number of visible rows for `item_count` items under `limit`.
pub fn window_size(item_count: usize, limit: usize) -> usize {
    limit.min(item_count)
}

/// Index into the source collection shown at `position` after rotating by
/// `rotate_index`. `len` must be non-zero.
pub(crate) fn source_index(len: usize, rotate_index: i64, position: usize) -> usize {
    let shift = rotate_index.rem_euclid(len as i64) as usize;
    (position % len + len - shift) % len
}

/// Rotate right by `n`: the last `n mod len` items move to the front.
/// Negative `n` rotates the other way.
pub fn rotate<T: Clone>(items: &[T], n: i64) -> Result<Vec<T>> {
    if items.is_empty() {
        return Err(InputError::EmptyCollection);
    }
    let len = items.len();
    Ok((0..len)
        .map(|pos| items[source_index(len, n, pos)].clone())
        .collect())
}

/// The visible window: `rotate(items, rotate_index)` truncated to `limit`.
pub fn compute_visible<T>(items: &[T], rotate_index: i64, limit: usize) -> Result<Vec<&T>> {
    if items.is_empty() {
        return Err(InputError::EmptyCollection);
    }
    let len = items.len();
    Ok((0..window_size(len, limit))
        .map(|pos| &items[source_index(len, rotate_index, pos)])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_zero_is_identity() {
        let items = vec![1, 2, 3, 4];
        assert_eq!(rotate(&items, 0).unwrap(), items);
    }

    #[test]
    fn test_rotate_moves_tail_to_front() {
        let items = vec!['a', 'b', 'c', 'd', 'e'];
        assert_eq!(rotate(&items, 1).unwrap(), vec!['e', 'a', 'b', 'c', 'd']);
        assert_eq!(rotate(&items, 2).unwrap(), vec!['d', 'e', 'a', 'b', 'c']);
        assert_eq!(rotate(&items, -1).unwrap(), vec!['b', 'c', 'd', 'e', 'a']);
        assert_eq!(rotate(&items, 5).unwrap(), items);
        assert_eq!(rotate(&items, 6).unwrap(), rotate(&items, 1).unwrap());
        assert_eq!(rotate(&items, -5).unwrap(), items);
    }

    #[test]
    fn test_rotate_composes() {
        let items: Vec<u32> = (0..7).collect();
        let len = items.len() as i64;
        for a in -9..9 {
            for b in -9..9 {
                let twice = rotate(&rotate(&items, a).unwrap(), b).unwrap();
                let once = rotate(&items, (a + b).rem_euclid(len)).unwrap();
                assert_eq!(twice, once, "a={a} b={b}");
            }
        }
    }

    #[test]
    fn test_rotate_empty_fails_fast() {
        let empty: Vec<u8> = Vec::new();
        assert!(matches!(rotate(&empty, 1), Err(InputError::EmptyCollection)));
        assert!(matches!(
            compute_visible(&empty, 0, 3),
            Err(InputError::EmptyCollection)
        ));
    }

    #[test]
    fn test_window_size_invariant() {
        for len in 1..8usize {
            let items: Vec<usize> = (0..len).collect();
            for limit in 1..10usize {
                for r in -12..12 {
                    let visible = compute_visible(&items, r, limit).unwrap();
                    assert_eq!(visible.len(), limit.min(len));
                }
            }
        }
    }

    #[test]
    fn test_compute_visible_matches_rotate_take() {
        let items: Vec<u32> = (0..10).collect();
        for r in -15..15 {
            let expected: Vec<u32> = rotate(&items, r).unwrap().into_iter().take(3).collect();
            let visible: Vec<u32> = compute_visible(&items, r, 3)
                .unwrap()
                .into_iter()
                .copied()
                .collect();
            assert_eq!(visible, expected);
        }
    }

    #[test]
    fn test_rotation_reveals_predecessor() {
        let items: Vec<u32> = (0..10).collect();
        let before = compute_visible(&items, 0, 3).unwrap();
        let after = compute_visible(&items, 1, 3).unwrap();
        assert_eq!(*before[0], 0);
        assert_eq!(*after[0], 9);
        assert_eq!(*after[1], 0);
    }
}
