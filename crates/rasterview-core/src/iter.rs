//! Raster-order traversal of any view.
//!
//! [`ViewIter`] walks a view column-fastest, then row, then plane, which is
//! the same order the rasterization engine fills buffers in. Collecting an
//! iterator and iterating a rasterized copy therefore produce the same
//! sequence.
//!
//! Two iterators compare equal when they come from the same view instance
//! and sit at the same logical position, so `view.end()` is reached after
//! exactly `cols * rows * planes` steps from `view.begin()`.
//!
//! # Example
//!
//! ```rust
//! use rasterview_core::{Image, ImageView};
//!
//! let img = Image::from_data(2, 2, 1, vec![1, 2, 3, 4]).unwrap();
//! let values: Vec<i32> = img.iter().collect();
//! assert_eq!(values, vec![1, 2, 3, 4]);
//!
//! let mut it = img.begin();
//! for _ in 0..4 {
//!     assert_ne!(it, img.end());
//!     it.step();
//! }
//! assert_eq!(it, img.end());
//! ```

use crate::{ImageView, PixelAccessor};
use std::iter::FusedIterator;

/// Sequential cursor over a view in raster order.
///
/// Internally keeps an accessor that slides along the current row and is
/// re-seated at the start of each row, so buffer-backed views are walked
/// without recomputing offsets per pixel.
pub struct ViewIter<'a, V: ImageView> {
    view: &'a V,
    index: usize,
    len: usize,
    cursor: Option<V::Accessor<'a>>,
}

impl<'a, V: ImageView> ViewIter<'a, V> {
    /// Iterator at the first pixel of `view`.
    pub fn begin(view: &'a V) -> Self {
        Self::at_index(view, 0)
    }

    /// The end sentinel of `view`.
    pub fn end(view: &'a V) -> Self {
        Self::at_index(view, view.len())
    }

    fn at_index(view: &'a V, index: usize) -> Self {
        let len = view.len();
        let mut it = Self {
            view,
            index: index.min(len),
            len,
            cursor: None,
        };
        it.reseat();
        it
    }

    fn reseat(&mut self) {
        self.cursor = if self.index < self.len {
            let (x, y, p) = Self::position(self);
            Some(self.view.accessor(x, y, p))
        } else {
            None
        };
    }

    /// Logical position as (x, y, plane).
    ///
    /// At the end sentinel this is the first pixel of the plane past the
    /// last one.
    pub fn position(&self) -> (i32, i32, u32) {
        let cols = self.view.cols() as usize;
        let rows = self.view.rows() as usize;
        if cols == 0 || rows == 0 {
            return (0, 0, 0);
        }
        let x = self.index % cols;
        let y = (self.index / cols) % rows;
        let p = self.index / (cols * rows);
        (x as i32, y as i32, p as u32)
    }

    /// Number of steps taken from `begin()`.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` at the end sentinel.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index >= self.len
    }

    /// Dereferences the iterator.
    ///
    /// Returns `None` at the end sentinel.
    #[inline]
    pub fn current(&self) -> Option<V::Pixel> {
        self.cursor.as_ref().map(PixelAccessor::get)
    }

    /// Advances one pixel without reading it.
    ///
    /// Stepping the end sentinel leaves it in place.
    pub fn step(&mut self) {
        if self.index >= self.len {
            return;
        }
        self.index += 1;
        let cols = self.view.cols() as usize;
        if self.index < self.len && self.index % cols != 0 {
            if let Some(acc) = self.cursor.as_mut() {
                acc.next_col();
                return;
            }
        }
        self.reseat();
    }
}

impl<V: ImageView> Clone for ViewIter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            index: self.index,
            len: self.len,
            cursor: self.cursor.clone(),
        }
    }
}

impl<V: ImageView> PartialEq for ViewIter<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.view, other.view) && self.index == other.index
    }
}

impl<V: ImageView> Eq for ViewIter<'_, V> {}

impl<V: ImageView> std::fmt::Debug for ViewIter<'_, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewIter")
            .field("index", &self.index)
            .field("len", &self.len)
            .field("position", &self.position())
            .finish()
    }
}

impl<V: ImageView> Iterator for ViewIter<'_, V> {
    type Item = V::Pixel;

    fn next(&mut self) -> Option<V::Pixel> {
        let value = self.current()?;
        self.step();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl<V: ImageView> ExactSizeIterator for ViewIter<'_, V> {}

impl<V: ImageView> FusedIterator for ViewIter<'_, V> {}

#[cfg(test)]
mod tests {
    use crate::{ConstantView, Image, ImageView};

    #[test]
    fn test_raster_order_across_planes() {
        let img = Image::from_fn(2, 2, 2, |x, y, p| (p * 100) as i32 + y * 10 + x);
        let values: Vec<i32> = img.iter().collect();
        assert_eq!(values, vec![0, 1, 10, 11, 100, 101, 110, 111]);
    }

    #[test]
    fn test_positions_follow_raster_order() {
        let img: Image<u8> = Image::new(3, 2, 2);
        let mut it = img.begin();
        let mut seen = Vec::new();
        while !it.is_end() {
            seen.push(it.position());
            it.step();
        }
        assert_eq!(seen.len(), 12);
        assert_eq!(seen[0], (0, 0, 0));
        assert_eq!(seen[2], (2, 0, 0));
        assert_eq!(seen[3], (0, 1, 0));
        assert_eq!(seen[6], (0, 0, 1));
        assert_eq!(seen[11], (2, 1, 1));
    }

    #[test]
    fn test_step_reseats_cursor() {
        let img = Image::from_fn(3, 2, 2, |x, y, p| (p * 100) as i32 + y * 10 + x);
        let mut it = img.begin();
        it.next();
        it.step();
        it.step();
        assert_eq!(it.position(), (0, 1, 0));
        assert_eq!(it.current(), Some(10));
        for _ in 0..4 {
            it.step();
        }
        assert_eq!(it.position(), (1, 0, 1));
        assert_eq!(it.current(), Some(101));
    }

    #[test]
    fn test_end_reached_after_len_steps() {
        let view = ConstantView::new(1.5f32, 3, 2, 2);
        let mut it = view.begin();
        for _ in 0..view.len() {
            assert_ne!(it, view.end());
            assert_eq!(it.current(), Some(1.5));
            it.step();
        }
        assert_eq!(it, view.end());
        assert_eq!(it.current(), None);
        it.step();
        assert_eq!(it, view.end());
    }

    #[test]
    fn test_iterators_of_distinct_views_differ() {
        let a: Image<u8> = Image::new(2, 2, 1);
        let b: Image<u8> = Image::new(2, 2, 1);
        assert_ne!(a.begin(), b.begin());
        assert_eq!(a.begin(), a.begin());
    }

    #[test]
    fn test_exact_size() {
        let img: Image<u8> = Image::new(5, 4, 3);
        let mut it = img.iter();
        assert_eq!(it.len(), 60);
        it.next();
        assert_eq!(it.len(), 59);
        assert_eq!(it.count(), 59);
    }

    #[test]
    fn test_empty_view() {
        let img: Image<u8> = Image::new(0, 4, 1);
        assert_eq!(img.begin(), img.end());
        assert_eq!(img.iter().next(), None);
    }
}
