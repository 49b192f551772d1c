//! Pixel accessors: movable cursors into a view's pixel grid.
//!
//! An accessor is the unit of neighborhood-aware computation. It is created
//! by a view at some (x, y, plane), moved around with O(1) relative steps,
//! and dereferenced with [`PixelAccessor::get`]. Neighborhood algorithms
//! consume accessors rather than raw buffers, so the same stencil code runs
//! over an [`Image`](crate::Image), a crop, an edge-extended view or a chain
//! of transform views.
//!
//! # Bounds
//!
//! Moving an accessor never fails, even outside the view. Dereferencing an
//! accessor that sits outside its originating view's bounds is a
//! precondition violation: over an [`Image`](crate::Image) it panics through
//! slice indexing, over other views the result is whatever the view's
//! `pixel` does with such coordinates.
//!
//! # Example
//!
//! ```rust
//! use rasterview_core::{Image, ImageView, PixelAccessor};
//!
//! let img = Image::from_data(2, 2, 1, vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
//! let mut acc = img.origin();
//! assert_eq!(acc.get(), 1.0);
//! acc.next_col();
//! acc.next_row();
//! assert_eq!(acc.get(), 4.0);
//! acc.advance(-1, -1);
//! assert_eq!(acc.get(), 1.0);
//! ```

use crate::ImageView;

/// A cursor over one plane of a pixel grid.
///
/// Every movement is O(1) and movements compose: stepping by (dx1, dy1)
/// then (dx2, dy2) reaches the same pixel as stepping by
/// (dx1 + dx2, dy1 + dy2).
///
/// Only [`advance`](Self::advance), the plane steps and [`get`](Self::get)
/// are required; the single-step moves default to `advance`.
pub trait PixelAccessor: Clone {
    /// The value produced on dereference.
    type Pixel;

    /// Moves by `dx` columns and `dy` rows.
    fn advance(&mut self, dx: i32, dy: i32);

    /// Moves to the same (x, y) in the next plane.
    fn next_plane(&mut self);

    /// Moves to the same (x, y) in the previous plane.
    fn prev_plane(&mut self);

    /// Reads the pixel under the cursor.
    fn get(&self) -> Self::Pixel;

    /// Moves one column right.
    #[inline]
    fn next_col(&mut self) {
        self.advance(1, 0);
    }

    /// Moves one column left.
    #[inline]
    fn prev_col(&mut self) {
        self.advance(-1, 0);
    }

    /// Moves one row down.
    #[inline]
    fn next_row(&mut self) {
        self.advance(0, 1);
    }

    /// Moves one row up.
    #[inline]
    fn prev_row(&mut self) {
        self.advance(0, -1);
    }

    /// Returns a copy of this accessor moved by (dx, dy).
    #[inline]
    fn offset(&self, dx: i32, dy: i32) -> Self {
        let mut acc = self.clone();
        acc.advance(dx, dy);
        acc
    }
}

/// Accessor over contiguous plane-major storage.
///
/// Holds the backing slice, a signed element offset and the column, row and
/// plane strides. The offset may wander anywhere; it is only validated when
/// dereferenced.
pub struct ImageAccessor<'a, P> {
    data: &'a [P],
    offset: isize,
    row_stride: isize,
    plane_stride: isize,
}

impl<'a, P> ImageAccessor<'a, P> {
    /// Creates an accessor at element `offset` of `data`.
    #[inline]
    pub fn new(data: &'a [P], offset: isize, row_stride: isize, plane_stride: isize) -> Self {
        Self {
            data,
            offset,
            row_stride,
            plane_stride,
        }
    }

    /// The element offset of the cursor in the backing slice.
    #[inline]
    pub fn offset_index(&self) -> isize {
        self.offset
    }
}

impl<P> Clone for ImageAccessor<'_, P> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<P: Clone> PixelAccessor for ImageAccessor<'_, P> {
    type Pixel = P;

    #[inline]
    fn advance(&mut self, dx: i32, dy: i32) {
        self.offset += dx as isize + dy as isize * self.row_stride;
    }

    #[inline]
    fn next_plane(&mut self) {
        self.offset += self.plane_stride;
    }

    #[inline]
    fn prev_plane(&mut self) {
        self.offset -= self.plane_stride;
    }

    #[inline]
    fn get(&self) -> P {
        // A negative offset wraps to a huge index and fails the slice bound.
        self.data[self.offset as usize].clone()
    }

    #[inline]
    fn next_col(&mut self) {
        self.offset += 1;
    }

    #[inline]
    fn prev_col(&mut self) {
        self.offset -= 1;
    }
}

/// Accessor that tracks a coordinate and dereferences through
/// [`ImageView::pixel`].
///
/// Used by views with no storage layout to exploit: constant and
/// procedural views, edge-extended views.
pub struct ViewAccessor<'a, V> {
    view: &'a V,
    x: i32,
    y: i32,
    plane: i32,
}

impl<'a, V: ImageView> ViewAccessor<'a, V> {
    /// Creates an accessor over `view` at (x, y, plane).
    #[inline]
    pub fn new(view: &'a V, x: i32, y: i32, plane: u32) -> Self {
        Self {
            view,
            x,
            y,
            plane: plane as i32,
        }
    }

    /// Current (x, y, plane) of the cursor.
    #[inline]
    pub fn position(&self) -> (i32, i32, i32) {
        (self.x, self.y, self.plane)
    }
}

impl<V> Clone for ViewAccessor<'_, V> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<V: ImageView> PixelAccessor for ViewAccessor<'_, V> {
    type Pixel = V::Pixel;

    #[inline]
    fn advance(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    #[inline]
    fn next_plane(&mut self) {
        self.plane += 1;
    }

    #[inline]
    fn prev_plane(&mut self) {
        self.plane -= 1;
    }

    #[inline]
    fn get(&self) -> V::Pixel {
        self.view.pixel(self.x, self.y, self.plane as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConstantView, Image};

    fn ramp() -> Image<i32> {
        // 3x3x2, value encodes (x, y, p)
        Image::from_fn(3, 3, 2, |x, y, p| p as i32 * 100 + y * 10 + x)
    }

    #[test]
    fn test_image_accessor_moves() {
        let img = ramp();
        let mut acc = img.accessor(1, 1, 0);
        assert_eq!(acc.get(), 11);
        acc.next_col();
        assert_eq!(acc.get(), 12);
        acc.prev_row();
        assert_eq!(acc.get(), 2);
        acc.prev_col();
        acc.next_row();
        acc.next_row();
        assert_eq!(acc.get(), 21);
        acc.next_plane();
        assert_eq!(acc.get(), 121);
        acc.prev_plane();
        assert_eq!(acc.get(), 21);
    }

    #[test]
    fn test_advance_composes() {
        let img = ramp();
        let start = img.accessor(0, 0, 1);
        let mut stepped = start.clone();
        stepped.advance(2, 1);
        stepped.advance(-1, 1);
        let direct = start.offset(1, 2);
        assert_eq!(stepped.get(), direct.get());
        assert_eq!(stepped.offset_index(), direct.offset_index());
        assert_eq!(direct.get(), 121);
    }

    #[test]
    fn test_out_of_bounds_movement_is_not_an_error() {
        let img = ramp();
        let mut acc = img.accessor(0, 0, 0);
        acc.advance(-5, -5);
        acc.advance(6, 5);
        assert_eq!(acc.get(), 1);
    }

    #[test]
    #[should_panic]
    fn test_image_accessor_deref_before_start_panics() {
        let img = ramp();
        let acc = img.accessor(0, 0, 0).offset(-1, 0);
        let _ = acc.get();
    }

    #[test]
    fn test_view_accessor_tracks_position() {
        let view = ConstantView::new(7u8, 4, 4, 1);
        let mut acc = ViewAccessor::new(&view, 1, 2, 0);
        acc.advance(2, -1);
        acc.next_plane();
        assert_eq!(acc.position(), (3, 1, 1));
        acc.prev_plane();
        assert_eq!(acc.get(), 7);
    }
}
