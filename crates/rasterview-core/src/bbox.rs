//! Axis-aligned integer windows over a pixel grid.
//!
//! [`BBox`] describes rasterization windows, crop regions and the *work area*
//! of an accessor function: the footprint, relative to the addressed pixel,
//! that the function reads to produce one output pixel.
//!
//! # Coordinate System
//!
//! - Origin (0, 0) is the **top-left** pixel
//! - X (column) increases to the right
//! - Y (row) increases downward
//!
//! The origin is signed: work areas routinely start left of or above the
//! addressed pixel, and edge-extended views accept windows that reach past the
//! image border.
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │  window  │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! # Usage
//!
//! ```rust
//! use rasterview_core::BBox;
//!
//! let window = BBox::new(10, 20, 100, 50);
//! assert!(window.contains(15, 25));
//! assert!(!window.contains(5, 25));
//!
//! // A 3x3 stencil centred on the addressed pixel
//! let work_area = BBox::new(-1, -1, 3, 3);
//! assert_eq!(window.expand(&work_area), BBox::new(9, 19, 102, 52));
//! ```

/// An axis-aligned window defined by a signed origin and unsigned size.
///
/// The window is inclusive on the left/top edges and exclusive on the
/// right/bottom edges. A box with zero width or height is empty.
///
/// Edges are limited to the `i32` range: arithmetic that would leave it
/// saturates at `i32::MIN` / `i32::MAX`.
///
/// # Example
///
/// ```rust
/// use rasterview_core::BBox;
///
/// let b = BBox::new(10, 20, 100, 50);
/// assert_eq!(b.max_x(), 110);
/// assert_eq!(b.max_y(), 70);
/// assert_eq!(b.area(), 5000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    /// Left edge (inclusive)
    pub x: i32,
    /// Top edge (inclusive)
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl BBox {
    /// Creates a window with the given origin and size.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a window at the origin with the given size.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasterview_core::BBox;
    ///
    /// let b = BBox::from_size(1920, 1080);
    /// assert_eq!((b.x, b.y), (0, 0));
    /// ```
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// The work area of a function that reads only the addressed pixel.
    #[inline]
    pub const fn unit() -> Self {
        Self::new(0, 0, 1, 1)
    }

    /// Creates a window from two corners, `min` inclusive and `max` exclusive.
    ///
    /// Swapped corners are normalized.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasterview_core::BBox;
    ///
    /// let b = BBox::from_corners(-1, -2, 2, 3);
    /// assert_eq!(b, BBox::new(-1, -2, 3, 5));
    /// ```
    #[inline]
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let (min_x, max_x) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (min_y, max_y) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        Self::new(min_x, min_y, max_x.abs_diff(min_x), max_y.abs_diff(min_y))
    }

    /// Left edge (inclusive).
    #[inline]
    pub const fn min_x(&self) -> i32 {
        self.x
    }

    /// Top edge (inclusive).
    #[inline]
    pub const fn min_y(&self) -> i32 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn max_x(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn max_y(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    /// Number of pixels covered.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if the window covers no pixel.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if the pixel (px, py) is inside this window.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasterview_core::BBox;
    ///
    /// let b = BBox::new(-1, -1, 3, 3);
    /// assert!(b.contains(-1, -1));
    /// assert!(b.contains(1, 1));
    /// assert!(!b.contains(2, 2));
    /// ```
    #[inline]
    pub const fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.max_x() && py >= self.y && py < self.max_y()
    }

    /// Returns `true` if `other` lies entirely inside this window.
    ///
    /// An empty window is contained in any window whose edges enclose its
    /// origin.
    #[inline]
    pub const fn contains_bbox(&self, other: &BBox) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// Returns the overlap of two windows, or `None` if they share no pixel.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasterview_core::BBox;
    ///
    /// let a = BBox::new(0, 0, 100, 100);
    /// let b = BBox::new(50, 50, 100, 100);
    /// assert_eq!(a.intersect(&b), Some(BBox::new(50, 50, 50, 50)));
    /// ```
    #[inline]
    pub fn intersect(&self, other: &BBox) -> Option<BBox> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.max_x().min(other.max_x());
        let bottom = self.max_y().min(other.max_y());

        if x < right && y < bottom {
            Some(BBox::new(x, y, right.abs_diff(x), bottom.abs_diff(y)))
        } else {
            None
        }
    }

    /// Returns the smallest window containing both windows.
    ///
    /// Empty windows do not contribute.
    #[inline]
    pub fn union(&self, other: &BBox) -> BBox {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        BBox::from_corners(
            self.x.min(other.x),
            self.y.min(other.y),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }

    /// Grows this window so that it includes the pixel (px, py).
    pub fn grow_to_include(&mut self, px: i32, py: i32) {
        *self = self.union(&BBox::new(px, py, 1, 1));
    }

    /// Returns this window translated by (dx, dy).
    #[inline]
    pub const fn translate(&self, dx: i32, dy: i32) -> BBox {
        BBox::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// Returns the window read from the source when every pixel of `self`
    /// is produced by a function with the given work area.
    ///
    /// `work_area` is relative to the addressed pixel, so a 3x3 centred
    /// stencil is `BBox::new(-1, -1, 3, 3)` and [`BBox::unit`] leaves the
    /// window unchanged. An empty window stays empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasterview_core::BBox;
    ///
    /// let window = BBox::new(0, 0, 4, 4);
    /// assert_eq!(window.expand(&BBox::unit()), window);
    /// assert_eq!(window.expand(&BBox::new(-1, 0, 3, 1)), BBox::new(-1, 0, 6, 4));
    /// ```
    #[inline]
    pub fn expand(&self, work_area: &BBox) -> BBox {
        if self.is_empty() || work_area.is_empty() {
            return BBox::new(self.x, self.y, 0, 0);
        }
        BBox::new(
            self.x.saturating_add(work_area.x),
            self.y.saturating_add(work_area.y),
            self.width.saturating_add(work_area.width - 1),
            self.height.saturating_add(work_area.height - 1),
        )
    }

    /// Iterates all (x, y) coordinates in raster order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rasterview_core::BBox;
    ///
    /// let coords: Vec<_> = BBox::new(0, 0, 2, 2).iter_coords().collect();
    /// assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    /// ```
    #[inline]
    pub fn iter_coords(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (self.y..self.max_y()).flat_map(move |y| (self.x..self.max_x()).map(move |x| (x, y)))
    }
}

impl std::fmt::Display for BBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BBox({}, {}, {}x{})", self.x, self.y, self.width, self.height)
    }
}
