//! Views with no source: constants and closures of the coordinate.

use crate::{BBox, Image, ImageView, ViewAccessor};

/// A view whose every pixel is the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantView<P> {
    value: P,
    cols: u32,
    rows: u32,
    planes: u32,
}

impl<P: Clone> ConstantView<P> {
    /// Creates a `cols × rows × planes` view of `value`.
    #[inline]
    pub fn new(value: P, cols: u32, rows: u32, planes: u32) -> Self {
        Self {
            value,
            cols,
            rows,
            planes,
        }
    }

    /// The constant.
    #[inline]
    pub fn value(&self) -> &P {
        &self.value
    }
}

impl<P: Clone> ImageView for ConstantView<P> {
    type Pixel = P;
    type Accessor<'a>
        = ViewAccessor<'a, Self>
    where
        Self: 'a;

    const MULTIPLY_ACCESSIBLE: bool = true;
    const BULK_RASTERIZE: bool = true;

    #[inline]
    fn cols(&self) -> u32 {
        self.cols
    }

    #[inline]
    fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    fn planes(&self) -> u32 {
        self.planes
    }

    #[inline]
    fn pixel(&self, _x: i32, _y: i32, _p: u32) -> P {
        self.value.clone()
    }

    #[inline]
    fn accessor(&self, x: i32, y: i32, p: u32) -> Self::Accessor<'_> {
        ViewAccessor::new(self, x, y, p)
    }

    fn rasterize_bulk(&self, dst: &mut Image<P>, _window: BBox) {
        dst.fill(self.value.clone());
    }
}

/// A view computing each pixel from its coordinate.
///
/// The closure is called on every read, so procedural views are not
/// multiply accessible: materialize them before reading pixels repeatedly.
///
/// # Example
///
/// ```rust
/// use rasterview_core::{ImageView, ProceduralView};
///
/// let checker = ProceduralView::new(4, 4, 1, |x, y, _| ((x + y) % 2) as u8 * 255);
/// assert_eq!(checker.pixel(1, 0, 0), 255);
/// assert_eq!(checker.pixel(1, 1, 0), 0);
/// ```
#[derive(Clone, Copy)]
pub struct ProceduralView<F> {
    func: F,
    cols: u32,
    rows: u32,
    planes: u32,
}

impl<F, P> ProceduralView<F>
where
    F: Fn(i32, i32, u32) -> P,
{
    /// Creates a `cols × rows × planes` view of `func`.
    #[inline]
    pub fn new(cols: u32, rows: u32, planes: u32, func: F) -> Self {
        Self {
            func,
            cols,
            rows,
            planes,
        }
    }
}

impl<F, P> ImageView for ProceduralView<F>
where
    F: Fn(i32, i32, u32) -> P,
{
    type Pixel = P;
    type Accessor<'a>
        = ViewAccessor<'a, Self>
    where
        Self: 'a;

    const MULTIPLY_ACCESSIBLE: bool = false;

    #[inline]
    fn cols(&self) -> u32 {
        self.cols
    }

    #[inline]
    fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    fn planes(&self) -> u32 {
        self.planes
    }

    #[inline]
    fn pixel(&self, x: i32, y: i32, p: u32) -> P {
        (self.func)(x, y, p)
    }

    #[inline]
    fn accessor(&self, x: i32, y: i32, p: u32) -> Self::Accessor<'_> {
        ViewAccessor::new(self, x, y, p)
    }
}

impl<F> std::fmt::Debug for ProceduralView<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProceduralView")
            .field("cols", &self.cols)
            .field("rows", &self.rows)
            .field("planes", &self.planes)
            .finish_non_exhaustive()
    }
}
