/// Extents of an `N`-dimensional index space.
///
/// A default constructed range is empty: it has zero dimensions and zero elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range<const N: usize> {
    sz: [usize; N],
    dims: usize
}

impl<const N: usize> Range<N> {
    #[inline(always)]
    pub const fn new (sz: [usize; N]) -> Self {
        Self { sz, dims: N }
    }

    #[inline(always)]
    pub const fn empty () -> Self {
        Self { sz: [0; N], dims: 0 }
    }

    /// Runtime number of dimensions. Zero for an empty range.
    #[inline(always)]
    pub const fn dimensions (&self) -> usize {
        self.dims
    }

    /// Number of indices in the whole range.
    #[inline]
    pub fn size (&self) -> usize {
        match self.dims {
            0 => 0,
            _ => self.sz.iter().product()
        }
    }

    /// Number of indices along dimension `idx`.
    /// # Panics
    /// If `idx >= N`
    #[inline(always)]
    pub fn extent (&self, idx: usize) -> usize {
        self.sz[idx]
    }

    #[inline(always)]
    pub fn as_slice (&self) -> &[usize] {
        &self.sz
    }

    #[inline(always)]
    pub const fn is_empty (&self) -> bool {
        self.dims == 0
    }
}

impl<const N: usize> Default for Range<N> {
    #[inline(always)]
    fn default() -> Self {
        Self::empty()
    }
}

impl<const N: usize> From<[usize; N]> for Range<N> {
    #[inline(always)]
    fn from(value: [usize; N]) -> Self {
        Self::new(value)
    }
}

impl From<usize> for Range<1> {
    #[inline(always)]
    fn from(value: usize) -> Self {
        Self::new([value])
    }
}

/// Work-item index space of a kernel launch, up to three dimensions.
///
/// Unused trailing dimensions are stored as `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NdRange {
    sz: [usize; 3],
    dims: u32
}

impl NdRange {
    #[inline(always)]
    pub const fn empty () -> Self {
        Self { sz: [0; 3], dims: 0 }
    }

    #[inline(always)]
    pub const fn new1 (size0: usize) -> Self {
        Self { sz: [size0, 1, 1], dims: 1 }
    }

    #[inline(always)]
    pub const fn new2 (size0: usize, size1: usize) -> Self {
        Self { sz: [size0, size1, 1], dims: 2 }
    }

    #[inline(always)]
    pub const fn new3 (size0: usize, size1: usize, size2: usize) -> Self {
        Self { sz: [size0, size1, size2], dims: 3 }
    }

    #[inline(always)]
    pub const fn dimensions (&self) -> u32 {
        self.dims
    }

    /// Extents of the used dimensions.
    #[inline(always)]
    pub fn sizes (&self) -> &[usize] {
        &self.sz[..self.dims as usize]
    }

    /// Extents read as a global offset, with unused dimensions at `0`.
    #[inline]
    pub fn offsets (&self) -> [usize; 3] {
        let mut result = [0; 3];
        result[..self.dims as usize].copy_from_slice(self.sizes());
        result
    }

    /// Pointer handed to the runtime; null for an empty range.
    #[inline(always)]
    pub(crate) fn as_ptr (&self) -> *const usize {
        match self.dims {
            0 => core::ptr::null(),
            _ => self.sz.as_ptr()
        }
    }
}

impl Default for NdRange {
    #[inline(always)]
    fn default() -> Self {
        Self::empty()
    }
}

impl From<usize> for NdRange {
    #[inline(always)]
    fn from(value: usize) -> Self {
        Self::new1(value)
    }
}

macro_rules! impl_nd_from {
    ($($n:literal => $ctor:ident($($i:literal),+)),+) => {
        $(
            impl From<[usize; $n]> for NdRange {
                #[inline(always)]
                fn from(v: [usize; $n]) -> Self {
                    Self::$ctor($(v[$i]),+)
                }
            }

            impl From<Range<$n>> for NdRange {
                #[inline(always)]
                fn from(v: Range<$n>) -> Self {
                    match v.dimensions() {
                        0 => Self::empty(),
                        _ => Self::$ctor($(v.extent($i)),+)
                    }
                }
            }
        )+
    };
}

impl_nd_from! {
    1 => new1(0),
    2 => new2(0, 1),
    3 => new3(0, 1, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_range () {
        let rng = Range::<2>::default();
        assert_eq!(rng.dimensions(), 0);
        assert_eq!(rng.size(), 0);
        assert_eq!(rng.extent(0), 0);
        assert!(rng.is_empty());
    }

    #[test]
    fn range_size_is_product () {
        assert_eq!(Range::new([10]).size(), 10);

        let rng = Range::new([10, 20, 3]);
        assert_eq!(rng.dimensions(), 3);
        assert_eq!(rng.size(), 600);
        assert_eq!(rng.extent(1), 20);
        assert_eq!(Range::new([4, 0]).size(), 0);
    }

    #[test]
    fn nd_range_pads_with_ones () {
        let rng = NdRange::new2(10, 20);
        assert_eq!(rng.dimensions(), 2);
        assert_eq!(rng.sizes(), &[10, 20]);
        assert_eq!(rng.sz[2], 1);

        assert!(NdRange::empty().as_ptr().is_null());
        assert_eq!(NdRange::empty().sz, [0, 0, 0]);
    }

    #[test]
    fn offsets_pad_with_zeros () {
        assert_eq!(NdRange::new1(5).offsets(), [5, 0, 0]);
        assert_eq!(NdRange::new2(5, 6).offsets(), [5, 6, 0]);
        assert_eq!(NdRange::new3(1, 2, 3).offsets(), [1, 2, 3]);
        assert_eq!(NdRange::empty().offsets(), [0, 0, 0]);
    }

    #[test]
    fn nd_range_from_range () {
        assert_eq!(NdRange::from(Range::new([5, 6])), NdRange::new2(5, 6));
        assert_eq!(NdRange::from(Range::<3>::empty()), NdRange::empty());
        assert_eq!(NdRange::from(7), NdRange::new1(7));
    }
}
