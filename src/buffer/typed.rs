use core::{marker::PhantomData, ops::Deref, fmt::Debug};
use opencl_sys::clCreateBuffer;
use crate::prelude::{Context, Result, Range};
use super::{Memory, MemFlags, Scalar};

/// Device buffer holding `range.size()` elements of `T`.
///
/// Like every handle in this crate it is a plain copyable value; the native object is freed with
/// [`Memory::release`].
pub struct Buffer<T: Scalar, const N: usize = 1> {
    mem: Memory,
    range: Range<N>,
    phtm: PhantomData<T>
}

impl<T: Scalar, const N: usize> Buffer<T, N> {
    /// Allocates an uninitialized buffer.
    #[inline(always)]
    pub fn new (ctx: &Context, range: impl Into<Range<N>>, flags: MemFlags) -> Result<Self> {
        unsafe { Self::with_host_ptr(ctx, range.into(), flags, core::ptr::null_mut()) }
    }

    /// Allocates a buffer initialized with the first `range.size()` elements of `src`.
    /// # Panics
    /// If `src` is shorter than the range.
    #[inline]
    pub fn from_slice (ctx: &Context, range: impl Into<Range<N>>, flags: MemFlags, src: &[T]) -> Result<Self> {
        let range = range.into();
        assert!(src.len() >= range.size(), "source holds {} elements, range needs {}", src.len(), range.size());
        unsafe { Self::with_host_ptr(ctx, range, flags | MemFlags::COPY_HOST_PTR, src.as_ptr() as *mut _) }
    }

    /// Allocates a buffer on the default context.
    #[cfg(feature = "def")]
    #[inline(always)]
    pub fn new_default (range: impl Into<Range<N>>, flags: MemFlags) -> Result<Self> {
        Self::new(&Context::get_default()?, range, flags)
    }

    /// # Safety
    /// `host_ptr` must satisfy the requirements `flags` place on it.
    pub unsafe fn with_host_ptr (ctx: &Context, range: Range<N>, flags: MemFlags, host_ptr: *mut T) -> Result<Self> {
        let size = core::mem::size_of::<T>() * range.size();

        let mut err = 0;
        let id = clCreateBuffer(ctx.0, flags.bits(), size, host_ptr.cast(), &mut err);
        tri!(err);

        tracing::debug!(ty = T::NAME, size, "created buffer");
        Ok(Self { mem: Memory(id), range, phtm: PhantomData })
    }

    /// Reinterprets an existing memory object.
    /// # Safety
    /// `mem` must hold at least `range.size()` elements of `T`.
    #[inline(always)]
    pub unsafe fn from_memory (mem: Memory, range: Range<N>) -> Self {
        Self { mem, range, phtm: PhantomData }
    }

    #[inline(always)]
    pub fn range (&self) -> Range<N> {
        self.range
    }

    /// Number of elements.
    #[inline(always)]
    pub fn len (&self) -> usize {
        self.range.size()
    }

    #[inline(always)]
    pub fn is_empty (&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn as_memory (&self) -> &Memory {
        &self.mem
    }
}

impl<T: Scalar, const N: usize> Deref for Buffer<T, N> {
    type Target = Memory;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.mem
    }
}

impl<T: Scalar, const N: usize> Clone for Buffer<T, N> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Scalar, const N: usize> Copy for Buffer<T, N> {}

impl<T: Scalar, const N: usize> PartialEq for Buffer<T, N> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.mem == other.mem
    }
}

impl<T: Scalar, const N: usize> Eq for Buffer<T, N> {}

impl<T: Scalar, const N: usize> Debug for Buffer<T, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Buffer")
        .field("id", &self.mem.0)
        .field("type", &T::NAME)
        .field("range", &self.range)
        .finish()
    }
}
