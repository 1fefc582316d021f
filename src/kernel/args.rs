use core::ffi::c_void;
use opencl_sys::cl_mem;
use crate::buffer::{Buffer, Memory, Scalar};

/// Type-erased kernel argument: a byte size plus a pointer to the value.
///
/// # Safety
/// `arg_ptr` must be null or point to `arg_size` readable bytes for as long as `self` is borrowed.
pub unsafe trait KernelArg {
    fn arg_size (&self) -> usize;
    fn arg_ptr (&self) -> *const c_void;
}

unsafe impl<T: Scalar> KernelArg for T {
    #[inline(always)]
    fn arg_size (&self) -> usize {
        core::mem::size_of::<T>()
    }

    #[inline(always)]
    fn arg_ptr (&self) -> *const c_void {
        (self as *const T).cast()
    }
}

unsafe impl KernelArg for Memory {
    #[inline(always)]
    fn arg_size (&self) -> usize {
        core::mem::size_of::<cl_mem>()
    }

    #[inline(always)]
    fn arg_ptr (&self) -> *const c_void {
        (&self.0 as *const cl_mem).cast()
    }
}

unsafe impl<T: Scalar, const N: usize> KernelArg for Buffer<T, N> {
    #[inline(always)]
    fn arg_size (&self) -> usize {
        self.as_memory().arg_size()
    }

    #[inline(always)]
    fn arg_ptr (&self) -> *const c_void {
        self.as_memory().arg_ptr()
    }
}

/// Reserves `__local` memory for an argument. No data is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalArg {
    size: usize
}

impl LocalArg {
    /// Room for `len` elements of `T`.
    #[inline(always)]
    pub const fn new<T> (len: usize) -> Self {
        Self { size: len * core::mem::size_of::<T>() }
    }

    #[inline(always)]
    pub const fn from_bytes (size: usize) -> Self {
        Self { size }
    }

    #[inline(always)]
    pub const fn size (&self) -> usize {
        self.size
    }
}

unsafe impl KernelArg for LocalArg {
    #[inline(always)]
    fn arg_size (&self) -> usize {
        self.size
    }

    #[inline(always)]
    fn arg_ptr (&self) -> *const c_void {
        core::ptr::null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_args () {
        let x = 7i32;
        assert_eq!(x.arg_size(), 4);
        assert_eq!(unsafe { *x.arg_ptr().cast::<i32>() }, 7);
        assert_eq!(2.5f64.arg_size(), 8);
    }

    #[test]
    fn local_args () {
        let local = LocalArg::new::<f32>(64);
        assert_eq!(local.arg_size(), 256);
        assert!(local.arg_ptr().is_null());
        assert_eq!(LocalArg::from_bytes(12).size(), 12);
    }

    #[test]
    fn memory_arg_points_at_handle () {
        let mem = unsafe { Memory::from_id(0x1234 as cl_mem) };
        assert_eq!(mem.arg_size(), core::mem::size_of::<cl_mem>());
        assert_eq!(unsafe { *mem.arg_ptr().cast::<cl_mem>() }, 0x1234 as cl_mem);
    }

    #[test]
    fn dyn_list () {
        let a = 1u8;
        let b = LocalArg::from_bytes(3);
        let args: [&dyn KernelArg; 2] = [&a, &b];
        assert_eq!(args.iter().map(|x| x.arg_size()).sum::<usize>(), 4);
    }
}
