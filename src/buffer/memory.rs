use core::ffi::c_void;
use opencl_sys::{cl_mem, cl_mem_info, cl_int, cl_uint, cl_mem_flags, clRetainMemObject, clReleaseMemObject, clGetMemObjectInfo, CL_MEM_SIZE, CL_MEM_MAP_COUNT, CL_MEM_REFERENCE_COUNT, CL_MEM_CONTEXT, CL_MEM_OFFSET, CL_MEM_FLAGS};
use crate::{prelude::{Context, Result}, info::{InfoSource, RawInfo}};
use super::MemFlags;

/// Untyped OpenCL memory object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Memory (pub(crate) cl_mem);

impl Memory {
    #[inline(always)]
    pub const fn id (&self) -> cl_mem {
        self.0
    }

    /// Wraps a raw memory object.
    /// # Safety
    /// `id` must be a valid memory object. No reference is taken.
    #[inline(always)]
    pub const unsafe fn from_id (id: cl_mem) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub fn retain (&self) -> Result<()> {
        unsafe { tri!(clRetainMemObject(self.0)) }
        Ok(())
    }

    #[inline(always)]
    pub fn release (&self) -> Result<()> {
        unsafe { tri!(clReleaseMemObject(self.0)) }
        Ok(())
    }

    /// Actual size of the data store in bytes.
    #[inline(always)]
    pub fn byte_size (&self) -> Result<usize> {
        self.get_info(CL_MEM_SIZE)
    }

    /// Number of times the memory object is currently mapped.
    #[inline(always)]
    pub fn map_count (&self) -> Result<cl_uint> {
        self.get_info(CL_MEM_MAP_COUNT)
    }

    /// Stale as soon as it's returned. Only useful for debugging.
    #[inline(always)]
    pub fn reference_count (&self) -> Result<cl_uint> {
        self.get_info(CL_MEM_REFERENCE_COUNT)
    }

    #[inline(always)]
    pub fn context (&self) -> Result<Context> {
        self.get_info(CL_MEM_CONTEXT)
    }

    /// Offset into the parent buffer for sub-buffers, zero otherwise.
    #[inline(always)]
    pub fn offset (&self) -> Result<usize> {
        self.get_info(CL_MEM_OFFSET)
    }

    #[inline(always)]
    pub fn flags (&self) -> Result<MemFlags> {
        self.get_info::<cl_mem_flags>(CL_MEM_FLAGS).map(MemFlags::from_bits_truncate)
    }
}

impl InfoSource for Memory {
    type Param = cl_mem_info;

    #[inline(always)]
    unsafe fn raw_info (&self, param: cl_mem_info, size: usize, value: *mut c_void, size_ret: *mut usize) -> cl_int {
        clGetMemObjectInfo(self.0, param, size, value, size_ret)
    }
}

unsafe impl RawInfo for Memory {}
unsafe impl Send for Memory {}
unsafe impl Sync for Memory {}
