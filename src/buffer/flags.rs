use opencl_sys::{cl_mem_flags, cl_map_flags, CL_MEM_READ_WRITE, CL_MEM_WRITE_ONLY, CL_MEM_READ_ONLY, CL_MEM_USE_HOST_PTR, CL_MEM_ALLOC_HOST_PTR, CL_MEM_COPY_HOST_PTR, CL_MEM_HOST_WRITE_ONLY, CL_MEM_HOST_READ_ONLY, CL_MEM_HOST_NO_ACCESS, CL_MAP_READ, CL_MAP_WRITE, CL_MAP_WRITE_INVALIDATE_REGION};

bitflags::bitflags! {
    /// A bit-field that is used to specify allocation and usage information such as the memory arena that should be used to allocate the buffer object and how it will be used.
    #[repr(transparent)]
    pub struct MemFlags : cl_mem_flags {
        /// This flag specifies that the memory object will be read and written by a kernel. This is the default.
        const READ_WRITE = CL_MEM_READ_WRITE;
        /// This flag specifies that the memory object is a write-only memory object when used inside a kernel. Reading from a buffer or image object created with CL_MEM_WRITE_ONLY inside a kernel is undefined.
        const WRITE_ONLY = CL_MEM_WRITE_ONLY;
        /// This flag specifies that the memory object is a read-only memory object when used inside a kernel. Writing to a buffer or image object created with CL_MEM_READ_ONLY inside a kernel is undefined.
        const READ_ONLY = CL_MEM_READ_ONLY;
        const USE_HOST_PTR = CL_MEM_USE_HOST_PTR;
        const ALLOC_HOST_PTR = CL_MEM_ALLOC_HOST_PTR;
        const COPY_HOST_PTR = CL_MEM_COPY_HOST_PTR;
        const HOST_WRITE_ONLY = CL_MEM_HOST_WRITE_ONLY;
        const HOST_READ_ONLY = CL_MEM_HOST_READ_ONLY;
        const HOST_NO_ACCESS = CL_MEM_HOST_NO_ACCESS;
    }

    /// Access requested when mapping a buffer region into host memory.
    #[repr(transparent)]
    pub struct MapFlags : cl_map_flags {
        const READ = CL_MAP_READ;
        const WRITE = CL_MAP_WRITE;
        /// The mapped region is going to be fully overwritten, so its previous contents need not be transferred.
        const WRITE_INVALIDATE_REGION = CL_MAP_WRITE_INVALIDATE_REGION;
    }
}

impl Default for MemFlags {
    #[inline(always)]
    fn default() -> Self {
        Self::READ_WRITE
    }
}

impl Default for MapFlags {
    #[inline(always)]
    fn default() -> Self {
        Self::READ | Self::WRITE
    }
}
