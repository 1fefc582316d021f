use core::ffi::c_void;
use std::ffi::CString;
use opencl_sys::{cl_kernel, cl_kernel_info, cl_kernel_arg_info, cl_kernel_work_group_info, cl_device_id, cl_int, cl_uint, cl_ulong, clCreateKernel, clCreateKernelsInProgram, clRetainKernel, clReleaseKernel, clSetKernelArg, clGetKernelInfo, clGetKernelArgInfo, clGetKernelWorkGroupInfo, CL_KERNEL_FUNCTION_NAME, CL_KERNEL_NUM_ARGS, CL_KERNEL_REFERENCE_COUNT, CL_KERNEL_CONTEXT, CL_KERNEL_PROGRAM, CL_KERNEL_ATTRIBUTES, CL_KERNEL_ARG_ADDRESS_QUALIFIER, CL_KERNEL_ARG_ACCESS_QUALIFIER, CL_KERNEL_ARG_TYPE_NAME, CL_KERNEL_ARG_TYPE_QUALIFIER, CL_KERNEL_ARG_NAME, CL_KERNEL_WORK_GROUP_SIZE, CL_KERNEL_COMPILE_WORK_GROUP_SIZE, CL_KERNEL_LOCAL_MEM_SIZE, CL_KERNEL_PREFERRED_WORK_GROUP_SIZE_MULTIPLE, CL_KERNEL_PRIVATE_MEM_SIZE, CL_INVALID_KERNEL_NAME};
use crate::{prelude::{Context, Device, Program, Result, Error}, info::{InfoSource, RawInfo}, utils::split};

flat_mod!(args, flags, functor);

/// One entry point of a built [`Program`].
///
/// Arguments are positional and sticky: once set they stay bound to the native kernel across
/// enqueues until overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Kernel (pub(crate) cl_kernel);

impl Kernel {
    pub fn new (program: &Program, name: &str) -> Result<Self> {
        let name = CString::new(name).map_err(|_| Error::native(CL_INVALID_KERNEL_NAME, file!(), line!()))?;

        let mut err = 0;
        let id = unsafe { clCreateKernel(program.0, name.as_ptr(), &mut err) };
        tri!(err);

        tracing::debug!(name = ?name, "created kernel");
        Ok(Self(id))
    }

    /// Creates one kernel for every entry point of `program`.
    pub fn create_all (program: &Program) -> Result<Vec<Self>> {
        let mut count = 0;
        unsafe {
            tri!(clCreateKernelsInProgram(program.0, 0, core::ptr::null_mut(), &mut count));
        }

        let mut kernels = vec![core::ptr::null_mut(); count as usize];
        if count > 0 {
            unsafe {
                tri!(clCreateKernelsInProgram(program.0, count, kernels.as_mut_ptr(), core::ptr::null_mut()));
            }
        }

        Ok(kernels.into_iter().map(Self).collect())
    }

    #[inline(always)]
    pub const fn id (&self) -> cl_kernel {
        self.0
    }

    /// Wraps a raw kernel.
    /// # Safety
    /// `id` must be a valid kernel. No reference is taken.
    #[inline(always)]
    pub const unsafe fn from_id (id: cl_kernel) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub fn retain (&self) -> Result<()> {
        unsafe { tri!(clRetainKernel(self.0)) }
        Ok(())
    }

    #[inline(always)]
    pub fn release (&self) -> Result<()> {
        unsafe { tri!(clReleaseKernel(self.0)) }
        Ok(())
    }

    /// Binds `value` to argument `idx`.
    #[inline]
    pub fn set_arg<A: ?Sized + KernelArg> (&self, idx: u32, value: &A) -> Result<()> {
        unsafe {
            tri!(clSetKernelArg(self.0, idx, value.arg_size(), value.arg_ptr()));
        }
        Ok(())
    }

    /// Binds `args[i]` to argument `i`, in order.
    pub fn set_args (&self, args: &[&dyn KernelArg]) -> Result<()> {
        for (idx, arg) in args.iter().enumerate() {
            self.set_arg(idx as u32, *arg)?;
        }

        tracing::trace!(kernel = ?self.0, count = args.len(), "set kernel arguments");
        Ok(())
    }

    #[inline(always)]
    pub fn function_name (&self) -> Result<String> {
        self.get_info(CL_KERNEL_FUNCTION_NAME)
    }

    #[inline(always)]
    pub fn num_args (&self) -> Result<cl_uint> {
        self.get_info(CL_KERNEL_NUM_ARGS)
    }

    /// Stale as soon as it's returned. Only useful for debugging.
    #[inline(always)]
    pub fn reference_count (&self) -> Result<cl_uint> {
        self.get_info(CL_KERNEL_REFERENCE_COUNT)
    }

    #[inline(always)]
    pub fn context (&self) -> Result<Context> {
        self.get_info(CL_KERNEL_CONTEXT)
    }

    #[inline(always)]
    pub fn program (&self) -> Result<Program> {
        self.get_info(CL_KERNEL_PROGRAM)
    }

    /// Attributes declared with `__attribute__` in the kernel source.
    #[inline]
    pub fn attributes (&self) -> Result<Vec<String>> {
        let attrs = self.get_info::<String>(CL_KERNEL_ATTRIBUTES)?;
        Ok(split(attrs.trim(), ' '))
    }

    /// Argument metadata is only available when the program was built with `-cl-kernel-arg-info`.
    #[inline]
    pub fn arg_address_qualifier (&self, idx: u32) -> Result<AddrQualifier> {
        let raw = self.arg_info(idx).get_info(CL_KERNEL_ARG_ADDRESS_QUALIFIER)?;
        AddrQualifier::from_raw(raw).ok_or_else(|| Error::native(opencl_sys::CL_INVALID_VALUE, file!(), line!()))
    }

    #[inline]
    pub fn arg_access_qualifier (&self, idx: u32) -> Result<AccessQualifier> {
        let raw = self.arg_info(idx).get_info(CL_KERNEL_ARG_ACCESS_QUALIFIER)?;
        AccessQualifier::from_raw(raw).ok_or_else(|| Error::native(opencl_sys::CL_INVALID_VALUE, file!(), line!()))
    }

    #[inline(always)]
    pub fn arg_type_name (&self, idx: u32) -> Result<String> {
        self.arg_info(idx).get_info(CL_KERNEL_ARG_TYPE_NAME)
    }

    #[inline(always)]
    pub fn arg_type_qualifier (&self, idx: u32) -> Result<TypeQualifier> {
        self.arg_info(idx).get_info(CL_KERNEL_ARG_TYPE_QUALIFIER).map(TypeQualifier::from_bits_truncate)
    }

    #[inline(always)]
    pub fn arg_name (&self, idx: u32) -> Result<String> {
        self.arg_info(idx).get_info(CL_KERNEL_ARG_NAME)
    }

    /// Largest work-group size this kernel can be launched with on `device`.
    #[inline(always)]
    pub fn work_group_size (&self, device: &Device) -> Result<usize> {
        self.work_group_info(device).get_info(CL_KERNEL_WORK_GROUP_SIZE)
    }

    /// Size given by `reqd_work_group_size`, or `[0, 0, 0]` when none was declared.
    pub fn compile_work_group_size (&self, device: &Device) -> Result<[usize; 3]> {
        let sizes = self.work_group_info(device).get_info::<Vec<usize>>(CL_KERNEL_COMPILE_WORK_GROUP_SIZE)?;
        match <[usize; 3]>::try_from(sizes.as_slice()) {
            Ok(x) => Ok(x),
            Err(_) => Err(Error::InfoSize { expected: 3 * core::mem::size_of::<usize>(), actual: sizes.len() * core::mem::size_of::<usize>() })
        }
    }

    #[inline(always)]
    pub fn local_mem_size (&self, device: &Device) -> Result<cl_ulong> {
        self.work_group_info(device).get_info(CL_KERNEL_LOCAL_MEM_SIZE)
    }

    #[inline(always)]
    pub fn preferred_work_group_size_multiple (&self, device: &Device) -> Result<usize> {
        self.work_group_info(device).get_info(CL_KERNEL_PREFERRED_WORK_GROUP_SIZE_MULTIPLE)
    }

    #[inline(always)]
    pub fn private_mem_size (&self, device: &Device) -> Result<cl_ulong> {
        self.work_group_info(device).get_info(CL_KERNEL_PRIVATE_MEM_SIZE)
    }

    #[inline(always)]
    fn arg_info (&self, idx: u32) -> KernelArgInfo {
        KernelArgInfo { kernel: self.0, idx }
    }

    #[inline(always)]
    fn work_group_info (&self, device: &Device) -> KernelWorkGroupInfo {
        KernelWorkGroupInfo { kernel: self.0, device: device.0 }
    }
}

impl InfoSource for Kernel {
    type Param = cl_kernel_info;

    #[inline(always)]
    unsafe fn raw_info (&self, param: cl_kernel_info, size: usize, value: *mut c_void, size_ret: *mut usize) -> cl_int {
        clGetKernelInfo(self.0, param, size, value, size_ret)
    }
}

struct KernelArgInfo {
    kernel: cl_kernel,
    idx: cl_uint
}

impl InfoSource for KernelArgInfo {
    type Param = cl_kernel_arg_info;

    #[inline(always)]
    unsafe fn raw_info (&self, param: cl_kernel_arg_info, size: usize, value: *mut c_void, size_ret: *mut usize) -> cl_int {
        clGetKernelArgInfo(self.kernel, self.idx, param, size, value, size_ret)
    }
}

struct KernelWorkGroupInfo {
    kernel: cl_kernel,
    device: cl_device_id
}

impl InfoSource for KernelWorkGroupInfo {
    type Param = cl_kernel_work_group_info;

    #[inline(always)]
    unsafe fn raw_info (&self, param: cl_kernel_work_group_info, size: usize, value: *mut c_void, size_ret: *mut usize) -> cl_int {
        clGetKernelWorkGroupInfo(self.kernel, self.device, param, size, value, size_ret)
    }
}

unsafe impl RawInfo for Kernel {}
unsafe impl Send for Kernel {}
unsafe impl Sync for Kernel {}
