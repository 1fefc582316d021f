use core::ffi::c_void;
use opencl_sys::{cl_context, cl_context_info, cl_int, cl_uint, cl_context_properties, CL_CONTEXT_PLATFORM, CL_CONTEXT_REFERENCE_COUNT, CL_CONTEXT_NUM_DEVICES, CL_CONTEXT_DEVICES, CL_CONTEXT_PROPERTIES, clCreateContext, clReleaseContext, clRetainContext, clGetContextInfo};
use crate::{prelude::{Platform, Device, Result, Buffer, MemFlags, Range, Scalar}, info::{InfoSource, RawInfo}};

#[cfg(feature = "def")]
static DEFAULT_CONTEXT : once_cell::sync::OnceCell<Context> = once_cell::sync::OnceCell::new();

/// OpenCL context. Copies share the same native context; lifetime is managed with [`retain`](Context::retain) and [`release`](Context::release).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Context (pub(crate) cl_context);

impl Context {
    pub fn new (devices: &[Device]) -> Result<Self> {
        Self::with_props(None, devices)
    }

    pub fn with_props (props: Option<ContextProps>, devices: &[Device]) -> Result<Self> {
        let props = props.map(ContextProps::build);
        let props_ptr = match props {
            Some(ref x) => x.as_ptr(),
            None => core::ptr::null()
        };

        let len = devices.len() as cl_uint;
        let mut err = 0;

        let id = unsafe {
            clCreateContext(props_ptr, len, devices.as_ptr().cast(), None, core::ptr::null_mut(), &mut err)
        };

        tri!(err);
        tracing::debug!(devices = devices.len(), "created context");
        Ok(Self(id))
    }

    #[inline(always)]
    pub fn from_device (device: Device) -> Result<Self> {
        Self::new(core::slice::from_ref(&device))
    }

    /// Context over the default device, created once.
    #[cfg(feature = "def")]
    pub fn get_default () -> Result<Context> {
        DEFAULT_CONTEXT.get_or_try_init(|| Self::from_device(Device::get_default()?)).copied()
    }

    #[inline(always)]
    pub const fn id (&self) -> cl_context {
        self.0
    }

    /// Wraps a raw context.
    /// # Safety
    /// `id` must be a valid context. No reference is taken.
    #[inline(always)]
    pub const unsafe fn from_id (id: cl_context) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub fn retain (&self) -> Result<()> {
        unsafe { tri!(clRetainContext(self.0)) }
        Ok(())
    }

    #[inline(always)]
    pub fn release (&self) -> Result<()> {
        unsafe { tri!(clReleaseContext(self.0)) }
        Ok(())
    }

    /// Stale as soon as it's returned. Only useful for debugging.
    #[inline(always)]
    pub fn reference_count (&self) -> Result<cl_uint> {
        self.get_info(CL_CONTEXT_REFERENCE_COUNT)
    }

    #[inline(always)]
    pub fn num_devices (&self) -> Result<cl_uint> {
        self.get_info(CL_CONTEXT_NUM_DEVICES)
    }

    #[inline(always)]
    pub fn devices (&self) -> Result<Vec<Device>> {
        self.get_info(CL_CONTEXT_DEVICES)
    }

    #[inline(always)]
    pub fn properties (&self) -> Result<Vec<cl_context_properties>> {
        self.get_info(CL_CONTEXT_PROPERTIES)
    }

    /// Allocates an uninitialized buffer of `range.size()` elements in this context.
    #[inline(always)]
    pub fn alloc<T: Scalar, const N: usize> (&self, range: Range<N>, flags: MemFlags) -> Result<Buffer<T, N>> {
        Buffer::new(self, range, flags)
    }
}

impl InfoSource for Context {
    type Param = cl_context_info;

    #[inline(always)]
    unsafe fn raw_info (&self, param: cl_context_info, size: usize, value: *mut c_void, size_ret: *mut usize) -> cl_int {
        clGetContextInfo(self.0, param, size, value, size_ret)
    }
}

unsafe impl RawInfo for Context {}
unsafe impl Send for Context {}
unsafe impl Sync for Context {}

/// OpenCL context properties
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextProps {
    pub platform: Option<Platform>
}

impl ContextProps {
    #[inline(always)]
    pub fn new () -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn platform (mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Zero-terminated property list.
    pub fn build (self) -> Vec<cl_context_properties> {
        let mut result = Vec::<cl_context_properties>::with_capacity(3);

        if let Some(platform) = self.platform {
            result.extend([
                CL_CONTEXT_PLATFORM as cl_context_properties,
                platform.0 as cl_context_properties
            ])
        }

        result.push(0);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_props_are_terminated () {
        assert_eq!(ContextProps::new().build(), vec![0]);
    }

    #[test]
    fn platform_prop () {
        let platform = unsafe { Platform::from_id(0x10 as _) };
        let props = ContextProps::new().platform(platform).build();
        assert_eq!(props, vec![CL_CONTEXT_PLATFORM as cl_context_properties, 0x10, 0]);
    }
}
