use core::{ffi::c_void, fmt::Debug};
use opencl_sys::{clGetPlatformIDs, cl_platform_id, clGetPlatformInfo, cl_platform_info, cl_int, clGetDeviceIDs, CL_PLATFORM_PROFILE, CL_PLATFORM_VERSION, CL_PLATFORM_NAME, CL_PLATFORM_VENDOR, CL_PLATFORM_EXTENSIONS, CL_DEVICE_NOT_FOUND};
use crate::{prelude::{Result, Device, DeviceType}, info::{InfoSource, RawInfo}};

/// Returned by the ICD loader when no vendor driver is installed.
const CL_PLATFORM_NOT_FOUND_KHR : cl_int = -1001;

#[cfg(feature = "def")]
static DEFAULT_PLATFORM : once_cell::sync::OnceCell<Platform> = once_cell::sync::OnceCell::new();

/// OpenCL platform
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform (pub(crate) cl_platform_id);

impl Platform {
    /// Returns every platform exposed by the installed drivers. An empty list is not an error.
    pub fn all () -> Result<Vec<Platform>> {
        let mut cnt = 0;
        unsafe {
            match clGetPlatformIDs(0, core::ptr::null_mut(), &mut cnt) {
                CL_PLATFORM_NOT_FOUND_KHR => return Ok(Vec::new()),
                err => tri!(err)
            }
        }

        let mut result = vec![Platform(core::ptr::null_mut()); cnt as usize];
        if cnt > 0 {
            unsafe {
                tri!(clGetPlatformIDs(cnt, result.as_mut_ptr().cast(), core::ptr::null_mut()));
            }
        }

        tracing::trace!(count = result.len(), "enumerated platforms");
        Ok(result)
    }

    /// First available platform. Discovered once, then shared by every caller.
    #[cfg(feature = "def")]
    pub fn get_default () -> Result<Platform> {
        DEFAULT_PLATFORM.get_or_try_init(|| {
            let platform = Self::all()?.first().copied().ok_or(crate::error::Error::NoPlatform)?;
            tracing::debug!(?platform, "selected default platform");
            Ok(platform)
        }).copied()
    }

    #[inline(always)]
    pub const fn id (&self) -> cl_platform_id {
        self.0
    }

    /// Wraps a raw platform id.
    /// # Safety
    /// `id` must be a valid platform id returned by the runtime.
    #[inline(always)]
    pub const unsafe fn from_id (id: cl_platform_id) -> Self {
        Self(id)
    }

    /// OpenCL profile string.
    #[inline(always)]
    pub fn profile (&self) -> Result<String> {
        self.get_info(CL_PLATFORM_PROFILE)
    }

    /// OpenCL version string.
    #[inline(always)]
    pub fn version (&self) -> Result<String> {
        self.get_info(CL_PLATFORM_VERSION)
    }

    /// Platform name string.
    #[inline(always)]
    pub fn name (&self) -> Result<String> {
        self.get_info(CL_PLATFORM_NAME)
    }

    /// Platform vendor string.
    #[inline(always)]
    pub fn vendor (&self) -> Result<String> {
        self.get_info(CL_PLATFORM_VENDOR)
    }

    /// Returns a list of extension names (the extension names themselves do not contain any spaces) supported by the platform.
    #[inline]
    pub fn extensions (&self) -> Result<Vec<String>> {
        let exts = self.get_info::<String>(CL_PLATFORM_EXTENSIONS)?;
        Ok(exts.split_whitespace().map(String::from).collect())
    }

    /// Devices of the given type on this platform. A platform without matching devices yields an empty list.
    pub fn devices (&self, ty: DeviceType) -> Result<Vec<Device>> {
        let mut cnt = 0;
        unsafe {
            match clGetDeviceIDs(self.0, ty.bits(), 0, core::ptr::null_mut(), &mut cnt) {
                CL_DEVICE_NOT_FOUND => return Ok(Vec::new()),
                err => tri!(err)
            }
        }

        let mut result = Vec::<Device>::with_capacity(cnt as usize);
        unsafe {
            tri!(clGetDeviceIDs(self.0, ty.bits(), cnt, result.as_mut_ptr().cast(), core::ptr::null_mut()));
            result.set_len(cnt as usize);
        }

        Ok(result)
    }
}

impl InfoSource for Platform {
    type Param = cl_platform_info;

    #[inline(always)]
    unsafe fn raw_info (&self, param: cl_platform_info, size: usize, value: *mut c_void, size_ret: *mut usize) -> cl_int {
        clGetPlatformInfo(self.0, param, size, value, size_ret)
    }
}

unsafe impl RawInfo for Platform {}

impl Debug for Platform {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Platform")
        .field("id", &self.0)
        .field("name", &self.name().ok())
        .field("vendor", &self.vendor().ok())
        .field("version", &self.version().ok())
        .finish()
    }
}

unsafe impl Send for Platform {}
unsafe impl Sync for Platform {}
