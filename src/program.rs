use core::ffi::c_void;
use std::ffi::CString;
use opencl_sys::{cl_program, cl_program_info, cl_program_build_info, cl_device_id, cl_int, cl_uint, cl_build_status, cl_program_binary_type, clCreateProgramWithSource, clCreateProgramWithBinary, clBuildProgram, clCompileProgram, clLinkProgram, clRetainProgram, clReleaseProgram, clGetProgramInfo, clGetProgramBuildInfo, CL_PROGRAM_REFERENCE_COUNT, CL_PROGRAM_CONTEXT, CL_PROGRAM_NUM_DEVICES, CL_PROGRAM_DEVICES, CL_PROGRAM_SOURCE, CL_PROGRAM_BINARY_SIZES, CL_PROGRAM_BINARIES, CL_PROGRAM_NUM_KERNELS, CL_PROGRAM_KERNEL_NAMES, CL_PROGRAM_BUILD_STATUS, CL_PROGRAM_BUILD_OPTIONS, CL_PROGRAM_BUILD_LOG, CL_PROGRAM_BINARY_TYPE, CL_BUILD_NONE, CL_BUILD_ERROR, CL_BUILD_SUCCESS, CL_BUILD_IN_PROGRESS, CL_PROGRAM_BINARY_TYPE_NONE, CL_PROGRAM_BINARY_TYPE_COMPILED_OBJECT, CL_PROGRAM_BINARY_TYPE_LIBRARY, CL_PROGRAM_BINARY_TYPE_EXECUTABLE};
use thiserror::Error as ThisError;
use crate::{prelude::{Context, Device, Result, Error}, info::{InfoSource, RawInfo}, utils::{rtrim_null, split}};

/// Per-device state of a program build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStatus {
    None,
    Error,
    Success,
    InProgress
}

impl BuildStatus {
    #[inline]
    pub const fn from_raw (raw: cl_build_status) -> Option<Self> {
        match raw {
            CL_BUILD_NONE => Some(Self::None),
            CL_BUILD_ERROR => Some(Self::Error),
            CL_BUILD_SUCCESS => Some(Self::Success),
            CL_BUILD_IN_PROGRESS => Some(Self::InProgress),
            _ => None
        }
    }
}

/// Kind of binary currently associated with a program for a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryType {
    None,
    CompiledObject,
    Library,
    Executable
}

impl BinaryType {
    #[inline]
    pub const fn from_raw (raw: cl_program_binary_type) -> Option<Self> {
        match raw {
            CL_PROGRAM_BINARY_TYPE_NONE => Some(Self::None),
            CL_PROGRAM_BINARY_TYPE_COMPILED_OBJECT => Some(Self::CompiledObject),
            CL_PROGRAM_BINARY_TYPE_LIBRARY => Some(Self::Library),
            CL_PROGRAM_BINARY_TYPE_EXECUTABLE => Some(Self::Executable),
            _ => None
        }
    }
}

/// OpenCL program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Program (pub(crate) cl_program);

impl Program {
    #[inline(always)]
    pub fn from_source (ctx: &Context, source: &str) -> Result<Self> {
        Self::from_sources(ctx, &[source])
    }

    /// Program from several source strings, concatenated by the runtime in order.
    pub fn from_sources<S: AsRef<str>> (ctx: &Context, sources: &[S]) -> Result<Self> {
        let strings = sources.iter().map(|x| x.as_ref().as_ptr()).collect::<Vec<_>>();
        let lens = sources.iter().map(|x| x.as_ref().len()).collect::<Vec<_>>();

        let mut err = 0;
        let id = unsafe {
            clCreateProgramWithSource(ctx.0, sources.len() as cl_uint, strings.as_ptr().cast(), lens.as_ptr(), &mut err)
        };

        tri!(err);
        tracing::debug!(sources = sources.len(), "created program from source");
        Ok(Self(id))
    }

    /// Program from previously built binaries, one per device.
    /// # Panics
    /// If `devices` and `binaries` differ in length.
    pub fn from_binary<B: AsRef<[u8]>> (ctx: &Context, devices: &[Device], binaries: &[B]) -> Result<Self> {
        assert_eq!(devices.len(), binaries.len(), "one binary is required per device");

        let lens = binaries.iter().map(|x| x.as_ref().len()).collect::<Vec<_>>();
        let ptrs = binaries.iter().map(|x| x.as_ref().as_ptr()).collect::<Vec<_>>();
        let mut status = vec![0 as cl_int; devices.len()];

        let mut err = 0;
        let id = unsafe {
            clCreateProgramWithBinary(ctx.0, devices.len() as cl_uint, devices.as_ptr().cast(), lens.as_ptr(), ptrs.as_ptr(), status.as_mut_ptr(), &mut err)
        };

        tri!(err);
        if let Some(bad) = status.into_iter().find(|x| *x != 0) {
            return Err(Error::native(bad, file!(), line!()));
        }

        tracing::debug!(devices = devices.len(), "created program from binary");
        Ok(Self(id))
    }

    /// Links compiled objects or libraries into a new program. Blocks until linking is done.
    ///
    /// The runtime may still create a program when linking fails. It is handed back in the
    /// [`LinkError`] so its link log can be read.
    #[inline(always)]
    pub fn link (ctx: &Context, devices: &[Device], options: &str, programs: &[Program]) -> Result<Program, LinkError> {
        Self::link_inner::<fn(Program)>(ctx, devices, options, programs, None)
    }

    /// Starts linking and returns immediately; `f` runs once linking is done.
    #[inline(always)]
    pub fn link_with_callback<F: 'static + Send + FnOnce(Program)> (ctx: &Context, devices: &[Device], options: &str, programs: &[Program], f: F) -> Result<Program, LinkError> {
        Self::link_inner(ctx, devices, options, programs, Some(f))
    }

    fn link_inner<F: 'static + Send + FnOnce(Program)> (ctx: &Context, devices: &[Device], options: &str, programs: &[Program], f: Option<F>) -> Result<Program, LinkError> {
        let options = c_string(options)?;
        let (notify, data) = notify_pair(f);
        let mut err = 0;

        let id = unsafe {
            clLinkProgram(ctx.0, devices.len() as cl_uint, device_ptr(devices), options.as_ptr(), programs.len() as cl_uint, programs.as_ptr().cast(), notify, data, &mut err)
        };

        if err != 0 {
            let program = match id.is_null() {
                true => None,
                false => Some(Self(id))
            };

            return Err(LinkError { error: Error::native(err, file!(), line!()), program })
        }

        tracing::debug!(programs = programs.len(), "linked program");
        Ok(Self(id))
    }

    #[cfg(feature = "def")]
    #[inline(always)]
    pub fn from_source_default (source: &str) -> Result<Self> {
        Self::from_source(&Context::get_default()?, source)
    }

    #[inline(always)]
    pub const fn id (&self) -> cl_program {
        self.0
    }

    /// Wraps a raw program.
    /// # Safety
    /// `id` must be a valid program. No reference is taken.
    #[inline(always)]
    pub const unsafe fn from_id (id: cl_program) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub fn retain (&self) -> Result<()> {
        unsafe { tri!(clRetainProgram(self.0)) }
        Ok(())
    }

    #[inline(always)]
    pub fn release (&self) -> Result<()> {
        unsafe { tri!(clReleaseProgram(self.0)) }
        Ok(())
    }

    /// Compiles and links for `devices` (every device of the context, if empty). Blocks until done.
    /// On failure inspect [`build_status`](Self::build_status) and [`build_log`](Self::build_log).
    pub fn build (&self, devices: &[Device], options: &str) -> Result<()> {
        let options = c_string(options)?;
        unsafe {
            tri!(clBuildProgram(self.0, devices.len() as cl_uint, device_ptr(devices), options.as_ptr(), None, core::ptr::null_mut()));
        }

        tracing::debug!(program = ?self.0, "built program");
        Ok(())
    }

    /// Starts the build and returns immediately; `f` runs once the build is done, successful or not.
    ///
    /// Some drivers still run `f` after a failed call, so the closure is not reclaimed on error.
    pub fn build_with_callback<F: 'static + Send + FnOnce(Program)> (&self, devices: &[Device], options: &str, f: F) -> Result<()> {
        let options = c_string(options)?;
        let (notify, data) = notify_pair(Some(f));

        unsafe {
            tri!(clBuildProgram(self.0, devices.len() as cl_uint, device_ptr(devices), options.as_ptr(), notify, data));
        }

        Ok(())
    }

    /// Compiles source into an object for later [`link`](Self::link). `headers` pairs include names with header programs.
    pub fn compile (&self, devices: &[Device], options: &str, headers: &[(&str, Program)]) -> Result<()> {
        self.compile_inner::<fn(Program)>(devices, options, headers, None)
    }

    pub fn compile_with_callback<F: 'static + Send + FnOnce(Program)> (&self, devices: &[Device], options: &str, headers: &[(&str, Program)], f: F) -> Result<()> {
        self.compile_inner(devices, options, headers, Some(f))
    }

    fn compile_inner<F: 'static + Send + FnOnce(Program)> (&self, devices: &[Device], options: &str, headers: &[(&str, Program)], f: Option<F>) -> Result<()> {
        let options = c_string(options)?;
        let names = headers.iter().map(|(name, _)| c_string(name)).collect::<Result<Vec<_>>>()?;
        let name_ptrs = names.iter().map(|x| x.as_ptr()).collect::<Vec<_>>();
        let programs = headers.iter().map(|(_, prog)| prog.0).collect::<Vec<_>>();

        let (notify, data) = notify_pair(f);

        let (header_ptr, name_ptr) = match headers.len() {
            0 => (core::ptr::null(), core::ptr::null()),
            _ => (programs.as_ptr(), name_ptrs.as_ptr())
        };

        unsafe {
            tri!(clCompileProgram(self.0, devices.len() as cl_uint, device_ptr(devices), options.as_ptr(), headers.len() as cl_uint, header_ptr, name_ptr, notify, data));
        }

        Ok(())
    }

    /// Stale as soon as it's returned. Only useful for debugging.
    #[inline(always)]
    pub fn reference_count (&self) -> Result<cl_uint> {
        self.get_info(CL_PROGRAM_REFERENCE_COUNT)
    }

    #[inline(always)]
    pub fn context (&self) -> Result<Context> {
        self.get_info(CL_PROGRAM_CONTEXT)
    }

    #[inline(always)]
    pub fn num_devices (&self) -> Result<cl_uint> {
        self.get_info(CL_PROGRAM_NUM_DEVICES)
    }

    #[inline(always)]
    pub fn devices (&self) -> Result<Vec<Device>> {
        self.get_info(CL_PROGRAM_DEVICES)
    }

    #[inline(always)]
    pub fn source (&self) -> Result<String> {
        self.get_info(CL_PROGRAM_SOURCE)
    }

    /// Number of kernels declared in the built program.
    #[inline(always)]
    pub fn num_kernels (&self) -> Result<usize> {
        self.get_info(CL_PROGRAM_NUM_KERNELS)
    }

    /// Names of the kernels declared in the built program.
    #[inline]
    pub fn kernel_names (&self) -> Result<Vec<String>> {
        let names = self.get_info::<String>(CL_PROGRAM_KERNEL_NAMES)?;
        Ok(split(rtrim_null(&names), ';'))
    }

    #[inline(always)]
    pub fn binary_sizes (&self) -> Result<Vec<usize>> {
        self.get_info(CL_PROGRAM_BINARY_SIZES)
    }

    /// One binary per program device, in the order of [`devices`](Self::devices).
    pub fn binaries (&self) -> Result<Vec<Vec<u8>>> {
        let sizes = self.binary_sizes()?;
        let mut result = sizes.iter().map(|len| vec![0u8; *len]).collect::<Vec<_>>();
        let mut ptrs = result.iter_mut().map(|x| x.as_mut_ptr()).collect::<Vec<_>>();

        unsafe {
            tri!(self.raw_info(CL_PROGRAM_BINARIES, ptrs.len() * core::mem::size_of::<*mut u8>(), ptrs.as_mut_ptr().cast(), core::ptr::null_mut()));
        }

        Ok(result)
    }

    #[inline(always)]
    pub fn build_status (&self, device: &Device) -> Result<BuildStatus> {
        let raw = self.build_info(device).get_info::<cl_build_status>(CL_PROGRAM_BUILD_STATUS)?;
        BuildStatus::from_raw(raw).ok_or_else(|| Error::native(raw, file!(), line!()))
    }

    #[inline(always)]
    pub fn build_options (&self, device: &Device) -> Result<String> {
        self.build_info(device).get_info(CL_PROGRAM_BUILD_OPTIONS)
    }

    /// Compiler output of the last build, compile or link for `device`.
    #[inline(always)]
    pub fn build_log (&self, device: &Device) -> Result<String> {
        self.build_info(device).get_info(CL_PROGRAM_BUILD_LOG)
    }

    #[inline(always)]
    pub fn binary_type (&self, device: &Device) -> Result<BinaryType> {
        let raw = self.build_info(device).get_info::<cl_program_binary_type>(CL_PROGRAM_BINARY_TYPE)?;
        BinaryType::from_raw(raw).ok_or_else(|| Error::native(opencl_sys::CL_INVALID_VALUE, file!(), line!()))
    }

    #[inline(always)]
    fn build_info (&self, device: &Device) -> ProgramBuildInfo {
        ProgramBuildInfo { program: self.0, device: device.0 }
    }
}

type BuildNotify = unsafe extern "C" fn(cl_program, *mut c_void);

unsafe extern "C" fn build_callback<F: FnOnce(Program)> (program: cl_program, data: *mut c_void) {
    let f = Box::from_raw(data as *mut F);
    f(Program(program))
}

/// Boxes `f` for a build, compile or link notification.
#[inline]
fn notify_pair<F: 'static + Send + FnOnce(Program)> (f: Option<F>) -> (Option<BuildNotify>, *mut c_void) {
    match f {
        Some(f) => (Some(build_callback::<F> as BuildNotify), Box::into_raw(Box::new(f)).cast()),
        None => (None, core::ptr::null_mut())
    }
}

/// Failed link. `program` is set when the runtime still created one, which then holds the link
/// log for [`Program::build_log`] and must be released by the caller.
#[derive(Debug, ThisError)]
#[error("{error}")]
pub struct LinkError {
    #[source]
    pub error: Error,
    pub program: Option<Program>
}

impl From<Error> for LinkError {
    #[inline(always)]
    fn from(error: Error) -> Self {
        Self { error, program: None }
    }
}

/// Releases the program of the failed link, keeping the error.
impl From<LinkError> for Error {
    fn from(value: LinkError) -> Self {
        if let Some(program) = value.program {
            if let Err(e) = program.release() {
                tracing::warn!(%e, "failed to release program of failed link");
            }
        }

        value.error
    }
}

#[inline(always)]
fn device_ptr (devices: &[Device]) -> *const cl_device_id {
    match devices.len() {
        0 => core::ptr::null(),
        _ => devices.as_ptr().cast()
    }
}

#[inline]
fn c_string (s: &str) -> Result<CString> {
    CString::new(s).map_err(|_| Error::Option(format!("'{s}' contains a NUL byte")))
}

impl InfoSource for Program {
    type Param = cl_program_info;

    #[inline(always)]
    unsafe fn raw_info (&self, param: cl_program_info, size: usize, value: *mut c_void, size_ret: *mut usize) -> cl_int {
        clGetProgramInfo(self.0, param, size, value, size_ret)
    }
}

struct ProgramBuildInfo {
    program: cl_program,
    device: cl_device_id
}

impl InfoSource for ProgramBuildInfo {
    type Param = cl_program_build_info;

    #[inline(always)]
    unsafe fn raw_info (&self, param: cl_program_build_info, size: usize, value: *mut c_void, size_ret: *mut usize) -> cl_int {
        clGetProgramBuildInfo(self.program, self.device, param, size, value, size_ret)
    }
}

unsafe impl RawInfo for Program {}
unsafe impl Send for Program {}
unsafe impl Sync for Program {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_status_codes () {
        assert_eq!(BuildStatus::from_raw(0), Some(BuildStatus::Success));
        assert_eq!(BuildStatus::from_raw(-1), Some(BuildStatus::None));
        assert_eq!(BuildStatus::from_raw(-2), Some(BuildStatus::Error));
        assert_eq!(BuildStatus::from_raw(-3), Some(BuildStatus::InProgress));
        assert_eq!(BuildStatus::from_raw(7), None);
    }

    #[test]
    fn options_reject_nul () {
        assert!(c_string("-cl-fast-relaxed-math").is_ok());
        assert!(c_string("-D A\0").is_err());
    }
}
