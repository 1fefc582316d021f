use core::fmt::Display;
use opencl_sys::cl_int;
use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

macro_rules! error_codes {
    ($($name:ident = $code:literal => $msg:literal),+ $(,)?) => {
        /// Status codes reported by the OpenCL runtime.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum ErrorCode {
            $($name = $code),+
        }

        impl ErrorCode {
            /// Maps a raw status to its known error code. Success and unknown codes map to `None`.
            #[inline]
            pub const fn from_raw (code: cl_int) -> Option<Self> {
                match code {
                    $($code => Some(Self::$name),)+
                    _ => None
                }
            }

            #[inline]
            pub const fn message (&self) -> &'static str {
                match self {
                    $(Self::$name => $msg),+
                }
            }
        }
    };
}

error_codes! {
    DeviceNotFound = -1 => "Device not found",
    DeviceNotAvailable = -2 => "Device not available",
    CompilerNotAvailable = -3 => "Compiler not available",
    MemObjectAllocationFailure = -4 => "Memory object allocation failure",
    OutOfResources = -5 => "Out of resources",
    OutOfHostMemory = -6 => "Out of host memory",
    ProfilingInfoNotAvailable = -7 => "Profiling info not available",
    MemCopyOverlap = -8 => "Memory copy overlap",
    ImageFormatMismatch = -9 => "Image format mismatch",
    ImageFormatNotSupported = -10 => "Image format not supported",
    BuildProgramFailure = -11 => "Build program failure",
    MapFailure = -12 => "Map failure",
    MisalignedSubBufferOffset = -13 => "Misaligned sub-buffer offset",
    ExecStatusErrorForEventsInWaitList = -14 => "Execution status error for events in wait list",
    CompileProgramFailure = -15 => "Program compilation failure",
    LinkerNotAvailable = -16 => "Linker not available",
    LinkProgramFailure = -17 => "Program linking failure",
    DevicePartitionFailed = -18 => "Device partition failure",
    KernelArgInfoNotAvailable = -19 => "Kernel argument info not available",
    InvalidValue = -30 => "Invalid value",
    InvalidDeviceType = -31 => "Invalid device type",
    InvalidPlatform = -32 => "Invalid platform",
    InvalidDevice = -33 => "Invalid device",
    InvalidContext = -34 => "Invalid context",
    InvalidQueueProperties = -35 => "Invalid queue properties",
    InvalidCommandQueue = -36 => "Invalid command queue",
    InvalidHostPtr = -37 => "Invalid host pointer",
    InvalidMemObject = -38 => "Invalid memory object",
    InvalidImageFormatDescriptor = -39 => "Invalid image format descriptor",
    InvalidImageSize = -40 => "Invalid image size",
    InvalidSampler = -41 => "Invalid sampler",
    InvalidBinary = -42 => "Invalid binary",
    InvalidBuildOptions = -43 => "Invalid build options",
    InvalidProgram = -44 => "Invalid program",
    InvalidProgramExecutable = -45 => "Invalid program executable",
    InvalidKernelName = -46 => "Invalid kernel name",
    InvalidKernelDefinition = -47 => "Invalid kernel definition",
    InvalidKernel = -48 => "Invalid kernel",
    InvalidArgIndex = -49 => "Invalid argument index",
    InvalidArgValue = -50 => "Invalid argument value",
    InvalidArgSize = -51 => "Invalid argument size",
    InvalidKernelArgs = -52 => "Invalid kernel arguments",
    InvalidWorkDimension = -53 => "Invalid work dimension",
    InvalidWorkGroupSize = -54 => "Invalid work group size",
    InvalidWorkItemSize = -55 => "Invalid work item size",
    InvalidGlobalOffset = -56 => "Invalid global offset",
    InvalidEventWaitList = -57 => "Invalid event wait list",
    InvalidEvent = -58 => "Invalid event",
    InvalidOperation = -59 => "Invalid operation",
    InvalidGlObject = -60 => "Invalid GL object",
    InvalidBufferSize = -61 => "Invalid buffer size",
    InvalidMipLevel = -62 => "Invalid mip level",
    InvalidGlobalWorkSize = -63 => "Invalid global work size",
    InvalidProperty = -64 => "Invalid property",
    InvalidImageDescriptor = -65 => "Invalid image descriptor",
    InvalidCompilerOptions = -66 => "Invalid compiler options",
    InvalidLinkerOptions = -67 => "Invalid linker options",
    InvalidDevicePartitionCount = -68 => "Invalid device partition count",
    InvalidPipeSize = -69 => "Invalid pipe size",
    InvalidDeviceQueue = -70 => "Invalid device queue",
    NvidiaIllegalBufferAction = -9999 => "Invalid buffer read/write",
}

impl Display for ErrorCode {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.message().fmt(f)
    }
}

impl From<ErrorCode> for cl_int {
    #[inline(always)]
    fn from(value: ErrorCode) -> Self {
        value as cl_int
    }
}

/// Human readable text for a raw status code.
pub fn error_message (code: cl_int) -> String {
    match ErrorCode::from_raw(code) {
        Some(known) => known.message().to_string(),
        None => format!("Unknown error {code}")
    }
}

#[inline(always)]
fn describe (code: &cl_int) -> String {
    error_message(*code)
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("OpenCL error {code} at {file}:{line}: {}", describe(.code))]
    Native { code: cl_int, file: &'static str, line: u32 },
    #[error("info query returned {actual} bytes, expected {expected}")]
    InfoSize { expected: usize, actual: usize },
    #[error("No OpenCL platforms available")]
    NoPlatform,
    #[error("No OpenCL devices available")]
    NoDevice,
    #[error("{0}")]
    Template(String),
    #[error("{0}")]
    Option(String),
    #[error(transparent)]
    Io(#[from] std::io::Error)
}

impl Error {
    #[cold]
    pub fn native (code: cl_int, file: &'static str, line: u32) -> Self {
        tracing::debug!(code, file, line, "OpenCL call failed: {}", error_message(code));
        Self::Native { code, file, line }
    }

    /// Raw native status, if this error came from the runtime.
    #[inline]
    pub fn code (&self) -> Option<cl_int> {
        match self {
            Self::Native { code, .. } => Some(*code),
            _ => None
        }
    }

    #[inline]
    pub fn error_code (&self) -> Option<ErrorCode> {
        self.code().and_then(ErrorCode::from_raw)
    }
}

/// Records the location of the conversion.
impl From<ErrorCode> for Error {
    #[track_caller]
    fn from(value: ErrorCode) -> Self {
        let caller = core::panic::Location::caller();
        Self::native(value.into(), caller.file(), caller.line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check (code: cl_int) -> Result<()> {
        tri!(code);
        Ok(())
    }

    #[test]
    fn known_codes_have_messages () {
        assert_eq!(error_message(-30), "Invalid value");
        assert_eq!(error_message(-5), "Out of resources");
        assert_eq!(error_message(-48), "Invalid kernel");
        assert_eq!(ErrorCode::from_raw(-70), Some(ErrorCode::InvalidDeviceQueue));
    }

    #[test]
    fn unknown_codes () {
        assert_eq!(ErrorCode::from_raw(0), None);
        assert_eq!(ErrorCode::from_raw(-25), None);
        assert_eq!(error_message(-1234), "Unknown error -1234");
    }

    #[test]
    fn native_error_display () {
        let err = Error::native(-30, "src/queue.rs", 42);
        assert_eq!(err.to_string(), "OpenCL error -30 at src/queue.rs:42: Invalid value");
        assert_eq!(err.code(), Some(-30));
        assert_eq!(err.error_code(), Some(ErrorCode::InvalidValue));
    }

    #[test]
    fn converted_code_points_at_caller () {
        let line = line!() + 1;
        let err = Error::from(ErrorCode::InvalidKernelArgs);

        match err {
            Error::Native { code, file, line: at } => {
                assert_eq!(code, -52);
                assert_eq!(file, file!());
                assert_eq!(at, line);
            },
            other => panic!("unexpected error {other:?}")
        }
    }

    #[test]
    fn tri_passes_success () {
        assert!(check(0).is_ok());

        let err = check(-36).unwrap_err();
        assert_eq!(err.error_code(), Some(ErrorCode::InvalidCommandQueue));
        match err {
            Error::Native { file, .. } => assert!(file.ends_with("error.rs")),
            other => panic!("unexpected error {other:?}")
        }
    }
}
