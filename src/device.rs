use core::{ffi::c_void, fmt::Debug};
use opencl_sys::*;
use crate::{prelude::{Platform, Result}, queue::QueueProps, info::{InfoSource, RawInfo}};

#[cfg(feature = "def")]
static DEFAULT_DEVICE : once_cell::sync::OnceCell<Device> = once_cell::sync::OnceCell::new();

/// OpenCL device
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Device (pub(crate) cl_device_id);

impl Device {
    /// First device of type [`DeviceType::DEFAULT`] on the default platform.
    #[cfg(feature = "def")]
    pub fn get_default () -> Result<Device> {
        DEFAULT_DEVICE.get_or_try_init(|| {
            let platform = Platform::get_default()?;
            let device = platform.devices(DeviceType::DEFAULT)?.first().copied().ok_or(crate::error::Error::NoDevice)?;
            tracing::debug!(?device, "selected default device");
            Ok(device)
        }).copied()
    }

    #[inline(always)]
    pub const fn id (&self) -> cl_device_id {
        self.0
    }

    /// Wraps a raw device id.
    /// # Safety
    /// `id` must be a valid device id returned by the runtime.
    #[inline(always)]
    pub const unsafe fn from_id (id: cl_device_id) -> Self {
        Self(id)
    }

    /// The platform associated with this device.
    #[inline(always)]
    pub fn platform (&self) -> Result<Platform> {
        self.get_info(CL_DEVICE_PLATFORM)
    }

    #[inline(always)]
    pub fn device_type (&self) -> Result<DeviceType> {
        self.get_info(CL_DEVICE_TYPE).map(DeviceType::from_bits_truncate)
    }

    /// Device name string.
    #[inline(always)]
    pub fn name (&self) -> Result<String> {
        self.get_info(CL_DEVICE_NAME)
    }

    /// Vendor name string.
    #[inline(always)]
    pub fn vendor (&self) -> Result<String> {
        self.get_info(CL_DEVICE_VENDOR)
    }

    /// A unique device vendor identifier. An example of a unique device identifier could be the PCIe ID.
    #[inline(always)]
    pub fn vendor_id (&self) -> Result<cl_uint> {
        self.get_info(CL_DEVICE_VENDOR_ID)
    }

    /// OpenCL version string, in the form `OpenCL<space><major.minor><space><vendor-specific information>`.
    #[inline(always)]
    pub fn version (&self) -> Result<String> {
        self.get_info(CL_DEVICE_VERSION)
    }

    /// OpenCL software driver version string in the form `major_number.minor_number`.
    #[inline(always)]
    pub fn driver_version (&self) -> Result<String> {
        self.get_info(CL_DRIVER_VERSION)
    }

    /// Highest OpenCL C version supported by the compiler for this device.
    #[inline(always)]
    pub fn opencl_c_version (&self) -> Result<String> {
        self.get_info(CL_DEVICE_OPENCL_C_VERSION)
    }

    /// OpenCL profile string. Either `FULL_PROFILE` or `EMBEDDED_PROFILE`.
    #[inline(always)]
    pub fn profile (&self) -> Result<String> {
        self.get_info(CL_DEVICE_PROFILE)
    }

    /// Is `true` if the device is available and `false` if the device is not available.
    #[inline(always)]
    pub fn available (&self) -> Result<bool> {
        self.get_info(CL_DEVICE_AVAILABLE)
    }

    /// Is `false` if the implementation does not have a compiler available to compile the program source.
    #[inline(always)]
    pub fn compiler_available (&self) -> Result<bool> {
        self.get_info(CL_DEVICE_COMPILER_AVAILABLE)
    }

    /// Is `false` if the implementation does not have a linker available.
    #[inline(always)]
    pub fn linker_available (&self) -> Result<bool> {
        self.get_info(CL_DEVICE_LINKER_AVAILABLE)
    }

    /// The default compute device address space size specified as an unsigned integer value in bits. Currently supported values are 32 or 64 bits.
    #[inline(always)]
    pub fn address_bits (&self) -> Result<cl_uint> {
        self.get_info(CL_DEVICE_ADDRESS_BITS)
    }

    /// Is `true` if the OpenCL device is a little endian device and `false` otherwise.
    #[inline(always)]
    pub fn endian_little (&self) -> Result<bool> {
        self.get_info(CL_DEVICE_ENDIAN_LITTLE)
    }

    /// Is `true` if the device implements error correction for the memories, caches, registers etc. in the device.
    #[inline(always)]
    pub fn error_correction_support (&self) -> Result<bool> {
        self.get_info(CL_DEVICE_ERROR_CORRECTION_SUPPORT)
    }

    /// Is `true` if the device and the host have a unified memory subsystem.
    #[inline(always)]
    pub fn host_unified_memory (&self) -> Result<bool> {
        self.get_info(CL_DEVICE_HOST_UNIFIED_MEMORY)
    }

    /// Describes the execution capabilities of the device
    #[inline(always)]
    pub fn execution_capabilities (&self) -> Result<ExecCapabilities> {
        self.get_info(CL_DEVICE_EXECUTION_CAPABILITIES).map(ExecCapabilities::from_bits_truncate)
    }

    /// Describes the single precision floating-point capability of the device
    #[inline(always)]
    pub fn single_fp_config (&self) -> Result<FpConfig> {
        self.get_info(CL_DEVICE_SINGLE_FP_CONFIG).map(FpConfig::from_bits_truncate)
    }

    /// Describes the OPTIONAL double precision floating-point capability of the device
    #[inline(always)]
    pub fn double_fp_config (&self) -> Result<FpConfig> {
        self.get_info(CL_DEVICE_DOUBLE_FP_CONFIG).map(FpConfig::from_bits_truncate)
    }

    /// Returns a list of extension names (the extension names themselves do not contain any spaces)
    #[inline]
    pub fn extensions (&self) -> Result<Vec<String>> {
        let exts = self.get_info::<String>(CL_DEVICE_EXTENSIONS)?;
        Ok(exts.split_whitespace().map(String::from).collect())
    }

    /// Built-in kernels supported by the device.
    #[inline]
    pub fn built_in_kernels (&self) -> Result<Vec<String>> {
        let kernels = self.get_info::<String>(CL_DEVICE_BUILT_IN_KERNELS)?;
        Ok(crate::utils::split(&kernels, ';'))
    }

    /// Size of global memory cache in bytes.
    #[inline(always)]
    pub fn global_mem_cache_size (&self) -> Result<cl_ulong> {
        self.get_info(CL_DEVICE_GLOBAL_MEM_CACHE_SIZE)
    }

    /// Type of global memory cache supported.
    #[inline]
    pub fn global_mem_cache_type (&self) -> Result<Option<MemCacheType>> {
        let ty = match self.get_info::<cl_device_mem_cache_type>(CL_DEVICE_GLOBAL_MEM_CACHE_TYPE)? {
            CL_READ_ONLY_CACHE => Some(MemCacheType::ReadOnly),
            CL_READ_WRITE_CACHE => Some(MemCacheType::ReadWrite),
            _ => None
        };

        Ok(ty)
    }

    /// Size of global memory cache line in bytes.
    #[inline(always)]
    pub fn global_mem_cacheline_size (&self) -> Result<cl_uint> {
        self.get_info(CL_DEVICE_GLOBAL_MEM_CACHELINE_SIZE)
    }

    /// Size of global memory in bytes.
    #[inline(always)]
    pub fn global_mem_size (&self) -> Result<cl_ulong> {
        self.get_info(CL_DEVICE_GLOBAL_MEM_SIZE)
    }

    /// Is `true` if images are supported by the OpenCL device and `false` otherwise.
    #[inline(always)]
    pub fn image_support (&self) -> Result<bool> {
        self.get_info(CL_DEVICE_IMAGE_SUPPORT)
    }

    /// Max height of 2D image in pixels.
    #[inline(always)]
    pub fn image2d_max_height (&self) -> Result<usize> {
        self.get_info(CL_DEVICE_IMAGE2D_MAX_HEIGHT)
    }

    /// Max width of 2D image in pixels.
    #[inline(always)]
    pub fn image2d_max_width (&self) -> Result<usize> {
        self.get_info(CL_DEVICE_IMAGE2D_MAX_WIDTH)
    }

    /// Max depth of 3D image in pixels.
    #[inline(always)]
    pub fn image3d_max_depth (&self) -> Result<usize> {
        self.get_info(CL_DEVICE_IMAGE3D_MAX_DEPTH)
    }

    /// Max height of 3D image in pixels.
    #[inline(always)]
    pub fn image3d_max_height (&self) -> Result<usize> {
        self.get_info(CL_DEVICE_IMAGE3D_MAX_HEIGHT)
    }

    /// Max width of 3D image in pixels.
    #[inline(always)]
    pub fn image3d_max_width (&self) -> Result<usize> {
        self.get_info(CL_DEVICE_IMAGE3D_MAX_WIDTH)
    }

    /// Max number of pixels for a 1D image created from a buffer object.
    #[inline(always)]
    pub fn image_max_buffer_size (&self) -> Result<usize> {
        self.get_info(CL_DEVICE_IMAGE_MAX_BUFFER_SIZE)
    }

    /// Max number of images in a 1D or 2D image array.
    #[inline(always)]
    pub fn image_max_array_size (&self) -> Result<usize> {
        self.get_info(CL_DEVICE_IMAGE_MAX_ARRAY_SIZE)
    }

    /// Size of local memory arena in bytes.
    #[inline(always)]
    pub fn local_mem_size (&self) -> Result<cl_ulong> {
        self.get_info(CL_DEVICE_LOCAL_MEM_SIZE)
    }

    #[inline]
    pub fn local_mem_type (&self) -> Result<Option<LocalMemType>> {
        let ty = match self.get_info::<cl_device_local_mem_type>(CL_DEVICE_LOCAL_MEM_TYPE)? {
            CL_LOCAL => Some(LocalMemType::Local),
            CL_GLOBAL => Some(LocalMemType::Global),
            _ => None
        };

        Ok(ty)
    }

    /// Maximum configured clock frequency of the device in MHz.
    #[inline(always)]
    pub fn max_clock_frequency (&self) -> Result<cl_uint> {
        self.get_info(CL_DEVICE_MAX_CLOCK_FREQUENCY)
    }

    /// The number of parallel compute units on the OpenCL device. A work-group executes on a single compute unit. The minimum value is 1.
    #[inline(always)]
    pub fn max_compute_units (&self) -> Result<cl_uint> {
        self.get_info(CL_DEVICE_MAX_COMPUTE_UNITS)
    }

    /// Max number of arguments declared with the `__constant` qualifier in a kernel. The minimum value is 8.
    #[inline(always)]
    pub fn max_constant_args (&self) -> Result<cl_uint> {
        self.get_info(CL_DEVICE_MAX_CONSTANT_ARGS)
    }

    /// Max size in bytes of a constant buffer allocation. The minimum value is 64 KB.
    #[inline(always)]
    pub fn max_constant_buffer_size (&self) -> Result<cl_ulong> {
        self.get_info(CL_DEVICE_MAX_CONSTANT_BUFFER_SIZE)
    }

    /// Max size of memory object allocation in bytes.
    #[inline(always)]
    pub fn max_mem_alloc_size (&self) -> Result<cl_ulong> {
        self.get_info(CL_DEVICE_MAX_MEM_ALLOC_SIZE)
    }

    /// Max size in bytes of the arguments that can be passed to a kernel. The minimum value is 256.
    #[inline(always)]
    pub fn max_parameter_size (&self) -> Result<usize> {
        self.get_info(CL_DEVICE_MAX_PARAMETER_SIZE)
    }

    /// Max number of simultaneous image objects that can be read by a kernel.
    #[inline(always)]
    pub fn max_read_image_args (&self) -> Result<cl_uint> {
        self.get_info(CL_DEVICE_MAX_READ_IMAGE_ARGS)
    }

    /// Max number of simultaneous image objects that can be written to by a kernel.
    #[inline(always)]
    pub fn max_write_image_args (&self) -> Result<cl_uint> {
        self.get_info(CL_DEVICE_MAX_WRITE_IMAGE_ARGS)
    }

    #[inline(always)]
    pub fn max_samplers (&self) -> Result<cl_uint> {
        self.get_info(CL_DEVICE_MAX_SAMPLERS)
    }

    /// Maximum number of work-items in a work-group executing a kernel using the data parallel execution model.
    #[inline(always)]
    pub fn max_work_group_size (&self) -> Result<usize> {
        self.get_info(CL_DEVICE_MAX_WORK_GROUP_SIZE)
    }

    /// Maximum dimensions that specify the global and local work-item IDs used by the data parallel execution model. The minimum value is 3.
    #[inline(always)]
    pub fn max_work_item_dimensions (&self) -> Result<cl_uint> {
        self.get_info(CL_DEVICE_MAX_WORK_ITEM_DIMENSIONS)
    }

    /// Maximum number of work-items that can be specified in each dimension of the work-group.
    #[inline(always)]
    pub fn max_work_item_sizes (&self) -> Result<Vec<usize>> {
        self.get_info(CL_DEVICE_MAX_WORK_ITEM_SIZES)
    }

    /// Alignment requirement, in bits, of the base address of a sub-buffer.
    #[inline(always)]
    pub fn mem_base_addr_align (&self) -> Result<cl_uint> {
        self.get_info(CL_DEVICE_MEM_BASE_ADDR_ALIGN)
    }

    /// The smallest alignment in bytes which can be used for any data type.
    #[inline(always)]
    pub fn min_data_type_align_size (&self) -> Result<cl_uint> {
        self.get_info(CL_DEVICE_MIN_DATA_TYPE_ALIGN_SIZE)
    }

    #[inline(always)]
    pub fn partition_max_sub_devices (&self) -> Result<cl_uint> {
        self.get_info(CL_DEVICE_PARTITION_MAX_SUB_DEVICES)
    }

    #[inline(always)]
    pub fn preferred_vector_width_int (&self) -> Result<cl_uint> {
        self.get_info(CL_DEVICE_PREFERRED_VECTOR_WIDTH_INT)
    }

    #[inline(always)]
    pub fn preferred_vector_width_float (&self) -> Result<cl_uint> {
        self.get_info(CL_DEVICE_PREFERRED_VECTOR_WIDTH_FLOAT)
    }

    #[inline(always)]
    pub fn preferred_vector_width_double (&self) -> Result<cl_uint> {
        self.get_info(CL_DEVICE_PREFERRED_VECTOR_WIDTH_DOUBLE)
    }

    /// Describes the resolution of device timer. This is measured in nanoseconds.
    #[inline(always)]
    pub fn profiling_timer_resolution (&self) -> Result<usize> {
        self.get_info(CL_DEVICE_PROFILING_TIMER_RESOLUTION)
    }

    /// Describes the command-queue properties supported by the device.
    #[inline(always)]
    pub fn queue_properties (&self) -> Result<QueueProps> {
        self.get_info(CL_DEVICE_QUEUE_PROPERTIES).map(QueueProps::from_bits_truncate)
    }

    #[inline(always)]
    pub fn reference_count (&self) -> Result<cl_uint> {
        self.get_info(CL_DEVICE_REFERENCE_COUNT)
    }
}

impl InfoSource for Device {
    type Param = cl_device_info;

    #[inline(always)]
    unsafe fn raw_info (&self, param: cl_device_info, size: usize, value: *mut c_void, size_ret: *mut usize) -> cl_int {
        clGetDeviceInfo(self.0, param, size, value, size_ret)
    }
}

unsafe impl RawInfo for Device {}

impl Debug for Device {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Device")
        .field("id", &self.0)
        .field("name", &self.name().ok())
        .field("vendor", &self.vendor().ok())
        .field("version", &self.version().ok())
        .field("type", &self.device_type().ok())
        .finish()
    }
}

unsafe impl Send for Device {}
unsafe impl Sync for Device {}

bitflags::bitflags! {
    /// The OpenCL device type.
    #[repr(transparent)]
    pub struct DeviceType : cl_device_type {
        const DEFAULT = CL_DEVICE_TYPE_DEFAULT;
        const CPU = CL_DEVICE_TYPE_CPU;
        const GPU = CL_DEVICE_TYPE_GPU;
        const ACCELERATOR = CL_DEVICE_TYPE_ACCELERATOR;
        const CUSTOM = CL_DEVICE_TYPE_CUSTOM;
        const ALL = CL_DEVICE_TYPE_ALL;
    }

    /// Describes the floating-point capability of the OpenCL device.
    #[repr(transparent)]
    pub struct FpConfig : cl_device_fp_config {
        const DENORM = CL_FP_DENORM;
        const INF_NAN = CL_FP_INF_NAN;
        const ROUND_TO_NEAREST = CL_FP_ROUND_TO_NEAREST;
        const ROUND_TO_ZERO = CL_FP_ROUND_TO_ZERO;
        const ROUND_TO_INF = CL_FP_ROUND_TO_INF;
        const FMA = CL_FP_FMA;
        const SOFT_FLOAT = CL_FP_SOFT_FLOAT;
    }

    /// Describes the execution capabilities of the device
    #[repr(transparent)]
    pub struct ExecCapabilities : cl_device_exec_capabilities {
        const KERNEL = CL_EXEC_KERNEL;
        const NATIVE_KERNEL = CL_EXEC_NATIVE_KERNEL;
    }
}

impl DeviceType {
    /// Short label used in tool output.
    pub fn label (&self) -> &'static str {
        if self.contains(Self::GPU) {
            "GPU"
        } else if self.contains(Self::CPU) {
            "CPU"
        } else if self.contains(Self::ACCELERATOR) {
            "Accelerator"
        } else if self.contains(Self::CUSTOM) {
            "Custom"
        } else {
            "Unknown"
        }
    }
}

/// Type of global memory cache supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemCacheType {
    ReadOnly,
    ReadWrite
}

/// Type of local memory supported. This can be set to [`Self::Local`] implying dedicated local memory storage such as SRAM, or [`Self::Global`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalMemType {
    Local,
    Global
}
