use core::{ffi::c_void, mem::size_of};
use opencl_sys::{cl_command_queue, cl_command_queue_info, cl_command_queue_properties, cl_int, cl_uint, cl_bool, cl_event, CL_TRUE, CL_FALSE, CL_QUEUE_OUT_OF_ORDER_EXEC_MODE_ENABLE, CL_QUEUE_PROFILING_ENABLE, CL_QUEUE_CONTEXT, CL_QUEUE_DEVICE, CL_QUEUE_REFERENCE_COUNT, CL_QUEUE_PROPERTIES, clCreateCommandQueue, clRetainCommandQueue, clReleaseCommandQueue, clGetCommandQueueInfo, clFlush, clFinish, clEnqueueReadBuffer, clEnqueueWriteBuffer, clEnqueueCopyBuffer, clEnqueueFillBuffer, clEnqueueNDRangeKernel, clEnqueueBarrierWithWaitList, clEnqueueMarkerWithWaitList, CL_INVALID_WORK_DIMENSION};
use crate::{prelude::{Context, Device, Event, Kernel, Memory, Buffer, Scalar, NdRange, Result, Error}, info::{InfoSource, RawInfo}, utils::wait_list};

flat_mod!(mapped);

#[cfg(feature = "def")]
static DEFAULT_QUEUE : once_cell::sync::OnceCell<Queue> = once_cell::sync::OnceCell::new();

bitflags::bitflags! {
    /// Describes the command-queue properties supported by the device.
    #[repr(transparent)]
    pub struct QueueProps: cl_command_queue_properties {
        const OUT_OF_ORDER_EXEC_MODE_ENABLE = CL_QUEUE_OUT_OF_ORDER_EXEC_MODE_ENABLE;
        const PROFILING_ENABLE = CL_QUEUE_PROFILING_ENABLE;
    }
}

impl Default for QueueProps {
    #[inline(always)]
    fn default() -> Self {
        Self::empty()
    }
}

#[inline(always)]
const fn cl_blocking (blocking: bool) -> cl_bool {
    if blocking { CL_TRUE } else { CL_FALSE }
}

/// OpenCL command queue.
///
/// Commands are executed in submission order. Enqueueing from several threads at once on the same
/// queue must be serialized by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Queue (pub(crate) cl_command_queue);

impl Queue {
    #[allow(deprecated)]
    pub fn new (ctx: &Context, device: &Device, props: QueueProps) -> Result<Self> {
        let mut err = 0;
        let id = unsafe {
            clCreateCommandQueue(ctx.0, device.0, props.bits(), &mut err)
        };

        tri!(err);
        tracing::debug!(?props, "created command queue");
        Ok(Self(id))
    }

    /// Queue on the first device of `ctx`.
    pub fn from_context (ctx: &Context, enable_profiling: bool) -> Result<Self> {
        let device = ctx.devices()?.first().copied().ok_or(Error::NoDevice)?;
        let props = match enable_profiling {
            true => QueueProps::PROFILING_ENABLE,
            false => QueueProps::empty()
        };

        Self::new(ctx, &device, props)
    }

    /// Queue on the default context, created once.
    #[cfg(feature = "def")]
    pub fn get_default () -> Result<Queue> {
        DEFAULT_QUEUE.get_or_try_init(|| Self::from_context(&Context::get_default()?, false)).copied()
    }

    #[inline(always)]
    pub const fn id (&self) -> cl_command_queue {
        self.0
    }

    /// Wraps a raw queue.
    /// # Safety
    /// `id` must be a valid command queue. No reference is taken.
    #[inline(always)]
    pub const unsafe fn from_id (id: cl_command_queue) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub fn retain (&self) -> Result<()> {
        unsafe { tri!(clRetainCommandQueue(self.0)) }
        Ok(())
    }

    #[inline(always)]
    pub fn release (&self) -> Result<()> {
        unsafe { tri!(clReleaseCommandQueue(self.0)) }
        Ok(())
    }

    #[inline(always)]
    pub fn context (&self) -> Result<Context> {
        self.get_info(CL_QUEUE_CONTEXT)
    }

    #[inline(always)]
    pub fn device (&self) -> Result<Device> {
        self.get_info(CL_QUEUE_DEVICE)
    }

    /// Stale as soon as it's returned. Only useful for debugging.
    #[inline(always)]
    pub fn reference_count (&self) -> Result<cl_uint> {
        self.get_info(CL_QUEUE_REFERENCE_COUNT)
    }

    #[inline(always)]
    pub fn properties (&self) -> Result<QueueProps> {
        self.get_info(CL_QUEUE_PROPERTIES).map(QueueProps::from_bits_truncate)
    }

    /// Submits every queued command to the device without waiting for them.
    #[inline(always)]
    pub fn flush (&self) -> Result<()> {
        unsafe { tri!(clFlush(self.0)) }
        Ok(())
    }

    /// Blocks until every queued command has completed.
    #[inline(always)]
    pub fn finish (&self) -> Result<()> {
        unsafe { tri!(clFinish(self.0)) }
        Ok(())
    }

    /// Reads `size` bytes starting at byte `offset` of `mem` into `dst`.
    /// # Safety
    /// `dst` must be valid for `size` bytes until the returned event completes.
    pub unsafe fn enqueue_read_raw (&self, mem: &Memory, blocking: bool, offset: usize, size: usize, dst: *mut c_void, wait: &[Event]) -> Result<Event> {
        let (wait_len, wait) = wait_list(wait);
        let mut event : cl_event = core::ptr::null_mut();

        tri!(clEnqueueReadBuffer(self.0, mem.0, cl_blocking(blocking), offset, size, dst, wait_len, wait, &mut event));
        tracing::trace!(offset, size, blocking, "enqueued read");
        Ok(Event(event))
    }

    /// Writes `size` bytes from `src` starting at byte `offset` of `mem`.
    /// # Safety
    /// `src` must be valid for `size` bytes until the returned event completes.
    pub unsafe fn enqueue_write_raw (&self, mem: &Memory, blocking: bool, offset: usize, size: usize, src: *const c_void, wait: &[Event]) -> Result<Event> {
        let (wait_len, wait) = wait_list(wait);
        let mut event : cl_event = core::ptr::null_mut();

        tri!(clEnqueueWriteBuffer(self.0, mem.0, cl_blocking(blocking), offset, size, src, wait_len, wait, &mut event));
        tracing::trace!(offset, size, blocking, "enqueued write");
        Ok(Event(event))
    }

    /// Copies `size` bytes between two memory objects.
    pub fn enqueue_copy_raw (&self, src: &Memory, dst: &Memory, src_offset: usize, dst_offset: usize, size: usize, wait: &[Event]) -> Result<Event> {
        let (wait_len, wait) = wait_list(wait);
        let mut event : cl_event = core::ptr::null_mut();

        unsafe {
            tri!(clEnqueueCopyBuffer(self.0, src.0, dst.0, src_offset, dst_offset, size, wait_len, wait, &mut event));
        }

        tracing::trace!(src_offset, dst_offset, size, "enqueued copy");
        Ok(Event(event))
    }

    /// Blocking read of `dst.len()` elements, starting at element `offset`.
    #[inline]
    pub fn enqueue_read<T: Scalar, const N: usize> (&self, buf: &Buffer<T, N>, offset: usize, dst: &mut [T], wait: &[Event]) -> Result<Event> {
        unsafe {
            self.enqueue_read_raw(buf, true, offset * size_of::<T>(), core::mem::size_of_val(dst), dst.as_mut_ptr().cast(), wait)
        }
    }

    /// Non-blocking read of `dst.len()` elements, starting at element `offset`.
    /// # Safety
    /// `dst` must not be accessed nor dropped until the returned event completes.
    #[inline]
    pub unsafe fn enqueue_read_nonblocking<T: Scalar, const N: usize> (&self, buf: &Buffer<T, N>, offset: usize, dst: &mut [T], wait: &[Event]) -> Result<Event> {
        self.enqueue_read_raw(buf, false, offset * size_of::<T>(), core::mem::size_of_val(dst), dst.as_mut_ptr().cast(), wait)
    }

    /// Blocking read of the whole buffer.
    pub fn read_to_vec<T: Scalar, const N: usize> (&self, buf: &Buffer<T, N>, wait: &[Event]) -> Result<Vec<T>> {
        let mut result = vec![T::zero(); buf.len()];
        self.enqueue_read(buf, 0, &mut result, wait)?.release()?;
        Ok(result)
    }

    /// Blocking write of `src`, starting at element `offset`.
    #[inline]
    pub fn enqueue_write<T: Scalar, const N: usize> (&self, buf: &Buffer<T, N>, offset: usize, src: &[T], wait: &[Event]) -> Result<Event> {
        unsafe {
            self.enqueue_write_raw(buf, true, offset * size_of::<T>(), core::mem::size_of_val(src), src.as_ptr().cast(), wait)
        }
    }

    /// Non-blocking write of `src`, starting at element `offset`.
    /// # Safety
    /// `src` must not be modified nor dropped until the returned event completes.
    #[inline]
    pub unsafe fn enqueue_write_nonblocking<T: Scalar, const N: usize> (&self, buf: &Buffer<T, N>, offset: usize, src: &[T], wait: &[Event]) -> Result<Event> {
        self.enqueue_write_raw(buf, false, offset * size_of::<T>(), core::mem::size_of_val(src), src.as_ptr().cast(), wait)
    }

    /// Copies every element of `src` into `dst`.
    /// # Panics
    /// If the buffers hold a different number of elements.
    pub fn enqueue_copy<T: Scalar, const N: usize, const M: usize> (&self, src: &Buffer<T, N>, dst: &Buffer<T, M>, wait: &[Event]) -> Result<Event> {
        assert_eq!(src.len(), dst.len(), "copy between buffers of different lengths");
        self.enqueue_copy_raw(src, dst, 0, 0, src.len() * size_of::<T>(), wait)
    }

    /// Copies `len` elements from `src[src_offset..]` into `dst[dst_offset..]`.
    #[inline]
    pub fn enqueue_copy_region<T: Scalar, const N: usize, const M: usize> (&self, src: &Buffer<T, N>, src_offset: usize, dst: &Buffer<T, M>, dst_offset: usize, len: usize, wait: &[Event]) -> Result<Event> {
        let elem = size_of::<T>();
        self.enqueue_copy_raw(src, dst, src_offset * elem, dst_offset * elem, len * elem, wait)
    }

    /// Sets `len` elements starting at element `offset` to `pattern`.
    pub fn enqueue_fill<T: Scalar, const N: usize> (&self, buf: &Buffer<T, N>, pattern: T, offset: usize, len: usize, wait: &[Event]) -> Result<Event> {
        let elem = size_of::<T>();
        let (wait_len, wait) = wait_list(wait);
        let mut event : cl_event = core::ptr::null_mut();

        unsafe {
            tri!(clEnqueueFillBuffer(self.0, buf.id(), (&pattern as *const T).cast(), elem, offset * elem, len * elem, wait_len, wait, &mut event));
        }

        tracing::trace!(offset, len, "enqueued fill");
        Ok(Event(event))
    }

    /// Launches `kernel` over `global` work-items with its currently set arguments.
    #[inline(always)]
    pub fn enqueue_kernel (&self, kernel: &Kernel, global: impl Into<NdRange>, wait: &[Event]) -> Result<Event> {
        self.enqueue_kernel_with(kernel, None, global.into(), None, wait)
    }

    /// Launches `kernel` with an explicit global offset and work-group size.
    ///
    /// `offset` and `local` must have as many dimensions as `global`, otherwise the launch fails
    /// with [`ErrorCode::InvalidWorkDimension`](crate::error::ErrorCode::InvalidWorkDimension).
    pub fn enqueue_kernel_with (&self, kernel: &Kernel, offset: Option<NdRange>, global: NdRange, local: Option<NdRange>, wait: &[Event]) -> Result<Event> {
        if [offset, local].iter().flatten().any(|x| x.dimensions() != global.dimensions()) {
            return Err(Error::native(CL_INVALID_WORK_DIMENSION, file!(), line!()))
        }

        let offset = offset.map(|x| x.offsets());
        let offset_ptr = offset.as_ref().map_or(core::ptr::null(), |x| x.as_ptr());
        let local = local.unwrap_or_default();
        let (wait_len, wait) = wait_list(wait);
        let mut event : cl_event = core::ptr::null_mut();

        unsafe {
            tri!(clEnqueueNDRangeKernel(self.0, kernel.0, global.dimensions(), offset_ptr, global.as_ptr(), local.as_ptr(), wait_len, wait, &mut event));
        }

        tracing::trace!(global = ?global.sizes(), "enqueued kernel");
        Ok(Event(event))
    }

    /// Completes once every event in `wait` (or every earlier command, if empty) completes. Later
    /// commands do not start until it has.
    pub fn enqueue_barrier (&self, wait: &[Event]) -> Result<Event> {
        let (wait_len, wait) = wait_list(wait);
        let mut event : cl_event = core::ptr::null_mut();

        unsafe {
            tri!(clEnqueueBarrierWithWaitList(self.0, wait_len, wait, &mut event));
        }

        Ok(Event(event))
    }

    /// Like [`enqueue_barrier`](Self::enqueue_barrier), without blocking later commands.
    pub fn enqueue_marker (&self, wait: &[Event]) -> Result<Event> {
        let (wait_len, wait) = wait_list(wait);
        let mut event : cl_event = core::ptr::null_mut();

        unsafe {
            tri!(clEnqueueMarkerWithWaitList(self.0, wait_len, wait, &mut event));
        }

        Ok(Event(event))
    }
}

impl InfoSource for Queue {
    type Param = cl_command_queue_info;

    #[inline(always)]
    unsafe fn raw_info (&self, param: cl_command_queue_info, size: usize, value: *mut c_void, size_ret: *mut usize) -> cl_int {
        clGetCommandQueueInfo(self.0, param, size, value, size_ret)
    }
}

unsafe impl RawInfo for Queue {}
unsafe impl Send for Queue {}
unsafe impl Sync for Queue {}
