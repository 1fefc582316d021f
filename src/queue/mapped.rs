use core::{ops::{Deref, DerefMut}, ptr::NonNull, mem::size_of};
use opencl_sys::{cl_event, clEnqueueMapBuffer, clEnqueueUnmapMemObject, CL_TRUE};
use thiserror::Error as ThisError;
use crate::{prelude::{Event, Memory, Buffer, Scalar, MapFlags, Result, Error}, utils::wait_list};
use super::Queue;

/// Host view of a mapped buffer region, valid until passed to [`Queue::enqueue_unmap`].
///
/// Dropping it without unmapping leaves the buffer mapped.
#[derive(Debug)]
pub struct MappedRegion<T: Scalar> {
    mem: Memory,
    ptr: NonNull<T>,
    len: usize,
    event: Event
}

impl<T: Scalar> MappedRegion<T> {
    /// Event of the map command.
    #[inline(always)]
    pub fn event (&self) -> Event {
        self.event
    }

    #[inline(always)]
    pub fn memory (&self) -> Memory {
        self.mem
    }
}

impl<T: Scalar> Deref for MappedRegion<T> {
    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Scalar> DerefMut for MappedRegion<T> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

unsafe impl<T: Scalar> Send for MappedRegion<T> {}

/// Unmap command the runtime refused. The region is still mapped and is handed back.
#[derive(Debug, ThisError)]
#[error("{error}")]
pub struct UnmapError<T: Scalar> {
    #[source]
    pub error: Error,
    pub region: MappedRegion<T>
}

impl<T: Scalar> From<UnmapError<T>> for Error {
    #[inline(always)]
    fn from(value: UnmapError<T>) -> Self {
        value.error
    }
}

impl Queue {
    /// Blocking map of `len` elements starting at element `offset`.
    pub fn enqueue_map<T: Scalar, const N: usize> (&self, buf: &Buffer<T, N>, flags: MapFlags, offset: usize, len: usize, wait: &[Event]) -> Result<MappedRegion<T>> {
        let (wait_len, wait) = wait_list(wait);
        let mut event : cl_event = core::ptr::null_mut();
        let mut err = 0;

        let ptr = unsafe {
            clEnqueueMapBuffer(self.0, buf.id(), CL_TRUE, flags.bits(), offset * size_of::<T>(), len * size_of::<T>(), wait_len, wait, &mut event, &mut err)
        };

        tri!(err);
        let ptr = match NonNull::new(ptr.cast::<T>()) {
            Some(ptr) => ptr,
            None => return Err(crate::error::Error::native(opencl_sys::CL_MAP_FAILURE, file!(), line!()))
        };

        tracing::trace!(offset, len, "mapped buffer region");
        Ok(MappedRegion { mem: **buf, ptr, len, event: Event(event) })
    }

    /// Releases a mapped region. Host access through it ends here.
    ///
    /// If the runtime rejects the command, the region comes back inside the [`UnmapError`].
    pub fn enqueue_unmap<T: Scalar> (&self, region: MappedRegion<T>, wait: &[Event]) -> Result<Event, UnmapError<T>> {
        let (wait_len, wait) = wait_list(wait);
        let mut event : cl_event = core::ptr::null_mut();

        let err = unsafe {
            clEnqueueUnmapMemObject(self.0, region.mem.0, region.ptr.as_ptr().cast(), wait_len, wait, &mut event)
        };

        if err != 0 {
            return Err(UnmapError { error: Error::native(err, file!(), line!()), region })
        }

        if let Err(e) = region.event.release() {
            tracing::warn!(%e, "failed to release map event");
        }

        Ok(Event(event))
    }
}
