use core::ffi::c_void;
use opencl_sys::{cl_event, cl_event_info, cl_profiling_info, cl_int, cl_uint, cl_ulong, cl_command_type, clGetEventInfo, clGetEventProfilingInfo, clRetainEvent, clReleaseEvent, clWaitForEvents, clSetEventCallback, CL_EVENT_COMMAND_QUEUE, CL_EVENT_CONTEXT, CL_EVENT_COMMAND_TYPE, CL_EVENT_COMMAND_EXECUTION_STATUS, CL_EVENT_REFERENCE_COUNT, CL_PROFILING_COMMAND_QUEUED, CL_PROFILING_COMMAND_SUBMIT, CL_PROFILING_COMMAND_START, CL_PROFILING_COMMAND_END, CL_COMPLETE, CL_RUNNING, CL_SUBMITTED, CL_QUEUED, CL_COMMAND_NDRANGE_KERNEL, CL_COMMAND_TASK, CL_COMMAND_NATIVE_KERNEL, CL_COMMAND_READ_BUFFER, CL_COMMAND_WRITE_BUFFER, CL_COMMAND_COPY_BUFFER, CL_COMMAND_READ_IMAGE, CL_COMMAND_WRITE_IMAGE, CL_COMMAND_COPY_IMAGE, CL_COMMAND_COPY_IMAGE_TO_BUFFER, CL_COMMAND_COPY_BUFFER_TO_IMAGE, CL_COMMAND_MAP_BUFFER, CL_COMMAND_MAP_IMAGE, CL_COMMAND_UNMAP_MEM_OBJECT, CL_COMMAND_MARKER, CL_COMMAND_READ_BUFFER_RECT, CL_COMMAND_WRITE_BUFFER_RECT, CL_COMMAND_COPY_BUFFER_RECT, CL_COMMAND_USER, CL_COMMAND_BARRIER, CL_COMMAND_MIGRATE_MEM_OBJECTS, CL_COMMAND_FILL_BUFFER, CL_COMMAND_FILL_IMAGE};
use crate::{prelude::{Result, Queue, Context}, info::{InfoSource, RawInfo}};

flat_mod!(user);
#[cfg(feature = "async")]
flat_mod!(future);

/// Handle to a command submitted to a queue (or a [`UserEvent`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Event (pub(crate) cl_event);

impl Event {
    #[inline(always)]
    pub const fn id (&self) -> cl_event {
        self.0
    }

    /// Wraps a raw event.
    /// # Safety
    /// `id` must be a valid event. No reference is taken.
    #[inline(always)]
    pub const unsafe fn from_id (id: cl_event) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub fn retain (&self) -> Result<()> {
        unsafe { tri!(clRetainEvent(self.0)) }
        Ok(())
    }

    #[inline(always)]
    pub fn release (&self) -> Result<()> {
        unsafe { tri!(clReleaseEvent(self.0)) }
        Ok(())
    }

    /// Queue the command was submitted to. User events have no queue and return a null one.
    #[inline(always)]
    pub fn command_queue (&self) -> Result<Queue> {
        self.get_info(CL_EVENT_COMMAND_QUEUE)
    }

    #[inline(always)]
    pub fn context (&self) -> Result<Context> {
        self.get_info(CL_EVENT_CONTEXT)
    }

    #[inline(always)]
    pub fn command_type (&self) -> Result<CommandType> {
        self.get_info(CL_EVENT_COMMAND_TYPE).map(CommandType::from_raw)
    }

    #[inline(always)]
    pub fn command_execution_status (&self) -> Result<EventStatus> {
        self.get_info(CL_EVENT_COMMAND_EXECUTION_STATUS).map(EventStatus::from_raw)
    }

    /// Stale as soon as it's returned. Only useful for debugging.
    #[inline(always)]
    pub fn reference_count (&self) -> Result<cl_uint> {
        self.get_info(CL_EVENT_REFERENCE_COUNT)
    }

    /// Blocks until the command reaches a terminal state.
    #[inline(always)]
    pub fn wait (&self) -> Result<()> {
        unsafe { tri!(clWaitForEvents(1, &self.0)) }
        Ok(())
    }

    /// Device time, in nanoseconds, at which the command was enqueued. Requires a profiling queue.
    #[inline(always)]
    pub fn profiling_queued (&self) -> Result<cl_ulong> {
        EventProfiling(self.0).get_info(CL_PROFILING_COMMAND_QUEUED)
    }

    #[inline(always)]
    pub fn profiling_submit (&self) -> Result<cl_ulong> {
        EventProfiling(self.0).get_info(CL_PROFILING_COMMAND_SUBMIT)
    }

    #[inline(always)]
    pub fn profiling_start (&self) -> Result<cl_ulong> {
        EventProfiling(self.0).get_info(CL_PROFILING_COMMAND_START)
    }

    #[inline(always)]
    pub fn profiling_end (&self) -> Result<cl_ulong> {
        EventProfiling(self.0).get_info(CL_PROFILING_COMMAND_END)
    }

    /// All four profiling timestamps of a finished command.
    pub fn profiling (&self) -> Result<ProfilingInfo> {
        Ok(ProfilingInfo {
            queued: self.profiling_queued()?,
            submit: self.profiling_submit()?,
            start: self.profiling_start()?,
            end: self.profiling_end()?
        })
    }

    /// Registers `f` to run on a runtime thread once the command completes or fails.
    pub fn on_complete<F: 'static + Send + FnOnce(EventStatus)> (&self, f: F) -> Result<()> {
        let data = Box::into_raw(Box::new(f));
        let err = unsafe {
            clSetEventCallback(self.0, CL_COMPLETE, Some(complete_callback::<F>), data.cast())
        };

        if err != 0 {
            drop(unsafe { Box::from_raw(data) });
        }

        tri!(err);
        Ok(())
    }
}

extern "C" fn complete_callback<F: FnOnce(EventStatus)> (_event: cl_event, status: cl_int, data: *mut c_void) {
    let f = unsafe { Box::from_raw(data as *mut F) };
    f(EventStatus::from_raw(status))
}

impl InfoSource for Event {
    type Param = cl_event_info;

    #[inline(always)]
    unsafe fn raw_info (&self, param: cl_event_info, size: usize, value: *mut c_void, size_ret: *mut usize) -> cl_int {
        clGetEventInfo(self.0, param, size, value, size_ret)
    }
}

struct EventProfiling (cl_event);

impl InfoSource for EventProfiling {
    type Param = cl_profiling_info;

    #[inline(always)]
    unsafe fn raw_info (&self, param: cl_profiling_info, size: usize, value: *mut c_void, size_ret: *mut usize) -> cl_int {
        clGetEventProfilingInfo(self.0, param, size, value, size_ret)
    }
}

unsafe impl RawInfo for Event {}
unsafe impl Send for Event {}
unsafe impl Sync for Event {}

/// Blocks until `event` completes.
#[inline(always)]
pub fn wait_for_event (event: &Event) -> Result<()> {
    event.wait()
}

/// Blocks until every event in `events` completes. An empty list returns immediately.
pub fn wait_for_events (events: &[Event]) -> Result<()> {
    if events.is_empty() {
        return Ok(());
    }

    unsafe {
        tri!(clWaitForEvents(events.len() as cl_uint, events.as_ptr().cast()));
    }

    Ok(())
}

/// Device timestamps of a command, in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfilingInfo {
    pub queued: cl_ulong,
    pub submit: cl_ulong,
    pub start: cl_ulong,
    pub end: cl_ulong
}

impl ProfilingInfo {
    /// Execution time on the device.
    #[inline(always)]
    pub fn duration (&self) -> core::time::Duration {
        core::time::Duration::from_nanos(self.end.saturating_sub(self.start))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStatus {
    Complete,
    Running,
    Submitted,
    Queued,
    /// The command terminated abnormally with the given (negative) status.
    Error(cl_int)
}

impl EventStatus {
    pub const fn from_raw (status: cl_int) -> Self {
        match status {
            CL_COMPLETE => Self::Complete,
            CL_RUNNING => Self::Running,
            CL_SUBMITTED => Self::Submitted,
            CL_QUEUED => Self::Queued,
            other => Self::Error(other)
        }
    }

    #[inline(always)]
    pub const fn is_terminal (&self) -> bool {
        matches!(self, Self::Complete | Self::Error(_))
    }
}

macro_rules! command_types {
    ($($name:ident = $raw:ident),+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum CommandType {
            $($name,)+
            Other(cl_command_type)
        }

        impl CommandType {
            pub const fn from_raw (raw: cl_command_type) -> Self {
                match raw {
                    $($raw => Self::$name,)+
                    other => Self::Other(other)
                }
            }
        }
    };
}

command_types! {
    NdRangeKernel = CL_COMMAND_NDRANGE_KERNEL,
    Task = CL_COMMAND_TASK,
    NativeKernel = CL_COMMAND_NATIVE_KERNEL,
    ReadBuffer = CL_COMMAND_READ_BUFFER,
    WriteBuffer = CL_COMMAND_WRITE_BUFFER,
    CopyBuffer = CL_COMMAND_COPY_BUFFER,
    ReadImage = CL_COMMAND_READ_IMAGE,
    WriteImage = CL_COMMAND_WRITE_IMAGE,
    CopyImage = CL_COMMAND_COPY_IMAGE,
    CopyImageToBuffer = CL_COMMAND_COPY_IMAGE_TO_BUFFER,
    CopyBufferToImage = CL_COMMAND_COPY_BUFFER_TO_IMAGE,
    MapBuffer = CL_COMMAND_MAP_BUFFER,
    MapImage = CL_COMMAND_MAP_IMAGE,
    UnmapMemObject = CL_COMMAND_UNMAP_MEM_OBJECT,
    Marker = CL_COMMAND_MARKER,
    ReadBufferRect = CL_COMMAND_READ_BUFFER_RECT,
    WriteBufferRect = CL_COMMAND_WRITE_BUFFER_RECT,
    CopyBufferRect = CL_COMMAND_COPY_BUFFER_RECT,
    User = CL_COMMAND_USER,
    Barrier = CL_COMMAND_BARRIER,
    MigrateMemObjects = CL_COMMAND_MIGRATE_MEM_OBJECTS,
    FillBuffer = CL_COMMAND_FILL_BUFFER,
    FillImage = CL_COMMAND_FILL_IMAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_directly () {
        assert_eq!(EventStatus::from_raw(0), EventStatus::Complete);
        assert_eq!(EventStatus::from_raw(1), EventStatus::Running);
        assert_eq!(EventStatus::from_raw(2), EventStatus::Submitted);
        assert_eq!(EventStatus::from_raw(3), EventStatus::Queued);
        assert_eq!(EventStatus::from_raw(-5), EventStatus::Error(-5));
        assert!(EventStatus::Complete.is_terminal());
        assert!(!EventStatus::Queued.is_terminal());
    }

    #[test]
    fn command_types () {
        assert_eq!(CommandType::from_raw(CL_COMMAND_FILL_BUFFER), CommandType::FillBuffer);
        assert_eq!(CommandType::from_raw(0x9999), CommandType::Other(0x9999));
    }

    #[test]
    fn empty_wait_is_noop () {
        assert!(wait_for_events(&[]).is_ok());
    }

    #[test]
    fn profiling_duration () {
        let info = ProfilingInfo { queued: 1, submit: 2, start: 10, end: 1_000_010 };
        assert_eq!(info.duration(), core::time::Duration::from_millis(1));
    }
}
