use core::ops::Deref;
use opencl_sys::{cl_int, clCreateUserEvent, clSetUserEventStatus, CL_COMPLETE};
use crate::prelude::{Context, Result};
use super::Event;

/// Event whose status is controlled by the host. Commands waiting on it stay queued until it is
/// marked complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct UserEvent (Event);

impl UserEvent {
    pub fn new (ctx: &Context) -> Result<Self> {
        let mut err = 0;
        let id = unsafe {
            clCreateUserEvent(ctx.0, &mut err)
        };

        tri!(err);
        Ok(Self(Event(id)))
    }

    #[inline(always)]
    pub fn set_complete (&self) -> Result<()> {
        self.set_raw_status(CL_COMPLETE)
    }

    /// Terminates the event abnormally. `code` must be negative; commands waiting on it fail.
    #[inline(always)]
    pub fn set_error (&self, code: cl_int) -> Result<()> {
        debug_assert!(code < 0, "user event error status must be negative");
        self.set_raw_status(code)
    }

    #[inline]
    fn set_raw_status (&self, status: cl_int) -> Result<()> {
        unsafe { tri!(clSetUserEventStatus(self.0.0, status)) }
        Ok(())
    }

    #[inline(always)]
    pub fn as_event (&self) -> Event {
        self.0
    }
}

impl Deref for UserEvent {
    type Target = Event;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<UserEvent> for Event {
    #[inline(always)]
    fn from(value: UserEvent) -> Self {
        value.0
    }
}
