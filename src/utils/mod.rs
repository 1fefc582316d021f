use opencl_sys::{cl_event, cl_uint};
use crate::event::Event;

flat_mod!(string);

/// Count and pointer for a native event wait list. An empty list is passed as null.
#[inline(always)]
pub(crate) fn wait_list (events: &[Event]) -> (cl_uint, *const cl_event) {
    match events.len() {
        0 => (0, core::ptr::null()),
        len => (len as cl_uint, events.as_ptr().cast())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_wait_list_is_null () {
        let (len, ptr) = wait_list(&[]);
        assert_eq!(len, 0);
        assert!(ptr.is_null());
    }

    #[test]
    fn wait_list_points_at_handles () {
        let events = unsafe { [Event::from_id(0x10 as _), Event::from_id(0x20 as _)] };
        let (len, ptr) = wait_list(&events);
        assert_eq!(len, 2);
        assert_eq!(unsafe { *ptr.add(1) }, 0x20 as cl_event);
    }
}
