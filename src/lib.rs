macro_rules! flat_mod {
    ($($i:ident),+) => {
        $(
            mod $i;
            pub use $i::*;
        )+
    }
}

/// Checks the status returned by a native call, returning [`Error::Native`](crate::error::Error::Native) on failure.
macro_rules! tri {
    ($i:expr) => {
        match $i {
            0 => {},
            code => return Err(crate::error::Error::native(code, file!(), line!()))
        }
    };
}

pub mod prelude {
    pub use crate::error::{Error, ErrorCode, Result};
    pub use crate::platform::Platform;
    pub use crate::device::{Device, DeviceType};
    pub use crate::context::Context;
    pub use crate::queue::{Queue, QueueProps};
    pub use crate::program::{Program, BuildStatus, LinkError};
    pub use crate::event::{Event, UserEvent, EventStatus, CommandType};
    pub use crate::buffer::{Memory, Buffer, MemFlags, MapFlags, Scalar};
    pub use crate::kernel::{Kernel, KernelArg, KernelFunctor, LocalArg};
    pub use crate::range::{Range, NdRange};
    pub use crate::template::{Template, Params};

    cfg_if::cfg_if! {
        if #[cfg(feature = "async")] {
            pub use crate::event::EventFuture;
        }
    }
}

pub mod error;
pub mod info;
pub mod platform;
pub mod device;
pub mod context;
pub mod range;
pub mod buffer;
pub mod event;
pub mod queue;
pub mod program;
pub mod kernel;
pub mod template;
pub mod utils;

#[cfg(feature = "cli")]
pub mod tools;
