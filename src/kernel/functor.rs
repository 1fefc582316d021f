use crate::prelude::{Event, Kernel, NdRange, Program, Queue, Result};
use super::KernelArg;

/// A kernel bound to a launch shape, invoked with a fresh argument list on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelFunctor {
    kernel: Kernel,
    global: NdRange,
    local: Option<NdRange>
}

impl KernelFunctor {
    #[inline(always)]
    pub fn new (kernel: Kernel, global: impl Into<NdRange>) -> Self {
        Self { kernel, global: global.into(), local: None }
    }

    /// Creates the kernel `name` from `program`.
    #[inline]
    pub fn from_program (program: &Program, name: &str, global: impl Into<NdRange>) -> Result<Self> {
        Kernel::new(program, name).map(|kernel| Self::new(kernel, global))
    }

    #[inline(always)]
    pub fn with_local (self, local: impl Into<NdRange>) -> Self {
        Self { local: Some(local.into()), ..self }
    }

    #[inline(always)]
    pub fn kernel (&self) -> &Kernel {
        &self.kernel
    }

    #[inline(always)]
    pub fn global (&self) -> NdRange {
        self.global
    }

    /// Binds `args` positionally and enqueues the kernel once `wait` has completed.
    pub fn call (&self, queue: &Queue, args: &[&dyn KernelArg], wait: &[Event]) -> Result<Event> {
        self.kernel.set_args(args)?;
        queue.enqueue_kernel_with(&self.kernel, None, self.global, self.local, wait)
    }

    /// Same as [`call`](Self::call) on the default queue.
    #[cfg(feature = "def")]
    #[inline(always)]
    pub fn call_default (&self, args: &[&dyn KernelArg], wait: &[Event]) -> Result<Event> {
        self.call(&Queue::get_default()?, args, wait)
    }
}
