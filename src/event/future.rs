use core::{pin::Pin, task::{Context, Poll}};
use std::sync::Arc;
use futures::{Future, task::AtomicWaker};
use parking_lot::Mutex;
use crate::prelude::{Result, Error};
use super::{Event, EventStatus};

#[derive(Default)]
struct Shared {
    waker: AtomicWaker,
    status: Mutex<Option<EventStatus>>
}

/// Future that resolves once an [`Event`] reaches a terminal state.
pub struct EventFuture {
    event: Event,
    shared: Arc<Shared>
}

impl Event {
    /// Registers a completion callback and returns a future tracking it.
    pub fn completion (self) -> Result<EventFuture> {
        let shared = Arc::new(Shared::default());
        let notify = shared.clone();

        self.on_complete(move |status| {
            *notify.status.lock() = Some(status);
            notify.waker.wake();
        })?;

        Ok(EventFuture { event: self, shared })
    }
}

impl EventFuture {
    #[inline(always)]
    pub fn event (&self) -> Event {
        self.event
    }
}

impl Future for EventFuture {
    type Output = Result<()>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.shared.waker.register(cx.waker());

        match *self.shared.status.lock() {
            Some(EventStatus::Error(code)) => Poll::Ready(Err(Error::native(code, file!(), line!()))),
            Some(_) => Poll::Ready(Ok(())),
            None => Poll::Pending
        }
    }
}
