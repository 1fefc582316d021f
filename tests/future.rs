#![cfg(feature = "async")]

use ocl_lite::prelude::*;

mod common;

#[tokio::test]
async fn await_user_event () {
    let Some(env) = common::env() else { return };
    let gate = UserEvent::new(&env.ctx).unwrap();
    let buf = Buffer::<i32>::from_slice(&env.ctx, 3, MemFlags::READ_WRITE, &[0; 3]).unwrap();

    let fill = env.queue.enqueue_fill(&buf, 42, 0, 3, &[*gate]).unwrap();
    let done = fill.completion().unwrap();
    env.queue.flush().unwrap();

    gate.set_complete().unwrap();
    done.await.unwrap();

    assert_eq!(env.queue.read_to_vec(&buf, &[]).unwrap(), vec![42; 3]);
}

#[tokio::test]
async fn await_failed_event () {
    let Some(env) = common::env() else { return };
    let gate = UserEvent::new(&env.ctx).unwrap();
    let done = gate.as_event().completion().unwrap();

    gate.set_error(-5).unwrap();
    assert!(done.await.is_err());
}
