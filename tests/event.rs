use ocl_lite::{prelude::*, event::wait_for_events};

mod common;

#[test]
fn nonblocking_chain () {
    let Some(env) = common::env() else { return };
    let buf = Buffer::<i32>::new(&env.ctx, 4, MemFlags::READ_WRITE).unwrap();
    let src = [7, 8, 9, 10];
    let mut dst = [0; 4];

    unsafe {
        let e1 = env.queue.enqueue_write_nonblocking(&buf, 0, &src, &[]).unwrap();
        let e2 = env.queue.enqueue_read_nonblocking(&buf, 0, &mut dst, &[e1]).unwrap();
        e2.wait().unwrap();

        assert_eq!(e2.command_execution_status().unwrap(), EventStatus::Complete);
        assert_eq!(e2.command_type().unwrap(), CommandType::ReadBuffer);
        assert_eq!(e1.command_queue().unwrap(), env.queue);
        assert_eq!(e1.context().unwrap(), env.ctx);
    }

    assert_eq!(dst, src);
}

#[test]
fn marker_and_barrier () {
    let Some(env) = common::env() else { return };
    let buf = Buffer::<u8>::new(&env.ctx, 16, MemFlags::READ_WRITE).unwrap();

    let fill = env.queue.enqueue_fill(&buf, 3u8, 0, 16, &[]).unwrap();
    let marker = env.queue.enqueue_marker(&[fill]).unwrap();
    let barrier = env.queue.enqueue_barrier(&[]).unwrap();

    wait_for_events(&[marker, barrier]).unwrap();
    assert_eq!(fill.command_execution_status().unwrap(), EventStatus::Complete);
    assert_eq!(marker.command_type().unwrap(), CommandType::Marker);
    assert_eq!(env.queue.read_to_vec(&buf, &[]).unwrap(), vec![3; 16]);
}

#[test]
fn user_event_gates_read () {
    let Some(env) = common::env() else { return };
    let buf = Buffer::<i32>::from_slice(&env.ctx, 2, MemFlags::READ_WRITE, &[5, 6]).unwrap();
    let gate = UserEvent::new(&env.ctx).unwrap();
    let mut dst = [0; 2];

    let read = unsafe { env.queue.enqueue_read_nonblocking(&buf, 0, &mut dst, &[*gate]).unwrap() };
    env.queue.flush().unwrap();
    assert_ne!(read.command_execution_status().unwrap(), EventStatus::Complete);

    gate.set_complete().unwrap();
    read.wait().unwrap();
    assert_eq!(dst, [5, 6]);
}

#[test]
fn profiling_is_ordered () {
    let Some(env) = common::env() else { return };
    let buf = Buffer::<f32>::new(&env.ctx, 1024, MemFlags::READ_WRITE).unwrap();

    let fill = env.queue.enqueue_fill(&buf, 1.0, 0, 1024, &[]).unwrap();
    fill.wait().unwrap();

    let info = fill.profiling().unwrap();
    assert!(info.queued <= info.submit);
    assert!(info.submit <= info.start);
    assert!(info.start <= info.end);
}

#[test]
fn completion_callback () {
    let Some(env) = common::env() else { return };
    let gate = UserEvent::new(&env.ctx).unwrap();
    let (send, recv) = std::sync::mpsc::channel();

    gate.on_complete(move |status| send.send(status).unwrap()).unwrap();
    gate.set_complete().unwrap();

    let status = recv.recv_timeout(std::time::Duration::from_secs(5)).unwrap();
    assert_eq!(status, EventStatus::Complete);
}

#[test]
fn empty_wait_list () {
    wait_for_events(&[]).unwrap();
}
