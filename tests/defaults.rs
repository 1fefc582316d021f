#![cfg(feature = "def")]

use std::thread;
use ocl_lite::prelude::*;

mod common;

fn from_threads<T: 'static + Send + PartialEq + core::fmt::Debug> (f: fn() -> Result<T>) -> Vec<T> {
    let handles = (0..8).map(|_| thread::spawn(move || f())).collect::<Vec<_>>();
    handles.into_iter().map(|x| x.join().unwrap().unwrap()).collect()
}

#[test]
fn defaults_are_shared () {
    if common::env().is_none() || Device::get_default().is_err() {
        return
    }

    let queues = from_threads(Queue::get_default);
    let contexts = from_threads(Context::get_default);

    assert!(queues.iter().all(|x| *x == queues[0]));
    assert!(contexts.iter().all(|x| *x == contexts[0]));
    assert_eq!(queues[0].context().unwrap(), contexts[0]);
    assert_eq!(Platform::get_default().unwrap(), Device::get_default().unwrap().platform().unwrap());
}

#[test]
fn default_helpers () {
    if common::env().is_none() || Device::get_default().is_err() {
        return
    }

    let program = Program::from_source_default(common::VEC_ADD).unwrap();
    program.build(&[], "").unwrap();

    let queue = Queue::get_default().unwrap();
    let a = Buffer::<f32>::new_default(4, MemFlags::READ_ONLY).unwrap();
    let c = Buffer::<f32>::new_default(4, MemFlags::WRITE_ONLY).unwrap();
    let write = queue.enqueue_write(&a, 0, &[1.0, 2.0, 3.0, 4.0], &[]).unwrap();

    let add = KernelFunctor::from_program(&program, "vec_add", 4).unwrap();
    let run = add.call_default(&[&a, &a, &c], &[write]).unwrap();

    let result = queue.read_to_vec(&c, &[run]).unwrap();
    assert_eq!(result, vec![2.0, 4.0, 6.0, 8.0]);
}
