#![allow(dead_code)]

use ocl_lite::prelude::*;

pub const VEC_ADD : &str = "__kernel void vec_add (__global const float* a, __global const float* b, __global float* c) {
    int i = get_global_id(0);
    c[i] = a[i] + b[i];
}";

pub struct Env {
    pub device: Device,
    pub ctx: Context,
    pub queue: Queue
}

/// Fresh context and profiling queue on the first available device, or `None` without OpenCL.
pub fn env () -> Option<Env> {
    let platform = Platform::all().ok()?.into_iter().next()?;
    let device = platform.devices(DeviceType::ALL).ok()?.into_iter().next()?;
    let ctx = Context::from_device(device).ok()?;
    let queue = Queue::new(&ctx, &device, QueueProps::PROFILING_ENABLE).ok()?;
    Some(Env { device, ctx, queue })
}

pub fn built (env: &Env, source: &str) -> Program {
    let program = Program::from_source(&env.ctx, source).unwrap();
    program.build(&[env.device], "").unwrap();
    program
}
