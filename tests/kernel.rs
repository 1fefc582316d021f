use ocl_lite::{prelude::*, template::Params};

mod common;

#[test]
fn vec_add () {
    let Some(env) = common::env() else { return };
    let program = common::built(&env, common::VEC_ADD);
    let kernel = Kernel::new(&program, "vec_add").unwrap();

    let a = (1..=10).map(|x| x as f32).collect::<Vec<_>>();
    let b = (91..=100).rev().map(|x| x as f32).collect::<Vec<_>>();

    let buf_a = Buffer::<f32>::from_slice(&env.ctx, 10, MemFlags::READ_ONLY, &a).unwrap();
    let buf_b = Buffer::<f32>::from_slice(&env.ctx, 10, MemFlags::READ_ONLY, &b).unwrap();
    let buf_c = Buffer::<f32>::new(&env.ctx, 10, MemFlags::WRITE_ONLY).unwrap();

    kernel.set_args(&[&buf_a, &buf_b, &buf_c]).unwrap();
    let run = env.queue.enqueue_kernel(&kernel, 10, &[]).unwrap();

    let c = env.queue.read_to_vec(&buf_c, &[run]).unwrap();
    assert!(c.iter().all(|x| *x == 101.0), "{c:?}");
}

#[test]
fn kernel_info () {
    let Some(env) = common::env() else { return };
    let program = common::built(&env, common::VEC_ADD);
    let kernel = Kernel::new(&program, "vec_add").unwrap();

    assert_eq!(kernel.function_name().unwrap(), "vec_add");
    assert_eq!(kernel.num_args().unwrap(), 3);
    assert_eq!(kernel.program().unwrap(), program);
    assert_eq!(kernel.context().unwrap(), env.ctx);
    assert!(kernel.work_group_size(&env.device).unwrap() >= 1);
    assert_eq!(kernel.reference_count().unwrap(), 1);
}

#[test]
fn unknown_kernel () {
    let Some(env) = common::env() else { return };
    let program = common::built(&env, common::VEC_ADD);

    let err = Kernel::new(&program, "vec_sub").unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::InvalidKernelName));
}

#[test]
fn create_all () {
    let Some(env) = common::env() else { return };
    let program = common::built(&env, common::VEC_ADD);

    let kernels = Kernel::create_all(&program).unwrap();
    assert_eq!(kernels.len(), 1);
    assert_eq!(kernels[0].function_name().unwrap(), "vec_add");
}

#[test]
fn arg_info () {
    let Some(env) = common::env() else { return };
    let program = Program::from_source(&env.ctx, common::VEC_ADD).unwrap();
    program.build(&[env.device], "-cl-kernel-arg-info").unwrap();
    let kernel = Kernel::new(&program, "vec_add").unwrap();

    assert_eq!(kernel.arg_name(2).unwrap(), "c");
    assert_eq!(kernel.arg_address_qualifier(0).unwrap(), ocl_lite::kernel::AddrQualifier::Global);
    assert!(kernel.arg_type_name(0).unwrap().starts_with("float"));
}

#[test]
fn templated_scale_functor () {
    let Some(env) = common::env() else { return };

    let mut params = Params::new();
    params.set("type", <i32 as Scalar>::NAME);
    let source = Template::build("__kernel void scale (__global {{ type }}* x, const {{ type }} k, __local {{ type }}* tmp) {
        int i = get_global_id(0);
        tmp[get_local_id(0)] = x[i] * k;
        x[i] = tmp[get_local_id(0)];
    }", &params).unwrap();

    let program = common::built(&env, &source);
    let scale = KernelFunctor::from_program(&program, "scale", 8).unwrap().with_local(1);
    let buf = Buffer::<i32>::from_slice(&env.ctx, 8, MemFlags::READ_WRITE, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();

    let first = scale.call(&env.queue, &[&buf, &2i32, &LocalArg::new::<i32>(1)], &[]).unwrap();
    let second = scale.call(&env.queue, &[&buf, &3i32, &LocalArg::new::<i32>(1)], &[first]).unwrap();

    assert_eq!(env.queue.read_to_vec(&buf, &[second]).unwrap(), vec![6, 12, 18, 24, 30, 36, 42, 48]);
}

#[test]
fn sticky_args () {
    let Some(env) = common::env() else { return };
    let program = common::built(&env, "__kernel void inc (__global int* x) { x[get_global_id(0)] += 1; }");
    let kernel = Kernel::new(&program, "inc").unwrap();
    let buf = Buffer::<i32>::from_slice(&env.ctx, 4, MemFlags::READ_WRITE, &[0; 4]).unwrap();

    kernel.set_arg(0, &buf).unwrap();
    let first = env.queue.enqueue_kernel(&kernel, [4], &[]).unwrap();
    let second = env.queue.enqueue_kernel(&kernel, [4], &[first]).unwrap();

    assert_eq!(env.queue.read_to_vec(&buf, &[second]).unwrap(), vec![2; 4]);
}

fn bound_vec_add (env: &common::Env) -> (Kernel, Buffer<f32>) {
    let program = common::built(env, common::VEC_ADD);
    let kernel = Kernel::new(&program, "vec_add").unwrap();

    let input = Buffer::<f32>::from_slice(&env.ctx, 10, MemFlags::READ_ONLY, &[1.0; 10]).unwrap();
    let output = Buffer::<f32>::new(&env.ctx, 10, MemFlags::READ_WRITE).unwrap();
    kernel.set_args(&[&input, &input, &output]).unwrap();
    (kernel, output)
}

#[test]
fn wrong_dimensions () {
    let Some(env) = common::env() else { return };
    let (kernel, _) = bound_vec_add(&env);

    let err = env.queue.enqueue_kernel_with(&kernel, None, NdRange::empty(), None, &[]).unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::InvalidWorkDimension));

    let err = env.queue.enqueue_kernel_with(&kernel, None, NdRange::new1(10), Some(NdRange::new2(1, 1)), &[]).unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::InvalidWorkDimension));

    let err = env.queue.enqueue_kernel_with(&kernel, Some(NdRange::new2(1, 0)), NdRange::new1(10), None, &[]).unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::InvalidWorkDimension));
}

#[test]
fn global_offset () {
    let Some(env) = common::env() else { return };
    let (kernel, output) = bound_vec_add(&env);

    let zero = env.queue.enqueue_fill(&output, 0.0f32, 0, 10, &[]).unwrap();
    let run = env.queue.enqueue_kernel_with(&kernel, Some(NdRange::new1(6)), NdRange::new1(4), None, &[zero]).unwrap();
    let result = env.queue.read_to_vec(&output, &[run]).unwrap();

    assert_eq!(result, vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 2.0, 2.0, 2.0]);
}
