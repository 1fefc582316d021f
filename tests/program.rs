use ocl_lite::{prelude::*, program::BinaryType};

mod common;

#[test]
fn vec_add_names () {
    let Some(env) = common::env() else { return };
    let program = common::built(&env, common::VEC_ADD);

    assert_eq!(program.build_status(&env.device).unwrap(), BuildStatus::Success);
    assert_eq!(program.num_kernels().unwrap(), 1);
    assert_eq!(program.kernel_names().unwrap(), vec!["vec_add"]);
    assert_eq!(program.context().unwrap(), env.ctx);
    assert_eq!(program.devices().unwrap(), vec![env.device]);
    assert_eq!(program.source().unwrap(), common::VEC_ADD);
    assert_eq!(program.binary_type(&env.device).unwrap(), BinaryType::Executable);
}

#[test]
fn binaries () {
    let Some(env) = common::env() else { return };
    let program = common::built(&env, common::VEC_ADD);

    let sizes = program.binary_sizes().unwrap();
    let bins = program.binaries().unwrap();
    assert_eq!(sizes.len(), 1);
    assert_eq!(bins[0].len(), sizes[0]);

    let reloaded = Program::from_binary(&env.ctx, &[env.device], &bins).unwrap();
    reloaded.build(&[env.device], "").unwrap();
    assert_eq!(reloaded.kernel_names().unwrap(), vec!["vec_add"]);
}

#[test]
fn several_sources () {
    let Some(env) = common::env() else { return };
    let program = Program::from_sources(&env.ctx, &["__kernel void one (__global int* x) { x[0] = 1; }\n", "__kernel void two (__global int* x) { x[0] = 2; }\n"]).unwrap();
    program.build(&[], "-cl-mad-enable").unwrap();

    let mut names = program.kernel_names().unwrap();
    names.sort();
    assert_eq!(names, vec!["one", "two"]);
    assert_eq!(program.build_options(&env.device).unwrap(), "-cl-mad-enable");
}

#[test]
fn invalid_source () {
    let Some(env) = common::env() else { return };
    let program = Program::from_source(&env.ctx, "__kernel void broken (__global int* x) { x[0] = ; }").unwrap();

    let err = program.build(&[env.device], "").unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::BuildProgramFailure));
    assert_eq!(program.build_status(&env.device).unwrap(), BuildStatus::Error);
    assert!(!program.build_log(&env.device).unwrap().is_empty());
}

#[test]
fn compile_and_link () {
    let Some(env) = common::env() else { return };
    let first = Program::from_source(&env.ctx, "__kernel void first (__global int* x) { x[0] = 1; }").unwrap();
    let second = Program::from_source(&env.ctx, "__kernel void second (__global int* x) { x[0] = 2; }").unwrap();

    first.compile(&[env.device], "", &[]).unwrap();
    second.compile(&[env.device], "", &[]).unwrap();
    assert_eq!(first.binary_type(&env.device).unwrap(), BinaryType::CompiledObject);

    let linked = Program::link(&env.ctx, &[env.device], "", &[first, second]).unwrap();
    let mut names = linked.kernel_names().unwrap();
    names.sort();
    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn failed_link_keeps_log () {
    let Some(env) = common::env() else { return };
    let object = Program::from_source(&env.ctx, "float missing (float x);
__kernel void caller (__global float* x) { x[0] = missing(x[0]); }").unwrap();
    object.compile(&[env.device], "", &[]).unwrap();

    let err = Program::link(&env.ctx, &[env.device], "", &[object]).unwrap_err();
    assert!(err.error.code().is_some());

    if let Some(program) = err.program {
        assert_eq!(program.build_status(&env.device).unwrap(), BuildStatus::Error);
        assert!(program.build_log(&env.device).is_ok());
        program.release().unwrap();
    }

    let plain : Error = Program::link(&env.ctx, &[env.device], "", &[object]).unwrap_err().into();
    assert!(plain.code().is_some());
}

#[test]
fn build_callback () {
    let Some(env) = common::env() else { return };
    let program = Program::from_source(&env.ctx, common::VEC_ADD).unwrap();
    let (send, recv) = std::sync::mpsc::channel();

    program.build_with_callback(&[env.device], "", move |prog| send.send(prog).unwrap()).unwrap();
    let done = recv.recv_timeout(std::time::Duration::from_secs(60)).unwrap();

    assert_eq!(done, program);
    assert_eq!(program.build_status(&env.device).unwrap(), BuildStatus::Success);
}

#[test]
fn reference_counting () {
    let Some(env) = common::env() else { return };
    let program = Program::from_source(&env.ctx, common::VEC_ADD).unwrap();

    assert_eq!(program.reference_count().unwrap(), 1);
    program.retain().unwrap();
    assert_eq!(program.reference_count().unwrap(), 2);
    program.release().unwrap();
    program.release().unwrap();
}
