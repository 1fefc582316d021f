use std::{path::PathBuf, process::ExitCode};
use anyhow::Context as _;
use clap::Parser;
use ocl_lite::{prelude::*, tools::{self, Target, ToolKind}};

/// Offline OpenCL linker
///
/// Library linking options (-create-library, -enable-link-options) and program linking options
/// (-cl-denorms-are-zero, -cl-no-signed-zeros, -cl-unsafe-math-optimizations,
/// -cl-finite-math-only, -cl-fast-relaxed-math) are forwarded to the OpenCL linker.
#[derive(Parser, Debug)]
#[command(name = "ocl-linker", version)]
struct Args {
    #[command(flatten)]
    target: Target,

    /// Output file
    #[arg(short, default_value = "a.out")]
    output: PathBuf,

    /// Compiled objects or libraries
    #[arg(required = true)]
    files: Vec<PathBuf>
}

fn main () -> ExitCode {
    tools::init_logging();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run () -> anyhow::Result<ExitCode> {
    let split = ToolKind::Linker.split_args(std::env::args())?;
    let args = Args::parse_from(&split.tool);

    let device = args.target.device()?;
    let ctx = Context::new(&[device])?;

    let mut objects = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let binary = tools::read_binary(file).with_context(|| format!("reading {}", file.display()))?;
        objects.push(Program::from_binary(&ctx, &[device], &[binary])?);
    }

    let program = match Program::link(&ctx, &[device], &split.native_options(), &objects) {
        Ok(program) => program,
        Err(LinkError { error, program: Some(program) }) => {
            let reported = tools::report_build_failure(&program, &device, None);
            program.release()?;

            return match reported? {
                true => Ok(ExitCode::FAILURE),
                false => Err(error.into())
            }
        },
        Err(e) => return Err(Error::from(e).into())
    };

    tools::write_binary(&args.output, &program)?;
    Ok(ExitCode::SUCCESS)
}
