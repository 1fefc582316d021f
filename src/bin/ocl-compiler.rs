use std::{path::{Path, PathBuf}, process::ExitCode};
use anyhow::Context as _;
use clap::Parser;
use ocl_lite::{prelude::*, tools::{self, Target, ToolKind}};

/// Offline OpenCL compiler
///
/// Every option the OpenCL C compiler accepts (-D, -I, -cl-*, -w, -Werror) is forwarded to it.
#[derive(Parser, Debug)]
#[command(name = "ocl-compiler", version)]
struct Args {
    /// Compile each file into an object (<name>.o) instead of building an executable
    #[arg(short = 'c')]
    compile: bool,

    #[command(flatten)]
    target: Target,

    /// Output file of a build
    #[arg(short, default_value = "a.out")]
    output: PathBuf,

    /// OpenCL C sources
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
    let split = ToolKind::Compiler.split_args(std::env::args())?;
    let args = Args::parse_from(&split.tool);
    let options = split.native_options();

    let device = args.target.device()?;
    let ctx = Context::new(&[device])?;

    if args.compile {
        for file in &args.files {
            if !compile_file(&ctx, &device, file, &tools::object_file_name(file), &options)? {
                return Ok(ExitCode::FAILURE)
            }
        }

        return Ok(ExitCode::SUCCESS)
    }

    if args.files.len() > 1 {
        tracing::warn!(ignored = args.files.len() - 1, "only the first file is built");
    }

    let file = &args.files[0];
    let program = Program::from_source(&ctx, &tools::read_source(file).with_context(|| format!("reading {}", file.display()))?)?;

    if let Err(e) = program.build(&[device], &options) {
        return failure(&program, &device, file, e)
    }

    tools::write_binary(&args.output, &program)?;
    Ok(ExitCode::SUCCESS)
}

/// Returns `false` after reporting a failed compilation.
fn compile_file (ctx: &Context, device: &Device, input: &Path, output: &Path, options: &str) -> anyhow::Result<bool> {
    let source = tools::read_source(input).with_context(|| format!("reading {}", input.display()))?;
    let program = Program::from_source(ctx, &source)?;

    if let Err(e) = program.compile(&[*device], options, &[]) {
        return failure(&program, device, input, e).map(|_| false)
    }

    tools::write_binary(output, &program)?;
    Ok(true)
}

fn failure (program: &Program, device: &Device, file: &Path, e: Error) -> anyhow::Result<ExitCode> {
    match tools::report_build_failure(program, device, Some(file))? {
        true => Ok(ExitCode::FAILURE),
        false => Err(e.into())
    }
}
