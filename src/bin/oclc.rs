use std::{path::PathBuf, process::ExitCode};
use anyhow::Context as _;
use clap::Parser;
use ocl_lite::{prelude::*, tools::{self, Target, ToolKind}};

/// Checks that OpenCL C sources compile, without writing any output
#[derive(Parser, Debug)]
#[command(name = "oclc", version)]
struct Args {
    /// Only compile, do not link
    #[arg(short = 'c')]
    compile: bool,

    #[command(flatten)]
    target: Target,

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

    for file in &args.files {
        let source = tools::read_source(file).with_context(|| format!("reading {}", file.display()))?;
        let program = Program::from_source(&ctx, &source)?;

        let result = match args.compile {
            true => program.compile(&[device], &options, &[]),
            false => program.build(&[device], &options)
        };

        if let Err(e) = result {
            if tools::report_build_failure(&program, &device, Some(file))? {
                return Ok(ExitCode::FAILURE)
            }
            return Err(e.into())
        }

        tracing::info!(file = %file.display(), "ok");
    }

    Ok(ExitCode::SUCCESS)
}
