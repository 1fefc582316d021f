use crate::error::{Error, Result};

/// Offline tool whose native option allow-list applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Compiler,
    Linker
}

const COMPILER_OPTIONS : &[&str] = &[
    // math intrinsics
    "-cl-single-precision-constant",
    "-cl-denorms-are-zero",
    "-cl-fp32-correctly-rounded-divide-sqrt",
    // optimization
    "-cl-opt-disable",
    "-cl-mad-enable",
    "-cl-no-signed-zeros",
    "-cl-unsafe-math-optimizations",
    "-cl-finite-math-only",
    "-cl-fast-relaxed-math",
    // warnings
    "-w",
    "-Werror"
];

const LINKER_OPTIONS : &[&str] = &[
    "-create-library",
    "-enable-link-options",
    "-cl-denorms-are-zero",
    "-cl-no-signed-zeros",
    "-cl-unsafe-math-optimizations",
    "-cl-finite-math-only",
    "-cl-fast-relaxed-math"
];

/// Tool flags that consume the following token.
const VALUE_FLAGS : &[&str] = &["-p", "--platform", "-d", "--device", "-o"];
const SWITCHES : &[&str] = &["-h", "--help", "-V", "--version"];

/// Command line separated into what `clap` parses and what is handed to the OpenCL compiler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitArgs {
    /// Program name, tool flags and input files.
    pub tool: Vec<String>,
    /// Native compiler or linker options, in command line order.
    pub native: Vec<String>
}

impl SplitArgs {
    /// Native options as the single string `clBuildProgram` and friends expect.
    #[inline]
    pub fn native_options (&self) -> String {
        crate::utils::join(" ", &self.native)
    }
}

impl ToolKind {
    #[inline]
    fn is_native (&self, arg: &str) -> bool {
        match self {
            Self::Compiler => COMPILER_OPTIONS.contains(&arg) || arg.starts_with("-cl-std="),
            Self::Linker => LINKER_OPTIONS.contains(&arg)
        }
    }

    #[inline]
    fn is_switch (&self, arg: &str) -> bool {
        SWITCHES.contains(&arg) || (*self == Self::Compiler && arg == "-c")
    }

    /// Separates native options from tool arguments. The first item is the program name.
    pub fn split_args<I: IntoIterator<Item = String>> (&self, args: I) -> Result<SplitArgs> {
        let mut args = args.into_iter();
        let mut result = SplitArgs::default();
        result.tool.extend(args.next());

        while let Some(arg) = args.next() {
            if VALUE_FLAGS.contains(&arg.as_str()) {
                let value = args.next().ok_or_else(missing_argument)?;
                result.tool.push(arg);
                result.tool.push(value);
            } else if self.is_switch(&arg) || arg.starts_with("--platform=") || arg.starts_with("--device=") {
                result.tool.push(arg);
            } else if *self == Self::Compiler && (arg.starts_with("-D") || arg.starts_with("-I")) {
                let (flag, attached) = arg.split_at(2);
                let value = match attached {
                    "" => args.next().ok_or_else(missing_argument)?,
                    other => other.to_string()
                };

                result.native.push(flag.to_string());
                result.native.push(value);
            } else if self.is_native(&arg) {
                result.native.push(arg);
            } else if arg.starts_with('-') {
                return Err(Error::Option(format!("Unrecognized option '{arg}'")));
            } else {
                result.tool.push(arg);
            }
        }

        Ok(result)
    }
}

#[inline(always)]
fn missing_argument () -> Error {
    Error::Option(String::from("Missing argument"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args (s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn compiler_split () {
        let split = ToolKind::Compiler.split_args(args("ocl-compiler -c -p pocl -D N=4 -Iinclude -cl-std=CL1.2 -cl-mad-enable a.cl b.cl")).unwrap();
        assert_eq!(split.tool, args("ocl-compiler -c -p pocl a.cl b.cl"));
        assert_eq!(split.native, args("-D N=4 -I include -cl-std=CL1.2 -cl-mad-enable"));
        assert_eq!(split.native_options(), "-D N=4 -I include -cl-std=CL1.2 -cl-mad-enable");
    }

    #[test]
    fn linker_split () {
        let split = ToolKind::Linker.split_args(args("ocl-linker -create-library -o lib.bin a.o b.o")).unwrap();
        assert_eq!(split.tool, args("ocl-linker -o lib.bin a.o b.o"));
        assert_eq!(split.native, args("-create-library"));
    }

    #[test]
    fn unrecognized () {
        let err = ToolKind::Linker.split_args(args("ocl-linker -c a.o")).unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized option '-c'");

        let err = ToolKind::Compiler.split_args(args("ocl-compiler -cl-bogus a.cl")).unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized option '-cl-bogus'");

        assert!(ToolKind::Linker.split_args(args("ocl-linker -D X a.o")).is_err());
    }

    #[test]
    fn missing () {
        let err = ToolKind::Compiler.split_args(args("ocl-compiler a.cl -D")).unwrap_err();
        assert_eq!(err.to_string(), "Missing argument");

        let err = ToolKind::Linker.split_args(args("ocl-linker a.o -o")).unwrap_err();
        assert_eq!(err.to_string(), "Missing argument");
    }

    #[test]
    fn empty () {
        let split = ToolKind::Compiler.split_args(Vec::new()).unwrap();
        assert!(split.tool.is_empty());
        assert_eq!(split.native_options(), "");
    }
}
