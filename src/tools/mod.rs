//! Shared plumbing for the offline tools: target selection, option splitting, logging and output.

use std::path::{Path, PathBuf};
use crate::{prelude::{Device, DeviceType, Error, Platform, Program, Result, BuildStatus}};

flat_mod!(options);

/// Short platform names accepted by `--platform`, with the name the driver reports.
pub const PLATFORM_NAMES : &[(&str, &str)] = &[
    ("amd", "AMD Accelerated Parallel Processing"),
    ("intel", "Intel(R) OpenCL"),
    ("beignet", "Intel Gen OCL Driver"),
    ("nvidia", "NVIDIA CUDA"),
    ("apple", "Apple"),
    ("pocl", "Portable Computing Language"),
    ("qualcomm", "QUALCOMM Snapdragon(TM)"),
    ("arm", "ARM Platform")
];

/// Platform and device selection shared by every tool.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct Target {
    /// Platform to use (amd, intel, beignet, nvidia, apple, pocl, qualcomm, arm)
    #[arg(short, long)]
    pub platform: Option<String>,

    /// Index of the device within the platform
    #[arg(short, long)]
    pub device: Option<usize>
}

impl Target {
    pub fn platform (&self) -> Result<Platform> {
        match &self.platform {
            Some(short) => select_platform(short),
            None => Platform::get_default()
        }
    }

    /// Selected device of the selected platform, the first one if no index was given.
    pub fn device (&self) -> Result<Device> {
        let platform = self.platform()?;
        let devices = platform.devices(DeviceType::ALL)?;
        let device = devices.get(self.device.unwrap_or(0)).copied().ok_or(Error::NoDevice)?;

        tracing::debug!(?platform, ?device, "selected target");
        Ok(device)
    }
}

/// Full platform name for a short one.
pub fn platform_full_name (short: &str) -> Result<&'static str> {
    PLATFORM_NAMES.iter()
        .find(|(name, _)| *name == short)
        .map(|(_, full)| *full)
        .ok_or_else(|| Error::Option(format!("Unknown platform '{short}' specified")))
}

/// Installed platform matching a short name.
pub fn select_platform (short: &str) -> Result<Platform> {
    let full = platform_full_name(short)?;
    for platform in Platform::all()? {
        if platform.name()? == full {
            return Ok(platform)
        }
    }

    Err(Error::Option(format!("Requested platform '{short}' is not available")))
}

/// Installs a stderr `tracing` subscriber filtered by `RUST_LOG`, `warn` otherwise.
pub fn init_logging () {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Prints the file name and build log of a failed build to stderr.
/// Returns `false` when the build did not fail, so the caller still owns the error.
pub fn report_build_failure (program: &Program, device: &Device, file: Option<&Path>) -> Result<bool> {
    if program.build_status(device)? != BuildStatus::Error {
        return Ok(false)
    }

    if let Some(file) = file {
        eprintln!("{}", file.display());
    }

    eprintln!("{}", program.build_log(device)?);
    Ok(true)
}

#[inline]
pub fn read_source (path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

#[inline]
pub fn read_binary (path: &Path) -> Result<Vec<u8>> {
    Ok(std::fs::read(path)?)
}

/// Writes the binary a single-device program built for its device.
pub fn write_binary (path: &Path, program: &Program) -> Result<()> {
    let binary = program.binaries()?.into_iter().next().unwrap_or_default();
    std::fs::write(path, &binary)?;

    tracing::debug!(path = %path.display(), size = binary.len(), "wrote binary");
    Ok(())
}

/// `kernel.cl` -> `kernel.o`
#[inline]
pub fn object_file_name (path: &Path) -> PathBuf {
    path.with_extension("o")
}

/// Byte count in B, kB, MB or GB.
pub fn human_size (size: u64) -> String {
    const KB : u64 = 1 << 10;
    const MB : u64 = 1 << 20;
    const GB : u64 = 1 << 30;

    match size {
        x if x < KB => format!("{x} B"),
        x if x < MB => format!("{:.2} kB", x as f64 / KB as f64),
        x if x < GB => format!("{:.2} MB", x as f64 / MB as f64),
        x => format!("{:.2} GB", x as f64 / GB as f64)
    }
}

#[inline(always)]
pub fn bool_str (v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_names () {
        assert_eq!(platform_full_name("pocl").unwrap(), "Portable Computing Language");
        assert_eq!(platform_full_name("nvidia").unwrap(), "NVIDIA CUDA");
        assert_eq!(platform_full_name("foo").unwrap_err().to_string(), "Unknown platform 'foo' specified");
    }

    #[test]
    fn sizes () {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(1536), "1.50 kB");
        assert_eq!(human_size(64 << 20), "64.00 MB");
        assert_eq!(human_size(3 << 30), "3.00 GB");
    }

    #[test]
    fn object_names () {
        assert_eq!(object_file_name(Path::new("dir/vec_add.cl")), PathBuf::from("dir/vec_add.o"));
        assert_eq!(object_file_name(Path::new("kernel")), PathBuf::from("kernel.o"));
    }

    #[test]
    fn bools () {
        assert_eq!(bool_str(true), "yes");
        assert_eq!(bool_str(false), "no");
    }
}
