use std::process::ExitCode;
use clap::Parser;
use ocl_lite::{prelude::*, tools::{self, bool_str, human_size}};

/// Get information about OpenCL
#[derive(Parser, Debug)]
#[command(name = "ocl-info", version)]
struct Args {
    /// Verbose output
    #[arg(short, long)]
    verbose: bool
}

fn main () -> ExitCode {
    tools::init_logging();
    let args = Args::parse();

    match print_info(args.verbose) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn print_info (verbose: bool) -> Result<()> {
    println!("platforms:");
    for (id, platform) in Platform::all()?.iter().enumerate() {
        print_platform(id, platform, verbose)?;
    }

    Ok(())
}

fn print_platform (id: usize, platform: &Platform, verbose: bool) -> Result<()> {
    println!("  - name: {}", platform.name()?);
    println!("    id: {id}");

    if verbose {
        println!("    version: {}", platform.version()?);
        println!("    vendor: {}", platform.vendor()?);
        println!("    profile: {}", platform.profile()?);
        println!("    extensions:");
        for ext in platform.extensions()? {
            println!("      - {ext}");
        }
    }

    println!("    devices:");
    for (id, device) in platform.devices(DeviceType::ALL)?.iter().enumerate() {
        print_device(id, device, verbose)?;
    }

    Ok(())
}

fn print_device (id: usize, dev: &Device, verbose: bool) -> Result<()> {
    println!("      - name: {}", dev.name()?);
    println!("        id: {id}");
    println!("        type: {}", dev.device_type()?.label());
    println!("        OpenCL version: {}", dev.opencl_c_version()?);

    if !verbose {
        return Ok(())
    }

    let size = |x: usize| human_size(x as u64);
    let built_in = dev.built_in_kernels()?;

    println!("        vendor: {}", dev.vendor()?);
    println!("        vendor id: {}", dev.vendor_id()?);
    println!("        version: {}", dev.version()?);
    println!("        profile: {}", dev.profile()?);
    println!("        driver version: {}", dev.driver_version()?);
    println!("        address bits: {}", dev.address_bits()?);
    println!("        compiler available: {}", bool_str(dev.compiler_available()?));
    println!("        global mem size: {}", human_size(dev.global_mem_size()?));
    println!("        global mem cache size: {}", human_size(dev.global_mem_cache_size()?));
    println!("        global mem cache line size: {}", human_size(dev.global_mem_cacheline_size()? as u64));
    println!("        local mem size: {}", human_size(dev.local_mem_size()?));
    println!("        built-in kernels: {}", if built_in.is_empty() { String::from("none") } else { built_in.join(" ") });
    println!("        endianess: {}", if dev.endian_little()? { "little-endian" } else { "big-endian" });
    println!("        error correction support: {}", bool_str(dev.error_correction_support()?));
    println!("        extensions:");
    for ext in dev.extensions()? {
        println!("          - {ext}");
    }
    println!("        host unified memory: {}", bool_str(dev.host_unified_memory()?));
    println!("        image support: {}", bool_str(dev.image_support()?));
    println!("        max 2D image size (W x H): {} x {}", size(dev.image2d_max_width()?), size(dev.image2d_max_height()?));
    println!("        max 3D image size (D x H x W): {} x {} x {}", size(dev.image3d_max_depth()?), size(dev.image3d_max_height()?), size(dev.image3d_max_width()?));
    println!("        image max buffer size: {}", size(dev.image_max_buffer_size()?));
    println!("        image max array size: {}", size(dev.image_max_array_size()?));
    println!("        linker available: {}", bool_str(dev.linker_available()?));
    println!("        max clock frequency: {} MHz", dev.max_clock_frequency()?);
    println!("        max compute units: {}", dev.max_compute_units()?);
    println!("        max constant args: {}", dev.max_constant_args()?);
    println!("        max constant buffer size: {}", human_size(dev.max_constant_buffer_size()?));
    println!("        max mem alloc size: {}", human_size(dev.max_mem_alloc_size()?));
    println!("        max parameter size: {}", size(dev.max_parameter_size()?));
    println!("        max read image args: {}", dev.max_read_image_args()?);
    println!("        max work group size: {}", dev.max_work_group_size()?);
    println!("        max work item dimensions: {}", dev.max_work_item_dimensions()?);
    println!("        max work item sizes: {}", dev.max_work_item_sizes()?.iter().map(usize::to_string).collect::<Vec<_>>().join(", "));
    println!("        max write image args: {}", dev.max_write_image_args()?);
    println!("        mem base address align: {} B", dev.mem_base_addr_align()? / 8);
    println!("        min data type align size: {} B", dev.min_data_type_align_size()?);
    println!("        partition max sub devices: {}", dev.partition_max_sub_devices()?);
    println!("        profiling timer resolution: {} ns", dev.profiling_timer_resolution()?);

    Ok(())
}
