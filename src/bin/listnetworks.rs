//! listnetworks Binary
//!
//! Lists the wireless networks visible to a SANA-II network device.

use std::path::PathBuf;

use clap::Parser;
use listnetworks::device::SimulatedRegistry;
use listnetworks::render::{ErrorMessage, Report};
use listnetworks::session::{self, ExitStatus};
use listnetworks::{ArenaAllocator, Config};
use tracing_subscriber::{fmt, EnvFilter};

/// listnetworks
#[derive(Parser, Debug)]
#[command(name = "listnetworks")]
#[command(about = "Wireless network scanner for SANA2 network devices")]
#[command(version)]
struct Args {
    /// Device to open (default: first SANA2 device found)
    #[arg(short, long)]
    device: Option<String>,

    /// Unit number to open
    #[arg(short, long, default_value = "0")]
    unit: u32,

    /// Show device details before the scan
    #[arg(short, long)]
    verbose: bool,

    /// One network per line, no banners
    #[arg(short, long)]
    short: bool,

    /// Device fixture describing the installed devices
    #[arg(short, long, default_value = "listnetworks.json")]
    fixture: PathBuf,

    /// Maximum number of devices collected during enumeration
    #[arg(long, default_value = "16")]
    max_devices: usize,

    /// Scratch arena size in KB
    #[arg(long, default_value = "32")]
    arena_kb: usize,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { ExitStatus::Fail.code() } else { ExitStatus::Ok.code() };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Initialize tracing/logging (stderr, results go to stdout)
    let default_filter = if args.verbose {
        "warn,listnetworks=debug"
    } else {
        "warn,listnetworks=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("listnetworks v{}", listnetworks::VERSION);
    tracing::debug!("Fixture: {}", args.fixture.display());

    let mut builder = Config::builder()
        .unit(args.unit)
        .verbose(args.verbose)
        .short(args.short)
        .max_devices(args.max_devices)
        .arena_size(args.arena_kb * 1024);
    if let Some(device) = &args.device {
        builder = builder.device(device);
    }
    let config = builder.build();

    let registry = match SimulatedRegistry::load(&args.fixture) {
        Ok(registry) => registry,
        Err(e) => {
            tracing::error!("Failed to load fixture {}: {}", args.fixture.display(), e);
            std::process::exit(ExitStatus::Fail.code());
        }
    };

    let allocator = ArenaAllocator::new(config.arena_limit);
    let result = session::run(&config, &registry, &allocator);
    let status = session::exit_status(&result);

    match &result {
        Ok(report) => print!("{}", Report { report, short: config.short }),
        Err(e) => print!("{}", ErrorMessage(e)),
    }

    std::process::exit(status.code());
}
