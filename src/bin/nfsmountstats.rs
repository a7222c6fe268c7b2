//! nfsmountstats - NFS client statistics report.
//!
//! Reads `/proc/self/mountstats` and prints per-mount NFS statistics.
//!
//! Usage:
//!   nfsmountstats                      # READ/WRITE throughput per mount
//!   nfsmountstats --view cache         # data and attribute cache efficiency
//!   nfsmountstats --view xprt          # transport counters
//!   nfsmountstats --view json          # full decoded snapshot as JSON
//!   nfsmountstats --mount /mnt/data    # restrict output to one mount
//!   nfsmountstats --proc-path ./fixture/proc

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, ValueEnum};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

#[cfg(target_os = "linux")]
use nfsmountstats::collector::RealFs;
#[cfg(not(target_os = "linux"))]
use nfsmountstats::collector::mock::MockFs;
use nfsmountstats::collector::{DEFAULT_PROC_PATH, MountstatsCollector};
use nfsmountstats::fmt::{
    FmtStyle, format_bytes, format_duration, format_ms, format_percent, truncate,
};
use nfsmountstats::view::{
    build_attr_cache_rows, build_data_cache_rows, build_ops_rows, build_xprt_rows,
};
use nfsmountstats::Device;

/// Width of the mountpoint column.
const MOUNT_WIDTH: usize = 24;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum View {
    /// READ/WRITE operations and bytes from the per-op table.
    Ops,
    /// Data cache hit rate and attribute cache counters.
    Cache,
    /// Transport counters.
    Xprt,
    /// Decoded NFS devices as JSON.
    Json,
}

/// NFS client statistics report.
#[derive(Parser)]
#[command(name = "nfsmountstats", about = "NFS client statistics report", version)]
struct Args {
    /// Report to print.
    #[arg(long, value_enum, default_value = "ops")]
    view: View,

    /// Only report the mount at this mountpoint.
    #[arg(short, long, value_name = "PATH")]
    mount: Option<String>,

    /// Path to /proc filesystem (for testing with a fixture tree).
    #[arg(long, default_value = DEFAULT_PROC_PATH)]
    proc_path: String,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Logs go to stderr so they never mix with the report.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("nfsmountstats={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_ops(devices: &[&Device]) {
    println!(
        "{:<w$} {:>10} {:>10} {:>10} {:>10} {:>9} {:>9}",
        "mountpoint",
        "readOps",
        "writeOps",
        "read",
        "written",
        "readRTT",
        "writeRTT",
        w = MOUNT_WIDTH
    );
    for row in build_ops_rows(devices.iter().copied()) {
        println!(
            "{:<w$} {:>10} {:>10} {:>10} {:>10} {:>9} {:>9}",
            truncate(&row.mountpoint, MOUNT_WIDTH),
            row.read_ops,
            row.write_ops,
            format_bytes(row.read_bytes, FmtStyle::Compact),
            format_bytes(row.write_bytes, FmtStyle::Compact),
            format_ms(row.read_rtt_ms),
            format_ms(row.write_rtt_ms),
            w = MOUNT_WIDTH
        );
    }
}

fn print_cache(devices: &[&Device]) {
    println!("Data cache");
    println!(
        "{:<w$} {:>10} {:>10} {:>10} {:>9}",
        "mountpoint",
        "appRead",
        "server",
        "direct",
        "hitrate",
        w = MOUNT_WIDTH
    );
    for row in build_data_cache_rows(devices.iter().copied()) {
        println!(
            "{:<w$} {:>10} {:>10} {:>10} {:>9}",
            truncate(&row.mountpoint, MOUNT_WIDTH),
            format_bytes(row.app_read_bytes, FmtStyle::Compact),
            format_bytes(row.server_read_bytes, FmtStyle::Compact),
            format_bytes(row.direct_read_bytes, FmtStyle::Compact),
            format_percent(row.hit_rate),
            w = MOUNT_WIDTH
        );
    }

    println!();
    println!("Attribute cache");
    println!(
        "{:<w$} {:>10} {:>10} {:>10} {:>10}",
        "mountpoint",
        "vfsOpen",
        "inReval",
        "attrInval",
        "dataInval",
        w = MOUNT_WIDTH
    );
    for row in build_attr_cache_rows(devices.iter().copied()) {
        println!(
            "{:<w$} {:>10} {:>10} {:>10} {:>10}",
            truncate(&row.mountpoint, MOUNT_WIDTH),
            row.vfs_open,
            row.inode_revalidate,
            row.attr_invalidate,
            row.data_invalidate,
            w = MOUNT_WIDTH
        );
    }
}

fn print_xprt(devices: &[&Device]) {
    println!(
        "{:<w$} {:>5} {:>6} {:>12} {:>12} {:>8} {:>8} {:>8} {:>6} {:>8}",
        "mountpoint",
        "proto",
        "port",
        "sends",
        "receives",
        "badXids",
        "backlog",
        "connects",
        "slots",
        "sendQ",
        w = MOUNT_WIDTH
    );
    let opt = |v: Option<u64>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
    for row in build_xprt_rows(devices.iter().copied()) {
        let sending_queue = row
            .avg_sending_queue
            .map_or_else(|| "-".to_string(), |q| format!("{:.2}", q));
        println!(
            "{:<w$} {:>5} {:>6} {:>12} {:>12} {:>8} {:>8.2} {:>8} {:>6} {:>8}",
            truncate(&row.mountpoint, MOUNT_WIDTH),
            row.protocol,
            row.port,
            row.sends,
            row.receives,
            row.bad_xids,
            row.avg_backlog,
            opt(row.connects),
            opt(row.max_slots),
            sending_queue,
            w = MOUNT_WIDTH
        );
    }
}

fn print_json(devices: &[&Device]) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(devices)?);
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    #[cfg(target_os = "linux")]
    let collector = MountstatsCollector::new(RealFs::new(), args.proc_path.as_str());
    #[cfg(not(target_os = "linux"))]
    let collector = MountstatsCollector::new(MockFs::nfs_client(), args.proc_path.as_str());

    let stats = match collector.collect() {
        Ok(stats) => stats,
        Err(e) => {
            error!(
                path = %collector.mountstats_path().display(),
                error = %e,
                "cannot collect mountstats"
            );
            std::process::exit(1);
        }
    };

    let mut devices = stats.nfs_devices();
    info!(
        devices = stats.devices.len(),
        nfs = devices.len(),
        "collected mountstats"
    );

    if let Some(ref mount) = args.mount {
        devices.retain(|d| &d.mountpoint == mount);
        if devices.is_empty() {
            error!(mount = %mount, "no NFS mount at this path");
            std::process::exit(1);
        }
    }

    for device in &devices {
        if let Some(nfs) = device.nfs() {
            info!(
                mountpoint = %device.mountpoint,
                age = %format_duration(nfs.age, FmtStyle::Detail),
                vers = nfs.option("vers").unwrap_or("?"),
                "nfs mount"
            );
        }
    }

    match args.view {
        View::Ops => print_ops(&devices),
        View::Cache => print_cache(&devices),
        View::Xprt => print_xprt(&devices),
        View::Json => {
            if let Err(e) = print_json(&devices) {
                error!(error = %e, "cannot serialize mountstats");
                std::process::exit(1);
            }
        }
    }
}
