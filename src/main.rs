//! # s1display CLI
//!
//! Keeps an HT32 USB LCD panel alive: sets orientation and time, paints an
//! initial frame, then sends a heartbeat every interval until SIGINT or
//! SIGTERM.
//!
//! ## Usage
//!
//! ```bash
//! # Portrait, black screen, heartbeat every second
//! s1display
//!
//! # Verbose logging
//! s1display -l trace
//!
//! # Landscape with a picture
//! s1display --landscape --image wallpaper.png
//!
//! # A panel with different USB IDs
//! s1display --vid 04d9 --pid fd02
//! ```

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::{LevelFilter, error, info, trace};

use s1display::{
    DisplayError, Frame, LcdDevice, PanelConfig, UsbTransport, logger::StderrLogger,
    panel::config::parse_usb_id, protocol::pixel::Rgb565,
};

static KEEP_RUNNING: AtomicBool = AtomicBool::new(true);

/// s1display - USB LCD panel keep-alive utility
#[derive(Parser, Debug)]
#[command(name = "s1display")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level
    #[arg(short = 'l', long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Use landscape orientation (default is portrait)
    #[arg(long)]
    landscape: bool,

    /// Image to paint on start (defaults to a black screen)
    #[arg(long, value_name = "FILE")]
    image: Option<PathBuf>,

    /// Seconds between heartbeats
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// USB vendor ID (hex)
    #[arg(long, value_parser = parse_usb_id)]
    vid: Option<u16>,

    /// USB product ID (hex)
    #[arg(long, value_parser = parse_usb_id)]
    pid: Option<u16>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Nothing useful to do if stdout/stderr is gone
            let _ = e.print();
            std::process::exit(usage_exit_code(&e));
        }
    };

    if let Err(e) = StderrLogger::new(cli.log_level.into()).install() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    info!("Start");
    let result = run(cli);
    if let Err(e) = &result {
        error!("{}", e);
    }
    info!("Stop");

    if result.is_err() {
        std::process::exit(1);
    }
}

/// `--help` and `--version` exit cleanly; any other parse failure is a
/// usage error.
fn usage_exit_code(e: &clap::Error) -> i32 {
    if e.use_stderr() { 1 } else { 0 }
}

fn run(cli: Cli) -> Result<(), DisplayError> {
    install_signal_handlers()?;

    let defaults = PanelConfig::HT32_320X170;
    let config = PanelConfig {
        vendor_id: cli.vid.unwrap_or(defaults.vendor_id),
        product_id: cli.pid.unwrap_or(defaults.product_id),
        ..defaults
    };

    let frame = match &cli.image {
        Some(path) => Frame::open(&config, path)?,
        None => Frame::solid(&config, Rgb565::BLACK),
    };

    // Dropping the device releases the claimed interface
    let transport = UsbTransport::open(&config)?;
    let mut device = LcdDevice::new(transport).with_config(config);

    device.set_orientation(!cli.landscape)?;
    device.set_time()?;
    device.redraw(&frame)?;

    let interval = Duration::from_secs(cli.interval);
    while KEEP_RUNNING.load(Ordering::SeqCst) {
        trace!("in the loop before sleep");
        thread::sleep(interval);
        trace!("in the loop after sleep");
        if !KEEP_RUNNING.load(Ordering::SeqCst) {
            break;
        }
        device.send_heartbeat()?;
    }

    Ok(())
}

extern "C" fn handle_signal(_signal: libc::c_int) {
    KEEP_RUNNING.store(false, Ordering::SeqCst);
}

/// Route SIGINT and SIGTERM to a flag the heartbeat loop polls.
fn install_signal_handlers() -> Result<(), DisplayError> {
    let handler = handle_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
    for signal in [libc::SIGINT, libc::SIGTERM] {
        let previous = unsafe { libc::signal(signal, handler) };
        if previous == libc::SIG_ERR {
            return Err(std::io::Error::last_os_error().into());
        }
    }
    Ok(())
}
