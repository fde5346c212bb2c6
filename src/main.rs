//! Disha - IMU orientation viewer
//!
//! Reads `ax,ay,az,gx,gy,gz` lines from a serial port (or a recorded capture),
//! fuses them with a complementary filter and prints the attitude.
//!
//! # Usage
//!
//! ```bash
//! # With default config (disha.toml if present)
//! cargo run --release
//!
//! # Explicit port and filter weight
//! cargo run --release -- --port /dev/ttyACM0 --alpha 0.96
//!
//! # Replay a capture recorded at 100 Hz
//! cargo run --release -- --replay capture.csv --replay-hz 100 --show-yaw
//! ```
//!
//! While running, type `z` + Enter to toggle yaw, `q` + Enter to quit.

use clap::Parser;
use disha::config::AppConfig;
use disha::display::{ConsolePresenter, DisplayToggle};
use disha::input::{event_channel, spawn_event_reader};
use disha::signal::install_stop_handler;
use disha::transport::{ReplayTransport, SerialTransport, Transport};
use disha::{ComplementaryFilter, Error, LineSampleSource, Result, ViewerApp};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "disha.toml";

#[derive(Parser, Debug)]
#[command(name = "disha")]
#[command(about = "Complementary-filter orientation viewer for 6-axis IMU serial streams")]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Serial port (overrides [serial] port)
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate (overrides [serial] baud_rate)
    #[arg(short, long)]
    baud: Option<u32>,

    /// Read recorded sample lines from a file instead of the serial port
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Capture rate of the replayed file in Hz (overrides [replay] rate_hz)
    #[arg(long)]
    replay_hz: Option<f64>,

    /// Gyro weight in [0, 1] (overrides [filter] alpha)
    #[arg(long)]
    alpha: Option<f64>,

    /// Largest accepted gap between samples in seconds (overrides [filter] max_dt)
    #[arg(long)]
    max_dt: Option<f64>,

    /// Start with yaw shown
    #[arg(long)]
    show_yaw: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    log::info!("Disha v{} starting", env!("CARGO_PKG_VERSION"));

    // Out-of-range alpha or max_dt is fatal
    let filter_config = config.filter.validate()?;
    log::info!(
        "  Filter: alpha={} max_dt={}s",
        filter_config.alpha(),
        filter_config.max_dt()
    );

    let toggle = DisplayToggle::new(config.display.show_yaw);
    let running = Arc::new(AtomicBool::new(true));
    install_stop_handler(Arc::clone(&running))?;

    let (tx, rx) = event_channel();
    spawn_event_reader(BufReader::new(io::stdin()), tx)?;

    let presenter = ConsolePresenter::new(io::stdout(), config.display.render_interval());
    let stats_interval = Duration::from_secs(config.display.stats_interval_secs);

    // Filter clock starts once the source is open
    match &args.replay {
        Some(path) => {
            let period = config.replay.sample_period(&filter_config)?;
            log::info!(
                "  Source: replay {} at {} Hz",
                path.display(),
                config.replay.rate_hz
            );
            let source = LineSampleSource::new(ReplayTransport::open(path)?);
            let filter = ComplementaryFilter::new(filter_config);
            run_viewer(
                ViewerApp::new(source, filter, presenter, toggle, running)
                    .with_events(rx)
                    .with_stats_interval(stats_interval)
                    .with_sample_period(period),
            );
        }
        None => {
            log::info!(
                "  Source: serial {} @ {} baud",
                config.serial.port,
                config.serial.baud_rate
            );
            let transport = SerialTransport::open(
                &config.serial.port,
                config.serial.baud_rate,
                config.serial.read_timeout(),
            )?;
            if let Some(name) = transport.name() {
                log::info!("  Opened {}", name);
            }
            let source = LineSampleSource::new(transport);
            let filter = ComplementaryFilter::new(filter_config);
            run_viewer(
                ViewerApp::new(source, filter, presenter, toggle, running)
                    .with_events(rx)
                    .with_stats_interval(stats_interval),
            );
        }
    }

    log::info!("Disha stopped");
    Ok(())
}

/// Run the loop to completion; the source (and its port) is released when
/// `app` is dropped at the end of this call.
fn run_viewer<T: Transport, W: Write>(
    mut app: ViewerApp<LineSampleSource<T>, ConsolePresenter<W>>,
) {
    app.run();

    let source = app.source().stats();
    log::info!(
        "Lines: {} ({} samples, {} malformed), {} bytes dropped, {} frames rendered",
        source.lines,
        source.samples,
        source.malformed,
        app.source().dropped_bytes(),
        app.presenter().frames()
    );
}

/// Load the config file and apply command line overrides.
///
/// A missing default file means defaults; a missing file named explicitly is
/// an error.
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if args.config.exists() {
        AppConfig::from_file(&args.config)?
    } else if args.config == Path::new(DEFAULT_CONFIG_PATH) {
        AppConfig::default()
    } else {
        return Err(Error::Other(format!(
            "Config file not found: {}",
            args.config.display()
        )));
    };

    if let Some(port) = &args.port {
        config.serial.port = port.clone();
    }
    if let Some(baud) = args.baud {
        config.serial.baud_rate = baud;
    }
    if let Some(alpha) = args.alpha {
        config.filter.alpha = alpha;
    }
    if let Some(max_dt) = args.max_dt {
        config.filter.max_dt = max_dt;
    }
    if let Some(rate_hz) = args.replay_hz {
        config.replay.rate_hz = rate_hz;
    }
    if args.show_yaw {
        config.display.show_yaw = true;
    }

    Ok(config)
}
