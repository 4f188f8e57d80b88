//! iot-light — Main Entry Point
//!
//! Hexagonal architecture with a cooperative poll loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  UdpMulticastFace   LogEventSink   PwmLight      LogDiscovery  │
//! │  (Face)             (EventSink)    (LightPort)   (Discovery)   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  Forwarder ──▶ LightHandler ──▶ ┌───────────────────────────┐  │
//! │                                 │ LightService (pure logic) │  │
//! │                                 │ match · dispatch · reply  │  │
//! │                                 └───────────────────────────┘  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use signal_hook::consts::TERM_SIGNALS;

use iot_light::adapters::discovery::LogDiscovery;
use iot_light::adapters::light::{PwmLight, SimulatedPwm};
use iot_light::adapters::log_sink::LogEventSink;
use iot_light::adapters::udp_face::UdpMulticastFace;
use iot_light::app::ports::DiscoveryPort;
use iot_light::app::service::LightService;
use iot_light::config::DeviceConfig;
use iot_light::fwd::{Forwarder, LightHandler};

/// NDN IoT light: serves brightness commands addressed to this device.
#[derive(Parser, Debug)]
#[command(name = "iot-light", version)]
struct Cli {
    /// Device identity, e.g. /ndn-iot/bedroom/light1
    identity: String,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Multicast group to join
    #[arg(long)]
    group: Option<Ipv4Addr>,

    /// UDP port to bind and send to
    #[arg(long)]
    port: Option<u16>,

    /// Service selector byte (0 = LED)
    #[arg(long)]
    selector: Option<u8>,

    /// Forwarder poll interval in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u32>,
}

fn load_config(cli: &Cli) -> Result<DeviceConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            DeviceConfig::from_json_str(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => DeviceConfig::default(),
    };

    if let Some(group) = cli.group {
        config.multicast_group = group;
    }
    if let Some(port) = cli.port {
        config.multicast_port = port;
    }
    if let Some(selector) = cli.selector {
        config.service_id = selector;
    }
    if let Some(ms) = cli.poll_interval_ms {
        config.poll_interval_ms = ms;
    }

    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    info!("╔══════════════════════════════════════╗");
    info!("║  iot-light v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = load_config(&cli)?;
    let service = LightService::from_config(&cli.identity, &config)
        .with_context(|| format!("cannot serve {:?}", cli.identity))?;
    let identity = service.identity().clone();
    info!(
        "Identity {} (home {}, locator {})",
        identity.identity(),
        identity.home_prefix(),
        identity.locator()
    );

    let shutdown = Arc::new(AtomicBool::new(false));
    for &signal in TERM_SIGNALS {
        signal_hook::flag::register(signal, Arc::clone(&shutdown))
            .context("installing signal handler")?;
    }

    // ── Face + forwarder ──────────────────────────────────────
    let face = UdpMulticastFace::from_config(&config).context("opening multicast face")?;
    let mut forwarder = Forwarder::new(face);

    // ── Light service ─────────────────────────────────────────
    let prefix = service.registered_prefix();
    let mut handler = LightHandler::new(
        service,
        PwmLight::new(SimulatedPwm::default()),
        LogEventSink::new(),
    );
    handler.start();
    forwarder.register_prefix(prefix, Box::new(handler));

    // ── Discovery ─────────────────────────────────────────────
    let mut discovery = LogDiscovery::new();
    discovery.add_or_update_self_service(config.service_id, true, 0);
    discovery.start(&identity);

    // ── Poll loop ─────────────────────────────────────────────
    let poll = Duration::from_millis(u64::from(config.poll_interval_ms));
    while !shutdown.load(Ordering::Relaxed) {
        if let Err(e) = forwarder.process() {
            warn!("Face error: {}", e);
        }
        thread::sleep(poll);
    }

    discovery.stop();
    info!("Shutdown complete");
    Ok(())
}
