//! HidPipe server entry point.
//!
//! Wires together the capture listener, the event encoder, and the named
//! pipe sink, then pumps events until shutdown.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()          -- TOML config with defaults on first run
//!  └─ FifoSink::open()       -- creates/opens the pipe, blocks for a reader
//!  └─ RdevListener::start()  -- OS hook thread, events into a channel
//!  └─ pump thread            -- encoder + sink, single owner of all state
//! ```

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hidpipe_core::EventEncoder;
use hidpipe_server::application::forward_input::{self, ForwardInputService};
use hidpipe_server::infrastructure::capture::{rdev_listener::RdevListener, InputListener};
use hidpipe_server::infrastructure::storage::config::load_config;
use hidpipe_server::infrastructure::transport::fifo::FifoSink;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = load_config().context("loading configuration")?;

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cfg.server.log_level.clone())),
        )
        .init();

    info!("HidPipe server starting");
    info!(
        path = %cfg.pipe.path.display(),
        "opening pipe (blocks until a reader attaches)"
    );

    let sink = FifoSink::open(&cfg.pipe.path).context("opening output pipe")?;
    info!("reader attached, forwarding input");

    let encoder =
        EventEncoder::with_coalesce_window(Duration::from_millis(cfg.encoder.coalesce_interval_ms));
    let mut service = ForwardInputService::new(encoder, sink);

    let listener = RdevListener::new();
    let rx = listener.start().context("starting input capture")?;

    // Shutdown flag shared between the signal handler and the pump.
    let running = Arc::new(AtomicBool::new(true));

    // ── Event pump ────────────────────────────────────────────────────────────
    let pump_running = Arc::clone(&running);
    let pump = std::thread::Builder::new()
        .name("hidpipe-pump".to_string())
        .spawn(move || forward_input::pump(&rx, &mut service, &pump_running))
        .context("spawning pump thread")?;

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            running_clone.store(false, Ordering::Relaxed);
        }
    });

    info!("HidPipe server ready.  Press Ctrl-C to exit.");

    loop {
        tokio::time::sleep(Duration::from_millis(100)).await;
        if pump.is_finished() || !running.load(Ordering::Relaxed) {
            break;
        }
    }

    running.store(false, Ordering::Relaxed);
    listener.stop();

    match pump.join() {
        Ok(Ok(())) => info!("HidPipe server stopped"),
        Ok(Err(e)) => {
            error!("forwarding failed: {e}");
            return Err(e.into());
        }
        Err(_) => anyhow::bail!("pump thread panicked"),
    }

    Ok(())
}
