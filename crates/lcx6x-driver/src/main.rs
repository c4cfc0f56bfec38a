use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use lcx6x_driver::config::{Cli, Command, Settings, parse_rates};
use lcx6x_driver::{Device, port};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn install_ctrlc_handler() -> Result<Arc<AtomicBool>> {
    let running = Arc::new(AtomicBool::new(true));
    let running_for_signal = Arc::clone(&running);
    ctrlc::set_handler(move || {
        running_for_signal.store(false, Ordering::SeqCst);
    })
    .context("installing Ctrl-C handler failed")?;
    Ok(running)
}

fn monitor<W: std::io::Write>(device: &Device<W>, interval: Duration) -> Result<()> {
    let running = install_ctrlc_handler()?;
    let mut next = Instant::now();
    while running.load(Ordering::SeqCst) && device.is_running() {
        if Instant::now() >= next {
            println!("{}\n", device.status());
            next += interval;
        }
        thread::sleep(Duration::from_millis(50));
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(&cli)?;

    let port = port::open(&settings.port)?;
    let writer = port
        .try_clone()
        .with_context(|| format!("cloning {}", settings.port.path))?;
    info!(
        "opened {} at {} baud",
        settings.port.path, settings.port.baud
    );

    let mut device = Device::spawn(port, writer)?;
    if !settings.rates.is_empty() {
        device.set_output_rates(&settings.rates)?;
    }

    match cli.command {
        Command::Monitor { interval_secs } => {
            monitor(&device, Duration::from_secs(interval_secs.max(1)))?;
        }
        Command::SetRate { rates } => {
            let rates = parse_rates(&rates)?;
            device.set_output_rates(&rates)?;
            thread::sleep(settings.settle);
            for (id, _) in rates {
                match device.output_rate(id) {
                    Some(rate) => println!("{id}: {rate}"),
                    None => println!("{id}: not confirmed"),
                }
            }
        }
        Command::QueryRate { sentences } => {
            let rates = if sentences.is_empty() {
                device.query_all_rates(settings.settle)?
            } else {
                let mut rates = Vec::with_capacity(sentences.len());
                for id in sentences {
                    rates.push((id, device.poll_output_rate(id, settings.settle)?));
                }
                rates
            };
            for (id, rate) in rates {
                match rate {
                    Some(0) => println!("{id}: disabled"),
                    Some(rate) => println!("{id}: {rate}"),
                    None => println!("{id}: unknown"),
                }
            }
        }
    }

    device.stop()?;
    Ok(())
}
