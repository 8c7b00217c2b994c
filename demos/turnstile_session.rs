//! Turnstile Session
//!
//! This example runs a turnstile against real timers on the tokio runtime.
//!
//! Key concepts:
//! - RuntimeScheduler delivers expired timers on a channel
//! - The driver forwards each expiry to the turnstile as a timeout
//! - Retries walk the configured gateways before failing over
//!
//! Set `TURNSTILE_CONFIG` to a JSON file to override gateways, timeout or
//! fares.
//!
//! Run with: cargo run --example turnstile_session

use std::error::Error;
use tokio::sync::mpsc::UnboundedReceiver;
use turnstile_fsm::builder::TurnstileBuilder;
use turnstile_fsm::config::TurnstileConfig;
use turnstile_fsm::timer::{RuntimeScheduler, TimerHandle};
use turnstile_fsm::turnstile::{
    CardPresented, PersonPassed, TableTurnstile, TransactionDeclined, TransactionSuccess,
};

fn load_config() -> Result<TurnstileConfig, Box<dyn Error>> {
    match std::env::var("TURNSTILE_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)?;
            Ok(TurnstileConfig::from_json(&json)?)
        }
        Err(_) => Ok(TurnstileConfig::default()),
    }
}

/// Feed expired timers to the turnstile until one of them moves it.
///
/// Handles from replaced states may still be queued; the turnstile ignores
/// them, so keep waiting for the active state's own timer.
async fn wait_for_timeout(turnstile: &mut TableTurnstile, expired: &mut UnboundedReceiver<TimerHandle>) {
    let before = (turnstile.state(), turnstile.retry_count());
    while let Some(handle) = expired.recv().await {
        println!("  ... {handle} expired");
        turnstile.on_timer(handle);
        if (turnstile.state(), turnstile.retry_count()) != before {
            break;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    println!("=== Turnstile Session ===\n");

    let config = load_config()?;
    let (scheduler, mut expired) = RuntimeScheduler::new();
    let mut turnstile = TurnstileBuilder::new()
        .config(config)
        .scheduler(scheduler)
        .build_table()?;
    println!("{}", turnstile.dump());

    println!("\n1. Card presented, first gateway does not answer:");
    turnstile.process(CardPresented::new("4111-1111"));
    println!("{}", turnstile.dump());
    wait_for_timeout(&mut turnstile, &mut expired).await;
    println!("{}", turnstile.dump());

    println!("\n2. Second gateway approves:");
    let fare = turnstile.last_transaction().map_or(0, |t| t.amount);
    turnstile.process(TransactionSuccess { fare, balance: 20 });
    println!("{}", turnstile.dump());

    println!("\n3. Nobody passes before the timeout; the door stays unlocked:");
    wait_for_timeout(&mut turnstile, &mut expired).await;
    println!("{}", turnstile.dump());
    turnstile.process(PersonPassed);
    println!("{}", turnstile.dump());

    println!("\n4. A declined card relocks after the timeout:");
    turnstile
        .process(CardPresented::new("5500-0000"))
        .process(TransactionDeclined::new("Insufficient Funds"));
    println!("{}", turnstile.dump());
    wait_for_timeout(&mut turnstile, &mut expired).await;
    println!("{}", turnstile.dump());

    for fault in turnstile.take_faults() {
        eprintln!("scheduler fault: {fault}");
    }

    println!("\n=== Session Complete ===");
    Ok(())
}
