use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use reactor_core::{Message, Reaction, ReactionBuilder, ReactionComposer, Reactor};
use reactor_engine::{Engine, EngineConfig, Settlement};

#[derive(Parser)]
#[command(name = "reactor-demo")]
#[command(about = "Settle a Collatz sequence through a reactor")]
#[command(version)]
struct Cli {
    /// Starting value
    #[arg(short, long, default_value_t = 27)]
    start: u64,

    /// Override REACTOR_MAX_DISPATCHES
    #[arg(long)]
    max_dispatches: Option<usize>,
}

#[derive(Debug, Clone)]
struct Step {
    value: u64,
    steps: u64,
}

#[derive(Debug, Clone)]
struct Peak(u64);

#[derive(Debug, Clone)]
struct Converged {
    steps: u64,
}

/// Next Collatz value, or an error once it no longer fits in a `u64`.
fn next_value(value: u64) -> anyhow::Result<u64> {
    if value % 2 == 0 {
        return Ok(value / 2);
    }
    value
        .checked_mul(3)
        .and_then(|tripled| tripled.checked_add(1))
        .ok_or_else(|| anyhow!("Collatz step from {value} overflows u64"))
}

fn collatz() -> Reaction {
    ReactionBuilder::new()
        .try_when(|step: &Step| {
            let converged = step.value == 1;
            let next = if converged {
                None
            } else {
                Some(next_value(step.value)?)
            };
            Ok(ReactionComposer::new()
                .compose_if(converged, Converged { steps: step.steps })
                .compose_all(next.map(|value| {
                    Message::new(Step {
                        value,
                        steps: step.steps + 1,
                    })
                })))
        })
        .try_when(|step: &Step| {
            if step.value > 1 && step.value % 2 == 1 {
                Ok(Some(Message::new(Peak(next_value(step.value)?))))
            } else {
                Ok(None)
            }
        })
        .build()
}

fn main() -> ExitCode {
    // Load environment variables
    let _ = dotenvy::dotenv();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("reactor=info".parse()?))
        .init();

    let cli = Cli::parse();

    // Load config
    let mut config = EngineConfig::from_env()?;
    if let Some(max_dispatches) = cli.max_dispatches {
        config = config.with_max_dispatches(max_dispatches);
    }
    info!(
        start = cli.start,
        max_dispatches = config.max_dispatches,
        "Settling Collatz sequence"
    );

    let reactor = Reactor::new(&collatz());
    let engine = Engine::new(reactor, config);
    let settlement = engine.settle_value(Step {
        value: cli.start,
        steps: 0,
    })?;

    report(&settlement);
    Ok(())
}

fn report(settlement: &Settlement) {
    for dispatched in settlement.dispatches() {
        let parent = dispatched
            .caused_by
            .map(|seq| seq.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "#{:<4} <- {:<4} {}",
            dispatched.seq,
            parent,
            describe(&dispatched.message)
        );
    }

    let highest = settlement.values::<Peak>().map(|p| p.0).max();
    match settlement.values::<Converged>().next() {
        Some(converged) => info!(
            steps = converged.steps,
            peak = highest.unwrap_or(0),
            dispatches = settlement.len(),
            "Converged"
        ),
        None => info!(dispatches = settlement.len(), "Settled without converging"),
    }
}

fn describe(message: &Message) -> String {
    if let Some(step) = message.downcast_ref::<Step>() {
        format!("step {} = {}", step.steps, step.value)
    } else if let Some(peak) = message.downcast_ref::<Peak>() {
        format!("rise to {}", peak.0)
    } else if let Some(converged) = message.downcast_ref::<Converged>() {
        format!("converged after {} steps", converged.steps)
    } else {
        message.type_name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reactor_engine::EngineError;

    fn settle(start: u64) -> reactor_engine::error::Result<Settlement> {
        Engine::new(Reactor::new(&collatz()), EngineConfig::default()).settle_value(Step {
            value: start,
            steps: 0,
        })
    }

    #[test]
    fn converges_from_six_in_eight_steps() {
        let settlement = settle(6).unwrap();

        let converged = settlement.values::<Converged>().next().expect("converged");
        assert_eq!(converged.steps, 8);
        assert_eq!(settlement.values::<Peak>().map(|p| p.0).max(), Some(16));
    }

    #[test]
    fn next_value_rejects_overflow() {
        assert_eq!(next_value(10).unwrap(), 5);
        assert_eq!(next_value(5).unwrap(), 16);
        assert!(next_value(u64::MAX).is_err());
    }

    #[test]
    fn overflowing_start_is_reported_not_panicked() {
        let err = settle(12_297_829_382_473_034_411).unwrap_err();

        assert!(matches!(err, EngineError::Reaction(_)));
        assert!(err.to_string().contains("overflows u64"));
    }
}
