//! Retry Loop
//!
//! This example shows a cycle: a flaky state is re-entered until a guard
//! sees success or the attempt budget runs out. The step limit in
//! `RunnerConfig` backs the guards up against runaway loops.
//!
//! Run with: RUST_LOG=debug cargo run --example retry_loop

use fsm_runner::diagnostics::ConfigIssue;
use fsm_runner::{from_fn, Runner, RunnerConfig, StateFailure};
use stillwater::validation::Validation;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Default)]
struct Attempt {
    tries: u32,
    succeeded: bool,
}

const MAX_TRIES: u32 = 5;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Retry Loop Example ===\n");

    let mut runner = Runner::with_config(RunnerConfig::new().max_steps(20));
    runner.register_state(
        from_fn(|mut attempt: Attempt| async move {
            attempt.tries += 1;
            // Pretend the remote call only works on the third try.
            attempt.succeeded = attempt.tries >= 3;
            Ok::<_, StateFailure>(attempt)
        }),
        "Call",
    );
    runner.register_state(
        from_fn(|attempt: Attempt| async move {
            println!("Gave up after {} tries", attempt.tries);
            Ok::<_, StateFailure>(attempt)
        }),
        "GiveUp",
    );
    runner.register_guarded_transition("Call", "Call", |a: &mut Attempt| {
        !a.succeeded && a.tries < MAX_TRIES
    });
    runner.register_guarded_transition("Call", "GiveUp", |a: &mut Attempt| !a.succeeded);
    runner.register_transition("GiveUp", "Alert");
    runner.set_starting_state("Call");

    if let Validation::Failure(issues) = runner.diagnose() {
        for issue in issues.iter() {
            match issue {
                ConfigIssue::DanglingTransition { .. } => println!("warning: {issue}"),
                other => println!("error: {other}"),
            }
        }
    }

    match runner.execute(&Attempt::default()).await {
        Ok(result) => println!("Finished: {result:?}"),
        Err(err) => println!("Failed: {err}"),
    }

    println!("\n=== Example Complete ===");
}
