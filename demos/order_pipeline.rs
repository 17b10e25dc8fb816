//! Order Pipeline
//!
//! This example runs an order through validation, pricing and either
//! fulfilment or manual review, depending on guards.
//!
//! Key concepts:
//! - States as async units of work over a typed payload
//! - Guards routing on the payload, evaluated in registration order
//! - Classified failures from `execute`
//!
//! Run with: RUST_LOG=debug cargo run --example order_pipeline

use async_trait::async_trait;
use fsm_runner::core::{BoxError, State, StateFailure};
use fsm_runner::{from_fn, MachineError, RunnerBuilder};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
struct Order {
    id: u64,
    quantity: u32,
    unit_price_cents: u64,
    total_cents: u64,
    status: &'static str,
}

struct Validate;

#[async_trait]
impl State<Order> for Validate {
    async fn execute(&self, order: Order) -> Result<Order, BoxError> {
        if order.quantity == 0 {
            return Err(StateFailure::new(format!("order {} has no items", order.id))
                .with_code(422)
                .into());
        }
        Ok(order)
    }
}

struct Price;

#[async_trait]
impl State<Order> for Price {
    async fn execute(&self, mut order: Order) -> Result<Order, BoxError> {
        order.total_cents = u64::from(order.quantity) * order.unit_price_cents;
        Ok(order)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Order Pipeline Example ===\n");

    let runner = RunnerBuilder::<Order>::new()
        .state("Validate", Validate)
        .state("Price", Price)
        .state(
            "Review",
            from_fn(|mut order: Order| async move {
                order.status = "held for review";
                Ok::<_, StateFailure>(order)
            }),
        )
        .state(
            "Fulfil",
            from_fn(|mut order: Order| async move {
                order.status = "shipped";
                Ok::<_, StateFailure>(order)
            }),
        )
        .transition("Validate", "Price")
        .guarded("Price", "Review", |order| order.total_cents > 100_000)
        .transition("Price", "Fulfil")
        .start("Validate")
        .build()
        .expect("pipeline is fully registered");

    let orders = [
        Order { id: 1, quantity: 3, unit_price_cents: 1_250, total_cents: 0, status: "new" },
        Order { id: 2, quantity: 90, unit_price_cents: 2_000, total_cents: 0, status: "new" },
        Order { id: 3, quantity: 0, unit_price_cents: 500, total_cents: 0, status: "new" },
    ];

    for order in &orders {
        match runner.execute(order).await {
            Ok(done) => println!(
                "Order {}: {} (total ${:.2})",
                done.id,
                done.status,
                done.total_cents as f64 / 100.0
            ),
            Err(err @ MachineError::StateExecution { .. }) => {
                println!("Order {}: rejected - {err} (code {:?})", order.id, err.code())
            }
            Err(err) => println!("Order {}: machine misconfigured - {err}", order.id),
        }
    }

    println!("\n=== Example Complete ===");
}
