//! Traffic Light Store
//!
//! This example demonstrates a simple cyclic machine held in a store.
//!
//! Key concepts:
//! - Cyclic transitions (no terminal state)
//! - Payloads that differ per state
//! - Typed `advance` along declared edges
//! - A store built with a label for log output
//!
//! Run with: RUST_LOG=debug cargo run --example traffic_light

use fsm_store::builder::StoreBuilder;
use fsm_store::core::{Kind, State};
use fsm_store::machine;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct Red {
    pub seconds: u32,
}

#[derive(Debug, Clone)]
pub struct Green {
    pub seconds: u32,
    pub pedestrians_waiting: bool,
}

#[derive(Debug, Clone)]
pub struct Yellow;

machine! {
    #[derive(Clone)]
    pub enum TrafficLight: LightKind {
        Red(Red) => [Green],
        Green(Green) => [Yellow],
        Yellow(Yellow) => [Red],
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Traffic Light Store ===\n");

    let store = StoreBuilder::new()
        .initial(TrafficLight::Red(Red { seconds: 30 }))
        .label("crossing")
        .build(|_| ())?;

    store.subscribe_fn(|prev: &TrafficLight, next: &TrafficLight| {
        println!("  {} -> {}", prev.name(), next.name());
    });

    println!("Initial state: {:?}\n", store.get());

    println!("Transition sequence:");
    for _ in 0..6 {
        let snapshot = store.get();
        match &*snapshot {
            TrafficLight::Red(red) => store.advance(
                red,
                Green {
                    seconds: red.seconds,
                    pedestrians_waiting: false,
                },
            )?,
            TrafficLight::Green(green) => store.advance(green, Yellow)?,
            TrafficLight::Yellow(yellow) => store.advance(yellow, Red { seconds: 30 })?,
        };
    }

    println!("\nKey Characteristics:");
    for kind in LightKind::all() {
        let next: Vec<_> = kind.successors().iter().map(|k| k.name()).collect();
        println!("- {kind} may move to {}", next.join(", "));
    }
    println!("- No terminal state (cycles indefinitely)");

    println!("\n=== Example Complete ===");
    Ok(())
}
