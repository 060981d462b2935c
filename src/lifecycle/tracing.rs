//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`.
//! Logs go to stderr so stdout carries nothing but records.
//!
//! ```bash
//! # Run start/finish and actor lifecycle
//! RUST_LOG=info cargo run
//!
//! # Also every churn with the reassigned actor ids
//! RUST_LOG=debug cargo run
//!
//! # Every issued number
//! RUST_LOG=cdr_synth::simulation=trace cargo run
//! ```
//!
//! With `RUST_LOG=debug` a short run looks like:
//!
//! ```text
//! INFO Actor started entity_type="SimulationRun"
//! DEBUG Issued initial numbers actors=20
//! INFO Created entity_type="SimulationRun" id=run_1 size=1
//! INFO simulation: Run started actors=20 epochs=10 ticks_per_epoch=300
//! DEBUG simulation: Churned numbers epoch=1 reassigned={3, 17}
//! INFO simulation: Run finished records=3000
//! ```

/// Initializes the global subscriber. Call once, from a binary.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
