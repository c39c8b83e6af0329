//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a `tracing-subscriber` fmt layer filtered by `RUST_LOG`.
//!
//! The output is compact and hides the module path (`with_target(false)`); log lines carry
//! the cart's own fields instead (`state`, `revision`, `product_id`, `operation`).
//!
//! ```bash
//! RUST_LOG=info rocketshoes-cart add 1     # commits, startup and shutdown
//! RUST_LOG=debug rocketshoes-cart show     # every request and payload
//! ```
//!
//! A rejected operation logs at `warn` twice: once in the actor ("Rejected") and once in
//! the client, inside the operation's span ("Cart operation failed").

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
