//! Domain library for the Knowing You, Knowing Me perception match game.
//!
//! Two participants rate themselves and each other across an ordered pack of
//! questions; the [`sessions`] module derives per-question perception gaps,
//! an aggregate match percentage, and ranked insight lists from those
//! ratings. Persistence, HTTP wiring, and the CLI live in the `services/api`
//! crate; this crate stays free of I/O apart from the CSV import helpers.

pub mod config;
pub mod error;
pub mod sessions;
pub mod telemetry;
