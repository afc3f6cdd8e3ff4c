//! Headless mode for agentic testing
//!
//! Runs the aura pipeline without any graphical output: a scenario file
//! declares characters and the health values they step through, and the
//! runner reports every token's final light state.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- --headless scenario.json
//! ```
//!
//! ## JSON scenario
//!
//! ```json
//! {
//!   "system": "dnd5e",
//!   "characters": [
//!     { "name": "Goblin", "max_hp": 20, "health_steps": [20, 12, 4] },
//!     { "name": "Ogre", "max_hp": 60, "tokens": 2, "health_steps": [30] }
//!   ]
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::{ScenarioCharacter, ScenarioConfig};
pub use runner::{run_headless_scenario, ScenarioReport, TokenReport};
