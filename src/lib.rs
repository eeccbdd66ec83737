//! # Introduction
//!
//! cstepper plays back pre-authored execution traces of small C teaching
//! examples. There is no interpreter: each example ships a finite list of
//! steps (source line, variable snapshot, optional output) and the player
//! moves through them forward and backward in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Example (authored or generated) → Inputs → StepTrace → TracePlayer → TUI
//! ```
//!
//! 1. [`catalog`]: built-in examples and custom example definitions.
//! 2. [`generator`]: turns a declaration table and a `main` body into a
//!    listing and trace using pattern-matching rules.
//! 3. [`trace`]: the step data contract: [`trace::StepTrace`],
//!    [`trace::ExecutionStep`], variable snapshots and input requests.
//! 4. [`player`]: transport controls (step, rewind, play, speed) and the
//!    accumulated output log.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.

pub mod catalog;
pub mod config;
pub mod generator;
pub mod player;
pub mod trace;
pub mod ui;
