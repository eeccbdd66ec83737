//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, playback polling
//! - **[`panes`]**: render functions for each visible pane (source, variables,
//!   output, explanation, status bar)
//! - **[`theme`]**: color palette shared by all panes
//!
//! Construct an [`App`] with a [`CodeExample`] and a [`TracePlayer`], then call
//! [`App::run`] to start the event loop.
//!
//! [`CodeExample`]: crate::catalog::CodeExample
//! [`TracePlayer`]: crate::player::TracePlayer
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
