//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Listing with syntax highlighting, category gutter and current line
//! - [`variables`]: Variable snapshot of the current step
//! - [`output`]: Output accumulated up to the current step
//! - [`explain`]: Step description and line explanation
//! - [`status`]: Status bar with keybindings and playback state
//!
//! Each pane module exports a `render_*` function plus any scroll state or
//! render data type it needs. Panes are stateless apart from scrolling.

pub mod explain;
pub mod output;
pub mod source;
pub mod status;
pub mod variables;

pub use explain::{render_explain_pane, ExplainRenderData};
pub use output::{render_output_pane, terminal_lines};
pub use source::{render_source_pane, SourceRenderData, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use variables::{render_variables_pane, VariablesRenderData};
