//! Editor and TUI integrations. Both ultimately invoke the same generation
//! pipeline through the `aic generate` CLI surface.

pub mod lazygit;
pub mod vscode;

pub use lazygit::{LAZYGIT_SNIPPET, SetupOutcome, setup_lazygit};
pub use vscode::setup_vscode;
