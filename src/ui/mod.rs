pub mod panels;
pub mod state;
pub mod theme;

pub use panels::{RenderStats, UiActions, draw_help_overlay, draw_side_panel};
pub use state::{DisplayMode, UiState};
pub use theme::apply_theme;
