use crate::flower::{FlowerParams, PRESETS, RandomizeLocks, Rgb};
use crate::renderer::CameraMode;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Shaded,
    Points,
}

pub struct UiState {
    pub params: FlowerParams,
    pub color1: Rgb,
    pub color2: Rgb,

    /// Cleared as soon as any slider moves away from the preset.
    pub selected_preset: Option<usize>,

    pub display_mode: DisplayMode,
    pub show_axes: bool,
    pub camera_mode: CameraMode,
    pub vsync_enabled: bool,

    pub show_stats: bool,

    pub fps_cap_enabled: bool,
    pub fps_cap: u32,

    pub locks: RandomizeLocks,

    /// Set whenever params or colors change; the app rebuilds the mesh once
    /// per frame at most.
    pub mesh_dirty: bool,
}

impl Default for UiState {
    fn default() -> Self {
        let preset = &PRESETS[0];
        Self {
            params: preset.params,
            color1: preset.color1,
            color2: preset.color2,

            selected_preset: Some(0),

            display_mode: DisplayMode::Shaded,
            show_axes: true,
            camera_mode: CameraMode::Orbital,
            vsync_enabled: true,

            show_stats: true,

            fps_cap_enabled: false,
            fps_cap: 144,

            locks: RandomizeLocks::default(),

            mesh_dirty: true,
        }
    }
}
