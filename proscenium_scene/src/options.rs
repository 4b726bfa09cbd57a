// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Scene-wide configuration, fixed at [`Scene::new`](crate::Scene::new).
///
/// ```
/// use proscenium_scene::SceneOptions;
///
/// let opts = SceneOptions::default().with_max_dimension(100.0).with_layer_spacing(0.5);
/// assert_eq!(opts.max_dimension, 100.0);
/// assert!(opts.mouse_enabled_by_default);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SceneOptions {
    /// Largest absolute width or height a node's combined bounds may reach
    /// through scaling.
    pub max_dimension: f64,
    /// Whether new nodes take part in hit testing.
    pub mouse_enabled_by_default: bool,
    /// Depth step between successive nodes in draw order.
    pub layer_spacing: f64,
    /// Length of the longer viewport side, in scene units.
    pub viewport_max_dimension: f64,
    /// Texture pixels per scene unit for sprites that do not specify it.
    pub pixels_per_unit: f64,
    /// Sprite sheet regions are measured from the top of the texture.
    pub top_left_uv_origin: bool,
    /// Name of the clock that drives the root.
    pub default_clock_name: String,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            max_dimension: 5000.0,
            mouse_enabled_by_default: true,
            layer_spacing: 1.0,
            viewport_max_dimension: 10.0,
            pixels_per_unit: 100.0,
            top_left_uv_origin: true,
            default_clock_name: String::from("default"),
        }
    }
}

impl SceneOptions {
    /// Set [`SceneOptions::max_dimension`].
    #[must_use]
    pub fn with_max_dimension(mut self, max: f64) -> Self {
        self.max_dimension = max;
        self
    }

    /// Set [`SceneOptions::mouse_enabled_by_default`].
    #[must_use]
    pub fn with_mouse_enabled_by_default(mut self, enabled: bool) -> Self {
        self.mouse_enabled_by_default = enabled;
        self
    }

    /// Set [`SceneOptions::layer_spacing`].
    #[must_use]
    pub fn with_layer_spacing(mut self, spacing: f64) -> Self {
        self.layer_spacing = spacing;
        self
    }

    /// Set [`SceneOptions::viewport_max_dimension`].
    #[must_use]
    pub fn with_viewport_max_dimension(mut self, max: f64) -> Self {
        self.viewport_max_dimension = max;
        self
    }

    /// Set [`SceneOptions::pixels_per_unit`].
    #[must_use]
    pub fn with_pixels_per_unit(mut self, ppu: f64) -> Self {
        self.pixels_per_unit = ppu;
        self
    }

    /// Set [`SceneOptions::top_left_uv_origin`].
    #[must_use]
    pub fn with_top_left_uv_origin(mut self, top_left: bool) -> Self {
        self.top_left_uv_origin = top_left;
        self
    }
}
