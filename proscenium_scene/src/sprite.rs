// Copyright 2026 the Proscenium Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sprites built from image assets.

use kurbo::{Rect, Size};
use proscenium_mesh::{RegistrationPoint, sprite_nine_slice, sprite_quad};

use crate::{NodeId, Scene, SceneError};

/// What the scene needs to know about a decoded image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ImageInfo {
    /// Size in pixels.
    pub size: Size,
}

/// Source of image assets, keyed by logical path.
///
/// Decoding and uploading are the provider's business; the scene only reads
/// sizes and passes the key on to the renderer as the texture.
pub trait AssetProvider {
    /// Look up an image, or `None` if the key is unknown.
    fn image(&self, key: &str) -> Option<ImageInfo>;
}

/// How to cut a sprite out of its image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpriteOptions {
    /// Sub-rectangle in pixels, such as a sprite sheet cell; the whole image
    /// when `None`.
    pub region: Option<Rect>,
    /// Overrides [`SceneOptions::pixels_per_unit`](crate::SceneOptions::pixels_per_unit).
    pub pixels_per_unit: Option<f64>,
    /// Point of the sprite that sits on the node origin.
    pub pivot: RegistrationPoint,
    /// Inner cell of a nine-slice grid, in fractions of the sprite with `y`
    /// measured from the bottom edge. The borders around it keep their size
    /// when the sprite is scaled.
    pub scale9_grid: Option<Rect>,
}

impl Scene {
    /// Create a detached node that shows image `key`.
    ///
    /// The node is named after the key. Its quad measures the image (or
    /// region) in pixels divided by the pixels per unit, placed around the
    /// pivot.
    pub fn create_sprite(
        &mut self,
        assets: &dyn AssetProvider,
        key: &str,
        options: &SpriteOptions,
    ) -> Result<NodeId, SceneError> {
        let image = assets
            .image(key)
            .ok_or_else(|| SceneError::AssetNotFound(key.to_owned()))?;
        let region = options
            .region
            .unwrap_or_else(|| Rect::from_origin_size((0.0, 0.0), image.size));
        let ppu = options
            .pixels_per_unit
            .unwrap_or(self.options.pixels_per_unit);
        let top_left = self.options.top_left_uv_origin;
        let id = self.create_node(key);
        if let Some(grid) = options.scale9_grid {
            let slice = sprite_nine_slice(image.size, region, ppu, options.pivot, top_left, grid);
            self.set_nine_slice(id, Some(slice))?;
        } else {
            let mesh = sprite_quad(image.size, region, ppu, options.pivot, top_left);
            self.set_mesh(id, Some(mesh))?;
        }
        self.set_texture(id, Some(key.to_owned()))?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashMap;

    struct Atlas(HashMap<&'static str, Size>);

    impl AssetProvider for Atlas {
        fn image(&self, key: &str) -> Option<ImageInfo> {
            self.0.get(key).map(|&size| ImageInfo { size })
        }
    }

    fn atlas() -> Atlas {
        Atlas(HashMap::from([("hero.png", Size::new(200.0, 100.0))]))
    }

    #[test]
    fn sprite_is_sized_in_scene_units() {
        let mut scene = Scene::default();
        let hero = scene
            .create_sprite(&atlas(), "hero.png", &SpriteOptions::default())
            .unwrap();
        assert_eq!(scene.name(hero), Some("hero.png"));
        assert_eq!(scene.texture(hero), Some("hero.png"));
        assert_eq!(scene.width(hero), Some(2.0));
        assert_eq!(scene.height(hero), Some(1.0));
        assert_eq!(
            scene.subtree_bounds(hero),
            Some(Rect::new(-1.0, -0.5, 1.0, 0.5))
        );
    }

    #[test]
    fn region_and_pivot_shape_the_quad() {
        let mut scene = Scene::default();
        let options = SpriteOptions {
            region: Some(Rect::new(0.0, 0.0, 50.0, 50.0)),
            pixels_per_unit: Some(50.0),
            pivot: RegistrationPoint::BOTTOM_LEFT,
            ..SpriteOptions::default()
        };
        let cell = scene.create_sprite(&atlas(), "hero.png", &options).unwrap();
        assert_eq!(
            scene.subtree_bounds(cell),
            Some(Rect::new(0.0, 0.0, 1.0, 1.0))
        );
    }

    #[test]
    fn nine_slice_borders_survive_resizing() {
        let mut scene = Scene::default();
        let options = SpriteOptions {
            scale9_grid: Some(Rect::new(0.2, 0.2, 0.8, 0.8)),
            ..SpriteOptions::default()
        };
        let panel = scene.create_sprite(&atlas(), "hero.png", &options).unwrap();
        scene.add_child(scene.root(), panel).unwrap();
        assert!(scene.nine_slice(panel).is_some());
        assert_eq!(scene.mesh(panel).unwrap().positions.len(), 16);
        assert_eq!(scene.width(panel), Some(2.0));

        // Doubling the width leaves the 0.4 wide left border 0.4 wide.
        scene.set_width(panel, 4.0).unwrap();
        assert_eq!(scene.scale_x(panel), Some(2.0));
        assert_eq!(scene.width(panel), Some(4.0));
        let mesh = scene.mesh(panel).unwrap();
        let left = scene.local_to_global(panel, mesh.positions[0]).unwrap();
        let inner = scene.local_to_global(panel, mesh.positions[1]).unwrap();
        assert!((inner.x - left.x - 0.4).abs() < 1e-9, "{left:?} {inner:?}");
        // Vertical lines stay where the unscaled grid put them.
        assert!((mesh.positions[4].y - -0.3).abs() < 1e-9);

        // The relaid geometry is what the pointer hits.
        assert_eq!(scene.hit_test(kurbo::Point::new(1.9, 0.1)), panel);

        // Plain geometry turns the grid off.
        scene.set_mesh(panel, None).unwrap();
        assert!(scene.nine_slice(panel).is_none());
    }

    #[test]
    fn unknown_keys_are_not_found() {
        let mut scene = Scene::default();
        let err = scene
            .create_sprite(&atlas(), "villain.png", &SpriteOptions::default())
            .unwrap_err();
        assert_eq!(err, SceneError::AssetNotFound("villain.png".into()));
        assert_eq!(err.kind(), crate::ErrorKind::NotFound);
        assert!(scene.is_empty());
    }
}
