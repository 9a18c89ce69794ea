use std::{fmt, path::PathBuf};

use crate::game::LevelTable;

pub const IMAGES_DIR: &str = "images";
pub const DEFAULT_BACKGROUND_IMAGE: &str = "dialer_button_bg.png";

/// Opaque image identifier handed to the display sink.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait AssetResolver {
    fn level_image(&self, level: u16) -> ImageRef;
}

impl<F> AssetResolver for F
where
    F: Fn(u16) -> ImageRef,
{
    fn level_image(&self, level: u16) -> ImageRef {
        self(level)
    }
}

/// Resolves level backgrounds under `<resource_dir>/images/`.
#[derive(Clone, Debug)]
pub struct ResourceAssets {
    resource_dir: PathBuf,
    level_images: Vec<String>,
}

impl ResourceAssets {
    pub fn new(resource_dir: impl Into<PathBuf>, levels: &LevelTable) -> Self {
        Self {
            resource_dir: resource_dir.into(),
            level_images: levels.iter().map(|level| level.image.clone()).collect(),
        }
    }

    pub fn image(&self, file: &str) -> ImageRef {
        let path = self.resource_dir.join(IMAGES_DIR).join(file);
        ImageRef(path.to_string_lossy().into_owned())
    }
}

impl AssetResolver for ResourceAssets {
    fn level_image(&self, level: u16) -> ImageRef {
        let file = usize::from(level)
            .checked_sub(1)
            .and_then(|index| self.level_images.get(index));
        match file {
            Some(file) => self.image(file),
            None => {
                log::warn!("assets: no image for level {level}; using background");
                self.image(DEFAULT_BACKGROUND_IMAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn level_images_resolve_under_resource_dir() {
        let assets = ResourceAssets::new("res", &LevelTable::reference());
        let expected = Path::new("res").join("images").join("lv3.png");
        assert_eq!(
            assets.level_image(3).as_str(),
            expected.to_string_lossy().as_ref()
        );
    }

    #[test]
    fn unknown_level_falls_back_to_background() {
        let assets = ResourceAssets::new("res", &LevelTable::reference());
        let expected = Path::new("res")
            .join("images")
            .join(DEFAULT_BACKGROUND_IMAGE);
        assert_eq!(
            assets.level_image(0).as_str(),
            expected.to_string_lossy().as_ref()
        );
        assert_eq!(assets.level_image(9), assets.level_image(0));
    }

    #[test]
    fn closures_act_as_resolvers() {
        let resolver = |level: u16| ImageRef::new(format!("mem://{level}"));
        assert_eq!(resolver.level_image(2).as_str(), "mem://2");
    }
}
