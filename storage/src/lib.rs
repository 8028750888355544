// storage loads heightmaps and settings from disk and writes baked maps back

pub mod models;

use std::fs;
use std::path::{Path, PathBuf};

use ao_core::{ConfigError, HeightField, InputError};
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use thiserror::Error;

use crate::models::BakeSettings;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to open heightmap '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("heightmap '{path}' is unusable: {source}")]
    Heightmap {
        path: PathBuf,
        #[source]
        source: InputError,
    },

    #[error("cannot tell the image format of '{path}' from its extension")]
    UnknownFormat { path: PathBuf },

    #[error("failed to encode '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings '{path}': {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid settings: {0}")]
    Config(#[from] ConfigError),
}

// Heights from the red (or luma) channel, in 8-bit units whatever the
// stored depth, so 8-bit images keep their raw values.
pub fn heightfield_from_image(img: &DynamicImage) -> Result<HeightField, InputError> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let heights: Vec<f32> = match img {
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => img
            .to_rgba32f()
            .pixels()
            .map(|p| p.0[0] * 255.0)
            .collect(),
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => img
            .to_rgba16()
            .pixels()
            .map(|p| p.0[0] as f32 / 257.0)
            .collect(),
        _ => img.to_rgba8().pixels().map(|p| p.0[0] as f32).collect(),
    };
    HeightField::from_raw(w, h, heights)
}

pub fn load_heightmap(path: &Path) -> Result<HeightField, StorageError> {
    let img = image::open(path).map_err(|source| StorageError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let field = heightfield_from_image(&img).map_err(|source| StorageError::Heightmap {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "loaded heightmap '{}' ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    Ok(field)
}

// Write the baked AO texture. The image lands under a temporary name first
// and is renamed into place, so a failed run never leaves a partial file.
pub fn save_ao_map(path: &Path, img: &RgbaImage) -> Result<(), StorageError> {
    write_atomically(path, |tmp, format| img.save_with_format(tmp, format))
}

// Write the shaded preview
pub fn save_preview(path: &Path, img: &RgbImage) -> Result<(), StorageError> {
    write_atomically(path, |tmp, format| img.save_with_format(tmp, format))
}

pub fn load_settings(path: &Path) -> Result<BakeSettings, StorageError> {
    let text = fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    BakeSettings::from_toml_str(&text).map_err(|source| StorageError::Settings {
        path: path.to_path_buf(),
        source,
    })
}

fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.partial", name))
}

fn write_atomically<F>(path: &Path, write: F) -> Result<(), StorageError>
where
    F: FnOnce(&Path, ImageFormat) -> image::ImageResult<()>,
{
    let format = ImageFormat::from_path(path).map_err(|_| StorageError::UnknownFormat {
        path: path.to_path_buf(),
    })?;
    let tmp = partial_path(path);

    if let Err(source) = write(&tmp, format) {
        let _ = fs::remove_file(&tmp);
        return Err(StorageError::Encode {
            path: path.to_path_buf(),
            source,
        });
    }
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(StorageError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    log::debug!("wrote '{}' as {:?}", path.display(), format);
    Ok(())
}
