//! Screenshot cropper: cuts the fixed inventory-grid thumbnail positions out
//! of raw menu screenshots.
//!
//! The rectangle table is hand-calibrated against 1920x1080 screenshots of
//! the in-game customization menu. Recalibrating for another resolution means
//! editing `CROP_ORIGINS`, not code.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use image::DynamicImage;

use crate::error::GalleryError;

/// Size of one thumbnail cell in the menu grid.
pub const CROP_WIDTH: u32 = 200;
pub const CROP_HEIGHT: u32 = 130;

/// Top-left corners of the eight thumbnail cells, calibrated at 1920x1080.
pub const CROP_ORIGINS: [(u32, u32); 8] = [
    (1341, 323),
    (1545, 318),
    (1341, 450),
    (1545, 451),
    (1341, 580),
    (1545, 582),
    (1341, 708),
    (1545, 714),
];

/// Minimum source dimensions that fit every rectangle in the table.
pub fn required_extent() -> (u32, u32) {
    let w = CROP_ORIGINS.iter().map(|(x, _)| x + CROP_WIDTH).max().unwrap_or(0);
    let h = CROP_ORIGINS.iter().map(|(_, y)| y + CROP_HEIGHT).max().unwrap_or(0);
    (w, h)
}

/// Cut all table rectangles out of one screenshot.
pub fn crop_all(img: &DynamicImage) -> Vec<DynamicImage> {
    CROP_ORIGINS
        .iter()
        .map(|&(x, y)| img.crop_imm(x, y, CROP_WIDTH, CROP_HEIGHT))
        .collect()
}

/// Screenshot files in `dir` matching `screenshot*.png`, sorted by name.
fn find_screenshots(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("cannot read directory {}", dir.display()))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.starts_with("screenshot") && name.ends_with(".png") {
                sources.push(path);
            }
        }
    }
    sources.sort();
    Ok(sources)
}

/// Crop every screenshot in `dir`, writing `extracted-NN-P.png` files
/// alongside the sources.
pub fn run_crop(dir: &Path) -> Result<()> {
    let sources = find_screenshots(dir)?;
    if sources.is_empty() {
        println!("No screenshot*.png files found in {}", dir.display());
        return Ok(());
    }

    let (req_w, req_h) = required_extent();
    for (main_idx, source) in sources.iter().enumerate() {
        let img = image::open(source).map_err(|e| GalleryError::ImageFormat {
            path: source.clone(),
            source: e,
        })?;

        // Guard against screenshots taken at the wrong resolution; the crop
        // table only makes sense at its calibrated extent.
        if img.width() < req_w || img.height() < req_h {
            bail!(
                "{} is {}x{}, smaller than the {}x{} crop calibration",
                source.display(),
                img.width(),
                img.height(),
                req_w,
                req_h
            );
        }

        for (area_idx, crop) in crop_all(&img).iter().enumerate() {
            let out = dir.join(format!(
                "extracted-{:02}-{}.png",
                main_idx + 1,
                area_idx + 1
            ));
            println!("{}", out.display());
            crop.save(&out)
                .with_context(|| format!("cannot write {}", out.display()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("crop-test-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn table_fits_calibrated_resolution() {
        let (w, h) = required_extent();
        assert_eq!((w, h), (1745, 844));
        assert!(w <= 1920 && h <= 1080);
    }

    #[test]
    fn crops_have_cell_dimensions() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(1920, 1080));
        let crops = crop_all(&img);
        assert_eq!(crops.len(), CROP_ORIGINS.len());
        for crop in &crops {
            assert_eq!((crop.width(), crop.height()), (CROP_WIDTH, CROP_HEIGHT));
        }
    }

    #[test]
    fn crops_sample_their_origin_pixel() {
        let mut buf = RgbaImage::new(1920, 1080);
        for (i, &(x, y)) in CROP_ORIGINS.iter().enumerate() {
            buf.put_pixel(x, y, Rgba([i as u8, 0, 0, 255]));
        }
        let crops = crop_all(&DynamicImage::ImageRgba8(buf));
        for (i, crop) in crops.iter().enumerate() {
            assert_eq!(crop.to_rgba8().get_pixel(0, 0), &Rgba([i as u8, 0, 0, 255]));
        }
    }

    #[test]
    fn run_crop_writes_one_file_per_rectangle() {
        let dir = temp_dir("full");
        RgbaImage::new(1920, 1080)
            .save(dir.join("screenshot0001.png"))
            .unwrap();

        run_crop(&dir).unwrap();

        for pos in 1..=CROP_ORIGINS.len() {
            let out = dir.join(format!("extracted-01-{}.png", pos));
            let (w, h) = image::image_dimensions(&out).unwrap();
            assert_eq!((w, h), (CROP_WIDTH, CROP_HEIGHT));
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn run_crop_rejects_undersized_screenshot() {
        let dir = temp_dir("small");
        RgbaImage::new(1280, 720)
            .save(dir.join("screenshot0001.png"))
            .unwrap();

        let err = run_crop(&dir).unwrap_err();
        assert!(err.to_string().contains("smaller than"));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn run_crop_ignores_other_files() {
        let dir = temp_dir("ignore");
        RgbaImage::new(1920, 1080)
            .save(dir.join("vacation.png"))
            .unwrap();

        run_crop(&dir).unwrap();
        assert!(!dir.join("extracted-01-1.png").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
