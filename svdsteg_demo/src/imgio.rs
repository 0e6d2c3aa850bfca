use anyhow::{ensure, Context, Result};
use image::io::Reader as ImageReader;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};
use plotters::prelude::*;
use std::path::Path;
use svdsteg::prelude::*;

/// Reads an image as a grayscale matrix.
///
/// Returns a `height` by `width` matrix with pixel values in `0..=255`.
/// * `path` is an image file of any format the `image` crate decodes.
/// * `resolution` is the fraction in `(0, 1]` of the original size to resize to.
pub fn img_to_bw_mat<P: AsRef<Path>>(path: P, resolution: f64) -> Result<Mat<f64>>
{
    ensure!(resolution > 0. && resolution <= 1., "resolution {} outside (0, 1]", resolution);

    let path = path.as_ref();
    log::info!("file: {}", path.display());
    let in_img = ImageReader::open(path)
                 .with_context(|| format!("failed to open {}", path.display()))?
                 .decode()?;

    let in_mono = in_img.to_luma8();
    let width = ((in_mono.width() as f64 * resolution).round() as u32).max(1);
    let height = ((in_mono.height() as f64 * resolution).round() as u32).max(1);
    let mono = imageops::resize(&in_mono, width, height, FilterType::Lanczos3);
    log::info!("size: {}x{} -> {}x{}", in_mono.width(), in_mono.height(), width, height);

    let mat = Mat::new(height as usize, width as usize)
              .set_by(|r, c| mono.get_pixel(c as u32, r as u32).0[0] as f64);

    Ok(mat)
}

/// Writes a matrix as a grayscale PNG.
///
/// Values are scaled linearly so that `vmin` maps to black and `vmax` to white,
/// values out of that span being clipped.
/// Each bound defaults to the minimum or maximum of the matrix.
pub fn save_bw_png<P: AsRef<Path>>(mat: &Mat<f64>, path: P, vmin: Option<f64>, vmax: Option<f64>) -> Result<()>
{
    let path = path.as_ref();
    let (lo, hi) = mat.min_max().context("empty matrix")?;
    log::info!("{}: min {:.3e} max {:.3e}", path.display(), lo, hi);

    let lo = vmin.unwrap_or(lo);
    let hi = vmax.unwrap_or(hi);
    let span = if hi > lo {hi - lo} else {1.};

    let (nrows, ncols) = mat.size();
    let out_mono = ImageBuffer::from_fn(ncols as u32, nrows as u32, |x, y| {
        let v = (mat[(y as usize, x as usize)] - lo) / span;
        let v = if v < 0. {0.} else {v};
        let v = if v > 1. {1.} else {v};
        let v = (v * 255.).round() as u8;
        Luma::from([v])
    });
    out_mono.save(path).with_context(|| format!("failed to save {}", path.display()))?;

    Ok(())
}

/// Boolean mask of rasterized text.
pub struct TextMask
{
    nrows: usize,
    ncols: usize,
    mask: Vec<bool>,
}

impl TextMask
{
    /// Whether the pixel at row `r` and column `c` is covered by the text.
    pub fn is_set(&self, r: usize, c: usize) -> bool
    {
        assert!(r < self.nrows && c < self.ncols);

        self.mask[r * self.ncols + c]
    }

    /// Number of covered pixels.
    pub fn count(&self) -> usize
    {
        self.mask.iter().filter(|b| **b).count()
    }
}

/// Rasterizes `text` onto a blank `nrows` by `ncols` canvas.
///
/// * `family` is a system font family, e.g. `sans-serif`.
/// * `pos` is the upper-left `(x, y)` of the text in pixels.
pub fn text_mask(nrows: usize, ncols: usize, text: &str, family: &str, font_size: u32, pos: (i32, i32)) -> Result<TextMask>
{
    // RGB
    let mut buf = vec![0u8; nrows * ncols * 3];

    {
        let root = BitMapBackend::with_buffer(&mut buf, (ncols as u32, nrows as u32)).into_drawing_area();
        root.fill(&BLACK)?;

        let style = (family, font_size as f64).into_font().color(&WHITE);
        root.draw_text(text, &style, pos)
            .with_context(|| format!("failed to draw text with font family {}, try another FONT_FAMILY", family))?;
        root.present()?;
    }

    let mask = buf.chunks_exact(3).map(|px| px[0] > 127).collect();
    let mask = TextMask {nrows, ncols, mask};
    log::info!("text mask: {} of {} pixels", mask.count(), nrows * ncols);

    Ok(mask)
}

//

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_save_load()
    {
        let _ = env_logger::builder().is_test(true).try_init();

        let dir = std::env::temp_dir().join(format!("svdsteg_demo_imgio_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ramp.png");

        let m = Mat::new(6, 4).set_by(|r, c| (r * 4 + c) as f64);
        save_bw_png(&m, &path, None, None).unwrap();

        let r = img_to_bw_mat(&path, 1.).unwrap();
        assert_eq!(r.size(), (6, 4));
        assert_eq!(r[(0, 0)], 0.);
        assert_eq!(r[(5, 3)], 255.);
        for c in 0.. 3 {
            assert!(r[(0, c)] < r[(0, c + 1)]);
        }

        // clipped at both ends
        save_bw_png(&m, &path, Some(4.), Some(8.)).unwrap();
        let r = img_to_bw_mat(&path, 1.).unwrap();
        assert_eq!(r[(0, 3)], 0.);
        assert_eq!(r[(2, 1)], 255.);

        let r = img_to_bw_mat(&path, 0.5).unwrap();
        assert_eq!(r.size(), (3, 2));

        assert!(img_to_bw_mat(&path, 0.).is_err());
        assert!(img_to_bw_mat(&path, 1.5).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
