use num_traits::Num;
use std::path::PathBuf;

pub fn num_by_env<N: Num + std::fmt::Display>(e: &str) -> Option<N>
{
    if let Some(v) = std::env::var(e).ok()
                     .and_then(|s| {N::from_str_radix(&s, 10).ok()}) {
        log::info!("{}: {}", e, v);
        Some(v)
    }
    else {
        None
    }
}

pub fn str_by_env(e: &str) -> Option<String>
{
    if let Some(v) = std::env::var(e).ok().filter(|s| !s.is_empty()) {
        log::info!("{}: {}", e, v);
        Some(v)
    }
    else {
        None
    }
}

/// Demo parameters.
#[derive(Debug, Clone)]
pub struct DemoParam
{
    /// Directory of the cached arrays and output images.
    pub raw_data: PathBuf,
    /// Number of payload components hidden in the carrier.
    pub hide_count: usize,
    /// Fraction of the original image size the carrier is resized to.
    pub resolution: f64,
    /// Amplitude of the random payload noise.
    pub payload_scale: f64,
    /// Hidden text.
    pub message: String,
    pub font_family: String,
    pub font_size: u32,
    /// Position of the text in pixels.
    pub text_x: i32,
    pub text_y: i32,
    pub seed: u64,
}

impl Default for DemoParam
{
    fn default() -> Self
    {
        DemoParam {
            raw_data: PathBuf::from("raw_data"),
            hide_count: 10,
            resolution: 0.5,
            payload_scale: 1.0,
            message: "HIDDEN".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 40,
            text_x: 10,
            text_y: 10,
            seed: 0,
        }
    }
}

impl DemoParam
{
    /// Builder pattern to modify the parameters.
    pub fn par<P: FnOnce(&mut DemoParam)>(mut self, f: P) -> Self
    {
        f(&mut self);
        self
    }
}

pub fn set_par_by_env(p: &mut DemoParam)
{
    p.raw_data = str_by_env("RAW_DATA").map(PathBuf::from).unwrap_or_else(|| p.raw_data.clone());
    p.hide_count = num_by_env("HIDE_COUNT").unwrap_or(p.hide_count);
    p.resolution = num_by_env("RESOLUTION").unwrap_or(p.resolution);
    p.payload_scale = num_by_env("PAYLOAD_SCALE").unwrap_or(p.payload_scale);
    p.message = str_by_env("MESSAGE").unwrap_or_else(|| p.message.clone());
    p.font_family = str_by_env("FONT_FAMILY").unwrap_or_else(|| p.font_family.clone());
    p.font_size = num_by_env("FONT_SIZE").unwrap_or(p.font_size);
    p.text_x = num_by_env("TEXT_X").unwrap_or(p.text_x);
    p.text_y = num_by_env("TEXT_Y").unwrap_or(p.text_y);
    p.seed = num_by_env("SEED").unwrap_or(p.seed);
}
