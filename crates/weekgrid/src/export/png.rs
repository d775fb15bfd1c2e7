//! PNG rasterization of SVG documents.

use log::debug;
use resvg::{
    tiny_skia::{Pixmap, Transform},
    usvg,
};

use super::Error;

/// Rasterizes SVG text to PNG bytes.
///
/// `scale` is the number of output pixels per SVG user unit. Labels are
/// rendered with the system fonts.
///
/// # Errors
///
/// Returns [`Error::Render`] when the SVG cannot be parsed, the scaled
/// surface is empty or too large, or PNG encoding fails.
pub fn rasterize(svg: &str, scale: f32) -> Result<Vec<u8>, Error> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Error::Render(format!(
            "scale must be a finite number greater than zero, got {scale}"
        )));
    }

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|err| Error::Render(format!("failed to parse generated SVG: {err}")))?;

    let size = tree.size().to_int_size();
    let scaled_width = (size.width() as f32 * scale).ceil();
    let scaled_height = (size.height() as f32 * scale).ceil();

    if scaled_width < 1.0 || scaled_height < 1.0 {
        return Err(Error::Render(
            "scaled dimensions collapsed below 1px".to_string(),
        ));
    }

    if scaled_width > u32::MAX as f32 || scaled_height > u32::MAX as f32 {
        return Err(Error::Render(
            "scaled dimensions exceed supported limits".to_string(),
        ));
    }

    let (width, height) = (scaled_width as u32, scaled_height as u32);
    debug!(width, height, scale; "Rasterizing SVG");

    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        Error::Render(format!("failed to allocate {width}x{height} surface"))
    })?;

    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|err| Error::Render(format!("failed to encode PNG output: {err}")))
}
