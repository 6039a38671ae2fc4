//! SVG rasterization with resvg.

use std::sync::{Arc, LazyLock};

use image::RgbaImage;
use resvg::tiny_skia::{Pixmap, Transform};
use usvg::fontdb;

use crate::image::CodecError;

/// Canvas limit, roughly an 8K square.
const MAX_PIXELS: u64 = 8192 * 8192;

/// System fonts for `<text>`, loaded on first render.
static FONTS: LazyLock<Arc<fontdb::Database>> = LazyLock::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    Arc::new(db)
});

fn options() -> usvg::Options<'static> {
    usvg::Options {
        fontdb: Arc::clone(&FONTS),
        ..Default::default()
    }
}

/// Render `markup` at `width` pixels, height following the drawing's size.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rasterize(markup: &str, width: u32) -> Result<RgbaImage, CodecError> {
    let tree = usvg::Tree::from_str(markup, &options())?;

    let size = tree.size();
    let (source_w, source_h) = (size.width(), size.height());
    let height = (width as f32 * source_h / source_w).round().max(1.0) as u32;

    if width == 0 || u64::from(width) * u64::from(height) > MAX_PIXELS {
        return Err(CodecError::Canvas(width, height));
    }

    let mut pixmap = Pixmap::new(width, height).ok_or(CodecError::Canvas(width, height))?;
    let transform = Transform::from_scale(width as f32 / source_w, height as f32 / source_h);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();

    RgbaImage::from_raw(width, height, data).ok_or(CodecError::Canvas(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED_BAR: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50" viewBox="0 0 100 50"><rect width="100" height="50" fill="#ff0000"/></svg>"##;

    #[test]
    fn test_rasterize_follows_ratio() {
        let img = rasterize(RED_BAR, 300).unwrap();
        assert_eq!(img.dimensions(), (300, 150));

        let center = img.get_pixel(150, 75);
        assert_eq!(center.0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_transparent_background() {
        let markup = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="5" height="5" fill="#00f"/></svg>"##;
        let img = rasterize(markup, 20).unwrap();
        assert_eq!(img.get_pixel(2, 2).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(18, 18).0[3], 0);
    }

    #[test]
    fn test_embedded_bitmap_is_drawn() {
        // 4x4 opaque blue PNG
        let markup = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="10" height="10" viewBox="0 0 10 10"><image width="10" height="10" preserveAspectRatio="none" xlink:href="data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAQAAAAECAIAAAAmkwkpAAAAEElEQVR4nGNgYPiPhIjiAACOsw/xs6MvMwAAAABJRU5ErkJggg=="/></svg>"#;
        let img = rasterize(markup, 100).unwrap();
        assert_eq!(img.get_pixel(50, 50).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_invalid_markup() {
        assert!(matches!(
            rasterize("<html></html>", 100),
            Err(CodecError::Svg(_))
        ));
    }

    #[test]
    fn test_oversized_canvas_rejected() {
        let tall = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="10000"/>"#;
        assert!(matches!(
            rasterize(tall, 1200),
            Err(CodecError::Canvas(1200, _))
        ));
    }
}
