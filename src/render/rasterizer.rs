use std::fmt::Write as _;
use std::sync::Arc;

use crate::config::render_config::RenderConfig;
use crate::foundation::error::{BabaError, BabaResult};
use crate::render::fonts::{self, RasterizerOpts};
use crate::render::frame::FrameRGBA;
use crate::render::jitter::JitterSource;
use crate::render::layout::layout_grid;

/// Draws jittered glyph grids into luminance-mask frames.
///
/// The output is white glyphs on solid black. Output colors are applied later by
/// [`crate::quantize_frame`].
pub struct Rasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(&RasterizerOpts::default())
    }
}

impl Rasterizer {
    /// Build a rasterizer and load its font database once.
    pub fn new(opts: &RasterizerOpts) -> Self {
        Self {
            fontdb: fonts::build_fontdb(opts),
        }
    }

    /// Number of font faces available for glyph drawing.
    pub fn font_face_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Whether `family` resolves to an installed face without falling back.
    pub fn has_family(&self, family: &str) -> bool {
        fonts::has_family(&self.fontdb, family)
    }

    /// Render one raw frame of `config` with per-glyph jitter drawn from `jitter`.
    ///
    /// The frame is `config.frame_extent()` pixels square.
    #[tracing::instrument(skip_all, fields(text = %config.text))]
    pub fn render_frame(
        &self,
        config: &RenderConfig,
        jitter: &mut dyn JitterSource,
    ) -> BabaResult<FrameRGBA> {
        let extent = config.frame_extent();
        let svg = build_scene_svg(config, jitter);

        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            font_resolver: fonts::fallback_font_resolver(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts)
            .map_err(|e| BabaError::render(format!("failed to build glyph scene: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(extent, extent).ok_or_else(|| {
            BabaError::render(format!("failed to allocate {extent}x{extent} pixmap"))
        })?;
        pixmap.fill(resvg::tiny_skia::Color::BLACK);
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        // Opaque background: premultiplied bytes equal straight bytes.
        FrameRGBA::from_rgba8(extent, extent, pixmap.take())
    }
}

/// Build the SVG document for one frame: black square, one white `<text>` per character.
pub(crate) fn build_scene_svg(config: &RenderConfig, jitter: &mut dyn JitterSource) -> String {
    let extent = config.frame_extent();
    let chars: Vec<char> = config.text.chars().collect();
    let grid = layout_grid(chars.len(), config.canvas_extent, config.padding);
    tracing::debug!(
        chars = chars.len(),
        rows = grid.rows,
        cols = grid.cols,
        "laid out glyph grid"
    );

    let family = match config.font_family.trim() {
        "" => "sans-serif",
        f => f,
    };

    let mut svg = String::with_capacity(256 + chars.len() * 96);
    let _ = write!(
        svg,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{extent}" height="{extent}" viewBox="0 0 {extent} {extent}">"##
    );
    let _ = write!(
        svg,
        r##"<rect x="0" y="0" width="{extent}" height="{extent}" fill="#000000"/>"##
    );
    let _ = write!(
        svg,
        r##"<g font-family="{}" font-weight="bold" font-size="{}" fill="#ffffff" text-anchor="middle" dominant-baseline="central">"##,
        escape_xml(family),
        config.glyph_size
    );

    for cell in &grid.cells {
        let glyph: String = chars[cell.index].to_uppercase().collect();
        let [a, b, c, d, e, f] = jitter.next_jitter().transform_at(cell.center).as_coeffs();
        let _ = write!(
            svg,
            r#"<text x="0" y="0" transform="matrix({a} {b} {c} {d} {e} {f})">{}</text>"#,
            escape_xml(&glyph)
        );
    }

    svg.push_str("</g></svg>");
    svg
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if is_xml_char(c) => out.push(c),
            _ => out.push('\u{FFFD}'),
        }
    }
    out
}

/// XML 1.0 `Char` production; anything else makes the SVG parser reject the document.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/rasterizer.rs"]
mod tests;
