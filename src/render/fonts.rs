use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the rasterizer looks for fonts.
#[derive(Clone, Debug)]
pub struct RasterizerOpts {
    /// Load every font the platform exposes.
    pub load_system_fonts: bool,
    /// Extra directories scanned (non-recursively) for `.ttf`, `.otf` and `.ttc` files.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for RasterizerOpts {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

pub(crate) fn build_fontdb(opts: &RasterizerOpts) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    if opts.load_system_fonts {
        db.load_system_fonts();
    }
    for dir in &opts.font_dirs {
        load_fonts_from_dir(&mut db, dir);
    }
    tracing::debug!(faces = db.len(), "font database ready");
    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

/// Resolve the requested families first, then generic families, then any face at all.
///
/// Weight, stretch and style come from the `<text>` node, so the bold weight set on the glyph
/// group reaches the query.
pub(crate) fn fallback_font_resolver() -> usvg::FontResolver<'static> {
    usvg::FontResolver {
        select_font: Box::new(|font, fontdb| {
            let families = query_families(font.families());
            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: fontdb_stretch(font.stretch()),
                style: fontdb_style(font.style()),
            };
            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|face| face.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

/// Requested families in order, followed by the generic sans-serif, serif and monospace.
fn query_families(requested: &[usvg::FontFamily]) -> Vec<usvg::fontdb::Family<'_>> {
    use usvg::fontdb::Family;

    requested
        .iter()
        .map(|family| match family {
            usvg::FontFamily::Serif => Family::Serif,
            usvg::FontFamily::SansSerif => Family::SansSerif,
            usvg::FontFamily::Cursive => Family::Cursive,
            usvg::FontFamily::Fantasy => Family::Fantasy,
            usvg::FontFamily::Monospace => Family::Monospace,
            usvg::FontFamily::Named(name) => Family::Name(name),
        })
        .chain([Family::SansSerif, Family::Serif, Family::Monospace])
        .collect()
}

fn fontdb_stretch(stretch: usvg::FontStretch) -> usvg::fontdb::Stretch {
    use usvg::fontdb::Stretch;

    match stretch {
        usvg::FontStretch::UltraCondensed => Stretch::UltraCondensed,
        usvg::FontStretch::ExtraCondensed => Stretch::ExtraCondensed,
        usvg::FontStretch::Condensed => Stretch::Condensed,
        usvg::FontStretch::SemiCondensed => Stretch::SemiCondensed,
        usvg::FontStretch::Normal => Stretch::Normal,
        usvg::FontStretch::SemiExpanded => Stretch::SemiExpanded,
        usvg::FontStretch::Expanded => Stretch::Expanded,
        usvg::FontStretch::ExtraExpanded => Stretch::ExtraExpanded,
        usvg::FontStretch::UltraExpanded => Stretch::UltraExpanded,
    }
}

fn fontdb_style(style: usvg::FontStyle) -> usvg::fontdb::Style {
    match style {
        usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
        usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
        usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
    }
}

/// Whether `family` names a face in `db` (case-insensitive).
pub(crate) fn has_family(db: &usvg::fontdb::Database, family: &str) -> bool {
    let wanted = family.trim();
    db.faces().any(|face| {
        face.families
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(wanted))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/fonts.rs"]
mod tests;
