use super::*;
use usvg::fontdb::{Family, Stretch, Style};

#[test]
fn requested_families_come_before_generic_fallbacks() {
    let requested = [
        usvg::FontFamily::Named("Arial".to_owned()),
        usvg::FontFamily::Monospace,
    ];
    assert_eq!(
        query_families(&requested),
        vec![
            Family::Name("Arial"),
            Family::Monospace,
            Family::SansSerif,
            Family::Serif,
            Family::Monospace,
        ]
    );
}

#[test]
fn stretch_and_style_are_carried_into_the_query() {
    assert_eq!(
        fontdb_stretch(usvg::FontStretch::Condensed),
        Stretch::Condensed
    );
    assert_eq!(
        fontdb_stretch(usvg::FontStretch::UltraExpanded),
        Stretch::UltraExpanded
    );
    assert_eq!(fontdb_stretch(usvg::FontStretch::Normal), Stretch::Normal);
    assert_eq!(fontdb_style(usvg::FontStyle::Italic), Style::Italic);
}

#[test]
fn unreadable_font_dir_yields_empty_database() {
    let db = build_fontdb(&RasterizerOpts {
        load_system_fonts: false,
        font_dirs: vec![PathBuf::from("target/no-such-font-dir")],
    });
    assert_eq!(db.len(), 0);
    assert!(!has_family(&db, "Arial"));
}
