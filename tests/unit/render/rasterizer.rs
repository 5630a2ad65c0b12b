use super::*;
use crate::render::jitter::{NoJitter, SeededJitter};

fn fontless() -> Rasterizer {
    Rasterizer::new(&RasterizerOpts {
        load_system_fonts: false,
        font_dirs: Vec::new(),
    })
}

#[test]
fn scene_has_one_text_node_per_character() {
    let cfg = RenderConfig {
        text: "baba!".to_owned(),
        ..RenderConfig::default()
    };
    let svg = build_scene_svg(&cfg, &mut NoJitter);
    assert_eq!(svg.matches("<text ").count(), 5);
    assert!(svg.contains(">B</text>"));
    assert!(svg.contains(">A</text>"));
    assert!(svg.contains(">!</text>"));
    assert!(svg.contains(r#"font-weight="bold""#));
    assert!(svg.contains(r#"font-family="Arial""#));
    assert!(svg.contains(r#"font-size="50""#));
}

#[test]
fn scene_escapes_markup_and_uppercases_unicode() {
    let cfg = RenderConfig {
        text: "<ß&".to_owned(),
        font_family: "Evil\" Font".to_owned(),
        ..RenderConfig::default()
    };
    let svg = build_scene_svg(&cfg, &mut NoJitter);
    assert!(svg.contains(">&lt;</text>"));
    assert!(svg.contains(">SS</text>"));
    assert!(svg.contains(">&amp;</text>"));
    assert!(svg.contains("Evil&quot; Font"));
}

#[test]
fn unjittered_glyphs_sit_on_cell_centers() {
    let cfg = RenderConfig::default();
    let svg = build_scene_svg(&cfg, &mut NoJitter);
    assert!(svg.contains("matrix(1 0 0 1 31 31)"));
    assert!(svg.contains("matrix(1 0 0 1 81 31)"));
    assert!(svg.contains("matrix(1 0 0 1 31 81)"));
    assert!(svg.contains("matrix(1 0 0 1 81 81)"));
}

#[test]
fn seeded_scenes_differ_by_seed() {
    let cfg = RenderConfig::default();
    let a = build_scene_svg(&cfg, &mut SeededJitter::new(1));
    let b = build_scene_svg(&cfg, &mut SeededJitter::new(2));
    let a2 = build_scene_svg(&cfg, &mut SeededJitter::new(1));
    assert_ne!(a, b);
    assert_eq!(a, a2);
}

#[test]
fn frame_size_is_extent_plus_twice_padding() {
    let r = fontless();
    for (extent, padding) in [(24, 0), (100, 6), (101, 3), (256, 30), (57, 17)] {
        let cfg = RenderConfig {
            canvas_extent: extent,
            padding,
            ..RenderConfig::default()
        };
        let frame = r.render_frame(&cfg, &mut SeededJitter::new(9)).unwrap();
        let side = extent + 2 * padding;
        assert_eq!((frame.width, frame.height), (side, side));
        assert_eq!(frame.data.len(), (side * side * 4) as usize);
    }
}

#[test]
fn background_is_opaque_black() {
    let r = fontless();
    let cfg = RenderConfig {
        text: String::new(),
        ..RenderConfig::default()
    };
    let frame = r.render_frame(&cfg, &mut NoJitter).unwrap();
    let colors = frame.distinct_colors();
    assert_eq!(colors.len(), 1);
    assert!(colors.contains(&[0, 0, 0, 255]));
}

#[test]
fn non_xml_characters_are_replaced_instead_of_failing() {
    let r = fontless();
    let cfg = RenderConfig {
        text: "A\u{FFFE}B".to_owned(),
        font_family: "\u{FFFF}".to_owned(),
        ..RenderConfig::default()
    };
    let frame = r.render_frame(&cfg, &mut NoJitter).unwrap();
    assert_eq!((frame.width, frame.height), (112, 112));

    assert_eq!(escape_xml("a\u{0}b\u{FFFF}c\u{D7FF}"), "a\u{FFFD}b\u{FFFD}c\u{D7FF}");
    assert_eq!(escape_xml("\u{85}\t\u{1F600}"), "\u{85}\t\u{1F600}");
}
