use bloomgarden::{
    FlowerKind, Garden, GardenConfig, Point, Viewport,
    render::{rasterize_svg, scene_to_svg},
    templates,
};

fn parse(svg: &str) -> usvg::Tree {
    usvg::Tree::from_str(svg, &usvg::Options::default()).expect("generated svg must parse")
}

#[test]
fn every_flower_fragment_parses_as_svg() {
    for kind in FlowerKind::ALL {
        let g = templates::generate(kind, None, 1.0).unwrap();
        let tree = parse(&g.to_svg());
        let size = tree.size();
        assert_eq!(f64::from(size.width()), g.width, "kind {kind}");
        assert_eq!(f64::from(size.height()), g.height, "kind {kind}");
    }
}

#[test]
fn butterfly_fragment_parses_as_svg() {
    let g = templates::butterfly("#00CED1");
    parse(&g.to_svg());
}

#[test]
fn scene_document_parses_and_keeps_paint_order() {
    let config = GardenConfig {
        viewport: Viewport::new(800.0, 600.0),
        seed: 5,
        ..GardenConfig::default()
    };
    let mut garden = Garden::new(config).unwrap();
    garden.set_ambient_spawns(false);
    garden.populate().unwrap();
    garden.advance(3.0);
    let _ = garden.add_at(Point::new(400.0, 500.0)).unwrap();

    let svg = scene_to_svg(&garden);
    parse(&svg);

    // Background first, then one painted group per scene node in insertion
    // order (sparkles render as bare circles).
    let sky = svg.find("#87CEEB").unwrap();
    let grass = svg.find("#7CFC00").unwrap();
    let first_node = svg.find("<g transform=\"matrix(").unwrap();
    assert!(sky < grass);
    assert!(grass < first_node);

    let flower_groups = svg.matches("<g transform=\"matrix(").count();
    assert_eq!(flower_groups, garden.scene().flower_count());
}

#[test]
fn scene_rasterizes_at_viewport_size() {
    let config = GardenConfig {
        viewport: Viewport::new(320.0, 240.0),
        seed: 9,
        ..GardenConfig::default()
    };
    let mut garden = Garden::new(config).unwrap();
    garden.set_ambient_spawns(false);
    garden.populate().unwrap();
    garden.advance(2.0);

    let frame = rasterize_svg(&scene_to_svg(&garden)).unwrap();
    assert_eq!(frame.width, 320);
    assert_eq!(frame.height, 240);
    assert_eq!(frame.rgba8.len(), 320 * 240 * 4);

    // The sky fills the top-left corner.
    assert_eq!(frame.rgba8[3], 255);
}

#[test]
fn malformed_markup_is_a_render_error() {
    let err = rasterize_svg("<svg").unwrap_err();
    assert!(err.to_string().contains("render error"));
}
