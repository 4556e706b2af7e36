use super::*;
use crate::paint::color::ColorDef;
use crate::paint::gradient::GradientKind;
use crate::paint::apply::PaintStop;

fn scene() -> MemoryScene {
    let mut s = MemoryScene::new();
    s.insert(SceneNode::new("g", "layer"));
    s.insert(
        SceneNode::new("rect", "a")
            .class("tile")
            .child_of("layer")
            .attr("x", "0")
            .attr("y", "0")
            .attr("width", "10")
            .attr("height", "20"),
    );
    s.insert(
        SceneNode::new("rect", "b")
            .class("tile")
            .class("hot")
            .child_of("layer")
            .attr("x", "20")
            .attr("y", "0")
            .attr("width", "10")
            .attr("height", "10")
            .transform(Affine::translate((5.0, 5.0))),
    );
    s.insert(SceneNode::new("path", "p").attr("d", "M0 0L10 0L10 10"));
    s
}

fn ids(v: Vec<ElementId>) -> Vec<String> {
    v.into_iter().map(|e| e.0).collect()
}

#[test]
fn selects_by_id_class_tag_and_lists() {
    let s = scene();
    assert_eq!(ids(s.select("#a")), ["a"]);
    assert_eq!(ids(s.select(".tile")), ["a", "b"]);
    assert_eq!(ids(s.select("rect.hot")), ["b"]);
    assert_eq!(ids(s.select("path, #a")), ["a", "p"]);
    assert!(s.select("#missing").is_empty());
}

#[test]
fn finds_descendants_only() {
    let s = scene();
    let layer = ElementId::new("layer");
    assert_eq!(s.find_within(&layer, ".hot"), Some(ElementId::new("b")));
    assert_eq!(s.find_within(&layer, "path"), None);
}

#[test]
fn group_bbox_unions_transformed_children() {
    let s = scene();
    assert_eq!(
        s.bbox(&ElementId::new("layer")),
        Some(Rect::new(0.0, 0.0, 35.0, 20.0))
    );
}

#[test]
fn resizes_rects_and_paths() {
    let mut s = scene();
    let a = ElementId::new("a");
    s.set_size(&a, 40.0, 5.0);
    assert_eq!(s.attr(&a, "width").as_deref(), Some("40"));
    assert_eq!(s.attr(&a, "height").as_deref(), Some("5"));

    let p = ElementId::new("p");
    s.set_size(&p, 20.0, 5.0);
    let bb = s.bbox(&p).unwrap();
    assert!((bb.width() - 20.0).abs() < 1e-9 && (bb.height() - 5.0).abs() < 1e-9);
}

#[test]
fn gradient_paint_is_registered_and_referenced() {
    let mut s = scene();
    let a = ElementId::new("a");
    let g = GradientPaint {
        id: "a-fill-gradient".into(),
        kind: GradientKind::Linear,
        angle: 0.0,
        stops: vec![PaintStop {
            offset: 0.0,
            color: ColorDef::rgba(0.0, 0.0, 0.0, 1.0),
        }],
        vector: None,
    };
    s.set_paint(&a, PaintChannel::Fill, Paint::Gradient(g.clone()));
    assert_eq!(s.attr(&a, "fill").as_deref(), Some("url(#a-fill-gradient)"));
    assert_eq!(s.gradient("a-fill-gradient"), Some(&g));

    s.set_paint(&a, PaintChannel::Stroke, Paint::Solid("red".into()));
    assert_eq!(s.attr(&a, "stroke").as_deref(), Some("red"));
}

#[test]
fn default_measurement_covers_shapes() {
    let s = scene();
    assert_eq!(s.total_length(&ElementId::new("a")), Some(60.0));
    let p = s.point_at_length(&ElementId::new("p"), 15.0).unwrap();
    assert!(p.distance(Point::new(10.0, 5.0)) < 1e-6);
    assert_eq!(s.total_length(&ElementId::new("layer")), None);
}

#[test]
fn snapshot_restores_transform_and_attributes() {
    use crate::scene::element::Snapshot;

    let mut s = scene();
    let b = ElementId::new("b");
    let snap = Snapshot::capture(&s, &b);
    s.set_transform(&b, Affine::scale(3.0));
    s.set_attr(&b, "width", Some("99".into()));
    s.set_attr(&b, "stroke-dasharray", Some("5".into()));
    snap.restore(&mut s, &b);
    assert_eq!(s.transform(&b), Affine::translate((5.0, 5.0)));
    assert_eq!(s.attr(&b, "width").as_deref(), Some("10"));
    assert_eq!(s.attr(&b, "stroke-dasharray"), None);
}
