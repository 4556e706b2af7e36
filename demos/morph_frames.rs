use tweenline::{
    AnimationSpec, ElementId, ManualTicker, MemoryScene, Scene, SceneNode, Timeline,
    TimelineConfig, TimelineHooks,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut scene = MemoryScene::new();
    scene.insert(
        SceneNode::new("path", "shape")
            .attr("d", "M0 0L100 0L100 100L0 100Z")
            .attr("fill", "#ff0000"),
    );

    let config = TimelineConfig::from_json(r#"{"startDeferMs": 0}"#)?;
    let spec = AnimationSpec::from_json(
        r##"{
            "targets": "#shape",
            "d": [{"value": "M50 0L100 50L50 100L0 50Z", "duration": 500}],
            "fill": [{"value": "#0000ff", "duration": 500}],
            "rotate": [{"value": 45, "duration": 500, "easing": "easeInOutQuad"}]
        }"##,
    )?;

    let ticker = ManualTicker::new();
    let mut tl = Timeline::new(scene, config, TimelineHooks::new(), ticker.clone())?;
    tl.add(&spec)?;
    for (property, err) in tl.property_errors().iter().map(|e| (&e.property, &e.error)) {
        println!("skipped {property}: {err}");
    }

    let el = ElementId::new("shape");
    tl.play(tweenline::Direction::Forward, false, false);
    let mut now = 0.0;
    while ticker.take() {
        tl.tick(now);
        let scene = tl.scene();
        println!(
            "t={:>5.1} d={} fill={}",
            tl.elapsed(),
            scene.attr(&el, "d").unwrap_or_default(),
            scene.attr(&el, "fill").unwrap_or_default(),
        );
        now += 125.0;
    }

    Ok(())
}
