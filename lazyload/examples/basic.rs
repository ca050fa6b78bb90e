// Example: scanning a static page layout while scrolling down.
use lazyload::{ClientRect, ViewportState, Worklist};

#[derive(Debug)]
struct Image {
    name: &'static str,
    doc_top: f64,
    height: f64,
}

fn main() {
    let mut worklist: Worklist<Image> = (0..12)
        .map(|i| Image {
            name: ["hero", "card", "banner"][i % 3],
            doc_top: i as f64 * 350.0,
            height: 240.0,
        })
        .collect();

    for scroll in [0.0, 500.0, 1500.0, 3000.0, 3600.0] {
        let viewport = ViewportState::new(scroll, 600.0);
        let geometry = |img: &Image| ClientRect::new(img.doc_top - scroll, img.height);
        let out = worklist.scan(viewport.window(), &geometry);

        let names: Vec<_> = out.revealed.iter().map(|img| img.name).collect();
        println!(
            "scroll={scroll} revealed={names:?} remaining={} drained={}",
            worklist.len(),
            out.drained
        );
        if out.drained {
            break;
        }
    }
}
