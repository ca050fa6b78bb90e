use std::cell::RefCell;
use std::rc::Rc;

use lazyload::{ClientRect, LoadOutcome, TickScheduler, Trigger, ViewportState};
use lazyload_adapter::{Controller, ImageElement, LoaderOptions};

// Example: a host binding in miniature. A real one would forward these calls to web-sys
// (`class_list()`, `set_src`, `dataset()`) and `request_animation_frame`.

#[derive(Clone)]
struct Img(Rc<RefCell<Node>>);

struct Node {
    doc_top: f64,
    classes: Vec<String>,
    src: String,
    data_src: String,
}

impl ImageElement for Img {
    fn add_class(&self, class: &str) {
        self.0.borrow_mut().classes.push(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    fn set_src(&self, src: &str) {
        self.0.borrow_mut().src = src.to_string();
    }

    fn set_srcset(&self, _srcset: &str) {}

    fn data_src(&self) -> Option<String> {
        Some(self.0.borrow().data_src.clone())
    }

    fn data_srcset(&self) -> Option<String> {
        None
    }
}

#[derive(Default)]
struct AnimationFrames {
    requested: usize,
}

impl TickScheduler for AnimationFrames {
    fn request_tick(&mut self) {
        self.requested += 1;
    }
}

fn main() {
    let page: Vec<Img> = (0..6)
        .map(|i| {
            Img(Rc::new(RefCell::new(Node {
                doc_top: i as f64 * 700.0,
                classes: Vec::new(),
                src: String::new(),
                data_src: format!("/photos/{i}.webp"),
            })))
        })
        .collect();

    let options = LoaderOptions::new().with_on_load(|_: &Img, outcome: LoadOutcome| {
        println!("  load finished: {outcome:?}");
    });
    let mut c = Controller::with_elements(page.clone(), options, AnimationFrames::default())
        .expect("default options are valid");

    let subs = c.init();
    println!("subscribe to {subs:?}");

    for scroll in [0.0, 400.0, 900.0, 1800.0, 2900.0, 3500.0] {
        // A burst of scroll events within one frame.
        c.on_event(Trigger::Scroll);
        c.on_event(Trigger::Scroll);

        let geometry = |img: &Img| ClientRect::new(img.0.borrow().doc_top - scroll, 400.0);
        let report = c.on_frame(&ViewportState::new(scroll, 800.0), &geometry);
        println!("scroll={scroll} {report:?}");

        for img in &page {
            let node = img.0.borrow();
            let loading = node.classes.iter().any(|c| c == "loading");
            let swapped = node.src == node.data_src;
            drop(node);
            if loading && swapped {
                c.settle(img, LoadOutcome::Loaded);
            }
        }
        if report.drained {
            println!("drained; tear down listeners");
            break;
        }
    }
    println!("frames requested: {}", c.scheduler().host().requested);
}
