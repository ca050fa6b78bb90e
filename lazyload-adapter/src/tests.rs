use crate::*;

use lazyload::{ClientRect, LoadOutcome, Trigger, ViewportState};

use std::cell::RefCell;
use std::format;
use std::rc::Rc;
use std::string::{String, ToString};
use std::sync::{Arc, Mutex};
use std::vec::Vec;

#[derive(Debug, Default)]
struct ImgState {
    id: u32,
    doc_top: f64,
    height: f64,
    classes: Vec<String>,
    src: Option<String>,
    srcset: Option<String>,
    data_src: Option<String>,
    data_srcset: Option<String>,
}

/// A DOM-like shared handle: clones point at the same node.
#[derive(Clone, Debug)]
struct FakeImg(Rc<RefCell<ImgState>>);

impl FakeImg {
    fn new(id: u32, doc_top: f64, height: f64) -> Self {
        Self(Rc::new(RefCell::new(ImgState {
            id,
            doc_top,
            height,
            data_src: Some(format!("img/{id}.jpg")),
            ..ImgState::default()
        })))
    }

    fn with_srcset(self, srcset: &str) -> Self {
        self.0.borrow_mut().data_srcset = Some(srcset.to_string());
        self
    }

    fn without_data_src(self) -> Self {
        self.0.borrow_mut().data_src = None;
        self
    }

    fn id(&self) -> u32 {
        self.0.borrow().id
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn src(&self) -> Option<String> {
        self.0.borrow().src.clone()
    }

    fn srcset(&self) -> Option<String> {
        self.0.borrow().srcset.clone()
    }
}

impl ImageElement for FakeImg {
    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.borrow_mut().classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    fn set_src(&self, src: &str) {
        self.0.borrow_mut().src = Some(src.to_string());
    }

    fn set_srcset(&self, srcset: &str) {
        self.0.borrow_mut().srcset = Some(srcset.to_string());
    }

    fn data_src(&self) -> Option<String> {
        self.0.borrow().data_src.clone()
    }

    fn data_srcset(&self) -> Option<String> {
        self.0.borrow().data_srcset.clone()
    }
}

#[derive(Debug, Default)]
struct CountingScheduler {
    requests: usize,
}

impl lazyload::TickScheduler for CountingScheduler {
    fn request_tick(&mut self) {
        self.requests += 1;
    }
}

const VIEWPORT_HEIGHT: f64 = 500.0;

/// Ten images, 200px tall, every 400px.
fn page() -> Vec<FakeImg> {
    (0..10)
        .map(|i| FakeImg::new(i, i as f64 * 400.0, 200.0))
        .collect()
}

fn shows_placeholder(img: &FakeImg) -> bool {
    img.src().as_deref() == Some(PLACEHOLDER_SRC)
}

fn geometry_at(scroll: f64) -> impl Fn(&FakeImg) -> ClientRect {
    move |img: &FakeImg| {
        let s = img.0.borrow();
        ClientRect::new(s.doc_top - scroll, s.height)
    }
}

fn frame_at(c: &mut Controller<FakeImg, CountingScheduler>, scroll: f64) -> FrameReport {
    c.on_frame(
        &ViewportState::new(scroll, VIEWPORT_HEIGHT),
        &geometry_at(scroll),
    )
}

fn controller(
    imgs: &[FakeImg],
    options: LoaderOptions<FakeImg>,
) -> Controller<FakeImg, CountingScheduler> {
    Controller::with_elements(imgs.to_vec(), options, CountingScheduler::default())
        .unwrap()
}

type Settled = Arc<Mutex<Vec<(u32, LoadOutcome)>>>;

fn recording_options() -> (LoaderOptions<FakeImg>, Settled) {
    let settled: Settled = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&settled);
    let options = LoaderOptions::new().with_on_load(move |img: &FakeImg, outcome| {
        sink.lock().unwrap().push((img.id(), outcome));
    });
    (options, settled)
}

#[test]
fn init_marks_elements_loading_with_placeholder() {
    let imgs = page();
    let mut c = controller(&imgs, LoaderOptions::new());
    assert_eq!(c.phase(), Phase::Created);

    let subs = c.init();
    assert_eq!(
        subs,
        Subscriptions {
            scroll: true,
            resize: true,
            mutation: true,
        }
    );
    assert_eq!(c.phase(), Phase::Active);
    for img in &imgs {
        assert!(img.has_class("loading"));
        assert_eq!(img.src().as_deref(), Some(PLACEHOLDER_SRC));
    }
    // The initial trigger asked for exactly one frame.
    assert_eq!(c.scheduler().host().requests, 1);
    assert!(c.scheduler().is_pending());
}

#[test]
fn placeholder_can_be_disabled() {
    let imgs = page();
    let mut c = controller(&imgs, LoaderOptions::new().with_placeholder(false));
    c.init();
    assert!(imgs[0].has_class("loading"));
    assert_eq!(imgs[0].src(), None);
}

#[test]
fn events_before_init_are_ignored() {
    let imgs = page();
    let mut c = controller(&imgs, LoaderOptions::new());
    assert_eq!(c.on_event(Trigger::Scroll), EventResponse::Ignored);
    assert_eq!(frame_at(&mut c, 0.0).revealed, 0);
    assert_eq!(c.scheduler().host().requests, 0);
    assert!(!imgs[0].has_class("loading"));
}

#[test]
fn initial_frame_reveals_above_the_fold() {
    let imgs = page();
    let mut c = controller(&imgs, LoaderOptions::new());
    c.init();

    let report = frame_at(&mut c, 0.0);
    assert_eq!(
        report,
        FrameReport {
            revealed: 2,
            remaining: 8,
            drained: false,
        }
    );
    assert_eq!(imgs[0].src().as_deref(), Some("img/0.jpg"));
    assert_eq!(imgs[1].src().as_deref(), Some("img/1.jpg"));
    assert_eq!(imgs[2].src().as_deref(), Some(PLACEHOLDER_SRC));
    // Still loading until the host reports the outcome.
    assert!(imgs[0].has_class("loading"));
}

#[test]
fn triggers_within_a_frame_coalesce() {
    let imgs = page();
    let mut c = controller(&imgs, LoaderOptions::new());
    c.init();

    assert_eq!(c.on_event(Trigger::Scroll), EventResponse::Coalesced);
    assert_eq!(c.on_event(Trigger::Resize), EventResponse::Coalesced);
    assert_eq!(c.on_event(Trigger::Mutation), EventResponse::Coalesced);
    assert_eq!(c.scheduler().host().requests, 1);

    frame_at(&mut c, 0.0);
    assert_eq!(c.on_event(Trigger::Scroll), EventResponse::Scheduled);
    assert_eq!(c.scheduler().host().requests, 2);
}

#[test]
fn unrequested_frame_does_nothing() {
    let imgs = page();
    let mut c = controller(&imgs, LoaderOptions::new());
    c.init();
    assert_eq!(frame_at(&mut c, 0.0).revealed, 2);

    // No trigger since the last frame: a stray frame must not scan.
    let report = frame_at(&mut c, 1200.0);
    assert_eq!(report.revealed, 0);
    assert_eq!(report.remaining, 8);
    assert_eq!(imgs[3].src().as_deref(), Some(PLACEHOLDER_SRC));
}

#[test]
fn srcset_is_swapped_only_when_present() {
    let imgs = [
        FakeImg::new(0, 0.0, 100.0)
            .with_srcset("img/0.jpg 1x, img/0@2x.jpg 2x"),
        FakeImg::new(1, 100.0, 100.0),
    ];
    let mut c = controller(&imgs, LoaderOptions::new());
    c.init();
    frame_at(&mut c, 0.0);

    assert_eq!(
        imgs[0].srcset().as_deref(),
        Some("img/0.jpg 1x, img/0@2x.jpg 2x")
    );
    assert_eq!(imgs[1].srcset(), None);
    assert_eq!(imgs[1].src().as_deref(), Some("img/1.jpg"));
}

#[test]
fn settle_toggles_classes_and_reports_outcome() {
    let imgs = page();
    let (options, settled) = recording_options();
    let mut c = controller(&imgs, options);
    c.init();
    frame_at(&mut c, 0.0);

    c.settle(&imgs[0], LoadOutcome::Loaded);
    c.settle(&imgs[1], LoadOutcome::Failed);

    assert!(!imgs[0].has_class("loading"));
    assert!(imgs[0].has_class("loaded"));
    assert!(!imgs[1].has_class("loading"));
    assert!(imgs[1].has_class("failed"));
    assert!(!imgs[1].has_class("loaded"));

    let settled = settled.lock().unwrap();
    assert_eq!(
        *settled,
        [(0, LoadOutcome::Loaded), (1, LoadOutcome::Failed)]
    );
    assert!(settled[1].1.is_error());
}

#[test]
fn custom_class_names_are_used() {
    let imgs = page();
    let options = LoaderOptions::new()
        .with_loading_class("lazy-pending")
        .with_complete_class("lazy-done")
        .with_failed_class("lazy-broken");
    let mut c = controller(&imgs, options);
    c.init();
    assert!(imgs[0].has_class("lazy-pending"));

    frame_at(&mut c, 0.0);
    c.settle(&imgs[0], LoadOutcome::Loaded);
    c.settle(&imgs[1], LoadOutcome::Failed);
    assert_eq!(imgs[0].0.borrow().classes, ["lazy-done"]);
    assert_eq!(imgs[1].0.borrow().classes, ["lazy-broken"]);
}

#[test]
fn missing_data_src_fails_immediately() {
    let imgs = [FakeImg::new(7, 0.0, 100.0).without_data_src()];
    let (options, settled) = recording_options();
    let mut c = controller(&imgs, options);
    c.init();
    frame_at(&mut c, 0.0);

    assert!(imgs[0].has_class("failed"));
    assert!(!imgs[0].has_class("loading"));
    assert_eq!(imgs[0].src().as_deref(), Some(PLACEHOLDER_SRC));
    assert_eq!(*settled.lock().unwrap(), [(7, LoadOutcome::Failed)]);
}

#[test]
fn scrolling_to_the_end_drains_and_tears_down() {
    let imgs = page();
    let mut c = controller(&imgs, LoaderOptions::new());
    c.init();
    frame_at(&mut c, 0.0);

    let mut last = FrameReport::default();
    for scroll in [600.0, 1200.0, 2000.0, 2800.0, 3400.0] {
        assert_eq!(c.on_event(Trigger::Scroll), EventResponse::Scheduled);
        last = frame_at(&mut c, scroll);
    }

    assert_eq!(
        last,
        FrameReport {
            revealed: 1,
            remaining: 0,
            drained: true,
        }
    );
    assert!(c.is_ended());
    assert!(c.subscriptions().is_empty());
    assert!(!imgs.iter().any(shows_placeholder));

    // Late triggers keep answering Drained and never request frames; late frames are no-ops.
    let requests = c.scheduler().host().requests;
    assert_eq!(c.on_event(Trigger::Resize), EventResponse::Drained);
    assert_eq!(c.scheduler().host().requests, requests);
    assert!(frame_at(&mut c, 0.0).drained);
}

#[test]
fn settle_after_end_still_updates_classes() {
    let imgs = [FakeImg::new(0, 0.0, 100.0)];
    let mut c = controller(&imgs, LoaderOptions::new());
    c.init();
    assert!(frame_at(&mut c, 0.0).drained);

    c.settle(&imgs[0], LoadOutcome::Loaded);
    assert!(imgs[0].has_class("loaded"));
}

#[test]
fn empty_collection_ends_during_init() {
    let mut c = controller(&[], LoaderOptions::new());
    let subs = c.init();
    assert!(subs.is_empty());
    assert!(c.is_ended());
    assert_eq!(c.scheduler().host().requests, 0);
    // init is not repeatable.
    assert!(c.init().is_empty());
    assert_eq!(c.on_event(Trigger::Scroll), EventResponse::Drained);
    assert_eq!(c.scheduler().host().requests, 0);
}

#[test]
fn triggers_after_drain_report_drained() {
    let imgs = [FakeImg::new(0, 0.0, 100.0)];
    let mut c = controller(&imgs, LoaderOptions::new());
    c.init();
    assert!(frame_at(&mut c, 0.0).drained);

    for trigger in [Trigger::Scroll, Trigger::Resize, Trigger::Mutation] {
        assert_eq!(c.on_event(trigger), EventResponse::Drained);
    }
    assert_eq!(c.scheduler().host().requests, 1);
    assert!(!c.scheduler().is_pending());
}

#[test]
fn lazy_load_constructs_and_initializes() {
    let imgs = page();
    let source = |_: &str| -> Option<Vec<FakeImg>> { Some(imgs.clone()) };
    let options: LoaderOptions<FakeImg> = LoaderOptions::new().with_observe_mutations(false);
    let scheduler = CountingScheduler::default();
    let (mut c, subs) = lazy_load(options, &source, scheduler).unwrap();

    assert_eq!(c.phase(), Phase::Active);
    assert!(subs.scroll && subs.resize && !subs.mutation);
    assert!(imgs.iter().all(shows_placeholder));
    assert_eq!(c.scheduler().host().requests, 1);
    assert_eq!(frame_at(&mut c, 0.0).revealed, 2);
}

#[test]
fn lazy_load_propagates_construction_errors() {
    let source = |_: &str| -> Option<Vec<FakeImg>> { None };
    let err = lazy_load(
        LoaderOptions::<FakeImg>::new(),
        &source,
        CountingScheduler::default(),
    )
    .unwrap_err();
    assert_eq!(err, Error::InvalidSelector(DEFAULT_SELECTOR.to_string()));
}

#[test]
fn mutation_triggers_follow_capability_flag() {
    let imgs = page();
    let mut c = controller(&imgs, LoaderOptions::new().with_observe_mutations(false));
    let subs = c.init();
    assert!(subs.scroll && subs.resize);
    assert!(!subs.mutation);

    frame_at(&mut c, 0.0);
    assert_eq!(c.on_event(Trigger::Mutation), EventResponse::Ignored);
    assert!(!c.scheduler().is_pending());
    assert_eq!(c.on_event(Trigger::Scroll), EventResponse::Scheduled);
}

#[test]
fn query_selector_is_resolved_through_source() {
    let imgs = page();
    let seen = RefCell::new(String::new());
    let source = |selector: &str| -> Option<Vec<FakeImg>> {
        *seen.borrow_mut() = selector.to_string();
        Some(imgs.clone())
    };

    let mut c = Controller::new(
        LoaderOptions::<FakeImg>::new(),
        &source,
        CountingScheduler::default(),
    )
    .unwrap();
    assert_eq!(seen.borrow().as_str(), DEFAULT_SELECTOR);
    assert_eq!(c.remaining(), 10);

    c.init();
    assert_eq!(frame_at(&mut c, 0.0).revealed, 2);
}

#[test]
fn unresolvable_selector_is_an_error() {
    let source = |_: &str| -> Option<Vec<FakeImg>> { None };
    let options: LoaderOptions<FakeImg> = LoaderOptions::new().with_selector("img[data-src");
    let err = Controller::new(options, &source, CountingScheduler::default())
        .unwrap_err();
    assert_eq!(err, Error::InvalidSelector("img[data-src".to_string()));
}

#[test]
fn invalid_options_are_rejected_before_resolving() {
    let source = |_: &str| -> Option<Vec<FakeImg>> { panic!("source must not be queried") };

    let err = Controller::new(
        LoaderOptions::<FakeImg>::new().with_selector("  "),
        &source,
        CountingScheduler::default(),
    )
    .unwrap_err();
    assert_eq!(err, Error::EmptySelector);

    let options: LoaderOptions<FakeImg> = LoaderOptions::new().with_loading_class("is loading");
    let err = Controller::new(options, &source, CountingScheduler::default())
        .unwrap_err();
    assert_eq!(
        err,
        Error::InvalidClassName {
            role: "loading",
            name: "is loading".to_string(),
        }
    );

    let err = LoaderOptions::<FakeImg>::new()
        .with_failed_class("")
        .validate()
        .unwrap_err();
    assert_eq!(
        err,
        Error::InvalidClassName {
            role: "failed",
            name: String::new(),
        }
    );
}

#[test]
fn error_messages_name_the_problem() {
    let err = Error::InvalidClassName {
        role: "complete",
        name: "a b".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "complete class `a b` is not a valid class token"
    );
    assert_eq!(
        Error::InvalidSelector("#x[".to_string()).to_string(),
        "selector `#x[` did not resolve to an element collection"
    );
}

#[test]
fn frame_scheduler_coalesces_until_taken() {
    let mut s = FrameScheduler::new(CountingScheduler::default());
    assert!(s.request());
    assert!(!s.request());
    assert_eq!(s.host().requests, 1);

    assert!(s.take());
    assert!(!s.take());

    assert!(s.request());
    s.cancel();
    assert!(!s.take());
    assert_eq!(s.into_host().requests, 2);
}

#[test]
fn options_debug_omits_callbacks() {
    let (options, _) = recording_options();
    let options = options.with_elements(page());
    let dbg = format!("{options:?}");
    assert!(dbg.contains("Elements(len=10)"));
    assert!(dbg.contains("loading_class"));
}
