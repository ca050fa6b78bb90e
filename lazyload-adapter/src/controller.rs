use alloc::vec::Vec;

use lazyload::{
    GeometryProvider, LoadOutcome, RevealHandler, TickScheduler, Trigger, ViewportProvider,
    Worklist,
};

use crate::{
    ElementSource, Error, FrameScheduler, ImageElement, ImageRevealer, LoaderOptions, Result,
    Selector,
};

/// Where a controller is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Constructed; elements untouched, events ignored.
    Created,
    /// Initialized and watching for triggers.
    Active,
    /// The worklist drained. Trigger sources should be torn down.
    Ended,
}

/// The trigger sources a host should subscribe to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subscriptions {
    pub scroll: bool,
    pub resize: bool,
    pub mutation: bool,
}

impl Subscriptions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        !(self.scroll || self.resize || self.mutation)
    }
}

/// What a trigger did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventResponse {
    /// A frame was requested from the host.
    Scheduled,
    /// A frame was already pending; this trigger rides along.
    Coalesced,
    /// Not initialized yet, or a trigger kind the host did not declare.
    Ignored,
    /// Nothing left to reveal; the controller has ended. Tear down trigger sources.
    Drained,
}

/// Summary of one frame tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameReport {
    pub revealed: usize,
    pub remaining: usize,
    /// `true` once the controller has ended; the host should tear down trigger sources.
    pub drained: bool,
}

/// A framework-neutral lazy-load manager.
///
/// This type does not hold any UI objects beyond the element handles it tracks. Adapters drive
/// it by calling:
/// - `init()` once, then subscribing to the returned trigger sources
/// - `on_event(trigger)` from scroll/resize/mutation listeners
/// - `on_frame(viewport, geometry)` from the animation-frame callback the scheduler requested
/// - `settle(element, outcome)` from image load/error listeners
pub struct Controller<E, S> {
    worklist: Worklist<E>,
    revealer: ImageRevealer<E>,
    scheduler: FrameScheduler<S>,
    observe_mutations: bool,
    phase: Phase,
}

impl<E: ImageElement, S: TickScheduler> Controller<E, S> {
    /// Validates `options` and resolves the selector through `source`.
    pub fn new<Src>(options: LoaderOptions<E>, source: &Src, scheduler: S) -> Result<Self>
    where
        Src: ElementSource<E> + ?Sized,
    {
        options.validate()?;
        let revealer = ImageRevealer::new(&options);
        let LoaderOptions {
            selector,
            observe_mutations,
            ..
        } = options;

        let elements = match selector {
            Selector::Elements(elements) => elements,
            Selector::Query(query) => match source.query_selector_all(&query) {
                Some(elements) => elements,
                None => {
                    lwarn!(selector = %query, "selector could not be resolved");
                    return Err(Error::InvalidSelector(query));
                }
            },
        };

        ldebug!(count = elements.len(), observe_mutations, "Controller::new");
        Ok(Self {
            worklist: Worklist::new(elements),
            revealer,
            scheduler: FrameScheduler::new(scheduler),
            observe_mutations,
            phase: Phase::Created,
        })
    }

    /// Builds a controller over an explicit element collection, ignoring `options.selector`.
    pub fn with_elements(
        elements: Vec<E>,
        options: LoaderOptions<E>,
        scheduler: S,
    ) -> Result<Self> {
        let options = options.with_elements(elements);
        Self::new(options, &|_: &str| -> Option<Vec<E>> { None }, scheduler)
    }

    /// Prepares every tracked element and dispatches the initial trigger.
    ///
    /// Returns the trigger sources to subscribe to; empty when there was nothing to track.
    /// Calling `init` again is a no-op.
    pub fn init(&mut self) -> Subscriptions {
        if self.phase != Phase::Created {
            return self.subscriptions();
        }

        for element in &self.worklist {
            self.revealer.prepare(element);
        }
        self.phase = Phase::Active;
        self.on_event(Trigger::Initial);
        self.subscriptions()
    }

    /// Requests a frame for a host trigger.
    ///
    /// After the controller has ended every trigger answers [`EventResponse::Drained`].
    pub fn on_event(&mut self, trigger: Trigger) -> EventResponse {
        match self.phase {
            Phase::Created => return EventResponse::Ignored,
            Phase::Ended => return EventResponse::Drained,
            Phase::Active => {}
        }
        if trigger == Trigger::Mutation && !self.observe_mutations {
            return EventResponse::Ignored;
        }
        if self.worklist.is_drained() {
            self.end();
            return EventResponse::Drained;
        }

        let response = if self.scheduler.request() {
            EventResponse::Scheduled
        } else {
            EventResponse::Coalesced
        };
        ltrace!(?trigger, ?response, "Controller::on_event");
        response
    }

    /// Runs the scan for a requested frame and reveals what became visible.
    ///
    /// A frame that was not requested (or arrives after the end) changes nothing.
    pub fn on_frame<V, G>(&mut self, viewport: &V, geometry: &G) -> FrameReport
    where
        V: ViewportProvider + ?Sized,
        G: GeometryProvider<E> + ?Sized,
    {
        if !self.scheduler.take() || self.phase != Phase::Active {
            return self.report(0);
        }

        let outcome = self.worklist.scan(viewport.window(), geometry);
        let revealed = outcome.revealed.len();
        for element in outcome.revealed {
            self.revealer.reveal(element);
        }
        if outcome.drained {
            self.end();
        }
        self.report(revealed)
    }

    /// Forwards a host load/error notification for a revealed element.
    ///
    /// Still valid after the controller ended: the last images usually finish loading then.
    pub fn settle(&self, element: &E, outcome: LoadOutcome) {
        self.revealer.settle(element, outcome);
    }

    pub fn subscriptions(&self) -> Subscriptions {
        match self.phase {
            Phase::Active => Subscriptions {
                scroll: true,
                resize: true,
                mutation: self.observe_mutations,
            },
            Phase::Created | Phase::Ended => Subscriptions::none(),
        }
    }

    fn end(&mut self) {
        if self.phase == Phase::Ended {
            return;
        }
        self.phase = Phase::Ended;
        self.scheduler.cancel();
        ldebug!(
            revealed_total = self.worklist.revealed_total(),
            "Controller ended"
        );
    }

    fn report(&self, revealed: usize) -> FrameReport {
        FrameReport {
            revealed,
            remaining: self.worklist.len(),
            drained: self.phase == Phase::Ended,
        }
    }
}

/// Builds a controller and initializes it in one call.
///
/// Returns the controller together with the trigger sources to subscribe to.
pub fn lazy_load<E, S, Src>(
    options: LoaderOptions<E>,
    source: &Src,
    scheduler: S,
) -> Result<(Controller<E, S>, Subscriptions)>
where
    E: ImageElement,
    S: TickScheduler,
    Src: ElementSource<E> + ?Sized,
{
    let mut controller = Controller::new(options, source, scheduler)?;
    let subscriptions = controller.init();
    Ok((controller, subscriptions))
}

impl<E, S> Controller<E, S> {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    pub fn remaining(&self) -> usize {
        self.worklist.len()
    }

    pub fn worklist(&self) -> &Worklist<E> {
        &self.worklist
    }

    pub fn revealer(&self) -> &ImageRevealer<E> {
        &self.revealer
    }

    pub fn scheduler(&self) -> &FrameScheduler<S> {
        &self.scheduler
    }
}

impl<E, S: core::fmt::Debug> core::fmt::Debug for Controller<E, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("remaining", &self.worklist.len())
            .field("revealer", &self.revealer)
            .field("scheduler", &self.scheduler)
            .field("observe_mutations", &self.observe_mutations)
            .field("phase", &self.phase)
            .finish()
    }
}
