//! Pointer routing into gesture sessions.
//!
//! [`GestureRouter`] turns raw pointer events into at most one live
//! [`GestureSession`] at a time. A session is owned by the pointer that
//! opened it (both pointers, for a pinch); events from any other pointer
//! never change the session's geometry.
//!
//! Classification on pointer-down, in priority order:
//!
//! 1. A second touch contact opens a pinch (replacing a one-finger pan).
//! 2. In crop mode: handle hit, then inside the selection, then outside.
//! 3. A press completing a double tap.
//! 4. A press while zoomed in opens a pan.

mod pan;
mod pinch;
mod tap;

pub use pan::PanSession;
pub use pinch::PinchSession;
pub use tap::{double_tap_target, TapTracker};

use crate::config::ViewportConfig;
use crate::constants::gesture::CONTACT_STALE_MS;
use crate::constants::zoom::MIN_SCALE;
use crate::crop::{draw_rect, move_rect, resize_rect, CropEditor, CropHit, HandleIndex};
use crate::measure::Layout;
use crate::transform::ViewportTransform;
use daylens_input::{Point, PointerEvent, PointerId, PointerPhase, Rect, Timestamp};

/// A touch contact currently on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub pointer: PointerId,
    pub position: Point,
    /// Time of the contact's last down or move
    pub last_seen: Timestamp,
}

/// Kinds of gesture the router recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    Pan,
    Pinch,
    DoubleTap,
    CropResize,
    CropMove,
    CropDraw,
}

impl SessionKind {
    /// Whether the session moves the viewport transform (and may fling on release).
    pub fn moves_viewport(&self) -> bool {
        matches!(self, SessionKind::Pan | SessionKind::Pinch)
    }
}

/// A live gesture and the state captured when it started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureSession {
    Pan(PanSession),
    Pinch(PinchSession),
    CropResize {
        handle: HandleIndex,
        original: Rect,
        start_pointer: Point,
    },
    CropMove {
        original: Rect,
        grab_offset: Point,
    },
    /// `moved` turns true once the pointer leaves the draw threshold
    CropDraw { start: Point, moved: bool },
}

impl GestureSession {
    pub fn kind(&self) -> SessionKind {
        match self {
            GestureSession::Pan(_) => SessionKind::Pan,
            GestureSession::Pinch(_) => SessionKind::Pinch,
            GestureSession::CropResize { .. } => SessionKind::CropResize,
            GestureSession::CropMove { .. } => SessionKind::CropMove,
            GestureSession::CropDraw { .. } => SessionKind::CropDraw,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveSession {
    owner: PointerId,
    session: GestureSession,
}

impl ActiveSession {
    fn owns(&self, pointer: PointerId) -> bool {
        match &self.session {
            GestureSession::Pinch(pinch) => pinch.involves(pointer),
            _ => self.owner == pointer,
        }
    }
}

/// What an event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Nothing to do for this event
    Ignored,
    /// A press arrived while another pointer owns the session
    Rejected,
    Opened(SessionKind),
    /// The live session changed the transform or the crop selection
    Updated,
    /// A double tap; animate to the target
    DoubleTap(ViewportTransform),
    /// The owner lifted; `velocity` is the release velocity in px/s
    Released { kind: SessionKind, velocity: Point },
    /// The session ended without a normal release
    Cancelled(SessionKind),
}

/// Everything a gesture may read or write.
pub struct GestureContext<'a> {
    pub transform: &'a mut ViewportTransform,
    pub crop: &'a mut CropEditor,
    pub layout: Layout,
    pub config: &'a ViewportConfig,
}

/// Routes pointer events to the single live gesture session.
#[derive(Debug, Default)]
pub struct GestureRouter {
    active: Option<ActiveSession>,
    touches: Vec<Contact>,
    taps: TapTracker,
}

impl GestureRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.active.as_ref().map(|active| &active.session)
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    pub fn handle(&mut self, event: &PointerEvent, ctx: &mut GestureContext<'_>) -> GestureOutcome {
        match event.phase {
            PointerPhase::Down => self.on_down(event, ctx),
            PointerPhase::Move => self.on_move(event, ctx),
            PointerPhase::Up | PointerPhase::Cancel => self.on_release(event),
        }
    }

    /// Drop any session and tracked contacts without follow-up.
    pub fn reset(&mut self) -> Option<SessionKind> {
        self.touches.clear();
        self.taps.clear();
        let dropped = self.active.take().map(|active| active.session.kind());
        if let Some(kind) = dropped {
            log::debug!("Dropped {:?} session", kind);
        }
        dropped
    }

    fn on_down(&mut self, event: &PointerEvent, ctx: &mut GestureContext<'_>) -> GestureOutcome {
        if event.kind.is_touch() {
            self.drop_stale_touches(event.pointer, event.timestamp);
            self.track_touch(event.pointer, event.position, event.timestamp);
        }

        // A press from the pointer that already owns the session means its release was lost
        let mut evicted = None;
        if self.active.is_some_and(|active| active.owns(event.pointer)) {
            evicted = self.active.take().map(|active| active.session.kind());
            log::warn!("Pointer {:?} pressed again without releasing; closing {:?}", event.pointer, evicted);
        }

        let outcome = self.classify_down(event, ctx);
        match (outcome, evicted) {
            (GestureOutcome::Ignored | GestureOutcome::Rejected, Some(kind)) => GestureOutcome::Cancelled(kind),
            _ => outcome,
        }
    }

    fn classify_down(&mut self, event: &PointerEvent, ctx: &mut GestureContext<'_>) -> GestureOutcome {
        if event.kind.is_touch() && self.touches.len() >= 2 {
            return self.open_pinch(event, ctx);
        }

        if let Some(active) = &self.active {
            log::trace!("Rejected pointer {:?}: {:?} session in progress", event.pointer, active.session.kind());
            return GestureOutcome::Rejected;
        }

        if ctx.crop.is_active() {
            return self.open_crop(event, ctx.crop);
        }

        if self.taps.on_down(event, ctx.config.double_tap_window_ms) {
            let target = double_tap_target(ctx.transform, event.position, &ctx.layout, ctx.config);
            log::debug!("Double tap at ({:.0}, {:.0}) -> {:.2}x", event.position.x, event.position.y, target.scale);
            return GestureOutcome::DoubleTap(target);
        }

        if ctx.transform.scale > MIN_SCALE {
            self.open(event.pointer, GestureSession::Pan(PanSession::begin(ctx.transform, event.position, event.timestamp)))
        } else {
            GestureOutcome::Ignored
        }
    }

    fn open_pinch(&mut self, event: &PointerEvent, ctx: &mut GestureContext<'_>) -> GestureOutcome {
        if ctx.crop.is_active() {
            log::trace!("Second touch ignored in crop mode");
            return if self.active.is_some() {
                GestureOutcome::Rejected
            } else {
                GestureOutcome::Ignored
            };
        }
        if let Some(active) = &self.active {
            if !matches!(active.session, GestureSession::Pan(_)) {
                return GestureOutcome::Rejected;
            }
        }
        let Some(other) = self.touches.iter().copied().find(|c| c.pointer != event.pointer) else {
            return GestureOutcome::Ignored;
        };
        let contact = Contact {
            pointer: event.pointer,
            position: event.position,
            last_seen: event.timestamp,
        };

        // The pinch takes over from a one-finger pan and from any pending tap
        self.active = None;
        self.taps.clear();
        let pinch = PinchSession::begin(other, contact, ctx.transform, &ctx.layout, event.timestamp);
        self.open(other.pointer, GestureSession::Pinch(pinch))
    }

    fn open_crop(&mut self, event: &PointerEvent, crop: &CropEditor) -> GestureOutcome {
        let session = match (crop.hit_test(event.position), crop.rect()) {
            (CropHit::Handle(handle), Some(rect)) => GestureSession::CropResize {
                handle,
                original: rect,
                start_pointer: event.position,
            },
            (CropHit::Inside, Some(rect)) => GestureSession::CropMove {
                original: rect,
                grab_offset: event.position - rect.origin(),
            },
            _ => GestureSession::CropDraw {
                start: event.position,
                moved: false,
            },
        };
        self.open(event.pointer, session)
    }

    fn open(&mut self, owner: PointerId, session: GestureSession) -> GestureOutcome {
        let kind = session.kind();
        log::debug!("{:?} session opened by pointer {:?}", kind, owner);
        self.active = Some(ActiveSession { owner, session });
        GestureOutcome::Opened(kind)
    }

    fn on_move(&mut self, event: &PointerEvent, ctx: &mut GestureContext<'_>) -> GestureOutcome {
        if event.kind.is_touch() {
            if let Some(contact) = self.touches.iter_mut().find(|c| c.pointer == event.pointer) {
                contact.position = event.position;
                contact.last_seen = event.timestamp;
            }
        }
        self.taps.on_move(event);

        let Some(active) = self.active.as_mut() else {
            return GestureOutcome::Ignored;
        };
        if !active.owns(event.pointer) {
            return GestureOutcome::Ignored;
        }

        match &mut active.session {
            GestureSession::Pan(pan) => {
                let bounds = ctx.layout.bounds(ctx.transform.scale);
                pan.update(event.position, event.timestamp, ctx.transform, &bounds);
            }
            GestureSession::Pinch(pinch) => {
                pinch.update(
                    event.pointer,
                    event.position,
                    event.timestamp,
                    ctx.transform,
                    &ctx.layout,
                    ctx.config.max_scale,
                );
            }
            GestureSession::CropResize {
                handle,
                original,
                start_pointer,
            } => {
                let delta = event.position - *start_pointer;
                let rect = resize_rect(original, *handle, delta, ctx.crop.aspect(), &ctx.crop.image_rect());
                ctx.crop.set_rect(rect);
            }
            GestureSession::CropMove { original, grab_offset } => {
                let rect = move_rect(original, *grab_offset, event.position, &ctx.crop.image_rect());
                ctx.crop.set_rect(rect);
            }
            GestureSession::CropDraw { start, moved } => {
                if !*moved {
                    if start.distance_to(&event.position) <= ctx.config.draw_threshold {
                        return GestureOutcome::Ignored;
                    }
                    *moved = true;
                }
                let rect = draw_rect(*start, event.position, ctx.crop.aspect(), &ctx.crop.image_rect());
                ctx.crop.set_rect(rect);
            }
        }
        GestureOutcome::Updated
    }

    fn on_release(&mut self, event: &PointerEvent) -> GestureOutcome {
        if event.kind.is_touch() {
            self.touches.retain(|c| c.pointer != event.pointer);
        }
        let cancelled = event.phase == PointerPhase::Cancel;
        if cancelled {
            self.taps.clear();
        } else {
            self.taps.on_up(event);
        }

        if !self.active.is_some_and(|active| active.owns(event.pointer)) {
            return GestureOutcome::Ignored;
        }
        let Some(active) = self.active.take() else {
            return GestureOutcome::Ignored;
        };
        let kind = active.session.kind();
        if cancelled {
            log::debug!("{:?} session cancelled", kind);
            return GestureOutcome::Cancelled(kind);
        }

        let velocity = match &active.session {
            GestureSession::Pan(pan) => pan.release_velocity(event.timestamp),
            GestureSession::Pinch(pinch) => pinch.release_velocity(event.timestamp),
            _ => Point::ZERO,
        };
        log::debug!("{:?} session released by pointer {:?}", kind, event.pointer);
        GestureOutcome::Released { kind, velocity }
    }

    fn track_touch(&mut self, pointer: PointerId, position: Point, at: Timestamp) {
        match self.touches.iter_mut().find(|c| c.pointer == pointer) {
            Some(contact) => {
                contact.position = position;
                contact.last_seen = at;
            }
            None => self.touches.push(Contact {
                pointer,
                position,
                last_seen: at,
            }),
        }
    }

    /// Forget contacts whose release was lost: idle past [`CONTACT_STALE_MS`]
    /// and not part of the live session.
    fn drop_stale_touches(&mut self, pressed: PointerId, now: Timestamp) {
        let active = self.active;
        self.touches.retain(|contact| {
            let live = contact.pointer == pressed
                || active.is_some_and(|session| session.owns(contact.pointer))
                || now.millis_since(contact.last_seen) <= CONTACT_STALE_MS;
            if !live {
                log::warn!("Touch {:?} never released; dropping it", contact.pointer);
            }
            live
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daylens_input::{PointerPhase::*, Size};

    struct Fixture {
        transform: ViewportTransform,
        crop: CropEditor,
        layout: Layout,
        config: ViewportConfig,
        router: GestureRouter,
    }

    impl Fixture {
        fn new(scale: f32) -> Self {
            let config = ViewportConfig::default();
            Self {
                transform: ViewportTransform::new(scale, 0.0, 0.0),
                crop: CropEditor::from_config(&config),
                layout: Layout::new(Size::new(300.0, 300.0), Size::new(1200.0, 600.0)),
                config,
                router: GestureRouter::new(),
            }
        }

        fn send(&mut self, event: PointerEvent) -> GestureOutcome {
            let mut ctx = GestureContext {
                transform: &mut self.transform,
                crop: &mut self.crop,
                layout: self.layout,
                config: &self.config,
            };
            self.router.handle(&event, &mut ctx)
        }
    }

    #[test]
    fn test_pan_opens_only_when_zoomed() {
        let mut fx = Fixture::new(1.0);
        assert_eq!(fx.send(PointerEvent::mouse(Down, 100.0, 100.0, 0.0)), GestureOutcome::Ignored);

        let mut fx = Fixture::new(2.0);
        assert_eq!(fx.send(PointerEvent::mouse(Down, 100.0, 100.0, 0.0)), GestureOutcome::Opened(SessionKind::Pan));
        assert_eq!(fx.send(PointerEvent::mouse(Move, 300.0, 100.0, 16.0)), GestureOutcome::Updated);
        assert_eq!(fx.transform.translate(), Point::new(150.0, 0.0));
    }

    #[test]
    fn test_touch_pans_when_zoomed() {
        let mut fx = Fixture::new(2.0);
        assert_eq!(fx.send(PointerEvent::touch(5, Down, 100.0, 100.0, 0.0)), GestureOutcome::Opened(SessionKind::Pan));
    }

    #[test]
    fn test_foreign_pointer_cannot_drive_session() {
        let mut fx = Fixture::new(2.0);
        fx.send(PointerEvent::touch(5, Down, 100.0, 100.0, 0.0));
        assert_eq!(fx.send(PointerEvent::mouse(Down, 10.0, 10.0, 5.0)), GestureOutcome::Rejected);
        assert_eq!(fx.send(PointerEvent::mouse(Move, 250.0, 10.0, 10.0)), GestureOutcome::Ignored);
        assert_eq!(fx.send(PointerEvent::mouse(Up, 250.0, 10.0, 20.0)), GestureOutcome::Ignored);
        assert_eq!(fx.transform.translate(), Point::ZERO);
        assert!(matches!(fx.router.session(), Some(GestureSession::Pan(_))));
    }

    #[test]
    fn test_second_touch_upgrades_pan_to_pinch() {
        let mut fx = Fixture::new(2.0);
        fx.send(PointerEvent::touch(1, Down, 100.0, 150.0, 0.0));
        assert_eq!(fx.send(PointerEvent::touch(2, Down, 200.0, 150.0, 10.0)), GestureOutcome::Opened(SessionKind::Pinch));
        assert_eq!(fx.send(PointerEvent::touch(2, Move, 250.0, 150.0, 20.0)), GestureOutcome::Updated);
        assert_eq!(fx.transform.scale, 3.0);

        // A third finger is not part of the pinch
        assert_eq!(fx.send(PointerEvent::touch(3, Down, 10.0, 10.0, 30.0)), GestureOutcome::Rejected);
        assert_eq!(fx.send(PointerEvent::touch(3, Move, 50.0, 10.0, 40.0)), GestureOutcome::Ignored);

        match fx.send(PointerEvent::touch(1, Up, 100.0, 150.0, 50.0)) {
            GestureOutcome::Released { kind, .. } => assert_eq!(kind, SessionKind::Pinch),
            other => panic!("unexpected {:?}", other),
        }
        assert!(fx.router.is_idle());
        // The remaining finger does not resume anything
        assert_eq!(fx.send(PointerEvent::touch(2, Move, 260.0, 150.0, 60.0)), GestureOutcome::Ignored);
    }

    #[test]
    fn test_pinch_from_rest() {
        let mut fx = Fixture::new(1.0);
        assert_eq!(fx.send(PointerEvent::touch(1, Down, 100.0, 150.0, 0.0)), GestureOutcome::Ignored);
        assert_eq!(fx.send(PointerEvent::touch(2, Down, 200.0, 150.0, 10.0)), GestureOutcome::Opened(SessionKind::Pinch));
    }

    #[test]
    fn test_stale_owner_press_closes_session() {
        let mut fx = Fixture::new(2.0);
        fx.send(PointerEvent::mouse(Down, 100.0, 100.0, 0.0));
        // Up was lost; the next press reopens a fresh pan
        assert_eq!(fx.send(PointerEvent::mouse(Down, 120.0, 100.0, 500.0)), GestureOutcome::Opened(SessionKind::Pan));

        let mut fx = Fixture::new(2.0);
        fx.send(PointerEvent::mouse(Down, 100.0, 100.0, 0.0));
        fx.transform.scale = 1.0;
        assert_eq!(fx.send(PointerEvent::mouse(Down, 120.0, 100.0, 500.0)), GestureOutcome::Cancelled(SessionKind::Pan));
        assert!(fx.router.is_idle());
    }

    #[test]
    fn test_cancel_closes_without_velocity() {
        let mut fx = Fixture::new(2.0);
        fx.send(PointerEvent::mouse(Down, 100.0, 100.0, 0.0));
        fx.send(PointerEvent::mouse(Move, 150.0, 100.0, 10.0));
        assert_eq!(fx.send(PointerEvent::mouse(Cancel, 150.0, 100.0, 20.0)), GestureOutcome::Cancelled(SessionKind::Pan));
    }

    #[test]
    fn test_double_tap_at_rest() {
        let mut fx = Fixture::new(1.0);
        fx.send(PointerEvent::touch(1, Down, 150.0, 150.0, 0.0));
        fx.send(PointerEvent::touch(1, Up, 150.0, 150.0, 60.0));
        match fx.send(PointerEvent::touch(2, Down, 152.0, 150.0, 250.0)) {
            GestureOutcome::DoubleTap(target) => assert_eq!(target.scale, 2.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_crop_sessions() {
        let mut fx = Fixture::new(1.0);
        let image = fx.layout.image_rect();
        assert_eq!(image, Rect::new(0.0, 75.0, 300.0, 150.0));
        fx.crop.begin(image);

        // Bottom-right handle of the full-image selection
        assert_eq!(fx.send(PointerEvent::mouse(Down, 298.0, 223.0, 0.0)), GestureOutcome::Opened(SessionKind::CropResize));
        fx.send(PointerEvent::mouse(Move, 200.0, 175.0, 10.0));
        assert_eq!(fx.crop.rect(), Some(Rect::new(0.0, 75.0, 202.0, 102.0)));
        fx.send(PointerEvent::mouse(Up, 200.0, 175.0, 20.0));

        assert_eq!(fx.send(PointerEvent::mouse(Down, 100.0, 100.0, 30.0)), GestureOutcome::Opened(SessionKind::CropMove));
        fx.send(PointerEvent::mouse(Move, 150.0, 90.0, 40.0));
        assert_eq!(fx.crop.rect(), Some(Rect::new(50.0, 75.0, 202.0, 102.0)));
        fx.send(PointerEvent::mouse(Up, 150.0, 90.0, 50.0));

        // Pinch and pan stay off in crop mode
        assert_eq!(fx.transform, ViewportTransform::identity());
    }

    #[test]
    fn test_crop_draw_threshold() {
        let mut fx = Fixture::new(1.0);
        fx.crop.begin(fx.layout.image_rect());
        fx.crop.set_rect(Rect::new(100.0, 100.0, 20.0, 20.0));

        assert_eq!(fx.send(PointerEvent::mouse(Down, 20.0, 90.0, 0.0)), GestureOutcome::Opened(SessionKind::CropDraw));
        assert_eq!(fx.send(PointerEvent::mouse(Move, 23.0, 93.0, 10.0)), GestureOutcome::Ignored);
        assert_eq!(fx.crop.rect(), Some(Rect::new(100.0, 100.0, 20.0, 20.0)));

        assert_eq!(fx.send(PointerEvent::mouse(Move, 80.0, 130.0, 20.0)), GestureOutcome::Updated);
        assert_eq!(fx.crop.rect(), Some(Rect::new(20.0, 90.0, 60.0, 40.0)));
    }

    #[test]
    fn test_second_touch_ignored_in_crop_mode() {
        let mut fx = Fixture::new(1.0);
        fx.crop.begin(fx.layout.image_rect());
        fx.send(PointerEvent::touch(1, Down, 100.0, 100.0, 0.0));
        assert_eq!(fx.send(PointerEvent::touch(2, Down, 200.0, 150.0, 10.0)), GestureOutcome::Rejected);
        assert_eq!(fx.transform, ViewportTransform::identity());
    }
    #[test]
    fn test_unreleased_touch_does_not_pair_into_pinch() {
        let mut fx = Fixture::new(1.0);
        // Lone touch at 1x opens nothing and its Up never arrives
        assert_eq!(fx.send(PointerEvent::touch(1, Down, 100.0, 150.0, 0.0)), GestureOutcome::Ignored);

        assert_eq!(fx.send(PointerEvent::touch(5, Down, 150.0, 150.0, 5000.0)), GestureOutcome::Ignored);
        assert_eq!(fx.send(PointerEvent::touch(5, Move, 250.0, 150.0, 5016.0)), GestureOutcome::Ignored);
        assert_eq!(fx.transform, ViewportTransform::identity());
        fx.send(PointerEvent::touch(5, Up, 250.0, 150.0, 5032.0));

        assert_eq!(fx.send(PointerEvent::touch(6, Down, 150.0, 150.0, 9000.0)), GestureOutcome::Ignored);
        assert_eq!(fx.router.touches.len(), 1);
    }

    #[test]
    fn test_resting_touch_still_pairs_within_window() {
        let mut fx = Fixture::new(1.0);
        fx.send(PointerEvent::touch(1, Down, 100.0, 150.0, 0.0));
        fx.send(PointerEvent::touch(1, Move, 101.0, 150.0, 600.0));
        assert_eq!(fx.send(PointerEvent::touch(2, Down, 200.0, 150.0, 1500.0)), GestureOutcome::Opened(SessionKind::Pinch));
    }
}
