//! Single-shot pick session.
//!
//! A session runs inside a loaded copy of the target page: it tracks
//! the hovered element, captures the first click, synthesizes a
//! selector for the session's role, and emits exactly one result to its
//! opener before tearing the surface down. The session is an explicit
//! state machine rather than a set of booleans so double emission is
//! unrepresentable and cancellation is a first-class outcome.

use crate::dom::DomNode;
use crate::synth::resolve_for_role;
use pagepick_common::protocol::{PickResult, Role};

/// Session lifecycle. `Resolved` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No target frame attached yet.
    Idle,
    /// Target document finished loading; hover highlighting is live.
    FrameLoaded,
    /// Click capture attached; the next click resolves the session.
    Armed,
    /// One result emitted, surface torn down. No further events count.
    Resolved,
}

/// Side effects a session performs on its visual surface and opener.
///
/// `highlight`/`clear_highlight` must be safe to invoke redundantly on
/// every pointer move. `post_result` is the cross-window message back
/// to the opener; `close` tears the picking surface down.
pub trait PickSurface<N> {
    fn highlight(&mut self, node: &N);
    fn clear_highlight(&mut self);
    fn post_result(&mut self, result: &PickResult);
    fn close(&mut self);
}

/// Controller for one picking session.
///
/// Bound to exactly one role for its whole lifetime; the optional item
/// selector is the container context committed by an earlier session.
pub struct PickSession<N, S> {
    role: Role,
    item_selector: Option<String>,
    state: SessionState,
    highlighted: Option<N>,
    surface: S,
}

impl<N: DomNode, S: PickSurface<N>> PickSession<N, S> {
    pub fn new(role: Role, item_selector: Option<String>, surface: S) -> Self {
        Self {
            role,
            item_selector,
            state: SessionState::Idle,
            highlighted: None,
            surface,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Currently highlighted element, if any.
    pub fn highlighted(&self) -> Option<&N> {
        self.highlighted.as_ref()
    }

    /// The target document finished loading inside the picking surface.
    pub fn frame_loaded(&mut self) {
        if self.state == SessionState::Idle {
            self.state = SessionState::FrameLoaded;
            tracing::debug!(role = %self.role, "pick frame loaded");
        }
    }

    /// Click capture is attached; the session now resolves on the next
    /// click.
    pub fn arm(&mut self) {
        if self.state == SessionState::FrameLoaded {
            self.state = SessionState::Armed;
        }
    }

    /// Pointer entered a node: move the highlight. Pure side effect, no
    /// state transition.
    pub fn pointer_enter(&mut self, node: N) {
        if !self.hover_active() {
            return;
        }
        self.surface.clear_highlight();
        self.surface.highlight(&node);
        self.highlighted = Some(node);
    }

    /// Pointer left the highlighted node.
    pub fn pointer_leave(&mut self) {
        if !self.hover_active() {
            return;
        }
        self.surface.clear_highlight();
        self.highlighted = None;
    }

    /// First click resolves the session; every later click is ignored.
    ///
    /// Returns the emitted result on the resolving click, `None`
    /// otherwise. The surface's default click behavior is assumed
    /// suppressed by the caller wiring (capture-phase listener).
    pub fn click(&mut self, node: N) -> Option<PickResult> {
        if self.state != SessionState::Armed {
            return None;
        }

        self.surface.clear_highlight();
        self.highlighted = None;

        let selector = resolve_for_role(&node, self.role, self.item_selector.as_deref());
        let result = PickResult {
            field: self.role,
            selector,
        };

        self.state = SessionState::Resolved;
        self.surface.post_result(&result);
        self.surface.close();
        tracing::debug!(field = %result.field, selector = %result.selector, "pick resolved");

        Some(result)
    }

    /// Tear the session down. Before a click this is a valid
    /// cancellation: nothing is emitted and the opener sees silence.
    /// Returns the surface for inspection.
    pub fn teardown(mut self) -> S {
        if self.state != SessionState::Resolved {
            self.surface.clear_highlight();
            self.surface.close();
            tracing::debug!(role = %self.role, "pick session cancelled");
        }
        self.surface
    }

    fn hover_active(&self) -> bool {
        matches!(
            self.state,
            SessionState::FrameLoaded | SessionState::Armed
        )
    }
}
