//! The root controller.
//!
//! [`Root`] owns the widget tree, the interaction registers and the input
//! translator. Each frame the host hands it an [`InputSnapshot`]; the root
//! turns it into events, runs its interaction logic on each one (hit testing,
//! hover, focus and drag transitions) and forwards the event to the widget it
//! resolves to. The root widget itself is an undecorated container, so
//! top-level children are added under [`Root::id`] like anywhere else.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tinsel_core::geometry::{Point, Rect};
//! use tinsel_ui::input::{InputSnapshot, MouseButton};
//! use tinsel_ui::Root;
//!
//! let mut root = Root::new(Rect::from_xywh(0, 0, 320, 240));
//! let panel = root.add_box(root.id(), Rect::from_xywh(10, 120, 200, 60));
//! let clicks = Rc::new(Cell::new(0));
//! let counter = clicks.clone();
//! root.add_button(panel, Rect::new(25, 130, 125, 147), "OK", move |_| {
//!     counter.set(counter.get() + 1);
//! });
//!
//! root.update(&InputSnapshot::at(Point::new(50, 135)).press_mouse(MouseButton::Left));
//! root.update(&InputSnapshot::at(Point::new(50, 135)).release_mouse(MouseButton::Left));
//! assert_eq!(clicks.get(), 1);
//! ```

use crate::config::UiConfig;
use crate::draw::{FixedMetrics, Surface, TextMetrics};
use crate::error::{TreeError, TreeResult};
use crate::event::{Event, LayoutKind, MouseEvent, MouseKind};
use crate::input::{InputSnapshot, InputTranslator};
use crate::interaction::{Interaction, Request, Role};
use crate::tree::{Node, NodeId, WidgetTree};
use crate::widget::{Behavior, EventCx, dispatch};
use std::any::Any;
use tinsel_core::geometry::{Point, Rect};
use tinsel_core::profiling::profile_function;

/// Handler for events no widget claims.
pub type FallbackFn = Box<dyn FnMut(&Event) -> bool>;

/// Upper bound on request/reconcile rounds after one event.
const MAX_SETTLE_ROUNDS: usize = 8;

pub struct Root {
    tree: WidgetTree,
    interaction: Interaction,
    config: UiConfig,
    metrics: Box<dyn TextMetrics>,
    translator: InputTranslator,
    fallback: Option<FallbackFn>,
    cursor: Point,
}

impl Root {
    pub fn new(bounds: Rect) -> Self {
        Self::with_config(bounds, UiConfig::default())
    }

    pub fn with_config(bounds: Rect, config: UiConfig) -> Self {
        let mut tree = WidgetTree::new(bounds);
        let root = tree.root();
        if let Some(node) = tree.node_mut(root) {
            node.style = config.default_style;
        }
        Self {
            tree,
            interaction: Interaction::new(),
            config,
            metrics: Box::new(FixedMetrics::default()),
            translator: InputTranslator::new(),
            fallback: None,
            cursor: Point::ZERO,
        }
    }

    /// Replaces the text metrics used when fitting widgets to their text.
    pub fn with_metrics(mut self, metrics: impl TextMetrics + 'static) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    /// Handle of the root widget.
    pub fn id(&self) -> NodeId {
        self.tree.root()
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut UiConfig {
        &mut self.config
    }

    pub fn metrics(&self) -> &dyn TextMetrics {
        &*self.metrics
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn hover(&self) -> Option<NodeId> {
        self.interaction.hover()
    }

    pub fn focus(&self) -> Option<NodeId> {
        self.interaction.focus()
    }

    pub fn drag(&self) -> Option<NodeId> {
        self.interaction.drag()
    }

    pub fn mark(&self) -> Option<NodeId> {
        self.interaction.mark()
    }

    /// Last pointer position seen.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn bounds(&self) -> Rect {
        self.tree.bounds(self.id()).unwrap_or_default()
    }

    /// Installs the handler for pad, touch and wheel events no widget claims.
    pub fn set_fallback(&mut self, fallback: impl FnMut(&Event) -> bool + 'static) {
        self.fallback = Some(Box::new(fallback));
    }

    /// Creates a node styled with the configured default style.
    pub fn node(&self, behavior: impl Behavior, bounds: Rect) -> Node {
        Node::new(behavior, bounds).with_style(self.config.default_style)
    }

    /// Adds `node` under `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was removed.
    pub fn add(&mut self, parent: NodeId, node: Node) -> NodeId {
        self.tree.insert(parent, node)
    }

    pub fn try_add(&mut self, parent: NodeId, node: Node) -> TreeResult<NodeId> {
        self.tree.try_insert(parent, node)
    }

    /// Translates one frame of host input and dispatches the resulting
    /// events in order. Returns how many were handled.
    pub fn update(&mut self, input: &InputSnapshot) -> usize {
        profile_function!();
        let events = self.translator.translate(input, &self.config);
        self.dispatch_all(events)
    }

    pub fn dispatch_all(&mut self, events: impl IntoIterator<Item = Event>) -> usize {
        events
            .into_iter()
            .filter(|event| self.dispatch(event))
            .count()
    }

    /// Runs the interaction logic for `event` and forwards it to the widget
    /// it resolves to.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        profile_function!();
        tracing::trace!(message = ?event.message(), "Dispatching event");
        let handled = match event {
            Event::Mouse(mouse) => self.route_mouse(mouse, event),
            Event::Key(_) => self.deliver_to(self.interaction.focus(), event),
            Event::Pad(_) => {
                let mark = self.interaction.mark();
                let focus = self.interaction.focus().filter(|focus| Some(*focus) != mark);
                self.deliver_to(mark, event)
                    || self.deliver_to(focus, event)
                    || self.run_fallback(event)
            }
            Event::Touch(_) => {
                self.deliver_to(self.interaction.focus(), event) || self.run_fallback(event)
            }
            Event::Action(_) | Event::Layout(_) => self.run_fallback(event),
        };
        self.settle();
        handled
    }

    fn route_mouse(&mut self, mouse: &MouseEvent, event: &Event) -> bool {
        self.cursor = mouse.at;
        let root = self.tree.root();
        match mouse.kind {
            MouseKind::Move => {
                let hit = self.tree.find_top(root, mouse.at);
                if let Some(drag) = self.interaction.drag().filter(|drag| Some(*drag) == hit) {
                    return self.deliver(drag, &Event::drag(mouse.at, mouse.delta));
                }
                self.assign(Role::Hover, hit, mouse.at);
                self.deliver_to(hit, event)
            }
            MouseKind::Press => {
                let hit = self.tree.find_top(root, mouse.at);
                self.assign(Role::Focus, hit, mouse.at);
                self.assign(Role::Drag, None, mouse.at);
                self.assign(Role::Drag, hit, mouse.at);
                self.deliver_to(self.interaction.focus(), event)
            }
            MouseKind::Hold => self.deliver_to(self.interaction.focus(), event),
            MouseKind::Release => {
                self.assign(Role::Drag, None, mouse.at);
                self.deliver_to(self.interaction.focus(), event)
            }
            MouseKind::Wheel => {
                self.deliver_to(self.interaction.hover(), event) || self.run_fallback(event)
            }
        }
    }

    pub fn set_hover(&mut self, target: Option<NodeId>) {
        self.assign(Role::Hover, target, self.cursor);
        self.settle();
    }

    pub fn set_focus(&mut self, target: Option<NodeId>) {
        self.assign(Role::Focus, target, self.cursor);
        self.settle();
    }

    pub fn set_mark(&mut self, target: Option<NodeId>) {
        self.assign(Role::Mark, target, self.cursor);
        self.settle();
    }

    /// Shows or hides `id`. Hiding releases every register held inside the
    /// subtree, delivering the matching leave events.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> bool {
        let changed = self.tree.set_hidden(id, hidden);
        self.settle();
        changed
    }

    pub fn toggle_hidden(&mut self, id: NodeId) -> bool {
        let hidden = !self.tree.state(id).is_hidden();
        self.set_hidden(id, hidden);
        hidden
    }

    /// Removes `id` and its subtree. Registers held inside it are released
    /// first, so their leave events still reach live widgets.
    pub fn remove(&mut self, id: NodeId) -> TreeResult<usize> {
        if id == self.tree.root() {
            return Err(TreeError::RootRemoval);
        }
        if !self.tree.contains(id) {
            return Err(TreeError::StaleHandle(id));
        }
        for role in Role::ALL {
            let held = self.interaction.get(role);
            if held.is_some_and(|held| self.tree.is_within(held, id)) {
                self.assign(role, None, self.cursor);
            }
        }
        let removed = self.tree.remove(id)?;
        self.settle();
        Ok(removed)
    }

    /// Assigns `bounds` to `id` through a layout-set event. Widgets that do
    /// not handle layout are moved and resized as a whole.
    pub fn place(&mut self, id: NodeId, bounds: Rect) {
        if !self.deliver(id, &Event::layout(LayoutKind::Set, bounds)) {
            self.tree.place(id, bounds);
        }
        self.settle();
    }

    /// Asks `id` for its preferred bounds through a layout-get event and
    /// returns the resulting `desired` rectangle.
    pub fn fit(&mut self, id: NodeId) -> Option<Rect> {
        let bounds = self.tree.bounds(id)?;
        self.deliver(id, &Event::layout(LayoutKind::Get, bounds));
        self.settle();
        self.tree.node(id).map(|node| node.desired)
    }

    /// Runs `f` on the behavior of `id` with a full event context, as if the
    /// widget were handling an event.
    pub fn with_behavior<T: Behavior, R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut T, &mut EventCx<'_>) -> R,
    ) -> TreeResult<R> {
        let mut behavior = self
            .tree
            .take_behavior(id)
            .ok_or(TreeError::StaleHandle(id))?;
        let result = {
            let any: &mut dyn Any = behavior.as_mut();
            match any.downcast_mut::<T>() {
                Some(typed) => {
                    let mut cx = EventCx::new(
                        &mut self.tree,
                        &mut self.interaction,
                        &self.config,
                        &*self.metrics,
                        id,
                    );
                    Ok(f(typed, &mut cx))
                }
                None => Err(TreeError::BehaviorMismatch {
                    node: id,
                    expected: std::any::type_name::<T>(),
                }),
            }
        };
        self.tree.restore_behavior(id, behavior);
        self.settle();
        result
    }

    /// Draws every visible top-level widget.
    pub fn render(&self, surface: &mut dyn Surface) {
        profile_function!();
        self.tree.render_children(self.tree.root(), surface);
    }

    fn deliver_to(&mut self, target: Option<NodeId>, event: &Event) -> bool {
        match target {
            Some(id) => self.deliver(id, event),
            None => false,
        }
    }

    fn deliver(&mut self, id: NodeId, event: &Event) -> bool {
        let Some(mut behavior) = self.tree.take_behavior(id) else {
            tracing::trace!(?id, "Skipping event for missing or busy widget");
            return false;
        };
        let handled = {
            let mut cx = EventCx::new(
                &mut self.tree,
                &mut self.interaction,
                &self.config,
                &*self.metrics,
                id,
            );
            dispatch(behavior.as_mut(), &mut cx, event)
        };
        tracing::trace!(
            ?id,
            widget = behavior.debug_name(),
            message = ?event.message(),
            handled,
            "Delivered event"
        );
        self.tree.restore_behavior(id, behavior);
        handled
    }

    fn run_fallback(&mut self, event: &Event) -> bool {
        self.fallback.as_mut().is_some_and(|fallback| fallback(event))
    }

    /// Moves `role` to `target`, delivering the leave event to the old holder
    /// strictly before the enter event to the new one.
    fn assign(&mut self, role: Role, target: Option<NodeId>, at: Point) {
        let target = target.filter(|id| self.tree.contains(*id));
        if self.interaction.get(role) == target {
            return;
        }
        if let Some(old) = self.interaction.set(role, None) {
            self.tree.update_state(old, role.flag(), false);
            tracing::debug!(?role, widget = ?old, "Leaving");
            self.deliver(old, &Event::action(role.leave(), at));
        }
        if let Some(new) = target {
            self.interaction.set(role, Some(new));
            self.tree.update_state(new, role.flag(), true);
            tracing::debug!(?role, widget = ?new, "Entering");
            self.deliver(new, &Event::action(role.enter(), at));
        }
    }

    /// Applies queued register requests, then releases registers whose
    /// widget was removed or became hidden.
    fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_ROUNDS {
            let requests = self.interaction.take_requests();
            let mut changed = !requests.is_empty();
            for Request::Assign(role, target) in requests {
                self.assign(role, target, self.cursor);
            }
            for role in Role::ALL {
                let Some(id) = self.interaction.get(role) else {
                    continue;
                };
                if !self.tree.contains(id) {
                    tracing::debug!(?role, widget = ?id, "Clearing register of removed widget");
                    self.interaction.set(role, None);
                    changed = true;
                } else if !self.tree.is_visible(id) {
                    self.assign(role, None, self.cursor);
                    changed = true;
                }
            }
            if !changed {
                return;
            }
        }
        tracing::warn!("Interaction registers did not settle");
    }
}
