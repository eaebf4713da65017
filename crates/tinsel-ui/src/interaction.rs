//! The root's interaction registers.
//!
//! Each register names at most one widget currently in that role. They hold
//! handles, never ownership; a handle whose widget was removed simply stops
//! resolving and is cleared the next time the root reconciles.

use crate::event::ActionKind;
use crate::state::WidgetState;
use crate::tree::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Hover,
    Focus,
    Drag,
    Mark,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Hover, Role::Focus, Role::Drag, Role::Mark];

    /// State flag mirrored on the widget holding this role.
    pub fn flag(self) -> WidgetState {
        match self {
            Role::Hover => WidgetState::HOVER,
            Role::Focus => WidgetState::FOCUS,
            Role::Drag => WidgetState::DRAGGED,
            Role::Mark => WidgetState::MARKED,
        }
    }

    pub fn enter(self) -> ActionKind {
        match self {
            Role::Hover => ActionKind::Hover,
            Role::Focus => ActionKind::Focus,
            Role::Drag => ActionKind::Drag,
            Role::Mark => ActionKind::Mark,
        }
    }

    pub fn leave(self) -> ActionKind {
        match self {
            Role::Hover => ActionKind::Unhover,
            Role::Focus => ActionKind::Blur,
            Role::Drag => ActionKind::Drop,
            Role::Mark => ActionKind::Unmark,
        }
    }
}

/// A register change asked for by a handler, applied once its dispatch ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Assign(Role, Option<NodeId>),
}

#[derive(Debug, Clone, Default)]
pub struct Interaction {
    hover: Option<NodeId>,
    focus: Option<NodeId>,
    drag: Option<NodeId>,
    mark: Option<NodeId>,
    requests: Vec<Request>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: Role) -> Option<NodeId> {
        match role {
            Role::Hover => self.hover,
            Role::Focus => self.focus,
            Role::Drag => self.drag,
            Role::Mark => self.mark,
        }
    }

    pub(crate) fn set(&mut self, role: Role, id: Option<NodeId>) -> Option<NodeId> {
        let slot = match role {
            Role::Hover => &mut self.hover,
            Role::Focus => &mut self.focus,
            Role::Drag => &mut self.drag,
            Role::Mark => &mut self.mark,
        };
        std::mem::replace(slot, id)
    }

    pub fn hover(&self) -> Option<NodeId> {
        self.hover
    }

    pub fn focus(&self) -> Option<NodeId> {
        self.focus
    }

    pub fn drag(&self) -> Option<NodeId> {
        self.drag
    }

    pub fn mark(&self) -> Option<NodeId> {
        self.mark
    }

    /// Roles currently held by `id`.
    pub fn roles_of(&self, id: NodeId) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(move |role| self.get(*role) == Some(id))
    }

    pub(crate) fn request(&mut self, request: Request) {
        self.requests.push(request);
    }

    pub(crate) fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }
}
