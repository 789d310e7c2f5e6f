use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum EventKind {
    Click,
    Submit,
    Input,
    Change,
    Focus,
    Blur,
}

impl EventKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
            Self::Input => "input",
            Self::Change => "change",
            Self::Focus => "focus",
            Self::Blur => "blur",
        }
    }

    pub(crate) fn bubbles(self) -> bool {
        !matches!(self, Self::Focus | Self::Blur)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) kind: EventKind,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) default_prevented: bool,
}

impl EventState {
    pub(crate) fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            default_prevented: false,
        }
    }

    pub(crate) fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Behaviors the controller attaches; the registry stores them in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Handler {
    ToggleMenu,
    CloseMenuFromNavLink,
    CloseMenuOnOutsideClick,
    ToggleDropdown { dropdown: NodeId },
    CloseDropdownsOnOutsideClick,
    SmoothScrollAnchor,
    ScrollToTop,
    SubmitForm { form: usize },
    LiveValidate { form: usize },
    ClearErrorOnInput { form: usize },
}

/// Handlers per `(node, event)` pair, in registration order.
#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    by_target: HashMap<(NodeId, EventKind), Vec<Handler>>,
}

impl ListenerStore {
    /// Re-adding the same handler to the same node is a no-op, as with `addEventListener`.
    pub(crate) fn add(&mut self, node_id: NodeId, kind: EventKind, handler: Handler) {
        let handlers = self.by_target.entry((node_id, kind)).or_default();
        if !handlers.contains(&handler) {
            handlers.push(handler);
        }
    }

    /// A snapshot, so handlers may register listeners while running.
    pub(crate) fn get(&self, node_id: NodeId, kind: EventKind) -> Vec<Handler> {
        self.by_target
            .get(&(node_id, kind))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_target.values().map(Vec::len).sum()
    }
}
