use crate::api::types::ServerMessage;

/// UI tick period the toast lifetimes are counted in.
pub const TICK_MILLIS: u64 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    ticks_left: u64,
}

/// Stack of auto-dismissing notifications, newest last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toasts {
    lifetime_ticks: u64,
    items: Vec<Toast>,
}

impl Toasts {
    pub fn new(toast_millis: u64) -> Self {
        Self {
            lifetime_ticks: toast_millis.div_ceil(TICK_MILLIS).max(1),
            items: Vec::new(),
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.items.push(Toast {
            message: message.into(),
            kind,
            ticks_left: self.lifetime_ticks,
        });
    }

    pub fn notify_server(&mut self, msg: &ServerMessage) {
        let kind = if msg.is_error {
            ToastKind::Error
        } else {
            ToastKind::Success
        };
        self.notify(msg.value.clone(), kind);
    }

    pub fn tick(&mut self) {
        for toast in &mut self.items {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
        }
        self.items.retain(|t| t.ticks_left > 0);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
