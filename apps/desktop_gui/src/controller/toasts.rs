//! Transient notifications raised by the contact controller.

use std::time::{Duration, Instant};

use client_core::{Notification, NotificationKind, Notifier};
use crossbeam_channel::{unbounded, Receiver, Sender};

pub const SUCCESS_TOAST_TTL: Duration = Duration::from_secs(3);
pub const ERROR_TOAST_TTL: Duration = Duration::from_secs(5);

/// Notifier handed to the controller; the UI drains the other end.
#[derive(Debug, Clone)]
pub struct ToastSender(Sender<Notification>);

impl Notifier for ToastSender {
    fn notify(&self, kind: NotificationKind, message: &str) {
        let _ = self.0.send(Notification::new(kind, message));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub notification: Notification,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct ToastQueue {
    rx: Receiver<Notification>,
    active: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> (ToastSender, Self) {
        let (tx, rx) = unbounded();
        (
            ToastSender(tx),
            Self {
                rx,
                active: Vec::new(),
            },
        )
    }

    /// Takes new notifications and drops expired ones.
    pub fn pump(&mut self, now: Instant) {
        while let Ok(notification) = self.rx.try_recv() {
            let ttl = match notification.kind {
                NotificationKind::Error => ERROR_TOAST_TTL,
                NotificationKind::Success | NotificationKind::Info => SUCCESS_TOAST_TTL,
            };
            self.active.push(Toast {
                notification,
                expires_at: now + ttl,
            });
        }
        self.active.retain(|toast| toast.expires_at > now);
    }

    pub fn active(&self) -> &[Toast] {
        &self.active
    }

    pub fn dismiss(&mut self, index: usize) {
        if index < self.active.len() {
            self.active.remove(index);
        }
    }
}
