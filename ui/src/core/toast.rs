//! Toast notification model.
//!
//! A [`ToastStack`] tracks every outstanding toast against a millisecond clock
//! supplied by the caller. Each toast goes through two phases:
//!
//! ```text
//! shown ──(visible_ms)──▶ leaving ──(exit_ms)──▶ removed
//! ```
//!
//! The stack never reads a clock itself: the browser host feeds it
//! `timing::now_ms()` from timer callbacks, tests feed it a simulated clock.
//! Toasts never coalesce; each [`ToastStack::show_at`] call yields a new entry
//! and a [`ToastId`] that can end it early through [`ToastStack::dismiss`].

use std::fmt;

/// Delay before a toast starts its exit animation.
pub const VISIBLE_MS: u64 = 3_000;
/// Exit animation length; the toast is removed once it elapses.
pub const EXIT_MS: u64 = 300;

/// Vertical distance between stacked toasts, in pixels.
pub const STACK_STEP_PX: u32 = 72;
const STACK_TOP_PX: u32 = 20;

/// Registered once by the toast host.
pub const TOAST_CSS: &str = r#"
.toast {
    position: fixed;
    top: 20px;
    right: 20px;
    padding: 1rem 1.5rem;
    background: white;
    border-radius: 8px;
    box-shadow: 0 4px 12px rgba(0,0,0,0.15);
    z-index: 9999;
    animation: slideIn 0.3s ease;
}
.toast--leaving { animation: slideIn 0.3s ease reverse; }
.toast-success { border-left: 4px solid #51cf66; }
.toast-error { border-left: 4px solid #ff6b6b; }
.toast-info { border-left: 4px solid #667eea; }
@keyframes slideIn {
    from { transform: translateX(400px); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}
"#;

/// Visual severity of a toast. Unknown tags are kept verbatim and simply have
/// no accent rule in [`TOAST_CSS`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Severity {
    Success,
    Error,
    #[default]
    Info,
    Other(String),
}

impl Severity {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "success" => Self::Success,
            "error" => Self::Error,
            "info" => Self::Info,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Leaving,
}

/// Phase durations; defaults to [`VISIBLE_MS`] / [`EXIT_MS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTiming {
    pub visible_ms: u64,
    pub exit_ms: u64,
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self {
            visible_ms: VISIBLE_MS,
            exit_ms: EXIT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub phase: ToastPhase,
    leave_at_ms: u64,
    remove_at_ms: u64,
}

impl Toast {
    /// Class list rendered on the toast element.
    pub fn class_name(&self) -> String {
        let mut class = format!("toast toast-{}", self.severity.tag());
        if self.phase == ToastPhase::Leaving {
            class.push_str(" toast--leaving");
        }
        class
    }

    pub fn leave_at_ms(&self) -> u64 {
        self.leave_at_ms
    }

    pub fn remove_at_ms(&self) -> u64 {
        self.remove_at_ms
    }
}

/// Outstanding toasts in creation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastStack {
    toasts: Vec<Toast>,
    timing: ToastTiming,
    next_id: u64,
    now_ms: u64,
}

impl ToastStack {
    pub fn new(timing: ToastTiming) -> Self {
        Self {
            timing,
            ..Self::default()
        }
    }

    pub fn timing(&self) -> ToastTiming {
        self.timing
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|toast| toast.id == id)
    }

    /// Adds a toast shown at `now_ms`. The clock first advances to `now_ms`.
    pub fn show_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now_ms: u64,
    ) -> ToastId {
        self.advance_to(now_ms);
        let id = ToastId(self.next_id);
        self.next_id += 1;

        let leave_at_ms = self.now_ms.saturating_add(self.timing.visible_ms);
        let toast = Toast {
            id,
            message: message.into(),
            severity,
            phase: ToastPhase::Visible,
            leave_at_ms,
            remove_at_ms: leave_at_ms.saturating_add(self.timing.exit_ms),
        };
        tracing::debug!(id = id.0, severity = %toast.severity, "toast shown");
        self.toasts.push(toast);
        id
    }

    /// Starts the exit of `id` now. Returns `false` if the toast is gone or
    /// already leaving.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let now = self.now_ms;
        let exit_ms = self.timing.exit_ms;
        match self.toasts.iter_mut().find(|toast| toast.id == id) {
            Some(toast) if toast.phase == ToastPhase::Visible => {
                toast.phase = ToastPhase::Leaving;
                toast.leave_at_ms = now;
                toast.remove_at_ms = now.saturating_add(exit_ms);
                tracing::debug!(id = id.0, "toast dismissed");
                true
            }
            _ => false,
        }
    }

    /// Moves the clock forward and applies due phase changes. The clock never
    /// moves backwards.
    pub fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;

        self.toasts.retain(|toast| {
            let keep = now < toast.remove_at_ms;
            if !keep {
                tracing::debug!(id = toast.id.0, "toast removed");
            }
            keep
        });
        for toast in &mut self.toasts {
            if now >= toast.leave_at_ms {
                toast.phase = ToastPhase::Leaving;
            }
        }
    }

    /// Earliest pending phase change, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.toasts
            .iter()
            .map(|toast| match toast.phase {
                ToastPhase::Visible => toast.leave_at_ms,
                ToastPhase::Leaving => toast.remove_at_ms,
            })
            .min()
    }

    /// Pixel offset from the top of the viewport for the toast at `index`.
    pub fn top_offset_px(index: usize) -> u32 {
        STACK_TOP_PX + STACK_STEP_PX * index as u32
    }
}

/// Something that can put a toast on screen.
pub trait ToastSink {
    fn show_toast(&mut self, message: &str, severity: Severity) -> ToastId;
}

impl ToastSink for ToastStack {
    fn show_toast(&mut self, message: &str, severity: Severity) -> ToastId {
        let now = self.now_ms;
        self.show_at(message, severity, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_toast_carries_both_classes_and_expires() {
        let mut stack = ToastStack::default();
        let id = stack.show_at("X", Severity::Success, 1_000);

        assert_eq!(stack.len(), 1);
        let toast = stack.get(id).unwrap();
        assert_eq!(toast.message, "X");
        assert_eq!(toast.class_name(), "toast toast-success");

        stack.advance_to(3_999);
        assert_eq!(stack.get(id).unwrap().phase, ToastPhase::Visible);

        stack.advance_to(4_000);
        let leaving = stack.get(id).unwrap();
        assert_eq!(leaving.phase, ToastPhase::Leaving);
        assert!(leaving.class_name().contains("toast--leaving"));

        stack.advance_to(4_299);
        assert_eq!(stack.len(), 1);
        stack.advance_to(4_300);
        assert!(stack.is_empty());
    }

    #[test]
    fn unknown_severity_is_kept_verbatim() {
        let severity = Severity::from_tag("warning");
        assert_eq!(severity, Severity::Other("warning".into()));

        let mut stack = ToastStack::default();
        let id = stack.show_at("careful", severity, 0);
        assert_eq!(stack.get(id).unwrap().class_name(), "toast toast-warning");
        assert!(!TOAST_CSS.contains(".toast-warning"));
    }

    #[test]
    fn toasts_are_independent() {
        let mut stack = ToastStack::default();
        let first = stack.show_at("one", Severity::Info, 0);
        let second = stack.show_at("two", Severity::Info, 1_000);
        assert_ne!(first, second);

        stack.advance_to(3_300);
        assert!(stack.get(first).is_none());
        assert_eq!(stack.get(second).unwrap().phase, ToastPhase::Visible);

        stack.advance_to(4_300);
        assert!(stack.is_empty());
    }

    #[test]
    fn dismiss_shortens_the_timeline() {
        let mut stack = ToastStack::default();
        let id = stack.show_at("bye", Severity::Error, 500);
        stack.advance_to(600);

        assert!(stack.dismiss(id));
        assert!(!stack.dismiss(id));
        assert_eq!(stack.next_deadline(), Some(900));

        stack.advance_to(900);
        assert!(stack.get(id).is_none());
        assert!(!stack.dismiss(id));
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut stack = ToastStack::default();
        stack.advance_to(10_000);
        let id = stack.show_at("late", Severity::Info, 5_000);
        assert_eq!(stack.now_ms(), 10_000);
        assert_eq!(stack.get(id).unwrap().leave_at_ms(), 13_000);
    }

    #[test]
    fn custom_timing_applies() {
        let mut stack = ToastStack::new(ToastTiming {
            visible_ms: 100,
            exit_ms: 10,
        });
        let id = stack.show_toast("quick", Severity::Info);
        assert_eq!(stack.get(id).unwrap().remove_at_ms(), 110);
    }

    #[test]
    fn stack_offsets_grow_per_index() {
        assert_eq!(ToastStack::top_offset_px(0), 20);
        assert_eq!(ToastStack::top_offset_px(2), 20 + 2 * STACK_STEP_PX);
    }
}
