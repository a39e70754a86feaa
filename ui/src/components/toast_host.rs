use dioxus::prelude::*;

use crate::core::config::DashboardConfig;
use crate::core::toast::{Severity, Toast, ToastId, ToastSink, ToastStack, TOAST_CSS};
use crate::core::{platform, timing};

/// Handle for showing and dismissing toasts from any component under a
/// [`ToastHost`].
#[derive(Clone, Copy, PartialEq)]
pub struct Toaster {
    stack: Signal<ToastStack>,
}

impl Toaster {
    /// Shows a toast and schedules its exit and removal.
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> ToastId {
        let mut stack = self.stack;
        let (id, leave_at, remove_at) = stack.with_mut(|stack| {
            let id = stack.show_at(message, severity, timing::now_ms());
            let toast = stack.get(id).map(|t| (t.leave_at_ms(), t.remove_at_ms()));
            let (leave_at, remove_at) = toast.unwrap_or_default();
            (id, leave_at, remove_at)
        });
        let durations = stack.peek().timing();

        platform::spawn_future(async move {
            timing::sleep_ms(durations.visible_ms).await;
            stack.with_mut(|stack| stack.advance_to(timing::now_ms().max(leave_at)));
            timing::sleep_ms(durations.exit_ms).await;
            stack.with_mut(|stack| stack.advance_to(timing::now_ms().max(remove_at)));
        });
        id
    }

    /// Starts the exit animation of `id` right away.
    pub fn dismiss(&self, id: ToastId) {
        let mut stack = self.stack;
        let dismissed = stack.with_mut(|stack| {
            stack.advance_to(timing::now_ms());
            stack.dismiss(id)
        });
        if !dismissed {
            return;
        }

        let exit_ms = stack.peek().timing().exit_ms;
        let remove_at = stack.peek().get(id).map(Toast::remove_at_ms).unwrap_or_default();
        platform::spawn_future(async move {
            timing::sleep_ms(exit_ms).await;
            stack.with_mut(|stack| stack.advance_to(timing::now_ms().max(remove_at)));
        });
    }
}

impl ToastSink for Toaster {
    fn show_toast(&mut self, message: &str, severity: Severity) -> ToastId {
        self.show(message, severity)
    }
}

/// The nearest [`Toaster`]. Panics outside a [`ToastHost`].
pub fn use_toaster() -> Toaster {
    use_context::<Toaster>()
}

/// Provides a [`Toaster`] to `children` and renders the outstanding toasts.
///
/// The toast stylesheet is registered here, once per host.
#[component]
pub fn ToastHost(children: Element) -> Element {
    let durations = try_use_context::<DashboardConfig>()
        .unwrap_or_default()
        .toast;
    let stack = use_signal(|| ToastStack::new(durations));
    use_context_provider(|| Toaster { stack });

    let toasts = stack.read().toasts().to_vec();

    rsx! {
        document::Style { "{TOAST_CSS}" }

        {children}

        div { class: "toast-host", aria_live: "polite",
            for (index, toast) in toasts.into_iter().enumerate() {
                ToastItem { key: "{toast.id.get()}", index, toast: toast.clone() }
            }
        }
    }
}

#[component]
fn ToastItem(toast: Toast, index: usize) -> Element {
    let toaster = use_toaster();
    let id = toast.id;
    let top = ToastStack::top_offset_px(index);

    rsx! {
        div {
            class: toast.class_name(),
            style: "top: {top}px;",
            role: "status",
            onclick: move |_| toaster.dismiss(id),
            "{toast.message}"
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    use super::*;
    use crate::core::toast::ToastPhase;

    thread_local! {
        static HOST_TOASTER: Cell<Option<Toaster>> = const { Cell::new(None) };
    }

    fn app() -> Element {
        rsx! {
            ToastHost { CaptureToaster {} }
        }
    }

    #[component]
    fn CaptureToaster() -> Element {
        let toaster = use_toaster();
        use_hook(move || HOST_TOASTER.with(|slot| slot.set(Some(toaster))));
        rsx! {}
    }

    fn mounted() -> (VirtualDom, Toaster) {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        let toaster = HOST_TOASTER.with(Cell::get).expect("host renders its children");
        (dom, toaster)
    }

    fn snapshot(dom: &VirtualDom, toaster: Toaster) -> ToastStack {
        dom.in_runtime(|| toaster.stack.peek().clone())
    }

    /// Polls the dom until the stack is empty, recording the first toast's phases.
    async fn run_until_empty(dom: &mut VirtualDom, toaster: Toaster) -> Vec<ToastPhase> {
        let mut phases = Vec::new();
        for _ in 0..16 {
            match snapshot(dom, toaster).toasts().first() {
                Some(toast) => phases.push(toast.phase),
                None => return phases,
            }
            dom.wait_for_work().await;
            dom.render_immediate_to_vec();
        }
        panic!("toast never removed, phases seen: {phases:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn shown_toast_leaves_then_disappears() {
        let (mut dom, toaster) = mounted();
        let start = tokio::time::Instant::now();

        let id = dom.in_runtime(|| ScopeId::ROOT.in_runtime(|| toaster.show("X", Severity::Success)));
        let stack = snapshot(&dom, toaster);
        assert_eq!(stack.len(), 1);
        let toast = stack.get(id).unwrap();
        assert_eq!(toast.message, "X");
        assert_eq!(toast.class_name(), "toast toast-success");

        let phases = run_until_empty(&mut dom, toaster).await;
        assert_eq!(phases.first(), Some(&ToastPhase::Visible));
        assert!(phases.contains(&ToastPhase::Leaving));
        assert!(start.elapsed() >= Duration::from_millis(3_300));
    }

    #[tokio::test(start_paused = true)]
    async fn dismissed_toast_is_removed_after_exit() {
        let (mut dom, toaster) = mounted();
        let start = tokio::time::Instant::now();

        dom.in_runtime(|| {
            ScopeId::ROOT.in_runtime(|| {
                let id = toaster.show("bye", Severity::Error);
                toaster.dismiss(id);
            })
        });
        assert_eq!(snapshot(&dom, toaster).toasts()[0].phase, ToastPhase::Leaving);

        run_until_empty(&mut dom, toaster).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed < Duration::from_millis(3_000));
    }
}
