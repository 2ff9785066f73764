use std::time::Duration;

use leptos::prelude::*;

const TOAST_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Clone, Debug, PartialEq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    fn class(&self) -> &'static str {
        match self {
            ToastLevel::Success => "toast toast-success",
            ToastLevel::Error => "toast toast-error",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub level: ToastLevel,
}

/// Handle for raising short-lived notices after a save or delete.
#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    nextId: StoredValue<u64>,
}

impl ToastContext {
    pub fn push(&self, message: String, level: ToastLevel) {
        let id = self.nextId.get_value();
        self.nextId.set_value(id + 1);

        self.toasts.update(|toasts| {
            toasts.push(Toast { id, message, level });
        });

        let toasts = self.toasts;
        set_timeout(
            move || toasts.update(|toasts| toasts.retain(|t| t.id != id)),
            TOAST_LIFETIME,
        );
    }
}

#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    let toasts = RwSignal::new(Vec::<Toast>::new());
    provide_context(ToastContext {
        toasts,
        nextId: StoredValue::new(0),
    });

    view! {
        {children()}
        <div class="toast-container">
            <For each=move || toasts.get() key=|toast| toast.id let:toast>
                <div class=toast.level.class()>{toast.message.clone()}</div>
            </For>
        </div>
    }
}
