use leptos::prelude::*;

/// Centered card shared by the sign-in and sign-up forms.
#[component]
pub fn AuthLayout(children: Children) -> impl IntoView {
    view! {
        <div class="auth-layout">
            <div class="auth-card">
                <h1>"Welcome Back"</h1>
                <div class="auth-body">{children()}</div>
            </div>
        </div>
    }
}
