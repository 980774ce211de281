use leptos::prelude::*;

use crate::components::AuthLayout;

/// Sign-in form, submitted to the server's `/login` handler.
#[component]
pub fn Login() -> impl IntoView {
    view! {
        <AuthLayout>
            <form class="auth-form" method="post" action="/login">
                <div>
                    <label for="email">"Email"</label>
                    <input id="email" name="email" type="email" placeholder="your@email.com" required/>
                </div>
                <div>
                    <label for="password">"Password"</label>
                    <input id="password" name="password" type="password" placeholder="••••••••" required/>
                </div>
                <button type="submit">"Sign In"</button>
            </form>
            <p class="auth-switch">
                "Don't have an account? "
                <a href="/register">"Sign up"</a>
            </p>
        </AuthLayout>
    }
}
