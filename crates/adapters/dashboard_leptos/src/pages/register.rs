use leptos::prelude::*;

use crate::components::AuthLayout;

/// Account creation form, submitted to the server's `/register` handler.
#[component]
pub fn Register() -> impl IntoView {
    view! {
        <AuthLayout>
            <form class="auth-form" method="post" action="/register">
                <div>
                    <label for="username">"Full Name"</label>
                    <input id="username" name="username" type="text" placeholder="Your name here" required/>
                </div>
                <div>
                    <label for="dog-name">"Dog's Name"</label>
                    <input id="dog-name" name="dog_name" type="text" placeholder="Fido" required/>
                </div>
                <div>
                    <label for="email">"Email"</label>
                    <input id="email" name="email" type="email" placeholder="your@email.com" required/>
                </div>
                <div>
                    <label for="password">"Password"</label>
                    <input id="password" name="password" type="password" placeholder="••••••••" required/>
                </div>
                <button type="submit">"Create Account"</button>
            </form>
            <p class="auth-switch">
                "Already have an account? "
                <a href="/login">"Sign in"</a>
            </p>
        </AuthLayout>
    }
}
