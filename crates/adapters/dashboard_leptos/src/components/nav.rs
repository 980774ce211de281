use leptos::prelude::*;

#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav>
            <ul>
                <li><a href="/">"Tracker"</a></li>
                <li><a href="/login">"Sign in"</a></li>
                <li><a href="/register">"Sign up"</a></li>
            </ul>
        </nav>
    }
}
