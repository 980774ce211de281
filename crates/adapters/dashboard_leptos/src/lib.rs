use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};
use wasm_bindgen::prelude::*;

mod components;
pub mod dom;
pub mod error;
pub mod grant;
mod pages;
pub mod sse;
pub mod widget;

use components::Nav;
use pages::{Login, NotFound, PottyTracker, Register};

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <Nav/>
            <main>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=PottyTracker/>
                    <Route path=path!("login") view=Login/>
                    <Route path=path!("register") view=Register/>
                </Routes>
            </main>
        </Router>
    }
}

/// Start the live status widget of the server-rendered dashboard.
///
/// Called from the dashboard page once the widget markup is in the DOM.
#[wasm_bindgen]
pub fn mount_status_widget(channel: String) {
    widget::mount(channel);
}
