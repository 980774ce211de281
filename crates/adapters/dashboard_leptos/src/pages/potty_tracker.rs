use leptos::prelude::*;

/// Confirmation shown after a successful potty break.
#[component]
pub fn PottyTracker() -> impl IntoView {
    view! {
        <div class="potty-tracker">
            <div class="tracker-card">
                <img class="tracker-image" src="/static/images/happy_dog.png" alt="Happy dog"/>
                <h1>"Successful Potty"</h1>
                <p>"Thank you for letting me out!"</p>
            </div>
        </div>
    }
}
