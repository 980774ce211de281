use pottydog_client::App;

fn main() {
    leptos::mount::mount_to_body(App);
}
