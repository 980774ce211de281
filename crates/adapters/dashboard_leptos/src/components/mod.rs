mod auth_layout;
mod nav;

pub use auth_layout::AuthLayout;
pub use nav::Nav;
