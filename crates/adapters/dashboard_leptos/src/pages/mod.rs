mod login;
mod not_found;
mod potty_tracker;
mod register;

pub use login::Login;
pub use not_found::NotFound;
pub use potty_tracker::PottyTracker;
pub use register::Register;
