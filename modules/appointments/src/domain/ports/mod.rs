mod notify;

pub use notify::{ConfirmationNotifier, NoopNotifier};
