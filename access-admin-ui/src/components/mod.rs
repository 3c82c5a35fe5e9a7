pub mod button;
pub mod dialog;
pub mod input;
pub mod toast;
