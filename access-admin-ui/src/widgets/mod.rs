pub mod empty_state;
pub mod grant_dialog;
pub mod header;
pub mod tabs;
