pub mod access_management;
pub mod login;

pub use access_management::AccessManagement;
pub use login::Login;
