mod requests;
mod responses;

pub use requests::*;
pub use responses::*;

/// Path segments under the backend's user API prefix.
pub mod paths {
    pub const USER_API_PREFIX: &str = "/userApi";
    pub const ALL_USERS: &str = "/allUsers";
    pub const LOGIN: &str = "/login";

    pub fn grant_create_access(user_id: &str) -> String {
        format!("/grant-create-access/{user_id}")
    }

    pub fn revoke_create_access(user_id: &str) -> String {
        format!("/revoke-create-access/{user_id}")
    }
}
