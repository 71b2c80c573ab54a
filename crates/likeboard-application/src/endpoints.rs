//! REST paths consumed by the client, relative to the API base URL.

use likeboard_core::like::LikeId;

pub const LOGIN: &str = "/auth/login/";
pub const REGISTER: &str = "/auth/register/";
pub const VALIDATE_INVITATION: &str = "/auth/validate-invitation/";

pub const LIKES: &str = "/likes/";
pub const MY_LIKES: &str = "/likes/my-likes/";
pub const LIKE_STATS: &str = "/likes/stats/";
pub const RESET_LIKES: &str = "/likes/reset/";

pub const MARKETERS: &str = "/marketers/";
pub const RANKING: &str = "/marketers/ranking/";
pub const USER_STATS: &str = "/user/stats/";

pub fn like(id: LikeId) -> String {
    format!("/likes/{}/", id)
}
