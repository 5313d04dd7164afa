use crate::{
    app_lib::{ApiClient, AppError},
    features::profile::types::Profile,
};

pub async fn fetch_me(api: &ApiClient) -> Result<Profile, AppError> {
    api.get_json("/api/profile/me").await
}
