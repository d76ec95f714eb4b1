use crate::api::client::VenomicsClient;
use crate::api::models::{Page, User};
use crate::core::pagination::{PageRequest, paginate};
use crate::error::AppError;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct UserListParams {
    page: u32,
    page_size: u32,
    disabled: bool,
}

impl VenomicsClient {
    /// GET `users`, one page, optionally only disabled accounts.
    pub async fn users(&self, page: PageRequest, only_disabled: bool) -> Result<Page<User>, AppError> {
        let params = UserListParams {
            page: page.page,
            page_size: page.page_size,
            disabled: only_disabled,
        };
        Ok(self.transport().get_json_with_query("users", &params).await?)
    }

    pub async fn all_users(&self, only_disabled: bool) -> Result<Vec<User>, AppError> {
        paginate(
            move |page| self.users(page, only_disabled),
            self.first_page(),
        )
        .await
    }
}
