//! User administration

use reqwest::Method;
use serde_json::json;
use crate::models::{AdminUser, Plan, Role};
use crate::utils::errors::ApiResult;
use super::client::{decode_list, ApiClient};

impl ApiClient {
    pub async fn admin_list_users(&self) -> ApiResult<Vec<AdminUser>> {
        let raw = self
            .call(Method::GET, "/api/admin/users", None, true, "Could not list users")
            .await?;
        decode_list(raw)
    }

    pub async fn admin_set_user_role(&self, id: i64, role: Role) -> ApiResult<()> {
        self.call(
            Method::PUT,
            &format!("/api/admin/users/{}/role", id),
            Some(json!({ "role": role })),
            true,
            "Could not change the role",
        )
        .await?;
        Ok(())
    }

    pub async fn admin_set_user_plan(&self, id: i64, plan: Plan) -> ApiResult<()> {
        self.call(
            Method::PUT,
            &format!("/api/admin/users/{}/plan", id),
            Some(json!({ "plan": plan })),
            true,
            "Could not change the plan",
        )
        .await?;
        Ok(())
    }

    pub async fn admin_delete_user(&self, id: i64) -> ApiResult<()> {
        self.call(
            Method::DELETE,
            &format!("/api/admin/users/{}", id),
            None,
            true,
            "Could not delete the user",
        )
        .await?;
        Ok(())
    }
}
