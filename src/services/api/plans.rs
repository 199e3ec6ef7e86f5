//! Subscription plan catalogue, public and admin

use reqwest::Method;
use serde_json::Value;
use tracing::warn;
use crate::models::{AdminApiPlan, PlanDefinition};
use crate::utils::errors::ApiResult;
use super::client::ApiClient;

/// Whether an upsert created a new plan or replaced an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

impl ApiClient {
    /// Plans shown on the pricing page
    pub async fn list_plans(&self) -> ApiResult<Vec<PlanDefinition>> {
        let raw = self
            .call(Method::GET, "/api/plans", None, false, "Could not load the plans")
            .await?;

        Ok(match raw {
            Value::Array(items) => items.iter().map(PlanDefinition::from_public).collect(),
            _ => Vec::new(),
        })
    }

    pub async fn admin_list_plans(&self) -> ApiResult<Vec<PlanDefinition>> {
        let raw = self
            .call(Method::GET, "/api/admin/plans", None, true, "Could not load the plans")
            .await?;

        let Value::Array(items) = raw else {
            return Ok(Vec::new());
        };

        Ok(items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<AdminApiPlan>(item) {
                Ok(plan) => Some(PlanDefinition::from(plan)),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed plan");
                    None
                }
            })
            .collect())
    }

    /// Create the plan, or replace it when a plan with the same id exists
    pub async fn admin_upsert_plan(&self, plan: &PlanDefinition) -> ApiResult<UpsertOutcome> {
        let body = plan.to_admin_body();
        let exists = self
            .admin_list_plans()
            .await?
            .iter()
            .any(|p| p.id == body.id);

        if exists {
            let path = format!("/api/admin/plans/{}", urlencoding::encode(&body.id));
            self.call_with(Method::PUT, &path, &body, true, "Could not update the plan")
                .await?;
            Ok(UpsertOutcome::Updated)
        } else {
            self.call_with(Method::POST, "/api/admin/plans", &body, true, "Could not create the plan")
                .await?;
            Ok(UpsertOutcome::Created)
        }
    }

    pub async fn admin_delete_plan(&self, id: &str) -> ApiResult<()> {
        let path = format!("/api/admin/plans/{}", urlencoding::encode(id));
        self.call(Method::DELETE, &path, None, true, "Could not delete the plan")
            .await?;
        Ok(())
    }
}
