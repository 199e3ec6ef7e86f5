//! Home carousel administration and the public slide list

use reqwest::Method;
use crate::models::carousel::ReorderCarouselRequest;
use crate::models::{CarouselItem, PublicSlide, UpdateCarouselItemPayload, UpsertCarouselItemPayload};
use crate::utils::errors::ApiResult;
use super::client::{decode, decode_list, ApiClient};

impl ApiClient {
    pub async fn admin_list_carousel(&self) -> ApiResult<Vec<CarouselItem>> {
        let raw = self
            .call(Method::GET, "/api/admin/carousel", None, true, "Could not load the carousel")
            .await?;
        decode_list(raw)
    }

    pub async fn admin_create_carousel_item(&self, payload: &UpsertCarouselItemPayload) -> ApiResult<CarouselItem> {
        let raw = self
            .call_with(Method::POST, "/api/admin/carousel", payload, true, "Could not create the slide")
            .await?;
        decode(raw)
    }

    pub async fn admin_update_carousel_item(&self, id: i64, payload: &UpdateCarouselItemPayload) -> ApiResult<()> {
        self.call_with(
            Method::PUT,
            &format!("/api/admin/carousel/{}", id),
            payload,
            true,
            "Could not update the slide",
        )
        .await?;
        Ok(())
    }

    pub async fn admin_delete_carousel_item(&self, id: i64) -> ApiResult<()> {
        self.call(
            Method::DELETE,
            &format!("/api/admin/carousel/{}", id),
            None,
            true,
            "Could not delete the slide",
        )
        .await?;
        Ok(())
    }

    /// Persist a new slide order, first id first
    pub async fn admin_reorder_carousel(&self, ids_in_order: &[i64]) -> ApiResult<()> {
        let body = ReorderCarouselRequest {
            ids_in_order: ids_in_order.to_vec(),
        };
        self.call_with(
            Method::PUT,
            "/api/admin/carousel/reorder",
            &body,
            true,
            "Could not reorder the carousel",
        )
        .await?;
        Ok(())
    }

    /// Published slides in display order; no sign-in needed
    pub async fn list_public_carousel(&self) -> ApiResult<Vec<PublicSlide>> {
        let raw = self
            .call(Method::GET, "/api/carousel", None, false, "Could not load the carousel")
            .await?;
        decode_list(raw)
    }
}
