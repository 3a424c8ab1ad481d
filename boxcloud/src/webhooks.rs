//! Webhooks (V2).
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use strum::{Display, EnumString};
use time::OffsetDateTime;
use tracing::instrument;

use crate::{
    api::{Collection, MaybeUnknown},
    client::NO_BODY,
    items::MiniUser,
    Client,
};

/// What kind of item a webhook is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TargetType {
    /// A file.
    File,
    /// A folder, including everything in it.
    Folder,
}

/// The item a webhook is attached to, as returned by the API.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookTarget {
    /// Id of the file or folder.
    pub id: Option<String>,
    /// Usually a file or folder.
    #[serde(rename = "type")]
    pub typ: Option<MaybeUnknown<TargetType>>,
}

/// The item to attach a webhook to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TargetReq<'a> {
    /// Id of the file or folder.
    pub id: &'a str,
    /// File or folder.
    #[serde(rename = "type")]
    pub typ: TargetType,
}

impl From<TargetReq<'_>> for WebhookTarget {
    fn from(target: TargetReq<'_>) -> Self {
        Self {
            id: Some(target.id.to_owned()),
            typ: Some(target.typ.into()),
        }
    }
}

/// A webhook.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    /// Always `webhook`.
    #[serde(rename = "type")]
    pub typ: Option<String>,
    pub id: Option<String>,
    pub target: Option<WebhookTarget>,
    pub created_by: Option<MiniUser>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    /// The URL that gets notified.
    pub address: Option<String>,
    /// Events that fire the webhook, e.g. `FILE.UPLOADED`.
    pub triggers: Option<Vec<String>>,
}

/// Request body of [`Client::create_webhook`].
#[derive(Debug, Serialize)]
pub struct CreateWebhookReq<'a> {
    /// The item to watch.
    pub target: TargetReq<'a>,
    /// HTTPS URL to notify.
    pub address: &'a str,
    /// Events to be notified about.
    pub triggers: &'a [&'a str],
}

/// Request body of [`Client::update_webhook`]. Fields left as `None`
/// are not changed.
#[skip_serializing_none]
#[derive(Debug, Default, Serialize)]
pub struct UpdateWebhookReq<'a> {
    /// Move the webhook to another item.
    pub target: Option<TargetReq<'a>>,
    /// New URL to notify.
    pub address: Option<&'a str>,
    /// Replaces all triggers.
    pub triggers: Option<&'a [&'a str]>,
}

impl Client {
    /// Create a webhook on a file or folder.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such file or folder
    /// - a webhook with the same target and address already exists
    #[instrument(skip(self))]
    pub async fn create_webhook(
        &self,
        target: TargetReq<'_>,
        address: &str,
        triggers: &[&str],
    ) -> crate::Result<Webhook> {
        let req = self.new_request(
            Method::POST,
            "/webhooks",
            Some(&CreateWebhookReq {
                target,
                address,
                triggers,
            }),
        )?;

        self.send_json(req).await
    }

    /// Get a webhook.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such webhook
    #[instrument(skip(self))]
    pub async fn webhook(&self, webhook_id: &str) -> crate::Result<Webhook> {
        let req = self.new_request_at(Method::GET, &["webhooks", webhook_id], NO_BODY)?;

        self.send_json(req).await
    }

    /// List the webhooks created by the application. Only the first page
    /// is returned.
    ///
    /// # Errors
    ///
    /// - network errors
    #[instrument(skip(self))]
    pub async fn webhooks(&self) -> crate::Result<Collection<Webhook>> {
        let req = self.new_request(Method::GET, "/webhooks", NO_BODY)?;

        self.send_json(req).await
    }

    /// Update a webhook.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such webhook
    #[instrument(skip(self, update))]
    pub async fn update_webhook(
        &self,
        webhook_id: &str,
        update: &UpdateWebhookReq<'_>,
    ) -> crate::Result<Webhook> {
        let req = self.new_request_at(Method::PUT, &["webhooks", webhook_id], Some(update))?;

        self.send_json(req).await
    }

    /// Delete a webhook. The API answers `204 No Content` on success.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such webhook
    #[instrument(skip(self))]
    pub async fn delete_webhook(&self, webhook_id: &str) -> crate::Result<StatusCode> {
        let req = self.new_request_at(Method::DELETE, &["webhooks", webhook_id], NO_BODY)?;

        self.send(req).await
    }
}
