//! Users, email aliases and memberships.
//!
//! Most of these endpoints require an enterprise admin token.
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use time::OffsetDateTime;
use tracing::instrument;

use crate::{
    api::{is_no_content, Collection, MaybeUnknown},
    client::NO_BODY,
    errors::Error,
    items::{Group, Item, MiniUser},
    Client,
};

/// Role of a user within the enterprise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Enterprise admin.
    Admin,
    /// Co-admin, with the permissions an admin grants.
    Coadmin,
    /// Regular user.
    User,
}

/// Account status of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Can log in.
    Active,
    /// Can't log in.
    Inactive,
    /// Can't be deleted or edited by admins.
    CannotDeleteEdit,
    /// Can't be deleted or edited, and can't upload.
    CannotDeleteEditUpload,
}

/// Custom tracking code set by an admin.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingCode {
    /// Always `tracking_code`.
    #[serde(rename = "type")]
    pub typ: Option<String>,
    /// Name of the code.
    pub name: Option<String>,
    /// Value of the code.
    pub value: Option<String>,
}

/// A Box user.
///
/// Every field is optional: absent fields are left out of requests,
/// and are `None` when the API didn't return them.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Always `user`.
    #[serde(rename = "type")]
    pub typ: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    /// Primary login (email).
    pub login: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub modified_at: Option<OffsetDateTime>,
    pub role: Option<MaybeUnknown<Role>>,
    pub language: Option<String>,
    pub timezone: Option<String>,
    /// Bytes of storage the user may use.
    pub space_amount: Option<i64>,
    /// Bytes of storage used.
    pub space_used: Option<i64>,
    /// Largest upload allowed, in bytes.
    pub max_upload_size: Option<i64>,
    pub tracking_codes: Option<Vec<TrackingCode>>,
    pub can_see_managed_users: Option<bool>,
    pub is_sync_enabled: Option<bool>,
    pub is_external_collab_restricted: Option<bool>,
    pub status: Option<MaybeUnknown<UserStatus>>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
    pub is_exempt_from_device_limits: Option<bool>,
    pub is_exempt_from_login_verification: Option<bool>,
    pub enterprise: Option<Item>,
    pub my_tags: Option<Vec<String>>,
}

/// An additional email address of a user.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAlias {
    /// Always `email_alias`.
    #[serde(rename = "type")]
    pub typ: Option<String>,
    pub id: Option<String>,
    /// Whether the user has confirmed the address.
    pub is_confirmed: Option<bool>,
    pub email: Option<String>,
}

/// Membership of a user in a group.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    /// Always `group_membership`.
    #[serde(rename = "type")]
    pub typ: Option<String>,
    pub id: Option<String>,
    pub user: Option<MiniUser>,
    pub group: Option<Group>,
    /// `member` or `admin`.
    pub role: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub modified_at: Option<OffsetDateTime>,
}

/// Request body of [`Client::change_primary_login`].
#[derive(Debug, Serialize)]
pub struct ChangeLoginReq<'a> {
    /// New login. Must already be a confirmed email alias.
    pub login: &'a str,
}

/// Request body of [`Client::add_email_alias`].
#[derive(Debug, Serialize)]
pub struct AddEmailAliasReq<'a> {
    /// The address to add.
    pub email: &'a str,
}

/// Request body of [`Client::transfer_owned_items`].
#[derive(Debug, Serialize)]
pub struct TransferOwnedItemsReq<'a> {
    /// The user receiving the items.
    pub owned_by: OwnedBy<'a>,
}

/// New owner in a [`TransferOwnedItemsReq`].
#[derive(Debug, Serialize)]
pub struct OwnedBy<'a> {
    /// Id of the new owner.
    pub id: &'a str,
}

impl Client {
    /// Get the user the access token belongs to.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - bad credentials
    #[instrument(skip(self))]
    pub async fn me(&self) -> crate::Result<User> {
        let req = self.new_request(Method::GET, "/users/me", NO_BODY)?;

        self.send_json(req).await
    }

    /// Change the primary login of a user. The new login must be one
    /// of the user's confirmed email aliases.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such user
    /// - `login` is not a confirmed alias
    #[instrument(skip(self))]
    pub async fn change_primary_login(&self, user_id: &str, login: &str) -> crate::Result<User> {
        let req = self.new_request_at(
            Method::PUT,
            &["users", user_id],
            Some(&ChangeLoginReq { login }),
        )?;

        self.send_json(req).await
    }

    /// List the email aliases of a user, not including the primary login.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such user
    #[instrument(skip(self))]
    pub async fn email_aliases(&self, user_id: &str) -> crate::Result<Vec<EmailAlias>> {
        let req = self.new_request_at(Method::GET, &["users", user_id, "email_aliases"], NO_BODY)?;

        let aliases: Collection<EmailAlias> = self.send_json(req).await?;

        Ok(aliases.into_entries())
    }

    /// Add an email alias to a user.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such user
    /// - the address is already in use
    #[instrument(skip(self))]
    pub async fn add_email_alias(&self, user_id: &str, email: &str) -> crate::Result<EmailAlias> {
        let req = self.new_request_at(
            Method::POST,
            &["users", user_id, "email_aliases"],
            Some(&AddEmailAliasReq { email }),
        )?;

        self.send_json(req).await
    }

    /// Remove an email alias from a user. Returns `true` if the API
    /// answered `204 No Content`.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such user or alias
    #[instrument(skip(self))]
    pub async fn delete_email_alias(&self, user_id: &str, alias_id: &str) -> crate::Result<bool> {
        let req = self.new_request_at(
            Method::DELETE,
            &["users", user_id, "email_aliases", alias_id],
            NO_BODY,
        )?;

        Ok(is_no_content(self.send(req).await?))
    }

    /// List the users of the enterprise. Only the first page is returned.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - the token isn't an admin's
    #[instrument(skip(self))]
    pub async fn enterprise_users(&self) -> crate::Result<Collection<User>> {
        let req = self.new_request(Method::GET, "/users", NO_BODY)?;

        self.send_json(req).await
    }

    /// List the group memberships of a user.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such user
    #[instrument(skip(self))]
    pub async fn memberships(&self, user_id: &str) -> crate::Result<Collection<Membership>> {
        let req = self.new_request_at(Method::GET, &["users", user_id, "memberships"], NO_BODY)?;

        self.send_json(req).await
    }

    /// Create an enterprise user. `name` and `login` are required by the API.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - the login is already taken
    #[instrument(skip_all)]
    pub async fn create_user(&self, user: &User) -> crate::Result<User> {
        let req = self.new_request(Method::POST, "/users", Some(user))?;

        self.send_json(req).await
    }

    /// Get a user.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such user
    #[instrument(skip(self))]
    pub async fn user(&self, user_id: &str) -> crate::Result<User> {
        let req = self.new_request_at(Method::GET, &["users", user_id], NO_BODY)?;

        self.send_json(req).await
    }

    /// Update a user. Only the fields that are set are changed.
    ///
    /// # Errors
    ///
    /// - `user.id` is `None`
    /// - network errors
    /// - no such user
    #[instrument(skip_all, fields(user_id = ?user.id))]
    pub async fn update_user(&self, user: &User) -> crate::Result<User> {
        let user_id = user.id.as_deref().ok_or(Error::MissingId)?;

        let req = self.new_request_at(Method::PUT, &["users", user_id], Some(user))?;

        self.send_json(req).await
    }

    /// Delete a user. The API answers `204 No Content` on success.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such user
    /// - the user still owns content
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: &str) -> crate::Result<reqwest::StatusCode> {
        let req = self.new_request_at(Method::DELETE, &["users", user_id], NO_BODY)?;

        self.send(req).await
    }

    /// Move everything `user_id` owns into a new folder in the root of
    /// `to_user_id`. Returns that folder.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such user
    #[instrument(skip(self))]
    pub async fn transfer_owned_items(
        &self,
        user_id: &str,
        to_user_id: &str,
        notify: bool,
    ) -> crate::Result<Item> {
        let mut req = self.new_request_at(
            Method::PUT,
            &["users", user_id, "folders", "0"],
            Some(&TransferOwnedItemsReq {
                owned_by: OwnedBy { id: to_user_id },
            }),
        )?;

        req.url_mut()
            .query_pairs_mut()
            .append_pair("notify", if notify { "true" } else { "false" });

        self.send_json(req).await
    }
}
