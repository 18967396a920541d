use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::session::{Role, Session};

/// Account as listed on the admin screen.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// AI requests made so far.
    #[serde(default)]
    pub total_requests: u64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Changes to an existing account. A `None` password keeps the current one.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct UserUpdate {
    pub username: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Remote user management; every call carries the admin's session.
#[async_trait]
pub trait AdminBackend: Send + Sync {
    async fn list_users(&self, session: &Session) -> anyhow::Result<Vec<ManagedUser>>;

    async fn create_user(&self, session: &Session, user: &NewUser) -> anyhow::Result<()>;

    async fn update_user(
        &self,
        session: &Session,
        id: i64,
        update: &UserUpdate,
    ) -> anyhow::Result<()>;

    async fn delete_user(&self, session: &Session, id: i64) -> anyhow::Result<()>;
}

/// Admin-only account operations. Changes return the refreshed user list.
pub struct UserAdmin<B> {
    backend: B,
}

impl<B: AdminBackend> UserAdmin<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub async fn list(&self, session: &Session) -> Result<Vec<ManagedUser>> {
        require_admin(session)?;
        Ok(self.backend.list_users(session).await?)
    }

    pub async fn create(&self, session: &Session, user: &NewUser) -> Result<Vec<ManagedUser>> {
        require_admin(session)?;
        if user.username.trim().is_empty() {
            return Err(Error::MissingField("username"));
        }
        if user.password.is_empty() {
            return Err(Error::MissingField("password"));
        }
        self.backend.create_user(session, user).await?;
        info!(username = %user.username, role = ?user.role, "created user");
        self.list(session).await
    }

    pub async fn update(
        &self,
        session: &Session,
        id: i64,
        update: &UserUpdate,
    ) -> Result<Vec<ManagedUser>> {
        require_admin(session)?;
        if update.username.trim().is_empty() {
            return Err(Error::MissingField("username"));
        }
        // A blank password field means "leave unchanged".
        let update = UserUpdate {
            password: update.password.clone().filter(|p| !p.is_empty()),
            ..update.clone()
        };
        self.backend.update_user(session, id, &update).await?;
        info!(id, username = %update.username, "updated user");
        self.list(session).await
    }

    pub async fn delete(&self, session: &Session, id: i64) -> Result<Vec<ManagedUser>> {
        require_admin(session)?;
        self.backend.delete_user(session, id).await?;
        info!(id, "deleted user");
        self.list(session).await
    }
}

fn require_admin(session: &Session) -> Result<()> {
    if session.is_authenticated() && session.is_admin() {
        Ok(())
    } else {
        Err(Error::AdminRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::AuthResponse;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedAdmin {
        users: Mutex<Vec<ManagedUser>>,
        updates: Mutex<Vec<(i64, UserUpdate)>>,
        calls: Mutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl AdminBackend for ScriptedAdmin {
        async fn list_users(&self, session: &Session) -> anyhow::Result<Vec<ManagedUser>> {
            assert!(session.bearer().is_some());
            self.calls.lock().unwrap().push("list");
            Ok(self.users.lock().unwrap().clone())
        }

        async fn create_user(&self, _session: &Session, user: &NewUser) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push("create");
            let mut users = self.users.lock().unwrap();
            let id = users.len() as i64 + 1;
            users.push(ManagedUser {
                id,
                username: user.username.clone(),
                role: user.role,
                created_at: None,
                updated_at: None,
                total_requests: 0,
            });
            Ok(())
        }

        async fn update_user(
            &self,
            _session: &Session,
            id: i64,
            update: &UserUpdate,
        ) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push("update");
            self.updates.lock().unwrap().push((id, update.clone()));
            let mut users = self.users.lock().unwrap();
            let Some(user) = users.iter_mut().find(|u| u.id == id) else {
                anyhow::bail!("user {id} not found");
            };
            user.username = update.username.clone();
            user.role = update.role;
            Ok(())
        }

        async fn delete_user(&self, _session: &Session, id: i64) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push("delete");
            self.users.lock().unwrap().retain(|u| u.id != id);
            Ok(())
        }
    }

    fn session_as(role: Role) -> Session {
        let mut session = Session::default();
        session.set_auth(AuthResponse {
            token: "tok".to_owned(),
            username: "root".to_owned(),
            email: None,
            role,
            api_quota: None,
        });
        session
    }

    fn new_user(username: &str, password: &str) -> NewUser {
        NewUser {
            username: username.to_owned(),
            password: password.to_owned(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn non_admins_are_refused_before_any_request() {
        let admin = UserAdmin::new(ScriptedAdmin::default());

        for session in [Session::default(), session_as(Role::User), session_as(Role::Premium)] {
            assert!(matches!(admin.list(&session).await, Err(Error::AdminRequired)));
            assert!(matches!(
                admin.delete(&session, 1).await,
                Err(Error::AdminRequired)
            ));
        }
        assert!(admin.backend.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_update_delete_return_refreshed_list() {
        let admin = UserAdmin::new(ScriptedAdmin::default());
        let session = session_as(Role::Admin);

        let users = admin.create(&session, &new_user("ada", "pw")).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "ada");

        let update = UserUpdate {
            username: "ada".to_owned(),
            role: Role::Premium,
            password: None,
        };
        let users = admin.update(&session, users[0].id, &update).await.unwrap();
        assert_eq!(users[0].role, Role::Premium);

        let users = admin.delete(&session, users[0].id).await.unwrap();
        assert!(users.is_empty());
        assert_eq!(
            *admin.backend.calls.lock().unwrap(),
            vec!["create", "list", "update", "list", "delete", "list"]
        );
    }

    #[tokio::test]
    async fn create_requires_username_and_password() {
        let admin = UserAdmin::new(ScriptedAdmin::default());
        let session = session_as(Role::Admin);

        let err = admin.create(&session, &new_user("  ", "pw")).await.unwrap_err();
        assert!(matches!(err, Error::MissingField("username")));
        let err = admin.create(&session, &new_user("ada", "")).await.unwrap_err();
        assert!(matches!(err, Error::MissingField("password")));
        assert!(admin.backend.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_password_is_not_sent_on_update() {
        let admin = UserAdmin::new(ScriptedAdmin::default());
        let session = session_as(Role::Admin);
        admin.create(&session, &new_user("ada", "pw")).await.unwrap();

        let update = UserUpdate {
            username: "ada".to_owned(),
            role: Role::User,
            password: Some(String::new()),
        };
        admin.update(&session, 1, &update).await.unwrap();

        let updates = admin.backend.updates.lock().unwrap();
        assert_eq!(updates[0].1.password, None);
        let json = serde_json::to_value(&updates[0].1).unwrap();
        assert!(json.get("password").is_none());
    }

    #[tokio::test]
    async fn backend_failure_surfaces_as_error() {
        let admin = UserAdmin::new(ScriptedAdmin::default());
        let update = UserUpdate {
            username: "ghost".to_owned(),
            role: Role::User,
            password: None,
        };

        let err = admin
            .update(&session_as(Role::Admin), 42, &update)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "user 42 not found");
    }

    #[test]
    fn managed_user_reads_backend_json() {
        let user: ManagedUser = serde_json::from_str(
            r#"{"id":7,"username":"ada","role":"ADMIN","createdAt":"2026-01-02T03:04:05","totalRequests":12}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.total_requests, 12);
        assert_eq!(user.updated_at, None);
    }
}
