use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Premium,
    Admin,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub api_quota: Option<i64>,
}

/// Answer of a successful login or registration.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub api_quota: Option<i64>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> anyhow::Result<AuthResponse>;

    async fn register(&self, credentials: &Credentials, email: &str) -> anyhow::Result<AuthResponse>;
}

/// Who is signed in, passed explicitly to whatever needs it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn set_auth(&mut self, auth: AuthResponse) {
        self.token = auth.token;
        self.user = Some(UserProfile {
            username: auth.username,
            email: auth.email,
            role: auth.role,
            api_quota: auth.api_quota,
        });
    }

    pub fn clear(&mut self) {
        *self = Session::default();
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    /// Premium features are open to admins as well.
    pub fn is_premium(&self) -> bool {
        matches!(self.role(), Some(Role::Premium | Role::Admin))
    }

    /// Value for an `Authorization` header.
    pub fn bearer(&self) -> Option<String> {
        self.is_authenticated()
            .then(|| format!("Bearer {}", self.token))
    }
}

/// Persists a [`Session`] as JSON at a fixed path.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unreadable file yields a signed-out session.
    pub async fn load(&self) -> Session {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Session::default(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "cannot read session file");
                return Session::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(path = %self.path.display(), error = %err, "ignoring malformed session file");
            Session::default()
        })
    }

    pub async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(session)?;
        tokio::fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), "saved session");
        Ok(())
    }

    /// Signs out: resets `session` and removes the file.
    pub async fn clear(&self, session: &mut Session) -> Result<()> {
        session.clear();
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Logs in through `backend` and persists the new session.
    pub async fn login<B: AuthBackend>(
        &self,
        backend: &B,
        session: &mut Session,
        credentials: &Credentials,
    ) -> Result<()> {
        let auth = backend.login(credentials).await?;
        session.set_auth(auth);
        self.save(session).await
    }

    pub async fn register<B: AuthBackend>(
        &self,
        backend: &B,
        session: &mut Session,
        credentials: &Credentials,
        email: &str,
    ) -> Result<()> {
        let auth = backend.register(credentials, email).await?;
        session.set_auth(auth);
        self.save(session).await
    }
}

/// Daily AI quota as reported by the backend.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub today_used: u64,
    /// Negative means no limit.
    pub daily_limit: i64,
}

impl Usage {
    pub fn is_unlimited(&self) -> bool {
        self.daily_limit < 0
    }

    pub fn is_exhausted(&self) -> bool {
        !self.is_unlimited() && self.today_used >= self.daily_limit.unsigned_abs()
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unlimited() {
            write!(f, "{}/∞", self.today_used)
        } else {
            write!(f, "{}/{}", self.today_used, self.daily_limit)
        }
    }
}
