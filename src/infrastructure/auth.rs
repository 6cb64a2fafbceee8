//! Local account store with Argon2id password hashes and a session file

use crate::domain::{Session, User};
use crate::error::{DaybookError, Result};
use crate::infrastructure::backend::AuthService;
use crate::infrastructure::workspace::{write_atomic, Workspace};
use crate::infrastructure::Config;
use argon2::{Algorithm, Argon2, Params, Version};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const USERS_FILE: &str = "users.toml";
const SESSION_FILE: &str = "session.toml";
const MIN_PASSWORD_LEN: usize = 6;

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex")
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Account {
    id: Uuid,
    email: String,
    salt: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl Account {
    fn user(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Accounts {
    #[serde(default, rename = "user")]
    users: Vec<Account>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionRecord {
    user_id: Uuid,
    access_token: String,
    expires_at: DateTime<Utc>,
}

fn hash_password(password: &str, salt: &[u8]) -> Result<String> {
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::DEFAULT);

    let mut out = [0u8; 32];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut out)
        .map_err(|e| DaybookError::Data(format!("Password hashing failed: {}", e)))?;

    Ok(hex::encode(out))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Auth service backed by `.daybook/auth/`
#[derive(Debug, Clone)]
pub struct LocalAuthService {
    auth_dir: PathBuf,
    session_ttl: Duration,
}

impl LocalAuthService {
    pub fn new(auth_dir: PathBuf, session_ttl: Duration) -> Self {
        LocalAuthService {
            auth_dir,
            session_ttl,
        }
    }

    pub fn open(workspace: &Workspace, config: &Config) -> Self {
        Self::new(
            workspace.auth_dir(),
            Duration::minutes(config.session_ttl_minutes),
        )
    }

    fn load_accounts(&self) -> Result<Accounts> {
        let path = self.auth_dir.join(USERS_FILE);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Accounts::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save_accounts(&self, accounts: &Accounts) -> Result<()> {
        let contents = toml::to_string_pretty(accounts)?;
        write_atomic(&self.auth_dir.join(USERS_FILE), &contents)
    }

    fn load_session_record(&self) -> Result<Option<SessionRecord>> {
        let path = self.auth_dir.join(SESSION_FILE);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(toml::from_str(&contents)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn session_expiry(&self) -> Result<DateTime<Utc>> {
        Utc::now()
            .checked_add_signed(self.session_ttl)
            .ok_or_else(|| {
                DaybookError::Config(format!(
                    "Session lifetime of {} minutes is out of range",
                    self.session_ttl.num_minutes()
                ))
            })
    }

    /// Issue and persist a fresh session for `account`
    fn start_session(&self, account: &Account) -> Result<Session> {
        let expires_at = self.session_expiry()?;
        let record = SessionRecord {
            user_id: account.id,
            access_token: Uuid::new_v4().simple().to_string(),
            expires_at,
        };
        let contents = toml::to_string_pretty(&record)?;
        write_atomic(&self.auth_dir.join(SESSION_FILE), &contents)?;

        Ok(Session {
            user: account.user(),
            access_token: record.access_token,
            expires_at: record.expires_at,
        })
    }

    fn remove_session_file(&self) -> Result<()> {
        match fs::remove_file(self.auth_dir.join(SESSION_FILE)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl AuthService for LocalAuthService {
    fn sign_up(&self, email: &str, password: &str) -> Result<Session> {
        let email = normalize_email(email);
        if !email_regex().is_match(&email) {
            return Err(DaybookError::InvalidSignUp(format!(
                "Unable to validate email address: invalid format '{}'",
                email
            )));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DaybookError::InvalidSignUp(format!(
                "Password should be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        self.session_expiry()?;

        let mut accounts = self.load_accounts()?;
        if accounts.users.iter().any(|a| a.email == email) {
            return Err(DaybookError::AccountExists);
        }

        let mut salt = [0u8; 16];
        rand::rng().fill_bytes(&mut salt);
        let account = Account {
            id: Uuid::new_v4(),
            email,
            salt: hex::encode(salt),
            password_hash: hash_password(password, &salt)?,
            created_at: Utc::now(),
        };
        accounts.users.push(account.clone());
        self.save_accounts(&accounts)?;

        tracing::info!(user_id = %account.id, "Account created");
        self.start_session(&account)
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = normalize_email(email);
        let accounts = self.load_accounts()?;
        let account = accounts
            .users
            .iter()
            .find(|a| a.email == email)
            .ok_or(DaybookError::InvalidCredentials)?;

        let salt = hex::decode(&account.salt)
            .map_err(|e| DaybookError::Data(format!("Corrupt password salt: {}", e)))?;
        if hash_password(password, &salt)? != account.password_hash {
            tracing::debug!(user_id = %account.id, "Password mismatch");
            return Err(DaybookError::InvalidCredentials);
        }

        tracing::info!(user_id = %account.id, "Signed in");
        self.start_session(account)
    }

    fn sign_out(&self) -> Result<()> {
        self.remove_session_file()?;
        tracing::info!("Signed out");
        Ok(())
    }

    fn current_session(&self) -> Result<Option<(Session, bool)>> {
        let Some(record) = self.load_session_record()? else {
            return Ok(None);
        };

        let accounts = self.load_accounts()?;
        let Some(account) = accounts.users.iter().find(|a| a.id == record.user_id) else {
            tracing::warn!(user_id = %record.user_id, "Session references a missing account");
            self.remove_session_file()?;
            return Ok(None);
        };

        let session = Session {
            user: account.user(),
            access_token: record.access_token,
            expires_at: record.expires_at,
        };

        if session.is_expired(Utc::now()) {
            tracing::debug!(user_id = %account.id, "Refreshing expired session");
            return Ok(Some((self.start_session(account)?, true)));
        }

        Ok(Some((session, false)))
    }
}
