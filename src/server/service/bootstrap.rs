//! First-run superadmin provisioning.

use sea_orm::DatabaseConnection;

use crate::{
    model::user::Role,
    server::{
        data::user::UserRepository,
        error::AppError,
        model::user::{CreateUserParams, User},
        service::auth::password::hash_password,
        util::random::random_alphanumeric,
    },
};

const GENERATED_PASSWORD_LEN: usize = 24;
const DEFAULT_SUPERADMIN_EMAIL: &str = "superadmin@localhost";

/// A superadmin created at startup.
#[derive(Debug)]
pub struct ProvisionedSuperadmin {
    pub user: User,
    /// Set when no password was configured and one was generated.
    pub generated_password: Option<String>,
}

pub struct BootstrapService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BootstrapService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a superadmin when none exists.
    ///
    /// # Arguments
    /// - `email` - Account email, `superadmin@localhost` when unset
    /// - `password` - Account password, generated when unset
    ///
    /// # Returns
    /// - `Ok(None)` - A superadmin already exists
    /// - `Ok(Some(ProvisionedSuperadmin))` - Account created
    pub async fn ensure_superadmin(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Option<ProvisionedSuperadmin>, AppError> {
        let repo = UserRepository::new(self.db);
        if repo.role_exists(Role::Superadmin).await? {
            return Ok(None);
        }

        let email = email.unwrap_or(DEFAULT_SUPERADMIN_EMAIL);
        if repo.email_exists(email).await? {
            return Err(AppError::Conflict(format!(
                "Cannot create superadmin: {} is already registered",
                email
            )));
        }

        let (password, generated_password) = match password {
            Some(password) => (password.to_string(), None),
            None => {
                let generated = random_alphanumeric(GENERATED_PASSWORD_LEN);
                (generated.clone(), Some(generated))
            }
        };

        let user = repo
            .create(CreateUserParams {
                email: email.to_string(),
                password_hash: hash_password(&password).await?,
                first_name: "Super".to_string(),
                last_name: "Admin".to_string(),
                phone: None,
                role: Role::Superadmin,
                faculty_id: None,
                group_id: None,
            })
            .await?;

        Ok(Some(ProvisionedSuperadmin {
            user,
            generated_password,
        }))
    }
}
