use crate::error::{AuthError, Result};
use crate::google::GoogleVerifier;
use crate::jwt::{Claims, JwtService};
use crate::password::PasswordHasher;
use nutriguide_cache::{revoked_token_key, Cache};
use nutriguide_database::{Database, UserRepository};
use nutriguide_models::user::{NewUser, UpdateProfile, UserProfile};
use nutriguide_models::{metrics, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserProfile,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

pub struct AuthService {
    pub cache: Cache,
    pub jwt: JwtService,
    google: GoogleVerifier,
    user_repo: UserRepository,
}

impl AuthService {
    pub fn new(db: Database, cache: Cache, jwt: JwtService, google: GoogleVerifier) -> Self {
        Self {
            user_repo: UserRepository::new(db),
            cache,
            jwt,
            google,
        }
    }

    /// Register a new account and sign it in. Body metrics are computed
    /// from whatever profile fields the request carried.
    pub async fn register(&self, request: NewUser) -> Result<AuthResponse> {
        request.validate()?;

        if self.user_repo.find_by_email(&request.email).await?.is_some() {
            return Err(AuthError::AlreadyExists("User already exists".to_string()));
        }

        let password_hash = PasswordHasher::hash(&request.password)?;
        let bmi = metrics::bmi(request.current_weight_kg, request.height_cm);
        let daily_calories = metrics::daily_calorie_target(
            request.current_weight_kg,
            request.height_cm,
            request.gender,
            request.goal,
            None,
        );

        let user = self
            .user_repo
            .create(&request, &password_hash, bmi, daily_calories)
            .await?;

        tracing::info!(user_id = %user.id, "user registered");
        self.issue_tokens(user)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse> {
        request.validate()?;

        let user = self
            .user_repo
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AuthError::UserInactive);
        }

        let hash = user
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;
        if !PasswordHasher::verify(&request.password, hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.user_repo.update_last_login(user.id).await?;
        tracing::info!(user_id = %user.id, "user logged in");
        self.issue_tokens(user)
    }

    /// Sign in with a Google ID token. The account must already exist;
    /// federated login never creates one implicitly.
    pub async fn login_with_google(&self, credential: &str) -> Result<AuthResponse> {
        let claims = self.google.verify(credential).await?;

        let user = self
            .user_repo
            .find_by_email(&claims.email)
            .await?
            .ok_or_else(|| {
                AuthError::NotFound("Account does not exist. Please register first.".to_string())
            })?;

        if !user.is_active {
            return Err(AuthError::UserInactive);
        }

        self.user_repo.update_last_login(user.id).await?;
        tracing::info!(user_id = %user.id, "user logged in via Google");
        self.issue_tokens(user)
    }

    pub async fn refresh(&self, request: RefreshTokenRequest) -> Result<AuthResponse> {
        let claims = self.jwt.validate_refresh_token(&request.refresh_token)?;
        if self.is_revoked(&claims.jti).await? {
            return Err(AuthError::TokenRevoked);
        }

        let user = self.user_repo.find_by_id(claims.user_id()?).await?;
        if !user.is_active {
            return Err(AuthError::UserInactive);
        }

        self.issue_tokens(user)
    }

    /// Revoke the presented token until its natural expiry.
    pub async fn logout(&self, token: &str) -> Result<()> {
        let claims = self.jwt.validate_token(token)?;
        self.revoke(&claims).await
    }

    pub async fn revoke(&self, claims: &Claims) -> Result<()> {
        let remaining = claims.exp - chrono::Utc::now().timestamp();
        if remaining > 0 {
            self.cache
                .set(&revoked_token_key(&claims.jti), "1", Some(remaining as usize))
                .await?;
        }
        Ok(())
    }

    pub async fn is_revoked(&self, jti: &str) -> Result<bool> {
        Ok(self.cache.exists(&revoked_token_key(jti)).await?)
    }

    pub async fn me(&self, user_id: Uuid) -> Result<UserProfile> {
        let user = self.user_repo.find_by_id(user_id).await?;
        Ok(user.into())
    }

    /// Update profile fields and recompute the derived metrics from the
    /// merged result.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: UpdateProfile,
    ) -> Result<UserProfile> {
        update.validate()?;

        let current = self.user_repo.find_by_id(user_id).await?;
        let weight = update.current_weight_kg.or(current.current_weight_kg);
        let height = update.height_cm.or(current.height_cm);
        let gender = update.gender.or(current.gender);
        let goal = update.goal.or(current.goal);

        let bmi = metrics::bmi(weight, height);
        let daily_calories = metrics::daily_calorie_target(weight, height, gender, goal, None);

        let user = self
            .user_repo
            .update_profile(user_id, &update, bmi, daily_calories)
            .await?;
        Ok(user.into())
    }

    /// Deactivate the account; tokens keep failing the is_active check.
    pub async fn deactivate_account(&self, user_id: Uuid) -> Result<()> {
        self.user_repo.deactivate(user_id).await?;
        tracing::info!(user_id = %user_id, "account deactivated");
        Ok(())
    }

    fn issue_tokens(&self, user: User) -> Result<AuthResponse> {
        let access_token = self.jwt.generate_access_token(user.id, &user.email)?;
        let refresh_token = self.jwt.generate_refresh_token(user.id, &user.email)?;

        Ok(AuthResponse {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt.access_token_lifetime_secs(),
            user: user.into(),
        })
    }
}
