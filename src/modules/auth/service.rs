use sqlx::PgPool;
use tracing::instrument;

use schoolhub_auth::{Role, TokenSubject, issue_token};
use schoolhub_config::JwtConfig;
use schoolhub_core::{AppError, verify_password};
use schoolhub_models::auth::{Credentials, LoginRequest, LoginResponse, LoginUser};
use schoolhub_observability::{track_login_failure, track_login_success, track_token_issued};

pub struct AuthService;

impl AuthService {
    fn credentials_query(role: Role) -> &'static str {
        match role {
            Role::School => {
                r#"SELECT id, id AS school_id, school_name AS name, email,
                          school_image AS image_url, password
                   FROM schools WHERE LOWER(email) = LOWER($1)"#
            }
            Role::Teacher => {
                r#"SELECT id, school_id, name, email, teacher_image AS image_url, password
                   FROM teachers WHERE LOWER(email) = LOWER($1)"#
            }
            Role::Student => {
                r#"SELECT id, school_id, name, email, student_image AS image_url, password
                   FROM students WHERE LOWER(email) = LOWER($1)"#
            }
        }
    }

    fn login_error(jwt_config: &JwtConfig, message: &str) -> AppError {
        if jwt_config.uniform_login_errors {
            AppError::unauthorized("Invalid email or password")
        } else {
            AppError::unauthorized(message.to_string())
        }
    }

    /// Checks the password against the account of `role` and issues a token.
    #[instrument(skip(db, jwt_config, dto), fields(email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        jwt_config: &JwtConfig,
        role: Role,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let credentials = sqlx::query_as::<_, Credentials>(Self::credentials_query(role))
            .bind(dto.email.trim())
            .fetch_optional(db)
            .await?;

        let Some(credentials) = credentials else {
            track_login_failure(role.as_str(), "unknown_email");
            return Err(Self::login_error(jwt_config, "Email is not registered"));
        };

        if !verify_password(&dto.password, &credentials.password).await? {
            track_login_failure(role.as_str(), "wrong_password");
            return Err(Self::login_error(jwt_config, "Password is incorrect"));
        }

        let token = issue_token(
            &TokenSubject {
                id: credentials.id,
                school_id: credentials.school_id,
                role,
                name: &credentials.name,
                image_url: credentials.image_url.as_deref(),
            },
            jwt_config,
        )?;

        track_login_success(role.as_str());
        track_token_issued(role.as_str());

        Ok(LoginResponse {
            token,
            user: LoginUser::from_credentials(credentials, role),
        })
    }
}
