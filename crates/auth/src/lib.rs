pub mod error;
pub mod google;
pub mod jwt;
pub mod password;
pub mod service;

pub use error::{AuthError, Result};
pub use google::{GoogleClaims, GoogleVerifier};
pub use jwt::{Claims, JwtService, TokenType};
pub use password::PasswordHasher;
pub use service::{AuthResponse, AuthService, LoginRequest, RefreshTokenRequest};
