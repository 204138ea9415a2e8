//! Authentication primitives
//!
//! Transport-agnostic building blocks for credential handling:
//! - Password hashing (Argon2id)
//! - JWT bearer token encoding and validation (HMAC family)
//! - Token issuance with a fixed lifetime
//!
//! User lookup is deliberately absent; services combine these pieces with
//! their own user store.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::{Duration, Utc};
//! use jsonwebtoken::Algorithm;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", Algorithm::HS256).unwrap();
//! let claims = Claims::new("alice", Utc::now(), Duration::minutes(30)).unwrap();
//! let token = handler.encode(&claims).unwrap();
//! assert_eq!(handler.decode(&token).unwrap(), claims);
//! ```
//!
//! ## Issuing Tokens
//! ```
//! use auth::{JwtHandler, TokenIssuer};
//! use chrono::Duration;
//! use jsonwebtoken::Algorithm;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", Algorithm::HS256).unwrap();
//! let issuer = TokenIssuer::new(handler, Duration::minutes(30));
//!
//! let token = issuer.issue("alice").unwrap();
//! assert_eq!(issuer.validate(&token).unwrap().subject(), "alice");
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;

pub use issuer::TokenIssuer;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
