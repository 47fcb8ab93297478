//! Shared wiring for integration tests.

use std::sync::Arc;

use lanyard_auth::cache::CacheService;
use lanyard_auth::config::AuthConfig;
use lanyard_auth::password::Argon2PasswordHasher;
use lanyard_auth::service::AuthService;
use lanyard_auth::token::{JwtService, TokenService};
use lanyard_auth::types::{CreateUser, LoginUser};
use lanyard_auth::user::UserService;
use lanyard_auth_memory::MemoryAuthStorage;

pub struct TestEnv {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub cache: Arc<CacheService>,
    pub storage: MemoryAuthStorage,
    pub jwt: Arc<JwtService>,
}

pub fn test_env() -> TestEnv {
    test_env_with(|_| {})
}

pub fn test_env_with(mutate: impl FnOnce(&mut AuthConfig)) -> TestEnv {
    let mut config = AuthConfig::default();
    mutate(&mut config);
    let storage = MemoryAuthStorage::new(config.session.max_sessions_per_user);

    let jwt = Arc::new(JwtService::new(b"integration-test-secret", &config.issuer));
    let tokens = Arc::new(TokenService::new(jwt.clone(), config.token.clone()));
    let cache = Arc::new(CacheService::new());

    let users = Arc::new(UserService::new(
        storage.users(),
        storage.roles(),
        cache.clone(),
        Arc::new(Argon2PasswordHasher),
        config.cache.clone(),
    ));

    let auth = Arc::new(AuthService::new(
        users.clone(),
        storage.sessions(),
        tokens,
    ));

    TestEnv {
        auth,
        users,
        cache,
        storage,
        jwt,
    }
}

pub fn create_dto(email: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        name: "Test User".to_string(),
        password: "correct horse battery staple".to_string(),
    }
}

pub fn login_dto(email: &str) -> LoginUser {
    LoginUser {
        email: email.to_string(),
        password: "correct horse battery staple".to_string(),
    }
}
