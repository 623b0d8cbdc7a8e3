use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("sign-in rejected by auth provider: {0}")]
    SignInFailed(String),

    #[error("auth provider unreachable: {0}")]
    ProviderUnreachable(String),

    #[error("malformed session token: {0}")]
    MalformedToken(String),

    #[error("auth provider URL is not configured")]
    NotConfigured,

    #[error("{0}")]
    Other(String),
}
