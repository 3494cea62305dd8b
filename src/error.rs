use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to install the hook: {0}")]
    HookInstallationFailed(std::io::Error),
    #[error("failed to remove the hook: {0}")]
    HookRemovalFailed(std::io::Error),
    #[error("the hook thread terminated unexpectedly")]
    HookThreadCrashed,
    #[error("failed to stop the hook thread: {0}")]
    HookThreadStopFailed(std::io::Error),
}

impl Error {
    /// Returns the platform error code carried by this error, if any.
    pub fn platform_code(&self) -> Option<i32> {
        match self {
            Error::HookInstallationFailed(e)
            | Error::HookRemovalFailed(e)
            | Error::HookThreadStopFailed(e) => e.raw_os_error(),
            Error::HookThreadCrashed => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
