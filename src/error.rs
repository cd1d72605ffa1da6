/// Application-level error: a process exit code plus a human-readable message.
///
/// Exit codes:
/// - `2` invalid configuration or input
/// - `4` terminal failures
/// - `5` rendering failures
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(5, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_pick_exit_codes() {
        assert_eq!(AppError::config("bad").exit_code(), 2);
        assert_eq!(AppError::terminal("tty").exit_code(), 4);
        assert_eq!(AppError::render("draw").exit_code(), 5);
        assert_eq!(AppError::config("bad color").to_string(), "bad color");
    }
}
