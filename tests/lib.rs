use gradient_forge::logger;

// Common test utilities shared across test modules
mod test_utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_init_is_idempotent() {
        assert!(logger::init().is_ok());
        assert!(logger::init().is_ok());
        logger::set_logging_enabled(false);
        assert!(!logger::is_logging_enabled());
    }
}
