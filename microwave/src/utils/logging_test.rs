#[cfg(test)]
mod tests {
    use super::super::logging::{init_logging, DEFAULT_FILTER};

    #[test]
    fn test_logging_initialization_is_repeatable() {
        // A second call must not panic even though a subscriber is already set
        init_logging();
        init_logging();
    }

    #[test]
    fn test_default_filter_parses() {
        let filter = tracing_subscriber::EnvFilter::try_new(DEFAULT_FILTER);
        assert!(filter.is_ok());
    }
}
