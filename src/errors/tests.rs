// 错误处理系统测试

#[cfg(test)]
mod tests {
    use crate::errors::LogError;

    #[test]
    fn test_error_codes() {
        assert_eq!(LogError::configuration("x").error_code(), "CONFIGURATION_ERROR");
        assert_eq!(
            LogError::sink_unavailable("/tmp/logs", "denied").error_code(),
            "SINK_UNAVAILABLE"
        );
        assert_eq!(LogError::AlreadyInitialized.error_code(), "ALREADY_INITIALIZED");
        assert_eq!(LogError::subscriber("x").error_code(), "SUBSCRIBER_ERROR");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(LogError::sink_unavailable("/tmp/logs", "denied").is_fatal());
        assert!(LogError::configuration("bad level").is_fatal());
        assert!(!LogError::AlreadyInitialized.is_fatal());
    }

    #[test]
    fn test_sink_error_message_contains_path() {
        let error = LogError::sink_unavailable("/readonly/storage/logs", "Permission denied");
        let message = error.to_string();
        assert!(message.contains("/readonly/storage/logs"));
        assert!(message.contains("Permission denied"));
    }

    #[test]
    fn test_config_error_conversion() {
        let error: LogError = config::ConfigError::Message("缺少字段".to_string()).into();
        assert_eq!(error.error_code(), "CONFIGURATION_ERROR");
        assert!(error.to_string().contains("缺少字段"));
    }
}
