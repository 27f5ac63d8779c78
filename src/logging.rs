use tracing_subscriber::{fmt, EnvFilter};

/// Initialise tracing (RUST_LOG pour le filtre, LOG_FORMAT=json pour la sortie JSON)
/// À appeler après dotenv pour que les valeurs du .env soient prises en compte
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if is_json_format(std::env::var("LOG_FORMAT").ok().as_deref()) {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .json()
            .with_writer(std::io::stderr)
            .try_init();
    } else {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .pretty()
            .with_writer(std::io::stderr)
            .try_init();
    }
}

fn is_json_format(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format() {
        assert!(is_json_format(Some("json")));
        assert!(is_json_format(Some(" JSON ")));
        assert!(!is_json_format(Some("pretty")));
        assert!(!is_json_format(None));
    }
}
