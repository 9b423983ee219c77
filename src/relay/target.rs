//! Render target construction.

use crate::config::RendererConfig;

/// Compose `{host}:{port}{path}`, prefixing `path` with `/` when it is
/// non-empty and lacks one. No encoding is applied.
pub fn build_target(config: &RendererConfig, path: &str) -> String {
    let separator = if path.is_empty() || path.starts_with('/') {
        ""
    } else {
        "/"
    };
    format!("{}:{}{}{}", config.host, config.port, separator, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str, port: u16) -> RendererConfig {
        RendererConfig {
            host: host.to_string(),
            port,
            ..RendererConfig::default()
        }
    }

    #[test]
    fn test_prefixes_slash() {
        assert_eq!(
            build_target(&config("localhost", 3000), "foo-bar"),
            "localhost:3000/foo-bar"
        );
    }

    #[test]
    fn test_keeps_existing_slash() {
        assert_eq!(build_target(&config("localhost", 3000), "/"), "localhost:3000/");
        assert_eq!(
            build_target(&config("http://node", 8080), "/a/b"),
            "http://node:8080/a/b"
        );
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(build_target(&config("h", 1), ""), "h:1");
    }

    #[test]
    fn test_no_encoding() {
        assert_eq!(
            build_target(&config("h", 1), "a b%20c"),
            "h:1/a b%20c"
        );
    }
}
