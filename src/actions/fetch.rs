use log::error;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use super::Fetcher;

/// Chat message size limit.
pub const MESSAGE_LIMIT: usize = 4096;
pub const TRUNCATE_AT: usize = 4090;
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed with status code {}", .0.as_u16())]
    Status(StatusCode),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Plain GET of whatever URL the owner typed. No scheme or host restrictions.
#[derive(Clone, Debug, Default)]
pub struct CodeFetcher {
    client: Client,
}

impl CodeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(resp.text().await?)
    }
}

impl Fetcher for CodeFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.get(url).await.map_err(|e| {
            error!("Error fetching code from {url:?}: {e}");
            e
        })
    }
}

/// Formats a fetched body for an HTML-mode message: bodies over
/// [`MESSAGE_LIMIT`] chars are cut to [`TRUNCATE_AT`] plus [`ELLIPSIS`], then
/// only `<` and `>` are escaped and the result is wrapped in `<code>`.
pub fn render_code(body: &str) -> String {
    let body = if body.chars().count() > MESSAGE_LIMIT {
        let mut cut: String = body.chars().take(TRUNCATE_AT).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        body.to_string()
    };

    format!("<code>{}</code>", body.replace('<', "&lt;").replace('>', "&gt;"))
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use super::*;

    fn unwrap_code(rendered: &str) -> &str {
        rendered
            .strip_prefix("<code>").unwrap()
            .strip_suffix("</code>").unwrap()
    }

    #[test]
    fn short_body_is_kept_whole() {
        let rendered = render_code("hello world");
        assert_eq!(rendered, "<code>hello world</code>");
    }

    #[test]
    fn long_body_is_truncated() {
        let body = "a".repeat(5000);
        let rendered = render_code(&body);
        let inner = unwrap_code(&rendered);

        assert!(inner.ends_with(ELLIPSIS));
        assert_eq!(inner.chars().count(), TRUNCATE_AT + ELLIPSIS.len());
    }

    #[test]
    fn limit_is_inclusive() {
        let body = "b".repeat(MESSAGE_LIMIT);
        let rendered = render_code(&body);

        assert_eq!(unwrap_code(&rendered), body);
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let body = "é".repeat(MESSAGE_LIMIT);
        let rendered = render_code(&body);

        assert_eq!(unwrap_code(&rendered), body);
    }

    #[test]
    fn angle_brackets_are_escaped() {
        let rendered = render_code("<script>alert(1)</script>");
        let inner = unwrap_code(&rendered);

        assert_eq!(inner, "&lt;script&gt;alert(1)&lt;/script&gt;");
        assert!(!inner.contains('<') && !inner.contains('>'));
    }

    #[test]
    fn only_angle_brackets_are_escaped() {
        let rendered = render_code(r#"a & "b""#);
        assert_eq!(unwrap_code(&rendered), r#"a & "b""#);
    }

    #[tokio::test]
    async fn fetches_body_as_text() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/index.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<h1>hi</h1>"))
            .mount(&server)
            .await;

        let url = format!("{}/index.html", server.uri());
        let body = CodeFetcher::new().fetch(&url).await.unwrap();
        assert_eq!(body, "<h1>hi</h1>");
    }

    #[tokio::test]
    async fn error_status_is_a_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/gone", server.uri());
        let err = CodeFetcher::new().fetch(&url).await.unwrap_err();
        assert_eq!(err.to_string(), "request failed with status code 404");
    }

    #[tokio::test]
    async fn malformed_url_is_a_failure() {
        let err = CodeFetcher::new().fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
