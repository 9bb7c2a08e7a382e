use regex::Regex;
use std::sync::LazyLock;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[^\s!,]+").expect("URL pattern is valid")
});

/// Returns the first `http(s)://` link in `text`, cut at whitespace, `!` or `,`.
///
/// Links without a scheme are not recognized.
pub fn extract_url(text: &str) -> Option<&str> {
    if text.trim().is_empty() {
        return None;
    }
    URL_RE.find(text).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_url() {
        assert_eq!(extract_url(""), None);
        assert_eq!(extract_url("   "), None);
        assert_eq!(extract_url("just some text"), None);
        assert_eq!(extract_url("youtube.com/video"), None);
    }

    #[test]
    fn test_plain_urls() {
        assert_eq!(
            extract_url("http://example.com/video"),
            Some("http://example.com/video")
        );
        assert_eq!(
            extract_url("https://example.com/video?id=123&param=value"),
            Some("https://example.com/video?id=123&param=value")
        );
        assert_eq!(
            extract_url("https://example.com/video#section"),
            Some("https://example.com/video#section")
        );
        assert_eq!(
            extract_url("https://example.com:8080/video"),
            Some("https://example.com:8080/video")
        );
        assert_eq!(
            extract_url("https://192.168.1.1/video"),
            Some("https://192.168.1.1/video")
        );
    }

    /// **Test: the first link wins when several are present.**
    #[test]
    fn test_first_of_many() {
        let input = "https://first.com/video http://second.com/video https://third.com/video";
        assert_eq!(extract_url(input), Some("https://first.com/video"));
    }

    /// **Test: link is cut at comma and found inside multiline text.**
    #[test]
    fn test_url_inside_text() {
        assert_eq!(
            extract_url("Watch this: https://youtube.com/watch?v=dQw4w9WgXcQ, it is great!"),
            Some("https://youtube.com/watch?v=dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_url("some words and then a link\n\nhttps://youtube.com/shorts/8e6GJkZTcfM?si=g7e39Pj57vySWStC"),
            Some("https://youtube.com/shorts/8e6GJkZTcfM?si=g7e39Pj57vySWStC")
        );
        assert_eq!(
            extract_url("first line\nhttps://youtube.com/video\nsecond line"),
            Some("https://youtube.com/video")
        );
        assert_eq!(
            extract_url("https://youtube.com/video - a link"),
            Some("https://youtube.com/video")
        );
        assert_eq!(extract_url("wow https://vk.com/clip-1_2!"), Some("https://vk.com/clip-1_2"));
    }
}
