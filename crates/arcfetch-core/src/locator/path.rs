//! File name extraction from a URL path.

use url::Url;

/// Returns the last non-empty path segment of `url`.
///
/// Query and fragment are ignored. Returns `None` for a root or empty path and
/// for the relative segments `.` and `..`.
pub fn last_path_segment(url: &Url) -> Option<&str> {
    let segment = url.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(raw: &str) -> Option<String> {
        let url = Url::parse(raw).unwrap();
        last_path_segment(&url).map(str::to_string)
    }

    #[test]
    fn normal() {
        assert_eq!(
            seg("https://divvy-tripdata.s3.amazonaws.com/Divvy_Trips_2019_Q1.zip").as_deref(),
            Some("Divvy_Trips_2019_Q1.zip")
        );
        assert_eq!(seg("https://example.com/a/b/data.zip").as_deref(), Some("data.zip"));
    }

    #[test]
    fn root_or_empty() {
        assert_eq!(seg("https://example.com/"), None);
        assert_eq!(seg("https://example.com"), None);
    }

    #[test]
    fn ignores_query_and_fragment() {
        assert_eq!(
            seg("https://example.com/file.zip?token=abc#part").as_deref(),
            Some("file.zip")
        );
    }

    #[test]
    fn trailing_slash_uses_previous_segment() {
        assert_eq!(seg("https://example.com/dir/sub/").as_deref(), Some("sub"));
    }
}
