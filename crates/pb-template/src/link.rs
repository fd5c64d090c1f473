//! Relative link computation for site-rooted paths.

/// Compute a relative URL from one page to another.
///
/// Both `from` and `to` are site-rooted link paths as stored on pages
/// (leading slash optional). The last segment of `from` is the current
/// document, so the base for resolution is everything before it.
///
/// # Examples
///
/// ```
/// use pb_template::relative_path;
///
/// assert_eq!(relative_path("/a/b.html", "/a/c.html"), "c.html");
/// assert_eq!(
///     relative_path("/forms/special/index.html", "/components.html"),
///     "../../components.html"
/// );
/// ```
#[must_use]
pub fn relative_path(from: &str, to: &str) -> String {
    let from_segs: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_segs: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    // The last segment of `from` is the document itself, not a directory.
    let from_dir = if from_segs.is_empty() {
        &from_segs[..]
    } else {
        &from_segs[..from_segs.len() - 1]
    };

    let common = from_dir
        .iter()
        .zip(&to_segs)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = "../".repeat(from_dir.len() - common);
    let down = to_segs[common..].join("/");

    let result = format!("{ups}{down}");
    if result.is_empty() {
        "./".to_owned()
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_siblings() {
        assert_eq!(relative_path("/a/b.html", "/a/c.html"), "c.html");
    }

    #[test]
    fn test_root_page_to_nested() {
        assert_eq!(
            relative_path("/components.html", "/preview-files/button-view.html"),
            "preview-files/button-view.html"
        );
    }

    #[test]
    fn test_nested_to_root_page() {
        assert_eq!(
            relative_path("/forms/special/buttons.html", "/components.html"),
            "../../components.html"
        );
    }

    #[test]
    fn test_same_page() {
        assert_eq!(relative_path("/a/b.html", "/a/b.html"), "b.html");
    }

    #[test]
    fn test_empty_from_is_site_root() {
        assert_eq!(relative_path("", "/x.html"), "x.html");
    }

    #[test]
    fn test_link_to_site_root() {
        assert_eq!(relative_path("/a/b.html", "/"), "../");
    }

    #[test]
    fn test_without_leading_slashes() {
        assert_eq!(relative_path("a/b.html", "a/c.html"), "c.html");
    }
}
