// src/links/extension.rs
// =============================================================================
// Filters discovered links by file extension.
//
// The extension of a link is taken from the last segment of its path:
//   http://a.test/img/photo.JPG?size=2  ->  ".JPG"
//   http://a.test/archive.tar.gz        ->  ".gz"
//   http://a.test/docs/                 ->  ""
//
// Matching is ASCII case-insensitive, and an empty allow-list matches nothing.
// =============================================================================

use url::Url;

// Splits a comma-separated extension list exactly as given.
//
// No trimming: ".jpg, .png" yields ".jpg" and " .png", and an empty input
// yields a single empty entry (which matches links without an extension).
pub fn parse_extension_list(list: &str) -> Vec<String> {
    list.split(',').map(str::to_string).collect()
}

// Extension of the last path segment, including the leading '.'
pub fn path_extension(url: &Url) -> &str {
    let segment = url.path().rsplit('/').next().unwrap_or_default();
    match segment.rfind('.') {
        Some(dot) => &segment[dot..],
        None => "",
    }
}

// Keeps the links whose extension matches one of `extensions`, in input order
pub fn filter_by_extension<S: AsRef<str>>(links: &[Url], extensions: &[S]) -> Vec<Url> {
    links
        .iter()
        .filter(|link| {
            let ext = path_extension(link);
            extensions
                .iter()
                .any(|allowed| allowed.as_ref().eq_ignore_ascii_case(ext))
        })
        .cloned()
        .collect()
}
