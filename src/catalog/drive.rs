//! Google Drive URL recognition and embed derivation.
//!
//! Pure string helpers; no request context. Used for validating submitted
//! links and for turning a stored share URL into an iframe-embeddable
//! preview URL.

/// Extract the Drive file id from a shared URL.
///
/// Recognized shapes, first match wins:
/// 1. `/file/d/<id>`
/// 2. `?id=<id>` or `&id=<id>` (earliest occurrence of either)
/// 3. `/document/d/<id>`
/// 4. `/spreadsheets/d/<id>`
/// 5. `/presentation/d/<id>`
///
/// An id is a maximal run of `[A-Za-z0-9_-]`, at least one character.
pub fn extract_file_id(url: &str) -> Option<String> {
    id_after(url, "/file/d/")
        .or_else(|| query_param_id(url))
        .or_else(|| id_after(url, "/document/d/"))
        .or_else(|| id_after(url, "/spreadsheets/d/"))
        .or_else(|| id_after(url, "/presentation/d/"))
}

/// Derive the preview URL to embed, or `None` when the URL is not a
/// recognizable Drive link and the caller should fall back to a plain
/// outbound link.
pub fn embed_url(url: &str) -> Option<String> {
    let id = extract_file_id(url)?;
    Some(format!("https://drive.google.com/file/d/{}/preview", id))
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Leading id run of a slice, if non-empty.
fn take_id(rest: &str) -> Option<String> {
    let id: String = rest.chars().take_while(|c| is_id_char(*c)).collect();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Id following any occurrence of `marker`, scanning left to right.
fn id_after(url: &str, marker: &str) -> Option<String> {
    url.match_indices(marker)
        .find_map(|(idx, _)| take_id(&url[idx + marker.len()..]))
}

/// Id from a `?id=` or `&id=` query parameter, whichever appears first.
fn query_param_id(url: &str) -> Option<String> {
    let mut starts: Vec<usize> = url
        .match_indices("?id=")
        .chain(url.match_indices("&id="))
        .map(|(idx, marker)| idx + marker.len())
        .collect();
    starts.sort_unstable();
    starts.into_iter().find_map(|start| take_id(&url[start..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_share_url() {
        let url = "https://drive.google.com/file/d/1a2B3c_D-e4F5g6H/view?usp=sharing";
        assert_eq!(extract_file_id(url).as_deref(), Some("1a2B3c_D-e4F5g6H"));
    }

    #[test]
    fn test_open_query_url() {
        let url = "https://drive.google.com/open?id=1a2B3c_D-e4F5g6H";
        assert_eq!(extract_file_id(url).as_deref(), Some("1a2B3c_D-e4F5g6H"));
    }

    #[test]
    fn test_download_query_url() {
        let url = "https://drive.google.com/uc?export=download&id=1a2B3c_D-e4F5g6H";
        assert_eq!(extract_file_id(url).as_deref(), Some("1a2B3c_D-e4F5g6H"));
    }

    #[test]
    fn test_docs_editor_urls() {
        assert_eq!(
            extract_file_id("https://docs.google.com/document/d/1DocId_x/edit").as_deref(),
            Some("1DocId_x")
        );
        assert_eq!(
            extract_file_id("https://docs.google.com/spreadsheets/d/1SheetId-y/edit#gid=0")
                .as_deref(),
            Some("1SheetId-y")
        );
        assert_eq!(
            extract_file_id("https://docs.google.com/presentation/d/1SlideId_z/present").as_deref(),
            Some("1SlideId_z")
        );
    }

    #[test]
    fn test_id_stops_at_delimiters() {
        assert_eq!(
            extract_file_id("https://drive.google.com/open?id=abc123#heading").as_deref(),
            Some("abc123")
        );
        assert_eq!(
            extract_file_id("https://drive.google.com/file/d/abc123/preview").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn test_pattern_priority() {
        // /file/d/ wins over a query id appearing in the same URL
        let url = "https://drive.google.com/file/d/pathid/view?id=queryid";
        assert_eq!(extract_file_id(url).as_deref(), Some("pathid"));
    }

    #[test]
    fn test_unrecognized_urls() {
        assert_eq!(extract_file_id("https://example.com/file.pdf"), None);
        assert_eq!(extract_file_id("https://drive.google.com/drive/my-drive"), None);
        assert_eq!(extract_file_id(""), None);
        // Marker present but no id characters after it
        assert_eq!(extract_file_id("https://drive.google.com/file/d/"), None);
        assert_eq!(extract_file_id("https://drive.google.com/open?id="), None);
    }

    #[test]
    fn test_embed_url() {
        let url = "https://drive.google.com/file/d/1a2B3c_D-e4F5g6H/view?usp=sharing";
        assert_eq!(
            embed_url(url).as_deref(),
            Some("https://drive.google.com/file/d/1a2B3c_D-e4F5g6H/preview")
        );
    }

    #[test]
    fn test_embed_url_from_query_form() {
        let url = "https://drive.google.com/open?id=xyz_789";
        assert_eq!(
            embed_url(url).as_deref(),
            Some("https://drive.google.com/file/d/xyz_789/preview")
        );
    }

    #[test]
    fn test_embed_url_unrecognized() {
        assert_eq!(embed_url("https://example.com/not-drive"), None);
    }
}
