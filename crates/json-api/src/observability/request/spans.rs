//! HTTP span helpers.

use uuid::Uuid;

/// Collapse deal ids so span and metric labels stay low-cardinality.
pub(super) fn normalise_path(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_uuid_segments() {
        let path = format!("/v1/deals/{}", Uuid::new_v4());

        assert_eq!(normalise_path(&path), "/v1/deals/{uuid}");
    }

    #[test]
    fn keeps_static_segments() {
        assert_eq!(normalise_path("/"), "/");
        assert_eq!(normalise_path("/v1/deals"), "/v1/deals");
        assert_eq!(normalise_path("/healthcheck"), "/healthcheck");
    }
}
