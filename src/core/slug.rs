/// Undoes the double rewrite applied when a custom domain points at a
/// repository root: the domain rewrite produces `/owner/repo` and the path
/// rewrite then appends `owner/repo` again, so the slug arrives as
/// `[owner, repo, owner, repo]`.
pub fn normalize_slug(slug: Vec<String>) -> Vec<String> {
    if slug.len() == 4 && slug[0] == slug[2] && slug[1] == slug[3] {
        let mut slug = slug;
        slug.truncate(2);
        return slug;
    }
    slug
}

/// Splits a request path into non-empty slug segments.
pub fn slug_from_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_collapses_duplicated_rewrite() {
        assert_eq!(
            normalize_slug(slug(&["invertase", "docs.page", "invertase", "docs.page"])),
            slug(&["invertase", "docs.page"])
        );
    }

    #[test]
    fn test_leaves_other_shapes_untouched() {
        let cases: &[&[&str]] = &[
            &["a", "b", "c", "d"],
            &["a", "b", "a", "c"],
            &["a", "b", "c", "b"],
            &["a", "b", "a"],
            &["a", "b", "a", "b", "a"],
            &["a", "b"],
            &[],
        ];

        for case in cases {
            assert_eq!(normalize_slug(slug(case)), slug(case), "case {:?}", case);
        }
    }

    #[test]
    fn test_slug_from_path() {
        assert_eq!(
            slug_from_path("/invertase/docs.page/getting-started/"),
            slug(&["invertase", "docs.page", "getting-started"])
        );
        assert!(slug_from_path("/").is_empty());
    }
}
