use crate::domain::model::Frontmatter;

const FENCE: &str = "---";

/// Splits a `---` fenced YAML block off the top of a markdown file.
/// Malformed YAML yields empty frontmatter and leaves the body intact.
pub fn split_frontmatter(raw: &str) -> (Frontmatter, String) {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut lines = raw.lines();
    if lines.next().map(str::trim_end) != Some(FENCE) {
        return (Frontmatter::default(), raw.to_string());
    }

    let mut yaml = Vec::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim_end() == FENCE {
            closed = true;
            break;
        }
        yaml.push(line);
    }

    if !closed {
        return (Frontmatter::default(), raw.to_string());
    }

    let body = lines.collect::<Vec<_>>().join("\n");
    let yaml = yaml.join("\n");

    if yaml.trim().is_empty() {
        return (Frontmatter::default(), body);
    }

    match serde_yaml::from_str::<Frontmatter>(&yaml) {
        Ok(frontmatter) => (frontmatter, body),
        Err(e) => {
            tracing::warn!("Ignoring invalid frontmatter: {}", e);
            (Frontmatter::default(), body)
        }
    }
}
