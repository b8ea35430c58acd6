use crate::domain::model::{HeadingNode, PageContent, Serialization};
use crate::domain::ports::{MarkdownSerializer, SerializeError};
use async_trait::async_trait;
use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;

pub const DEFAULT_MAX_BYTES: usize = 1024 * 1024;

/// Renders page markdown to HTML and collects the h2/h3 outline.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    max_bytes: usize,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BYTES)
    }
}

impl MarkdownRenderer {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    fn options() -> Options {
        let mut opts = Options::empty();
        opts.insert(Options::ENABLE_TABLES);
        opts.insert(Options::ENABLE_FOOTNOTES);
        opts.insert(Options::ENABLE_STRIKETHROUGH);
        opts.insert(Options::ENABLE_TASKLISTS);
        opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        opts
    }

    pub fn render(&self, markdown: &str) -> Result<Serialization, SerializeError> {
        if markdown.len() > self.max_bytes {
            return Err(SerializeError {
                message: format!(
                    "markdown is {} bytes, limit is {}",
                    markdown.len(),
                    self.max_bytes
                ),
            });
        }

        let mut events: Vec<Event> = Parser::new_ext(markdown, Self::options()).collect();
        let headings = assign_heading_ids(&mut events);

        let mut source = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut source, events.into_iter());

        Ok(Serialization { source, headings })
    }
}

#[async_trait]
impl MarkdownSerializer for MarkdownRenderer {
    async fn serialize(&self, content: &PageContent) -> Result<Serialization, SerializeError> {
        let markdown = content.markdown.as_deref().ok_or_else(|| SerializeError {
            message: "page has no markdown".to_string(),
        })?;
        self.render(markdown)
    }
}

/// Gives every heading an id (explicit `{#id}` wins) and returns the
/// h2/h3 outline.
fn assign_heading_ids(events: &mut [Event<'_>]) -> Vec<HeadingNode> {
    let mut outline = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut open: Option<(usize, String)> = None;

    for i in 0..events.len() {
        match &events[i] {
            Event::Start(Tag::Heading { .. }) => open = Some((i, String::new())),
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, title)) = open.as_mut() {
                    title.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(level)) => {
                let level = *level;
                let Some((start, title)) = open.take() else {
                    continue;
                };

                let id = match &mut events[start] {
                    Event::Start(Tag::Heading { id, .. }) => {
                        let resolved = match id {
                            Some(explicit) => explicit.to_string(),
                            None => unique_slug(&title, &mut seen),
                        };
                        *id = Some(CowStr::from(resolved.clone()));
                        resolved
                    }
                    _ => continue,
                };

                let rank = match level {
                    HeadingLevel::H2 => 2,
                    HeadingLevel::H3 => 3,
                    _ => continue,
                };
                outline.push(HeadingNode {
                    id,
                    title: title.trim().to_string(),
                    rank,
                });
            }
            _ => {}
        }
    }

    outline
}

fn unique_slug(title: &str, seen: &mut HashMap<String, usize>) -> String {
    let base = slugify(title);
    let count = seen.entry(base.clone()).or_insert(0);
    let slug = if *count == 0 {
        base
    } else {
        format!("{}-{}", base, count)
    };
    *count += 1;
    slug
}

pub fn slugify(title: &str) -> String {
    title
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            c if c.is_whitespace() => Some('-'),
            _ => None,
        })
        .collect()
}
