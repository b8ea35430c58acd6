use crate::core::render::PageProps;
use crate::domain::model::{CustomDomain, DocsConfig, PageContent};
use crate::domain::properties::Properties;
use crate::utils::html::escape;

/// Everything a page render needs, passed explicitly down the render
/// chain. Only successful props produce one.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub domain: &'a CustomDomain,
    pub config: &'a DocsConfig,
    pub properties: &'a Properties,
    pub content: &'a PageContent,
    pub source: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn from_props(props: &'a PageProps) -> Option<Self> {
        if props.error.is_some() {
            return None;
        }
        let content = props.content.as_ref()?;
        let source = props.source.as_deref()?;

        Some(Self {
            domain: &props.domain,
            config: &content.config,
            properties: &props.properties,
            content,
            source,
        })
    }

    /// Page title: frontmatter title, then the site name, then the repository.
    pub fn title(&self) -> String {
        let site = self
            .config
            .name
            .clone()
            .unwrap_or_else(|| self.properties.full_name());

        match &self.content.frontmatter.title {
            Some(title) if *title != site => format!("{} | {}", title, site),
            _ => site,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.content
            .frontmatter
            .description
            .as_deref()
            .or(self.config.description.as_deref())
    }

    /// Canonical URL, using the custom domain when one is configured.
    pub fn canonical_url(&self) -> String {
        match self.domain {
            Some(domain) => {
                let path = if self.properties.path == "index" {
                    String::new()
                } else {
                    format!("/{}", self.properties.path)
                };
                format!("https://{}{}", domain, path)
            }
            None => {
                let mut url = self.properties.base_path();
                if self.properties.path != "index" {
                    url.push('/');
                    url.push_str(&self.properties.path);
                }
                url
            }
        }
    }

    pub fn head_tags(&self) -> Vec<String> {
        let title = self.title();
        let mut tags = vec![
            format!("<title>{}</title>", escape(&title)),
            format!(r#"<meta property="og:title" content="{}" />"#, escape(&title)),
            format!(r#"<link rel="canonical" href="{}" />"#, escape(&self.canonical_url())),
        ];

        if let Some(description) = self.description() {
            tags.push(format!(
                r#"<meta name="description" content="{}" />"#,
                escape(description)
            ));
            tags.push(format!(
                r#"<meta property="og:description" content="{}" />"#,
                escape(description)
            ));
        }

        if let Some(logo) = &self.config.logo {
            tags.push(format!(r#"<meta property="og:image" content="{}" />"#, escape(logo)));
        }

        tags
    }

    pub fn render_document(&self) -> String {
        let headings: String = self
            .content
            .headings
            .iter()
            .map(|h| {
                format!(
                    r##"<li class="rank-{}"><a href="#{}">{}</a></li>"##,
                    h.rank,
                    escape(&h.id),
                    escape(&h.title)
                )
            })
            .collect();

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n{}\n</head>\n<body>\n<nav><ul>{}</ul></nav>\n<main>{}</main>\n</body>\n</html>\n",
            self.head_tags().join("\n"),
            headings,
            self.source
        )
    }
}
