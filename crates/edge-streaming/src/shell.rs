//! Shell template abstraction.

use html_escape::{encode_double_quoted_attribute, encode_text};

/// Head content for the shell.
///
/// Workloads describe their document metadata here instead of writing
/// `<head>` markup themselves. Titles and attribute values are escaped on
/// render.
#[derive(Debug, Clone, Default)]
pub struct HeadContent {
    /// Page title.
    pub title: Option<String>,
    /// Named meta tags.
    pub meta: Vec<(String, String)>,
    /// Link tags as `(rel, href, type)`.
    pub links: Vec<(String, String, Option<String>)>,
    /// Inline CSS blocks.
    pub styles: Vec<String>,
    /// Inline scripts in head.
    pub scripts: Vec<String>,
}

impl HeadContent {
    /// Create new head content with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Add a meta tag.
    pub fn with_meta(mut self, name: &str, content: &str) -> Self {
        self.meta.push((name.to_string(), content.to_string()));
        self
    }

    /// Add a `<link>` with an optional MIME type.
    pub fn with_link(mut self, rel: &str, href: &str, mime_type: Option<&str>) -> Self {
        self.links
            .push((rel.to_string(), href.to_string(), mime_type.map(String::from)));
        self
    }

    /// Add the page icon.
    pub fn with_icon(self, href: &str, mime_type: &str) -> Self {
        self.with_link("shortcut icon", href, Some(mime_type))
    }

    /// Add inline CSS styles.
    pub fn with_style(mut self, css: &str) -> Self {
        self.styles.push(css.to_string());
        self
    }

    /// Add an inline script to the head.
    pub fn with_script(mut self, js: &str) -> Self {
        self.scripts.push(js.to_string());
        self
    }

    /// Look up a meta tag's content by name.
    pub fn meta_content(&self, name: &str) -> Option<&str> {
        self.meta
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_str())
    }

    /// Render head content to HTML.
    pub fn render(&self) -> String {
        let mut html = String::from("<meta charset=\"utf-8\">\n");

        if let Some(title) = &self.title {
            html.push_str(&format!("<title>{}</title>\n", encode_text(title)));
        }

        for (name, content) in &self.meta {
            html.push_str(&format!(
                "<meta name=\"{}\" content=\"{}\">\n",
                encode_double_quoted_attribute(name),
                encode_double_quoted_attribute(content)
            ));
        }

        for (rel, href, mime_type) in &self.links {
            html.push_str(&format!(
                "<link rel=\"{}\" href=\"{}\"",
                encode_double_quoted_attribute(rel),
                encode_double_quoted_attribute(href)
            ));
            if let Some(mime_type) = mime_type {
                html.push_str(&format!(
                    " type=\"{}\"",
                    encode_double_quoted_attribute(mime_type)
                ));
            }
            html.push_str(">\n");
        }

        for css in &self.styles {
            html.push_str(&format!("<style>{}</style>\n", css));
        }

        for script in &self.scripts {
            html.push_str(&format!("<script>{}</script>\n", script));
        }

        html
    }
}

/// Shell template with section placeholders.
#[derive(Debug, Clone)]
pub struct Shell {
    /// Include doctype declaration.
    pub doctype: bool,
    /// Document language (`<html lang>`).
    pub lang: Option<String>,
    /// Head content.
    pub head: HeadContent,
    /// HTML before sections (opening body, wrapper divs, etc.).
    pub body_start: String,
    /// HTML after sections (closing tags).
    pub body_end: String,
}

impl Shell {
    /// Create a new shell with basic structure.
    pub fn new(head: HeadContent) -> Self {
        Self {
            doctype: true,
            lang: None,
            head,
            body_start: "<body>\n<main>\n".to_string(),
            body_end: "</main>\n</body>\n</html>".to_string(),
        }
    }

    /// Set the document language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Set custom body start HTML.
    pub fn with_body_start(mut self, html: impl Into<String>) -> Self {
        self.body_start = html.into();
        self
    }

    /// Set custom body end HTML.
    pub fn with_body_end(mut self, html: impl Into<String>) -> Self {
        self.body_end = html.into();
        self
    }

    /// Render the opening part of the shell (before sections).
    pub fn render_opening(&self) -> String {
        let mut html = String::new();

        if self.doctype {
            html.push_str("<!DOCTYPE html>\n");
        }

        match &self.lang {
            Some(lang) => html.push_str(&format!(
                "<html lang=\"{}\">\n<head>\n",
                encode_double_quoted_attribute(lang)
            )),
            None => html.push_str("<html>\n<head>\n"),
        }
        html.push_str(&self.head.render());
        html.push_str("</head>\n");
        html.push_str(&self.body_start);

        html
    }

    /// Render the closing part of the shell (after sections).
    pub fn render_closing(&self) -> String {
        self.body_end.clone()
    }
}
