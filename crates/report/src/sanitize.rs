//! Report sanitization
//!
//! Two renderings of the same rules: [`SanitizeRules::script`] runs inside the
//! loaded page, [`SanitizeRules::apply`] runs over a parsed document (snapshot
//! checks and in-memory test browsers). Removal is idempotent.

use kuchiki::traits::TendrilSink;
use kuchiki::NodeRef;
use serde::{Deserialize, Serialize};

/// What to strip before export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeRules {
    /// Remove every `<script>` element
    pub strip_scripts: bool,

    /// Remove `<link rel="stylesheet">` pointing at another origin
    pub strip_external_stylesheets: bool,
}

impl Default for SanitizeRules {
    fn default() -> Self {
        Self {
            strip_scripts: true,
            strip_external_stylesheets: true,
        }
    }
}

/// Number of elements removed (or found, for [`inspect`])
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizeStats {
    pub scripts: usize,
    pub stylesheets: usize,
}

impl SanitizeStats {
    pub fn is_clean(&self) -> bool {
        self.scripts == 0 && self.stylesheets == 0
    }
}

/// `http:`, `https:` or protocol-relative `//host` references
pub fn is_external_href(href: &str) -> bool {
    let href = href.trim_start().to_ascii_lowercase();
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("//")
}

fn is_stylesheet_rel(rel: &str) -> bool {
    rel.split_ascii_whitespace()
        .any(|token| token.eq_ignore_ascii_case("stylesheet"))
}

impl SanitizeRules {
    /// Page-side expression; evaluates to `{ scripts, stylesheets }` removed
    pub fn script(&self) -> String {
        format!(
            r#"(() => {{
  const external = /^\s*(https?:)?\/\//i;
  let scripts = 0;
  let stylesheets = 0;
  if ({strip_scripts}) {{
    for (const el of Array.from(document.querySelectorAll('script'))) {{
      el.remove();
      scripts += 1;
    }}
  }}
  if ({strip_styles}) {{
    for (const el of Array.from(document.querySelectorAll('link[rel][href]'))) {{
      const rel = (el.getAttribute('rel') || '').toLowerCase().split(/\s+/);
      if (rel.includes('stylesheet') && external.test(el.getAttribute('href') || '')) {{
        el.remove();
        stylesheets += 1;
      }}
    }}
  }}
  return {{ scripts, stylesheets }};
}})()"#,
            strip_scripts = self.strip_scripts,
            strip_styles = self.strip_external_stylesheets,
        )
    }

    /// Detach matching elements from `document`
    pub fn apply(&self, document: &NodeRef) -> SanitizeStats {
        let offenders = self.matching(document);
        for node in offenders.scripts.iter().chain(offenders.stylesheets.iter()) {
            node.detach();
        }
        SanitizeStats {
            scripts: offenders.scripts.len(),
            stylesheets: offenders.stylesheets.len(),
        }
    }

    fn matching(&self, document: &NodeRef) -> Offenders {
        let mut offenders = Offenders::default();

        if self.strip_scripts {
            if let Ok(scripts) = document.select("script") {
                offenders.scripts = scripts.map(|el| el.as_node().clone()).collect();
            }
        }

        if self.strip_external_stylesheets {
            if let Ok(links) = document.select("link") {
                offenders.stylesheets = links
                    .filter(|el| {
                        let attrs = el.attributes.borrow();
                        attrs.get("rel").is_some_and(is_stylesheet_rel)
                            && attrs.get("href").is_some_and(is_external_href)
                    })
                    .map(|el| el.as_node().clone())
                    .collect();
            }
        }

        offenders
    }
}

#[derive(Default)]
struct Offenders {
    scripts: Vec<NodeRef>,
    stylesheets: Vec<NodeRef>,
}

/// Count what the default rules would still remove; zero means clean
pub fn inspect(document: &NodeRef) -> SanitizeStats {
    let offenders = SanitizeRules::default().matching(document);
    SanitizeStats {
        scripts: offenders.scripts.len(),
        stylesheets: offenders.stylesheets.len(),
    }
}

pub fn parse_html(html: &str) -> NodeRef {
    kuchiki::parse_html().one(html)
}

/// Sanitize an HTML string with the default rules
pub fn sanitize_html(html: &str) -> (String, SanitizeStats) {
    let document = parse_html(html);
    let stats = SanitizeRules::default().apply(&document);
    (document.to_string(), stats)
}
