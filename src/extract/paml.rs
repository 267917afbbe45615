//! PAML template extractor.
//!
//! PAML is indentation based (tab characters). Declarations live on indented
//! lines:
//!
//! | line                                   | requirement                   |
//! |----------------------------------------|-------------------------------|
//! | `<link(rel=stylesheet,href=X)`         | `css:file X` or `css:url X`   |
//! | `<script(src=X)`                       | `js:file X`                   |
//! | `@import:js(a,b)` / `@require:js(a,b)` | `js:module` per entry         |
//! | `@require:gmodule(a)`                  | `js:gmodule` per entry        |
//! | `@require:css(a)`                      | `css:module` per entry        |
//! | `%include name`                        | `paml:file name.paml`         |
//!
//! A `<script` line also opens an embedded region: the following lines
//! indented deeper than the `<script` line are fed, with that indentation
//! stripped, to a nested JavaScript or Sugar extractor (`<script@sugar`).
//! The region closes at the first line indented at or below the fence, blank
//! lines included, or at end of file. Nested declarations are added to the template's
//! own result.

use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

use super::javascript::JavaScript;
use super::rules::{Malformed, Rule, RuleResult, RuleTable, Scan};
use super::sugar::Sugar;
use super::{Declarations, Extractor, SourceFile};
use crate::core::{DependencyItem, kinds};

static RULES: LazyLock<RuleTable<Paml>> = LazyLock::new(|| {
    RuleTable::new(vec![
        Rule::new("link", r"^\t+<link\(", Paml::on_link),
        Rule::new("script", r"^\t+<script\(", Paml::on_script),
        Rule::new("require_js", r"^\t+@(?:import|require):js\(", Paml::on_require_js),
        Rule::new("require_gmodule", r"^\t+@(?:import|require):gmodule\(", Paml::on_require_gmodule),
        Rule::new("require_css", r"^\t+@(?:import|require):css\(", Paml::on_require_css),
        Rule::new("include", r"^\t+%include\s*", Paml::on_include),
    ])
});

static EMBEDDED_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\t*)<script([^:\n]*)").expect("embedded script pattern is valid")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\??(?:[\w-]+::)?[\w-]+)(?:=('[^']+'|"[^"]+"|[^),]+))?"#)
        .expect("attribute pattern is valid")
});

/// Parsed `name=value` attributes of a tag, in source order.
pub type Attributes = Vec<(String, Option<String>)>;

/// An open embedded script region.
struct Embedded {
    extractor: Box<dyn Extractor>,
    fence: usize,
    file: SourceFile,
}

/// Dependency extractor for PAML templates.
#[derive(Default)]
pub struct Paml {
    embedded: Option<Embedded>,
}

impl std::fmt::Debug for Paml {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paml")
            .field("embedded", &self.embedded.as_ref().map(|e| (e.extractor.format(), e.fence)))
            .finish()
    }
}

impl Paml {
    fn on_link(&mut self, scan: &mut Scan<'_>, _caps: &Captures<'_>) -> RuleResult {
        let attributes = parse_attributes(arguments(scan.line))?;
        if attribute(&attributes, "rel") != Some("stylesheet") {
            return Ok(());
        }
        if let Some(href) = attribute(&attributes, "href").filter(|h| !h.is_empty()) {
            let kind = if href.contains("://") { kinds::CSS_URL } else { kinds::CSS_FILE };
            scan.decls.require(DependencyItem::new(kind, href));
        }
        Ok(())
    }

    fn on_script(&mut self, scan: &mut Scan<'_>, _caps: &Captures<'_>) -> RuleResult {
        let Some((_, rest)) = scan.line.split_once("src=") else {
            return Ok(());
        };
        let value = rest.split([',', ')']).next().unwrap_or_default();
        let src = unquote(value.trim());
        if !src.is_empty() {
            scan.decls.require(DependencyItem::new(kinds::JS_FILE, src));
        }
        Ok(())
    }

    fn on_require_js(&mut self, scan: &mut Scan<'_>, _caps: &Captures<'_>) -> RuleResult {
        require_each(scan, kinds::JS_MODULE);
        Ok(())
    }

    fn on_require_gmodule(&mut self, scan: &mut Scan<'_>, _caps: &Captures<'_>) -> RuleResult {
        require_each(scan, kinds::JS_GMODULE);
        Ok(())
    }

    fn on_require_css(&mut self, scan: &mut Scan<'_>, _caps: &Captures<'_>) -> RuleResult {
        require_each(scan, kinds::CSS_MODULE);
        Ok(())
    }

    fn on_include(&mut self, scan: &mut Scan<'_>, caps: &Captures<'_>) -> RuleResult {
        let matched = caps.get(0).map_or(0, |m| m.end());
        let rest = &scan.line[matched..];
        let target = rest.split('+').next().unwrap_or_default();
        let target = target.split('{').next().unwrap_or_default().trim();
        if target.is_empty() {
            return Err(Malformed::new("%include without a template name"));
        }

        let mut name = target.to_string();
        if Path::new(target).extension().is_none() {
            name.push_str(".paml");
        }
        let kind = if name.ends_with(".svg") { kinds::ANY_FILE } else { kinds::PAML_FILE };
        scan.decls.require(DependencyItem::new(kind, name));
        Ok(())
    }

    /// Feed `line` to the open embedded region, closing it when the line
    /// falls back to the fence.
    fn forward(&mut self, decls: &mut Declarations, line: &str) -> Result<(), Malformed> {
        let Some(embedded) = self.embedded.as_mut() else {
            return Ok(());
        };
        let indent = leading_tabs(line);
        if indent > embedded.fence {
            return embedded.extractor.scan_line(&embedded.file, decls, &line[indent..]);
        }
        self.close_embedded(decls);
        Ok(())
    }

    fn open_embedded(&mut self, file: &SourceFile, decls: &mut Declarations, caps: &Captures<'_>) {
        self.close_embedded(decls);

        let fence = caps[1].len();
        let language = caps[2].rsplit('@').next().unwrap_or_default();
        let mut extractor: Box<dyn Extractor> = if language == "sugar" {
            Box::new(Sugar::default())
        } else {
            Box::new(JavaScript)
        };
        // nested code has no file name of its own to provide
        let nested = SourceFile::new(file.path.as_deref(), None);
        extractor.begin_file(&nested, &mut Declarations::default());
        tracing::trace!("{}: embedded {} region at depth {fence}", file.display(), extractor.format());

        self.embedded = Some(Embedded {
            extractor,
            fence,
            file: nested,
        });
    }

    fn close_embedded(&mut self, decls: &mut Declarations) {
        if let Some(mut embedded) = self.embedded.take() {
            embedded.extractor.end_file(&embedded.file, decls);
        }
    }
}

impl Extractor for Paml {
    fn format(&self) -> &'static str {
        "paml"
    }

    fn begin_file(&mut self, _file: &SourceFile, _decls: &mut Declarations) {
        self.embedded = None;
    }

    fn scan_line(
        &mut self,
        file: &SourceFile,
        decls: &mut Declarations,
        line: &str,
    ) -> Result<(), Malformed> {
        self.forward(decls, line)?;
        if let Some(caps) = EMBEDDED_SCRIPT.captures(line) {
            self.open_embedded(file, decls, &caps);
        }
        RULES.dispatch(self, file, decls, line).map(|_| ())
    }

    fn end_file(&mut self, _file: &SourceFile, decls: &mut Declarations) {
        self.close_embedded(decls);
    }
}

/// Parse a PAML attribute list such as `rel=stylesheet,href="a.css"`.
///
/// Names may carry a `?` prefix and a `ns::` namespace, which is reported as
/// `ns:name`. Values may be single-quoted, double-quoted or bare; quotes are
/// stripped. A repeated name keeps every occurrence; lookups use the last.
pub fn parse_attributes(text: &str) -> Result<Attributes, Malformed> {
    let mut attributes = Attributes::new();
    let mut rest = text;

    while !rest.is_empty() {
        let caps = ATTRIBUTE
            .captures(rest)
            .ok_or_else(|| Malformed::new(format!("Given attributes are malformed: {rest}")))?;
        let name = caps[1].replace("::", ":");
        let value = caps.get(2).map(|v| unquote(v.as_str()).to_string());
        attributes.push((name, value));

        rest = &rest[caps.get(0).map_or(rest.len(), |m| m.end())..];
        if rest.is_empty() {
            break;
        }
        rest = rest.strip_prefix(',').ok_or_else(|| {
            Malformed::new(format!("Attributes must be comma-separated: {rest}"))
        })?;
        if rest.is_empty() {
            return Err(Malformed::new(format!(
                "Trailing comma with no remaining attributes: {text}"
            )));
        }
    }
    Ok(attributes)
}

/// Value of the last attribute called `name`, if it has one.
pub fn attribute<'a>(attributes: &'a Attributes, name: &str) -> Option<&'a str> {
    attributes.iter().rev().find(|(n, _)| n == name).and_then(|(_, v)| v.as_deref())
}

/// The text between the first `(` and the last `)` of a tag line.
fn arguments(line: &str) -> &str {
    let inner = line.split_once('(').map_or(line, |(_, rest)| rest);
    inner.rsplit_once(')').map_or(inner, |(args, _)| args)
}

fn require_each(scan: &mut Scan<'_>, kind: &str) {
    for name in arguments(scan.line).split(',').map(str::trim).filter(|n| !n.is_empty()) {
        scan.decls.require(DependencyItem::new(kind, name));
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote)) {
            return inner;
        }
    }
    value
}

fn leading_tabs(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b'\t').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_text;

    fn parse(text: &str) -> crate::core::ParseResult {
        extract_text(&mut Paml::default(), text, Some(Path::new("site/index.paml")), None).unwrap()
    }

    #[test]
    fn test_tag_declarations() {
        let text = "html\n\thead\n\t\t<link(rel=stylesheet,href=css/site.css)\n\t\t<link(rel=stylesheet,href=\"https://cdn.example.com/x.css\")\n\t\t<link(rel=icon,href=favicon.ico)\n\t\t@require:js(widgets, ui.core,)\n\t\t@import:gmodule(app.main)\n\t\t@require:css(theme)\n";
        let result = parse(text);
        assert!(result.provides.is_empty());
        assert_eq!(
            result.requires,
            vec![
                DependencyItem::new("css:file", "css/site.css"),
                DependencyItem::new("css:url", "https://cdn.example.com/x.css"),
                DependencyItem::new("js:module", "widgets"),
                DependencyItem::new("js:module", "ui.core"),
                DependencyItem::new("js:gmodule", "app.main"),
                DependencyItem::new("css:module", "theme"),
            ]
        );
    }

    #[test]
    fn test_script_src_and_include() {
        let text = "\t<script(src=\"lib/js/jquery.js\")\n\t<script(type=text/javascript)\n\t%include footer + {title: 1}\n\t%include icons/logo.svg\n";
        let result = parse(text);
        assert_eq!(
            result.requires,
            vec![
                DependencyItem::new("js:file", "lib/js/jquery.js"),
                DependencyItem::new("paml:file", "footer.paml"),
                DependencyItem::new("*:file", "icons/logo.svg"),
            ]
        );
    }

    #[test]
    fn test_embedded_sugar_region() {
        let text = "body\n\t\t<script@sugar\n\t\t\t@module page\n\t\t\t@import widgets\n\t\t%include footer\n\t\t\t@import notforwarded\n";
        let result = parse(text);
        assert_eq!(result.provides, vec![DependencyItem::new("js:module", "page")]);
        assert_eq!(
            result.requires,
            vec![
                DependencyItem::new("js:module", "extend"),
                DependencyItem::new("js:module", "widgets"),
                DependencyItem::new("paml:file", "footer.paml"),
            ]
        );
    }

    #[test]
    fn test_blank_line_closes_embedded_region() {
        let text = "\t<script\n\t\timport a from 'a';\n\n\t\timport b from 'b';\n";
        let result = parse(text);
        assert_eq!(result.requires, vec![DependencyItem::new("js:module", "a")]);
    }

    #[test]
    fn test_embedded_region_closed_at_end_of_file() {
        let text = "\t<script\n\t\timport x from 'lib/x';\n";
        let result = parse(text);
        assert_eq!(result.requires, vec![DependencyItem::new("js:module", "lib/x")]);

        let text = "\t<script@sugar\n\t\t@import a\n";
        let result = parse(text);
        assert_eq!(
            result.requires,
            vec![DependencyItem::new("js:module", "extend"), DependencyItem::new("js:module", "a")]
        );
    }

    #[test]
    fn test_parse_attributes() {
        let attrs = parse_attributes("?async,xlink::href='a b',data-x=\"q\",rel=icon").unwrap();
        assert_eq!(
            attrs,
            vec![
                ("?async".to_string(), None),
                ("xlink:href".to_string(), Some("a b".to_string())),
                ("data-x".to_string(), Some("q".to_string())),
                ("rel".to_string(), Some("icon".to_string())),
            ]
        );
        assert_eq!(attribute(&attrs, "rel"), Some("icon"));
        assert_eq!(attribute(&attrs, "?async"), None);
        assert!(parse_attributes("").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_attributes() {
        let err = parse_attributes("rel=stylesheet,").unwrap_err();
        assert!(err.0.starts_with("Trailing comma"));

        let err = parse_attributes("rel=\"a\";href=b").unwrap_err();
        assert!(err.0.starts_with("Attributes must be comma-separated"));

        let err = parse_attributes("async href=b").unwrap_err();
        assert!(err.0.starts_with("Attributes must be comma-separated"));

        let err = parse_attributes("=oops").unwrap_err();
        assert!(err.0.starts_with("Given attributes are malformed"));
    }
}
