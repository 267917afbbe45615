//! JavaScript extractor.
//!
//! The file provides a module named after its basename (see
//! [`SourceFile::module_name`]). Requirements come from CommonJS `require`,
//! ES `import ... from` and Closure `goog.require`; `goog.provide` and
//! `goog.module` add Closure module provides.
//!
//! Module references starting with `.` are paths: they become `js:file`
//! items normalized against the directory of the importing file.

use regex::Captures;
use std::sync::LazyLock;

use super::rules::{Malformed, Rule, RuleResult, RuleTable, Scan};
use super::{Declarations, Extractor, SourceFile};
use crate::core::{DependencyItem, kinds};

static RULES: LazyLock<RuleTable<JavaScript>> = LazyLock::new(|| {
    RuleTable::new(vec![
        Rule::new(
            "require",
            r#"^\s*(?:var\s+|let\s+|const\s+|exports\.)([\w$]+)\s*=\s*require\s*\(\s*['"]([^'"]+)['"]\s*\)"#,
            JavaScript::on_require,
        ),
        Rule::new(
            "import",
            r#"^\s*import\s+(\{[^}]*\}|\*\s+as\s+[\w$-]+|[\w$-]+)\s*(?:from\s+['"]([^'"]+)['"])?"#,
            JavaScript::on_import,
        ),
        Rule::new(
            "goog_provide",
            r#"^\s*goog\.(provide|module)\s*\(\s*['"]([^'"]+)['"]\s*\)"#,
            JavaScript::on_google_provide,
        ),
        Rule::new(
            "goog_require",
            r#"^\s*goog\.require\s*\(\s*['"]([^'"]+)['"]\s*\)"#,
            JavaScript::on_google_require,
        ),
    ])
});

/// Dependency extractor for `.js` files.
#[derive(Debug, Default)]
pub struct JavaScript;

impl JavaScript {
    fn on_require(&mut self, scan: &mut Scan<'_>, caps: &Captures<'_>) -> RuleResult {
        Self::reference(scan, &caps[2]);
        Ok(())
    }

    fn on_import(&mut self, scan: &mut Scan<'_>, caps: &Captures<'_>) -> RuleResult {
        // `import x;` without a source names nothing we can resolve
        if let Some(module) = caps.get(2) {
            Self::reference(scan, module.as_str());
        }
        Ok(())
    }

    fn on_google_provide(&mut self, scan: &mut Scan<'_>, caps: &Captures<'_>) -> RuleResult {
        scan.decls.provide(DependencyItem::new(kinds::JS_GMODULE, &caps[2]));
        Ok(())
    }

    fn on_google_require(&mut self, scan: &mut Scan<'_>, caps: &Captures<'_>) -> RuleResult {
        scan.decls.require(DependencyItem::new(kinds::JS_GMODULE, &caps[1]));
        Ok(())
    }

    fn reference(scan: &mut Scan<'_>, module: &str) {
        let item = if module.starts_with('.') {
            let path = scan.file.normpath(module);
            DependencyItem::new(kinds::JS_FILE, path.to_string_lossy())
        } else {
            DependencyItem::new(scan.file.kind_or(kinds::JS_MODULE), module)
        };
        scan.decls.require(item);
    }
}

impl Extractor for JavaScript {
    fn format(&self) -> &'static str {
        "js"
    }

    fn begin_file(&mut self, file: &SourceFile, decls: &mut Declarations) {
        if let Some(module) = file.module_name() {
            decls.provides = vec![DependencyItem::new(file.kind_or(kinds::JS_MODULE), module)];
        }
    }

    fn scan_line(
        &mut self,
        file: &SourceFile,
        decls: &mut Declarations,
        line: &str,
    ) -> Result<(), Malformed> {
        RULES.dispatch(self, file, decls, line).map(|_| ())
    }
}
