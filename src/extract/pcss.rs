//! PCSS extractor: `@module`, `@include` and `@@import` declarations.

use regex::Captures;
use std::sync::LazyLock;

use super::rules::{Malformed, Rule, RuleResult, RuleTable, Scan};
use super::{Declarations, Extractor, SourceFile};
use crate::core::{DependencyItem, kinds};

static RULES: LazyLock<RuleTable<Pcss>> = LazyLock::new(|| {
    RuleTable::new(vec![
        Rule::new("module", r"^@module\s+(\S+)", Pcss::on_module),
        Rule::new("include", r"^@include\s+(\S+)", Pcss::on_include),
        Rule::new("import", r"^@@import\s+(.+)", Pcss::on_import),
    ])
});

/// Dependency extractor for PCSS stylesheets.
#[derive(Debug, Default)]
pub struct Pcss;

impl Pcss {
    fn on_module(&mut self, scan: &mut Scan<'_>, caps: &Captures<'_>) -> RuleResult {
        scan.decls.provide(DependencyItem::new(kinds::PCSS_MODULE, &caps[1]));
        Ok(())
    }

    fn on_include(&mut self, scan: &mut Scan<'_>, caps: &Captures<'_>) -> RuleResult {
        let path = scan.file.normpath(&caps[1]);
        scan.decls.require(DependencyItem::new(kinds::PCSS_FILE, path.to_string_lossy()));
        Ok(())
    }

    fn on_import(&mut self, scan: &mut Scan<'_>, caps: &Captures<'_>) -> RuleResult {
        let target = caps[1].trim().trim_end_matches(';').trim();
        let target = target.trim_matches(|c| c == '"' || c == '\'');
        if target.is_empty() {
            return Err(Malformed::new("@@import without a target"));
        }
        let path = scan.file.normpath(target);
        scan.decls.require(DependencyItem::new(kinds::CSS_FILE, path.to_string_lossy()));
        Ok(())
    }
}

impl Extractor for Pcss {
    fn format(&self) -> &'static str {
        "pcss"
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
