//! C and C++ extractor.
//!
//! A source file provides a `c:header` named after its basename and requires
//! every header it `#include`s, in either quoting style.

use regex::Captures;
use std::sync::LazyLock;

use super::rules::{Malformed, Rule, RuleResult, RuleTable, Scan};
use super::{Declarations, Extractor, SourceFile};
use crate::core::{DependencyItem, kinds};

static RULES: LazyLock<RuleTable<C>> = LazyLock::new(|| {
    RuleTable::new(vec![Rule::new("include", r#"^\s*#\s*include\s+[<"]([^>"]+)[>"]"#, C::on_include)])
});

/// Dependency extractor for C family sources and headers.
#[derive(Debug, Default)]
pub struct C;

impl C {
    fn on_include(&mut self, scan: &mut Scan<'_>, caps: &Captures<'_>) -> RuleResult {
        scan.decls.require(DependencyItem::new(kinds::C_HEADER, &caps[1]));
        Ok(())
    }
}

impl Extractor for C {
    fn format(&self) -> &'static str {
        "c"
    }

    fn begin_file(&mut self, file: &SourceFile, decls: &mut Declarations) {
        if let Some(name) = file.module_name() {
            decls.provides = vec![DependencyItem::new(kinds::C_HEADER, name)];
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_text;
    use std::path::Path;

    #[test]
    fn test_includes() {
        let text = "#include <stdio.h>\n#include \"util/list.h\"\n  # include <sys/types.h>\nint main() {}\n";
        let result = extract_text(&mut C, text, Some(Path::new("src/main.c")), None).unwrap();
        assert_eq!(result.provides, vec![DependencyItem::new("c:header", "main.c")]);
        assert_eq!(
            result.requires,
            vec![
                DependencyItem::new("c:header", "stdio.h"),
                DependencyItem::new("c:header", "util/list.h"),
                DependencyItem::new("c:header", "sys/types.h"),
            ]
        );
    }

    #[test]
    fn test_in_memory_text_has_no_provides() {
        let result = extract_text(&mut C, "#include <a.h>\n", None, None).unwrap();
        assert!(result.provides.is_empty());
        assert_eq!(result.requires.len(), 1);
    }
}
