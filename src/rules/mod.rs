use crate::model::department_rule::DepartmentRule;
use derive_more::Display;
use once_cell::sync::{Lazy, OnceCell};
use std::collections::HashSet;
use std::path::Path;

static BUILTIN_RULES: Lazy<RuleTable> = Lazy::new(|| {
    RuleTable::from_json(include_str!("department_rules.json"))
        .expect("built-in department rules are valid")
});

/// Table installed at startup from `RULES_FILE`, if any.
static INSTALLED_RULES: OnceCell<RuleTable> = OnceCell::new();

#[derive(Debug, Display)]
pub enum RuleError {
    #[display(fmt = "department rule table is empty")]
    Empty,
    #[display(fmt = "department rule #{} has an empty name", _0)]
    EmptyName(usize),
    #[display(fmt = "duplicate department slug `{}`", _0)]
    DuplicateSlug(String),
    #[display(fmt = "cannot read rules file {}: {}", path, source)]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[display(fmt = "invalid rules document: {}", _0)]
    Json(serde_json::Error),
    #[display(fmt = "department rules were already installed")]
    AlreadyInstalled,
}

impl std::error::Error for RuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuleError::Io { source, .. } => Some(source),
            RuleError::Json(e) => Some(e),
            _ => None,
        }
    }
}

/// Validated, immutable list of department rules.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<DepartmentRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<DepartmentRule>) -> Result<Self, RuleError> {
        if rules.is_empty() {
            return Err(RuleError::Empty);
        }

        let mut seen = HashSet::with_capacity(rules.len());
        for (idx, rule) in rules.iter().enumerate() {
            let slug = rule.slug();
            if slug.is_empty() {
                return Err(RuleError::EmptyName(idx));
            }
            if !seen.insert(slug.clone()) {
                return Err(RuleError::DuplicateSlug(slug));
            }
        }

        Ok(Self { rules })
    }

    pub fn from_json(document: &str) -> Result<Self, RuleError> {
        let rules: Vec<DepartmentRule> = serde_json::from_str(document).map_err(RuleError::Json)?;
        Self::new(rules)
    }

    pub fn from_file(path: &Path) -> Result<Self, RuleError> {
        let document = std::fs::read_to_string(path).map_err(|source| RuleError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&document)
    }

    /// All rules in declaration order.
    pub fn all(&self) -> &[DepartmentRule] {
        &self.rules
    }

    /// Forward lookup by human-readable name, case-insensitive.
    pub fn find_by_name(&self, name: &str) -> Option<&DepartmentRule> {
        let wanted = slugify(name);
        if wanted.is_empty() {
            return None;
        }
        self.rules.iter().find(|rule| rule.slug() == wanted)
    }

    /// Inverse lookup used by page rendering.
    pub fn find_by_slug(&self, slug: &str) -> Option<&DepartmentRule> {
        self.rules.iter().find(|rule| rule.slug() == slug)
    }
}

/// Installs the process-wide rule table. Only the first call succeeds.
pub fn install(table: RuleTable) -> Result<(), RuleError> {
    INSTALLED_RULES
        .set(table)
        .map_err(|_| RuleError::AlreadyInstalled)
}

/// The active rule table: the installed one, otherwise the built-in defaults.
pub fn global() -> &'static RuleTable {
    INSTALLED_RULES
        .get()
        .unwrap_or_else(|| Lazy::force(&BUILTIN_RULES))
}

/// Lowercases `name` and turns each run of whitespace, parentheses or slashes
/// into a single hyphen. Leading and trailing hyphens are dropped.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_whitespace() || matches!(ch, '(' | ')' | '/') {
            if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        } else {
            slug.extend(ch.to_lowercase());
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_replaces_separators() {
        assert_eq!(slugify("Kantor Pusat"), "kantor-pusat");
        assert_eq!(slugify("Security (Satpam)"), "security-satpam");
        assert_eq!(slugify("Sales / Marketing"), "sales-marketing");
        assert_eq!(slugify("  IT\tSupport "), "it-support");
        assert_eq!(slugify("()/"), "");
    }

    #[test]
    fn builtin_table_loads() {
        let table = Lazy::force(&BUILTIN_RULES);
        assert!(!table.all().is_empty());
        assert!(table.all().iter().any(|r| r.check_out_next_day));
    }

    #[test]
    fn forward_lookup_is_case_insensitive() {
        let table = global();
        let rule = table.find_by_name("security (SATPAM)").unwrap();
        assert_eq!(rule.name, "Security (Satpam)");
        assert_eq!(rule.slug(), "security-satpam");
        assert!(table.find_by_name("Finance").is_none());
        assert!(table.find_by_name("   ").is_none());
    }

    #[test]
    fn inverse_lookup_by_slug() {
        let table = global();
        for rule in table.all() {
            let found = table.find_by_slug(&rule.slug()).unwrap();
            assert_eq!(found, rule);
        }
        assert!(table.find_by_slug("sales / marketing").is_none());
    }

    #[test]
    fn rejects_duplicate_slugs() {
        let err = RuleTable::from_json(
            r#"[
                {"name":"Kantor Pusat","checkInTime":"08:00","checkOutTime":"17:00"},
                {"name":"kantor  pusat","checkInTime":"09:00","checkOutTime":"18:00"}
            ]"#,
        )
        .unwrap_err();
        assert!(matches!(err, RuleError::DuplicateSlug(ref s) if s == "kantor-pusat"));
    }

    #[test]
    fn rejects_empty_table_and_names() {
        assert!(matches!(RuleTable::from_json("[]"), Err(RuleError::Empty)));
        assert!(matches!(
            RuleTable::from_json(r#"[{"name":" / ","checkInTime":"08:00","checkOutTime":"17:00"}]"#),
            Err(RuleError::EmptyName(0))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = RuleTable::from_file(Path::new("/nonexistent/rules.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rules.json"));
    }
}
