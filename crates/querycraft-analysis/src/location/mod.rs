//! Attribute a query to the application code that issued it.

use aho_corasick::AhoCorasick;
use querycraft_core::config::LocationSettings;
use querycraft_core::types::{SourceLocation, StackFrame};

/// Finds the first application frame in a call stack.
///
/// Application code is defined negatively: any frame whose path contains a
/// skip fragment (framework internals, vendored packages, QueryCraft itself)
/// is not it. All skip fragments are matched in one pass per path.
#[derive(Debug, Clone)]
pub struct SourceLocationResolver {
    project_root: String,
    skip_paths: Vec<String>,
    dependency_dir: String,
    matcher: Option<AhoCorasick>,
}

impl SourceLocationResolver {
    pub fn new(settings: &LocationSettings) -> Self {
        let skip_paths: Vec<String> = settings
            .skip_paths
            .iter()
            .filter(|p| !p.is_empty())
            .cloned()
            .collect();
        let matcher = AhoCorasick::new(&skip_paths).ok();
        if matcher.is_none() {
            tracing::warn!(
                patterns = skip_paths.len(),
                "skip-path automaton failed to build; falling back to linear scan"
            );
        }
        Self {
            project_root: settings.project_root.trim_end_matches('/').to_string(),
            skip_paths,
            dependency_dir: settings.dependency_dir.clone(),
            matcher,
        }
    }

    /// Resolve `call_stack` (outermost first) to a source location.
    ///
    /// First pass: the first frame with a file outside every skip fragment.
    /// Second pass, if the first found nothing and a project root is set:
    /// the first frame under the root that is not inside the dependency
    /// directory. Otherwise the `Unknown:0` sentinel.
    pub fn resolve(&self, call_stack: &[StackFrame]) -> SourceLocation {
        let with_file = || {
            call_stack
                .iter()
                .filter_map(|frame| frame.file.as_deref().filter(|f| !f.is_empty()).map(|f| (f, frame)))
        };

        if let Some((file, frame)) = with_file().find(|(file, _)| !self.should_skip(file)) {
            return SourceLocation::new(self.relativize(file), frame.line.unwrap_or(0));
        }

        if self.project_root.is_empty() {
            return SourceLocation::unknown();
        }

        if let Some((file, frame)) = with_file().find(|(file, _)| self.is_project_file(file)) {
            return SourceLocation::new(self.relativize(file), frame.line.unwrap_or(0));
        }

        SourceLocation::unknown()
    }

    /// True if `file` belongs to framework, vendored, or QueryCraft code.
    pub fn should_skip(&self, file: &str) -> bool {
        match self.matcher {
            Some(ref ac) => ac.is_match(file),
            None => self.skip_paths.iter().any(|p| file.contains(p.as_str())),
        }
    }

    fn is_project_file(&self, file: &str) -> bool {
        self.strip_root(file).is_some()
            && (self.dependency_dir.is_empty() || !file.contains(self.dependency_dir.as_str()))
    }

    /// The part of `file` after the project root, matched on a whole path
    /// segment: `/app` covers `/app/x.php` but not `/app2/x.php`.
    fn strip_root<'a>(&self, file: &'a str) -> Option<&'a str> {
        if self.project_root.is_empty() {
            return None;
        }
        let rest = file.strip_prefix(self.project_root.as_str())?;
        (rest.is_empty() || rest.starts_with('/')).then_some(rest)
    }

    fn relativize(&self, file: &str) -> String {
        self.strip_root(file).unwrap_or(file).to_string()
    }
}

impl Default for SourceLocationResolver {
    fn default() -> Self {
        Self::new(&LocationSettings::default())
    }
}
