//! Glob patterns over fully qualified class names.

use globset::{GlobBuilder, GlobMatcher};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

use crate::Fragment;

/// Trailing character that marks a pattern as a prefix match.
const WILDCARD: char = '*';

#[derive(Clone)]
enum Matcher {
    Glob(GlobMatcher),
    /// The pattern did not compile; compare it verbatim.
    Literal,
}

/// A glob pattern paired with the fragment it contributes.
#[derive(Clone)]
pub struct PatternEntry {
    pattern: String,
    fragment: Fragment,
    matcher: Matcher,
}

impl PatternEntry {
    /// Compile `pattern` into an entry.
    ///
    /// Backslash is an ordinary character and `*` crosses namespace
    /// separators, so `App\*` matches `App\Http\Kernel`. Braces are literal.
    /// A `[` that never closes is matched as itself while the other
    /// wildcards keep their meaning.
    pub fn new(pattern: impl Into<String>, fragment: Fragment) -> Self {
        let pattern = pattern.into();

        let matcher = match compile(&glob_source(&pattern, false)) {
            Ok(glob) => Matcher::Glob(glob),
            Err(_) => match compile(&glob_source(&pattern, true)) {
                Ok(glob) => Matcher::Glob(glob),
                Err(e) => {
                    tracing::warn!(pattern = %pattern, error = %e, "Invalid glob, matching literally");
                    Matcher::Literal
                }
            },
        };

        Self {
            pattern,
            fragment,
            matcher,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    /// Whether this pattern matches the given class name (case-sensitive).
    pub fn matches(&self, class: &str) -> bool {
        match &self.matcher {
            Matcher::Glob(glob) => glob.is_match(class),
            Matcher::Literal => self.pattern == class,
        }
    }

    /// Overlay this entry's top-level keys onto `acc`.
    pub(crate) fn overlay(&self, acc: &mut Fragment) {
        for (key, value) in &self.fragment {
            acc.insert(key.clone(), value.clone());
        }
    }
}

impl PartialEq for PatternEntry {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.fragment == other.fragment
    }
}

impl fmt::Debug for PatternEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternEntry")
            .field("pattern", &self.pattern)
            .field("fragment", &Value::Object(self.fragment.clone()))
            .finish()
    }
}

fn compile(source: &str) -> Result<GlobMatcher, globset::Error> {
    Ok(GlobBuilder::new(source)
        .literal_separator(false)
        .backslash_escape(false)
        .build()?
        .compile_matcher())
}

#[derive(Clone, Copy, PartialEq)]
enum Scan {
    Outside,
    /// Just after `[`
    ClassOpen,
    /// Just after `[!` or `[^`
    ClassNegated,
    ClassMembers,
}

/// Rewrite a shell glob into globset syntax.
///
/// Braces outside character classes become `[{]` / `[}]` so they never
/// alternate. With `literal_brackets`, every `[` becomes `[[]`.
fn glob_source(pattern: &str, literal_brackets: bool) -> String {
    let mut source = String::with_capacity(pattern.len() + 8);
    let mut state = Scan::Outside;

    for c in pattern.chars() {
        state = match (state, c) {
            (Scan::Outside, '[') if literal_brackets => {
                source.push_str("[[]");
                Scan::Outside
            }
            (Scan::Outside, '[') => {
                source.push(c);
                Scan::ClassOpen
            }
            (Scan::Outside, '{') => {
                source.push_str("[{]");
                Scan::Outside
            }
            (Scan::Outside, '}') => {
                source.push_str("[}]");
                Scan::Outside
            }
            (Scan::Outside, _) => {
                source.push(c);
                Scan::Outside
            }
            (Scan::ClassOpen, '!' | '^') => {
                source.push(c);
                Scan::ClassNegated
            }
            // a leading `]` is a member, not the end of the class
            (Scan::ClassOpen | Scan::ClassNegated, _) => {
                source.push(c);
                Scan::ClassMembers
            }
            (Scan::ClassMembers, ']') => {
                source.push(c);
                Scan::Outside
            }
            (Scan::ClassMembers, _) => {
                source.push(c);
                Scan::ClassMembers
            }
        };
    }

    source
}

/// Specificity order: shorter patterns first, and at equal length a
/// pattern ending in `*` before one that does not.
///
/// Folding in this order lets the most specific pattern's keys win.
pub fn specificity(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| {
        match (a.ends_with(WILDCARD), b.ends_with(WILDCARD)) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    })
}

/// Whether `key` is a canonical decimal integer.
///
/// Option tables written in dynamic hosts silently turn such keys into
/// integers; they can never name a class, so they are left out of tables.
pub fn is_integer_key(key: &str) -> bool {
    let digits = key.strip_prefix('-').unwrap_or(key);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    // "01" and "-0" stay strings
    if digits.starts_with('0') && (digits.len() > 1 || key.starts_with('-')) {
        return false;
    }

    key.parse::<i64>().is_ok()
}
