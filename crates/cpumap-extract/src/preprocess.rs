//! Source extraction and shorthand macro expansion.
//!
//! QEMU declares its CPU models as one big initializer array. Feature
//! bitfields are often written through object-like shorthand macros
//! (`#define PPRO_FEATURES (CPUID_FP87 | ...)`) defined above the array. This
//! module cuts the array body out of the source file and substitutes every
//! shorthand with its bitfield, reduced to a whitespace-separated token list.
//!
//! Substitution is a single pass in definition order: a shorthand body may
//! refer to shorthands defined before it, never after.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use tracing::debug;

use crate::error::{ExtractError, Result};

// #define SOME_FEATURES <bitfield>
static RE_SHORTHAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#define ([A-Z0-9_]+_FEATURES) (.*)$").unwrap());

// Parentheses, bit-or, tabs and comments inside a shorthand body
static RE_BITFIELD_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([()|\t\n])|(/\*.*?\*/)").unwrap());

/// The line closing the definition array.
const END_MARK: &str = "};\n";

/// Where to find the definition array and which macros to skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Element type of the definition array.
    pub struct_type: String,
    /// Name of the definition array.
    pub array_name: String,
    /// Shorthands whose name starts with this prefix are discarded.
    pub excluded_prefix: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            struct_type: "X86CPUDefinition".into(),
            array_name: "builtin_x86_defs".into(),
            excluded_prefix: "TCG_".into(),
        }
    }
}

impl ExtractOptions {
    /// The declaration line opening the array, as it appears in the source.
    pub fn begin_marker(&self) -> String {
        format!("static const {} {}[] = {{", self.struct_type, self.array_name)
    }

    fn begin_pattern(&self) -> Result<Regex> {
        let pattern = format!(
            r"^static( const)? {} {}\[\] = \{{$",
            regex::escape(&self.struct_type),
            regex::escape(&self.array_name)
        );
        Ok(Regex::new(&pattern)?)
    }
}

/// An object-like macro reduced to a token list.
#[derive(Debug, Clone)]
pub struct Shorthand {
    pub name: String,
    pub expansion: String,
    pattern: Regex,
}

impl Shorthand {
    fn new(name: &str, expansion: String) -> Result<Self> {
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(name)))?;
        Ok(Self {
            name: name.to_string(),
            expansion,
            pattern,
        })
    }

    /// Replace every whole-identifier occurrence of this shorthand.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, NoExpand(&self.expansion))
    }
}

/// Split `text` into logical lines, joining lines that end in a backslash.
///
/// Every returned line keeps its terminating newline, if it had one. A
/// backslash-newline pair becomes a single space.
pub fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending = String::new();

    for physical in text.split_inclusive('\n') {
        pending.push_str(physical);
        if let Some(stripped) = pending.strip_suffix("\\\n") {
            pending = format!("{stripped} ");
            continue;
        }
        lines.push(std::mem::take(&mut pending));
    }
    if !pending.is_empty() {
        lines.push(pending);
    }
    lines
}

/// Reduce a shorthand body to a token list, expanding earlier shorthands.
fn reduce_bitfield(body: &str, known: &[Shorthand]) -> String {
    let mut reduced = RE_BITFIELD_NOISE.replace_all(body, " ").into_owned();
    for shorthand in known {
        reduced = shorthand.apply(&reduced).into_owned();
    }
    reduced
}

/// Cut the definition array body out of `source`, with shorthands expanded.
///
/// Shorthands are collected from the lines above the array's opening line.
/// The returned text excludes the opening and closing lines.
pub fn read_definitions(source: &str, options: &ExtractOptions) -> Result<String> {
    let begin = options.begin_pattern()?;
    let mut lines = logical_lines(source).into_iter();
    let mut shorthands: Vec<Shorthand> = Vec::new();

    loop {
        let Some(line) = lines.next() else {
            return Err(ExtractError::BeginMarkerNotFound {
                marker: options.begin_marker(),
            });
        };
        let content = line.strip_suffix('\n').unwrap_or(line.as_str());
        if begin.is_match(content) {
            break;
        }
        let Some(caps) = RE_SHORTHAND.captures(content) else {
            continue;
        };

        let name = &caps[1];
        if name.starts_with(&options.excluded_prefix) {
            debug!(name, "skipping toolchain-internal shorthand");
            continue;
        }
        let expansion = reduce_bitfield(&caps[2], &shorthands);
        shorthands.push(Shorthand::new(name, expansion)?);
    }
    debug!(count = shorthands.len(), "collected feature shorthands");

    let mut body = String::new();
    loop {
        let Some(line) = lines.next() else {
            return Err(ExtractError::EndMarkerNotFound);
        };
        if line == END_MARK {
            break;
        }
        let mut expanded = line;
        for shorthand in &shorthands {
            expanded = shorthand.apply(&expanded).into_owned();
        }
        body.push_str(&expanded);
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "\
#define PPRO_FEATURES (CPUID_FP87 | CPUID_DE | \\
          CPUID_TSC /* time */ | CPUID_MSR)
#define TCG_FEATURES (CPUID_FP87 | CPUID_VME)
#define PENTIUM2_FEATURES (PPRO_FEATURES | CPUID_MMX)

static const X86CPUDefinition builtin_x86_defs[] = {
    {
        .name = \"pentium2\",
        .features[FEAT_1_EDX] =
            PENTIUM2_FEATURES,
        .features[FEAT_1_ECX] = TCG_FEATURES,
    },
};
";

    #[test]
    fn joins_continued_lines() {
        let lines = logical_lines("a \\\nb\nc\n");
        assert_eq!(lines, vec!["a  b\n".to_string(), "c\n".to_string()]);
    }

    #[test]
    fn keeps_unterminated_last_line() {
        let lines = logical_lines("a\nb");
        assert_eq!(lines, vec!["a\n".to_string(), "b".to_string()]);
    }

    #[test]
    fn expands_nested_shorthands() {
        let body = read_definitions(SOURCE, &ExtractOptions::default()).unwrap();
        let tokens: Vec<&str> = body
            .lines()
            .find(|l| l.contains("CPUID_MMX"))
            .unwrap()
            .split_whitespace()
            .collect();
        assert_eq!(
            tokens,
            vec![
                "CPUID_FP87",
                "CPUID_DE",
                "CPUID_TSC",
                "CPUID_MSR",
                "CPUID_MMX",
                ","
            ]
        );
        assert!(!body.contains("PENTIUM2_FEATURES"));
        assert!(!body.contains("static const"));
        assert!(!body.contains("};"));
    }

    #[test]
    fn excluded_shorthands_stay_unexpanded() {
        let body = read_definitions(SOURCE, &ExtractOptions::default()).unwrap();
        assert!(body.contains("TCG_FEATURES"));
        assert!(!body.contains("CPUID_VME"));
    }

    #[test]
    fn body_pass_runs_in_definition_order() {
        let source = "\
#define A_FEATURES (B_FEATURES | CPUID_SSE)
#define B_FEATURES (CPUID_SSE2)
static X86CPUDefinition builtin_x86_defs[] = {
    { .features[FEAT_1_EDX] = A_FEATURES },
};
";
        let body = read_definitions(source, &ExtractOptions::default()).unwrap();
        // A_FEATURES is substituted first and leaves B_FEATURES behind, which
        // is then substituted by the later pass over the body line.
        assert!(body.contains("CPUID_SSE2"));
        assert!(body.contains("CPUID_SSE "));
    }

    #[test]
    fn whole_identifiers_only() {
        let source = "\
#define I486_FEATURES (CPUID_FP87)
static X86CPUDefinition builtin_x86_defs[] = {
    { .features[FEAT_1_EDX] = MY_I486_FEATURES_X },
};
";
        let body = read_definitions(source, &ExtractOptions::default()).unwrap();
        assert!(body.contains("MY_I486_FEATURES_X"));
    }

    #[test]
    fn missing_begin_marker() {
        let err = read_definitions("int x;\n", &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, ExtractError::BeginMarkerNotFound { .. }));
        assert!(!err.is_parse_error());
    }

    #[test]
    fn missing_end_marker() {
        let source = "static const X86CPUDefinition builtin_x86_defs[] = {\n    { .name = \"a\" },\n";
        let err = read_definitions(source, &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, ExtractError::EndMarkerNotFound));
    }

    #[test]
    fn custom_array_name() {
        let options = ExtractOptions {
            array_name: "extra_defs".into(),
            ..ExtractOptions::default()
        };
        let source = "static const X86CPUDefinition extra_defs[] = {\n{ .name = \"a\" },\n};\n";
        let body = read_definitions(source, &options).unwrap();
        assert_eq!(body, "{ .name = \"a\" },\n");
    }
}
