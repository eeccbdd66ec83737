//! Line classification rules for generated examples
//!
//! Each body line is matched against [`RULES`] in order and the first rule
//! that matches decides the line's category, description, and effects on the
//! step. Output-producing and input-reading patterns come before the generic
//! assignment pattern, so `printf("x = %d", x);` is an output line, not an
//! assignment.
//!
//! This is substring and regex matching, not parsing. A line that matches no
//! rule still becomes a step with [`FALLBACK_DESCRIPTION`].

use crate::trace::LineCategory;
use regex::Regex;
use std::sync::OnceLock;

/// Side effect a rule has on the step generated for its line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Emit the first quoted `printf` argument as the step's output
    EmitOutput,
    /// Attach an input request for the `&name` argument
    RequestInput,
    /// Highlight the variable being assigned
    HighlightAssigned,
}

pub struct LineRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub category: Option<LineCategory>,
    pub description: &'static str,
    pub effects: &'static [Effect],
}

pub const FALLBACK_DESCRIPTION: &str = "Executes a statement";

pub static RULES: &[LineRule] = &[
    LineRule {
        name: "printf",
        matches: is_printf,
        category: Some(LineCategory::Output),
        description: "Prints a message to the screen",
        effects: &[Effect::EmitOutput],
    },
    LineRule {
        name: "scanf",
        matches: is_scanf,
        category: Some(LineCategory::Input),
        description: "Reads a value from the user",
        effects: &[Effect::RequestInput],
    },
    LineRule {
        name: "for",
        matches: is_for,
        category: Some(LineCategory::Loop),
        description: "Starts a for loop",
        effects: &[],
    },
    LineRule {
        name: "while",
        matches: is_while,
        category: Some(LineCategory::Loop),
        description: "Starts a while loop",
        effects: &[],
    },
    LineRule {
        name: "condition",
        matches: is_condition,
        category: Some(LineCategory::Condition),
        description: "Checks a condition",
        effects: &[],
    },
    LineRule {
        name: "return",
        matches: is_return,
        category: None,
        description: "Returns from the function",
        effects: &[],
    },
    LineRule {
        name: "declaration",
        matches: is_declaration,
        category: Some(LineCategory::Declaration),
        description: "Declares a variable",
        effects: &[Effect::HighlightAssigned],
    },
    LineRule {
        name: "assignment",
        matches: is_assignment,
        category: Some(LineCategory::Calculation),
        description: "Performs a calculation or assignment",
        effects: &[Effect::HighlightAssigned],
    },
];

/// What the rules say about one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Name of the matching rule, `None` for the fallback
    pub rule: Option<&'static str>,
    pub category: Option<LineCategory>,
    pub description: &'static str,
    pub output: Option<String>,
    /// Variable named by a `scanf` `&name` argument
    pub input_variable: Option<String>,
    /// Variable the line assigns to or reads into
    pub highlight: Option<String>,
}

/// Classify a trimmed source line
pub fn classify(line: &str) -> Classification {
    let Some(rule) = RULES.iter().find(|rule| (rule.matches)(line)) else {
        return Classification {
            rule: None,
            category: None,
            description: FALLBACK_DESCRIPTION,
            output: None,
            input_variable: None,
            highlight: None,
        };
    };

    let mut result = Classification {
        rule: Some(rule.name),
        category: rule.category,
        description: rule.description,
        output: None,
        input_variable: None,
        highlight: None,
    };

    for effect in rule.effects {
        match effect {
            Effect::EmitOutput => result.output = printf_output(line),
            Effect::RequestInput => {
                result.input_variable = address_of_target(line);
                result.highlight = result.input_variable.clone();
            }
            Effect::HighlightAssigned => result.highlight = assignment_target(line),
        }
    }

    result
}

/// The first quoted `printf` argument with escapes resolved
pub fn printf_output(line: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r#"printf\s*\(\s*"([^"]*)""#).expect("valid regex"));
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| unescape(m.as_str()))
}

/// Identifier after the first `&` on the line
pub fn address_of_target(line: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"&\s*([A-Za-z_][A-Za-z0-9_]*)").expect("valid regex"));
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Left-hand identifier of the first `=`, `+=`, `-=` … on the line.
/// Comparisons (`==`, `<=`, `!=`) are not assignments.
pub fn assignment_target(line: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*[-+*/%]?=(?:[^=]|$)").expect("valid regex")
    });
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn unescape(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek().copied()) {
            ('\\', Some('n')) => {
                out.push('\n');
                chars.next();
            }
            ('\\', Some('t')) => {
                out.push('\t');
                chars.next();
            }
            ('\\', Some('\\')) => {
                out.push('\\');
                chars.next();
            }
            ('%', Some('%')) => {
                out.push('%');
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

fn is_printf(line: &str) -> bool {
    line.contains("printf")
}

fn is_scanf(line: &str) -> bool {
    line.contains("scanf")
}

fn is_for(line: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bfor\s*\(").expect("valid regex"))
        .is_match(line)
}

fn is_while(line: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bwhile\s*\(").expect("valid regex"))
        .is_match(line)
}

fn is_condition(line: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(if|switch)\s*\(").expect("valid regex"))
        .is_match(line)
}

fn is_return(line: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\breturn\b").expect("valid regex"))
        .is_match(line)
}

fn is_declaration(line: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(int|float|double|char|bool)\b").expect("valid regex"))
        .is_match(line)
}

/// Any `=` that is not part of `==`, `<=`, `>=` or `!=`. The target may be
/// an element or a dereference (`arr[i] = 5;`, `*p = 1;`) with nothing to
/// highlight.
fn is_assignment(line: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|[^=!<>])=(?:[^=]|$)").expect("valid regex"))
        .is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printf_unescapes_newline() {
        let c = classify(r#"printf("Hello World\n");"#);
        assert_eq!(c.rule, Some("printf"));
        assert_eq!(c.category, Some(LineCategory::Output));
        assert_eq!(c.output.as_deref(), Some("Hello World\n"));
    }

    #[test]
    fn printf_wins_over_assignment() {
        let c = classify(r#"printf("x = %d\n", x);"#);
        assert_eq!(c.rule, Some("printf"));
        assert_eq!(c.output.as_deref(), Some("x = %d\n"));
        assert_eq!(c.highlight, None);
    }

    #[test]
    fn printf_escapes() {
        assert_eq!(printf_output(r#"printf("a\tb\\c 50%%");"#).as_deref(), Some("a\tb\\c 50%"));
        assert_eq!(printf_output("printf(buf);"), None);
    }

    #[test]
    fn scanf_targets_address_of() {
        let c = classify(r#"scanf("%d", &count);"#);
        assert_eq!(c.category, Some(LineCategory::Input));
        assert_eq!(c.input_variable.as_deref(), Some("count"));
        assert_eq!(c.highlight.as_deref(), Some("count"));
    }

    #[test]
    fn loops_and_conditions() {
        assert_eq!(classify("for (int i = 0; i < n; i++) {").category, Some(LineCategory::Loop));
        assert_eq!(classify("while (x > 0) {").description, "Starts a while loop");
        assert_eq!(classify("if (x == 1) {").category, Some(LineCategory::Condition));
        assert_eq!(classify("} else if(x) {").category, Some(LineCategory::Condition));
    }

    #[test]
    fn return_has_no_category() {
        let c = classify("return total;");
        assert_eq!(c.rule, Some("return"));
        assert_eq!(c.category, None);
    }

    #[test]
    fn assignment_highlights_target() {
        let c = classify("total = total + 5;");
        assert_eq!(c.category, Some(LineCategory::Calculation));
        assert_eq!(c.highlight.as_deref(), Some("total"));

        assert_eq!(assignment_target("sum += x;").as_deref(), Some("sum"));
        assert_eq!(assignment_target("a == b"), None);
        assert_eq!(assignment_target("a <= b"), None);
        assert_eq!(assignment_target("a != b"), None);
    }

    #[test]
    fn element_and_pointer_stores_are_calculations() {
        let c = classify("arr[i] = 5;");
        assert_eq!(c.rule, Some("assignment"));
        assert_eq!(c.category, Some(LineCategory::Calculation));
        assert_eq!(c.highlight, None);

        let c = classify("*p = 1;");
        assert_eq!(c.category, Some(LineCategory::Calculation));

        assert_eq!(classify("grid[0][1] += 2;").category, Some(LineCategory::Calculation));
    }

    #[test]
    fn comparisons_are_not_assignments() {
        for line in ["a == b;", "a <= b;", "a >= b;", "a != b;"] {
            assert_eq!(classify(line).rule, None, "{}", line);
        }
    }

    #[test]
    fn inline_declaration_is_declaration() {
        let c = classify("int y = 3;");
        assert_eq!(c.category, Some(LineCategory::Declaration));
        assert_eq!(c.highlight.as_deref(), Some("y"));
    }

    #[test]
    fn unknown_line_falls_back() {
        let c = classify("doSomething();");
        assert_eq!(c.rule, None);
        assert_eq!(c.category, None);
        assert_eq!(c.description, FALLBACK_DESCRIPTION);
        assert_eq!(c.output, None);
        assert_eq!(c.input_variable, None);
    }
}
