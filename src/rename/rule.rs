//! Rename rules applied to the filename component of a path

use std::path::Path;
use std::str::FromStr;

use regex::{NoExpand, Regex, RegexBuilder};

use super::error::RenameError;

/// Case conversion applied to a whole filename
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CaseStyle {
    Upper,
    Lower,
    /// First letter of each word uppercased, the rest lowercased
    Title,
}

impl CaseStyle {
    pub fn convert(&self, name: &str) -> String {
        match self {
            CaseStyle::Upper => name.to_uppercase(),
            CaseStyle::Lower => name.to_lowercase(),
            CaseStyle::Title => {
                let mut out = String::with_capacity(name.len());
                let mut word_start = true;
                for c in name.chars() {
                    if c.is_alphabetic() {
                        if word_start {
                            out.extend(c.to_uppercase());
                        } else {
                            out.extend(c.to_lowercase());
                        }
                        word_start = false;
                    } else {
                        out.push(c);
                        word_start = !c.is_numeric();
                    }
                }
                out
            }
        }
    }
}

/// Sequential numbering used for `{n}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Numbering {
    /// Number given to the first path in processing order
    pub start: i64,
    /// Minimum digit count; shorter numbers are left-padded with zeros
    pub zero_pad: usize,
}

impl Default for Numbering {
    fn default() -> Self {
        Self {
            start: 1,
            zero_pad: 1,
        }
    }
}

impl Numbering {
    fn format(&self, n: i64) -> String {
        format!("{:0width$}", n, width = self.zero_pad)
    }

    /// Number given to `name`, the `index`-th path in processing order
    fn nth(&self, name: &str, index: usize) -> Result<i64, RenameError> {
        i64::try_from(index)
            .ok()
            .and_then(|index| self.start.checked_add(index))
            .ok_or_else(|| RenameError::NumberOverflow {
                name: name.to_string(),
            })
    }
}

/// Renumber from a capture group instead of processing order.
///
/// Parsed from `N`, `N+M` or `N-M`: the integer in group N shifted by M.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenumberGroup {
    pub group: usize,
    pub offset: i64,
}

impl FromStr for RenumberGroup {
    type Err = RenameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RenameError::InvalidRenumberGroup(s.to_string());

        let split_at = s.find(['+', '-']).unwrap_or(s.len());
        let (group, rest) = s.split_at(split_at);
        if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let group: usize = group.parse().map_err(|_| invalid())?;

        let offset = match rest.chars().next() {
            None => 0,
            Some(sign) => {
                let digits = &rest[1..];
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                let magnitude: i64 = digits.parse().map_err(|_| invalid())?;
                if sign == '-' {
                    -magnitude
                } else {
                    magnitude
                }
            }
        };

        Ok(Self { group, offset })
    }
}

/// Regular expression substitution with `{n}` renumbering
#[derive(Debug, Clone)]
pub struct RegexRule {
    matcher: Regex,
    replacement: String,
    numbering: Numbering,
    group: Option<RenumberGroup>,
}

impl RegexRule {
    fn apply(&self, name: &str, index: usize) -> Result<String, RenameError> {
        let number = match self.group {
            Some(renumber) => self.number_from_group(name, renumber)?,
            None => {
                let n = self.numbering.nth(name, index)?;
                tracing::debug!(n, "Renumber from processing order");
                Some(n)
            }
        };

        let replacement = expand_template(&self.replacement, |token| match token {
            "n" => number.map(|n| self.numbering.format(n)),
            _ => None,
        });
        let replacement = to_regex_replacement(&replacement);

        Ok(self
            .matcher
            .replace_all(name, replacement.as_str())
            .into_owned())
    }

    /// Group renumbering applies only when the pattern matches at the start
    fn number_from_group(
        &self,
        name: &str,
        renumber: RenumberGroup,
    ) -> Result<Option<i64>, RenameError> {
        let Some(captures) = self.matcher.captures(name) else {
            return Ok(None);
        };
        if captures.get(0).map(|m| m.start()) != Some(0) {
            return Ok(None);
        }
        let value = captures
            .get(renumber.group)
            .map(|m| m.as_str())
            .unwrap_or_default();
        let old: i64 = value.parse().map_err(|_| RenameError::NonNumericGroup {
            group: renumber.group,
            name: name.to_string(),
            value: value.to_string(),
        })?;
        let n = old
            .checked_add(renumber.offset)
            .ok_or_else(|| RenameError::NumberOverflow {
                name: name.to_string(),
            })?;
        tracing::debug!(old, n, group = renumber.group, "Renumber from match group");
        Ok(Some(n))
    }
}

/// A function from an original filename to a new filename
#[derive(Debug, Clone)]
pub enum RenameRule {
    /// Every occurrence of a literal substring
    Replace { matcher: Regex, to: String },
    /// Regular expression substitution
    Regex(RegexRule),
    /// Case conversion
    Case(CaseStyle),
    /// Whole name rendered from a template
    Number { template: String, numbering: Numbering },
}

impl RenameRule {
    pub fn replace(from: &str, to: &str, ignore_case: bool) -> Result<Self, RenameError> {
        let matcher = RegexBuilder::new(&regex::escape(from))
            .case_insensitive(ignore_case)
            .build()?;
        Ok(RenameRule::Replace {
            matcher,
            to: to.to_string(),
        })
    }

    /// Compile a substitution rule.
    ///
    /// `replacement` may reference groups as `\N` or `\g<name>`, use `{n}`
    /// for renumbering and `{{}` for a literal `{`.
    pub fn regex(
        pattern: &str,
        replacement: &str,
        ignore_case: bool,
        numbering: Numbering,
        group: Option<RenumberGroup>,
    ) -> Result<Self, RenameError> {
        let matcher = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .build()?;
        if let Some(renumber) = group {
            if renumber.group > matcher.captures_len() - 1 {
                return Err(RenameError::InvalidRenumberGroup(format!(
                    "pattern has no group {}",
                    renumber.group
                )));
            }
        }
        Ok(RenameRule::Regex(RegexRule {
            matcher,
            replacement: replacement.to_string(),
            numbering,
            group,
        }))
    }

    pub fn case(style: CaseStyle) -> Self {
        RenameRule::Case(style)
    }

    /// Template placeholders: `{n}`, `{name}`, `{stem}`, `{ext}`
    pub fn number(template: &str, numbering: Numbering) -> Self {
        RenameRule::Number {
            template: template.to_string(),
            numbering,
        }
    }

    /// Compute the new filename for `name`, the `index`-th input path
    pub fn apply(&self, name: &str, index: usize) -> Result<String, RenameError> {
        match self {
            RenameRule::Replace { matcher, to } => {
                Ok(matcher.replace_all(name, NoExpand(to)).into_owned())
            }
            RenameRule::Regex(rule) => rule.apply(name, index),
            RenameRule::Case(style) => Ok(style.convert(name)),
            RenameRule::Number {
                template,
                numbering,
            } => {
                let path = Path::new(name);
                let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
                let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
                let n = numbering.nth(name, index)?;
                Ok(expand_template(template, |token| match token {
                    "n" => Some(numbering.format(n)),
                    "name" => Some(name.to_string()),
                    "stem" => Some(stem.to_string()),
                    "ext" => Some(ext.to_string()),
                    _ => None,
                }))
            }
        }
    }
}

/// Substitute `{token}` placeholders in one pass.
///
/// `{{}` yields a literal `{`; tokens the resolver declines stay as written.
fn expand_template<F>(template: &str, resolve: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        if let Some(after) = rest.strip_prefix("{{}") {
            out.push('{');
            rest = after;
            continue;
        }
        let resolved = rest.find('}').and_then(|end| {
            let token = &rest[1..end];
            resolve(token).map(|value| (value, end))
        });
        match resolved {
            Some((value, end)) => {
                out.push_str(&value);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('{');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Translate `\N` / `\g<name>` group references into regex crate syntax
/// and escape literal `$`.
fn to_regex_replacement(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len() + 8);
    let mut chars = replacement.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '$' => out.push_str("$$"),
            '\\' => match chars.peek().copied() {
                Some(d) if d.is_ascii_digit() => {
                    let mut group = String::new();
                    while group.len() < 2 {
                        match chars.peek() {
                            Some(d) if d.is_ascii_digit() => {
                                group.push(*d);
                                chars.next();
                            }
                            _ => break,
                        }
                    }
                    out.push_str("${");
                    out.push_str(&group);
                    out.push('}');
                }
                Some('\\') => {
                    chars.next();
                    out.push('\\');
                }
                Some('g') => {
                    let mut probe = chars.clone();
                    probe.next();
                    let mut name = String::new();
                    let mut closed = false;
                    if probe.next() == Some('<') {
                        for c in probe.by_ref() {
                            if c == '>' {
                                closed = true;
                                break;
                            }
                            name.push(c);
                        }
                    }
                    if closed && !name.is_empty() {
                        out.push_str("${");
                        out.push_str(&name);
                        out.push('}');
                        chars = probe;
                    } else {
                        out.push('\\');
                    }
                }
                _ => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
    out
}
