//! Placeholder Substitution
//!
//! Templates carry positional placeholders `{0}`, `{1}`, ... that select
//! arguments by index. Substitution splits a template around its
//! placeholders and interleaves the arguments, producing an ordered list of
//! [`Segment`]s. That list is then either concatenated into a plain string
//! or, when any argument is rich content, handed to a composer.
//!
//! ```
//! use glossa_i18n::{Arg, substitute};
//!
//! let args: [Arg<()>; 2] = ["a".into(), "b".into()];
//! assert_eq!(substitute("{1} {0}", &args).to_text(), "b a");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([0-9]+)\}").expect("placeholder pattern is valid"));

// ============================================================================
// Arguments
// ============================================================================

/// A plain substitution value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Uint(n) => write!(f, "{}", n),
            Scalar::Float(n) => write!(f, "{}", n),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// A substitution argument: a scalar or a rich-content fragment `R`.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg<R> {
    Scalar(Scalar),
    Rich(R),
}

impl<R> Arg<R> {
    /// Wrap a rich-content fragment.
    pub fn rich(fragment: R) -> Self {
        Arg::Rich(fragment)
    }

    pub fn is_rich(&self) -> bool {
        matches!(self, Arg::Rich(_))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Arg::Scalar(scalar) => Some(scalar),
            Arg::Rich(_) => None,
        }
    }
}

impl<R> From<Scalar> for Arg<R> {
    fn from(scalar: Scalar) -> Self {
        Arg::Scalar(scalar)
    }
}

macro_rules! scalar_from {
    ($($ty:ty => |$v:ident| $body:expr),+ $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from($v: $ty) -> Self {
                    $body
                }
            }

            impl<R> From<$ty> for Arg<R> {
                fn from(value: $ty) -> Self {
                    Arg::Scalar(Scalar::from(value))
                }
            }
        )+
    };
}

scalar_from! {
    &str => |v| Scalar::Text(v.to_string()),
    String => |v| Scalar::Text(v),
    &String => |v| Scalar::Text(v.clone()),
    char => |v| Scalar::Text(v.to_string()),
    i8 => |v| Scalar::Int(i64::from(v)),
    i16 => |v| Scalar::Int(i64::from(v)),
    i32 => |v| Scalar::Int(i64::from(v)),
    i64 => |v| Scalar::Int(v),
    isize => |v| Scalar::Int(v as i64),
    u8 => |v| Scalar::Uint(u64::from(v)),
    u16 => |v| Scalar::Uint(u64::from(v)),
    u32 => |v| Scalar::Uint(u64::from(v)),
    u64 => |v| Scalar::Uint(v),
    usize => |v| Scalar::Uint(v as u64),
    f32 => |v| Scalar::Float(f64::from(v)),
    f64 => |v| Scalar::Float(v),
    bool => |v| Scalar::Bool(v),
}

// ============================================================================
// Tokens and segments
// ============================================================================

/// A `{<digits>}` occurrence in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    /// Argument index; `usize::MAX` when the digits overflow
    pub index: usize,
    /// Byte offset of the opening brace
    pub start: usize,
    /// Byte length of the whole token
    pub len: usize,
}

impl Placeholder {
    /// Byte offset just past the closing brace.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// All placeholders of `template`, left to right.
///
/// Only ASCII digits count: `{}` and `{x}` are plain text. Leading zeros
/// are accepted, `{007}` selects argument 7.
pub fn placeholders(template: &str) -> Vec<Placeholder> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| {
            let token = caps.get(0)?;
            let digits = caps.get(1)?;
            Some(Placeholder {
                index: digits.as_str().parse().unwrap_or(usize::MAX),
                start: token.start(),
                len: token.len(),
            })
        })
        .collect()
}

/// One piece of a substituted template.
#[derive(Debug, PartialEq)]
pub enum Segment<'a, R> {
    /// Literal template text (empty for an out-of-range placeholder)
    Literal(&'a str),
    /// A caller-supplied argument
    Arg(&'a Arg<R>),
}

impl<R> Clone for Segment<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Segment<'_, R> {}

impl<'a, R> Segment<'a, R> {
    /// The rich fragment, if this segment carries one.
    pub fn as_rich(&self) -> Option<&'a R> {
        match *self {
            Segment::Arg(Arg::Rich(fragment)) => Some(fragment),
            _ => None,
        }
    }

    fn write_text(&self, out: &mut String) {
        use std::fmt::Write;

        match self {
            Segment::Literal(text) => out.push_str(text),
            Segment::Arg(Arg::Scalar(scalar)) => {
                let _ = write!(out, "{}", scalar);
            }
            Segment::Arg(Arg::Rich(_)) => {}
        }
    }
}

/// Composer signature: merges segments into one rich-content value.
pub type ComposeFn<R> = dyn for<'s, 'x> Fn(&'x [Segment<'s, R>]) -> R + Send + Sync;

// ============================================================================
// Substitution
// ============================================================================

/// Output of a translation: plain text, or the composer's result.
#[derive(Debug, Clone, PartialEq)]
pub enum Translation<R> {
    Text(String),
    Rich(R),
}

impl<R> Translation<R> {
    pub fn is_rich(&self) -> bool {
        matches!(self, Translation::Rich(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Translation::Text(text) => Some(text),
            Translation::Rich(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Translation::Text(text) => Some(text),
            Translation::Rich(_) => None,
        }
    }

    pub fn into_rich(self) -> Option<R> {
        match self {
            Translation::Text(_) => None,
            Translation::Rich(fragment) => Some(fragment),
        }
    }
}

impl<R> Default for Translation<R> {
    fn default() -> Self {
        Translation::Text(String::new())
    }
}

impl<R: fmt::Display> fmt::Display for Translation<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Translation::Text(text) => f.write_str(text),
            Translation::Rich(fragment) => fmt::Display::fmt(fragment, f),
        }
    }
}

/// A template split around its placeholders, with arguments interleaved.
#[derive(Debug)]
pub struct Substitution<'a, R> {
    segments: Vec<Segment<'a, R>>,
    rich: bool,
}

impl<'a, R> Substitution<'a, R> {
    /// Segments in template order.
    pub fn segments(&self) -> &[Segment<'a, R>] {
        &self.segments
    }

    /// Whether rendering goes through the composer: some argument is rich
    /// content and the template has placeholders to put it in.
    pub fn is_rich(&self) -> bool {
        self.rich
    }

    /// Concatenate the segments. Rich fragments contribute nothing.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            segment.write_text(&mut out);
        }
        out
    }

    /// Produce the final value.
    ///
    /// Plain text unless [`is_rich`](Self::is_rich), in which case every
    /// segment goes to `compose`. Returns `None` if rich output is required and no
    /// composer is given.
    pub fn render<F>(&self, compose: Option<F>) -> Option<Translation<R>>
    where
        F: FnOnce(&[Segment<'a, R>]) -> R,
    {
        if self.rich {
            compose.map(|compose| Translation::Rich(compose(self.segments.as_slice())))
        } else {
            Some(Translation::Text(self.to_text()))
        }
    }
}

/// Split `template` around its placeholders and interleave `args`.
///
/// Without placeholders or without arguments the template is kept whole as
/// a single literal and renders as text, whatever the arguments are.
/// Placeholders may repeat or appear out of numeric order; an index past
/// the end of `args` becomes an empty literal.
pub fn substitute<'a, R>(template: &'a str, args: &'a [Arg<R>]) -> Substitution<'a, R> {
    let tokens = placeholders(template);
    let mut segments = Vec::with_capacity(tokens.len() * 2 + 1);

    if tokens.is_empty() || args.is_empty() {
        if !template.is_empty() {
            segments.push(Segment::Literal(template));
        }
        return Substitution {
            segments,
            rich: false,
        };
    }

    let mut previous_end = 0;
    for token in &tokens {
        if token.start > previous_end {
            segments.push(Segment::Literal(&template[previous_end..token.start]));
        }
        segments.push(match args.get(token.index) {
            Some(arg) => Segment::Arg(arg),
            None => Segment::Literal(""),
        });
        previous_end = token.end();
    }
    if previous_end < template.len() {
        segments.push(Segment::Literal(&template[previous_end..]));
    }

    Substitution {
        segments,
        rich: args.iter().any(Arg::is_rich),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Bold(&'static str);

    fn plain(template: &str, args: &[Arg<Bold>]) -> String {
        substitute(template, args).to_text()
    }

    fn args(values: &[&str]) -> Vec<Arg<Bold>> {
        values.iter().map(|v| Arg::from(*v)).collect()
    }

    fn describe(segments: &[Segment<'_, Bold>]) -> Vec<String> {
        segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => format!("'{}'", text),
                Segment::Arg(Arg::Scalar(scalar)) => format!("={}", scalar),
                Segment::Arg(Arg::Rich(Bold(text))) => format!("<b>{}</b>", text),
            })
            .collect()
    }

    #[test]
    fn test_placeholders_offsets() {
        let tokens = placeholders("Hi {0}, {12}!");
        assert_eq!(
            tokens,
            vec![
                Placeholder { index: 0, start: 3, len: 3 },
                Placeholder { index: 12, start: 8, len: 4 },
            ]
        );
        assert_eq!(tokens[1].end(), 12);
    }

    #[test]
    fn test_placeholders_ignore_non_digits() {
        assert!(placeholders("{} {x} {-1} { 1 } {١}").is_empty());
    }

    #[test]
    fn test_placeholders_leading_zeros_and_overflow() {
        assert_eq!(placeholders("{007}")[0].index, 7);
        assert_eq!(placeholders("{99999999999999999999999}")[0].index, usize::MAX);
    }

    #[test]
    fn test_hello_world() {
        assert_eq!(plain("Hello, {0}!", &args(&["World"])), "Hello, World!");
    }

    #[test]
    fn test_repeated_placeholder() {
        assert_eq!(plain("{0} and {0}", &args(&["x"])), "x and x");
    }

    #[test]
    fn test_out_of_order_placeholders() {
        assert_eq!(plain("{1} {0}", &args(&["a", "b"])), "b a");
    }

    #[test]
    fn test_out_of_range_is_empty() {
        assert_eq!(plain("{5}", &args(&["only-one"])), "");
        assert_eq!(plain("[{5}]", &args(&["only-one"])), "[]");
    }

    #[test]
    fn test_no_placeholders_unchanged() {
        let template = "Nothing to see {} here";
        assert_eq!(plain(template, &args(&["a", "b"])), template);
        assert_eq!(plain(template, &[]), template);
    }

    #[test]
    fn test_no_args_unchanged() {
        assert_eq!(plain("Hello, {0}!", &[]), "Hello, {0}!");
    }

    #[test]
    fn test_empty_template() {
        let sub = substitute::<Bold>("", &[]);
        assert!(sub.segments().is_empty());
        assert_eq!(sub.to_text(), "");
    }

    #[test]
    fn test_scalar_display() {
        let values: Vec<Arg<Bold>> = vec![
            Arg::from(3),
            Arg::from(2.5),
            Arg::from(4.0),
            Arg::from(true),
            Arg::from(7usize),
            Arg::from(-1i64),
        ];
        assert_eq!(plain("{0} {1} {2} {3} {4} {5}", &values), "3 2.5 4 true 7 -1");
    }

    #[test]
    fn test_segments_keep_template_order() {
        let values = args(&["a", "b"]);
        let sub = substitute("<{1}|{0}>", &values);
        assert_eq!(describe(sub.segments()), vec!["'<'", "=b", "'|'", "=a", "'>'"]);
    }

    #[test]
    fn test_adjacent_placeholders_emit_no_empty_literals() {
        let values = args(&["a", "b"]);
        let sub = substitute("{0}{1}", &values);
        assert_eq!(describe(sub.segments()), vec!["=a", "=b"]);
    }

    #[test]
    fn test_unicode_literals_slice_cleanly() {
        assert_eq!(plain("héllo {0} wörld", &args(&["→"])), "héllo → wörld");
    }

    #[test]
    fn test_render_plain() {
        let values = args(&["x"]);
        let out = substitute("[{0}]", &values).render(None::<fn(&[Segment<'_, Bold>]) -> Bold>);
        assert_eq!(out, Some(Translation::Text("[x]".to_string())));
    }

    #[test]
    fn test_render_rich_delegates_every_segment() {
        let values: Vec<Arg<Bold>> = vec![Arg::from("Ann"), Arg::rich(Bold("3"))];
        let sub = substitute("{0} has {1} {9} items", &values);
        assert!(sub.is_rich());

        let mut seen = Vec::new();
        let out = sub.render(Some(|segments: &[Segment<'_, Bold>]| {
            seen = describe(segments);
            Bold("composed")
        }));

        assert_eq!(out, Some(Translation::Rich(Bold("composed"))));
        assert_eq!(
            seen,
            vec!["=Ann", "' has '", "<b>3</b>", "' '", "''", "' items'"]
        );
    }

    #[test]
    fn test_rich_args_without_placeholders_render_text() {
        let values = vec![Arg::rich(Bold("x"))];
        let sub = substitute("static text", &values);
        assert!(!sub.is_rich());

        let out = sub.render(Some(|_: &[Segment<'_, Bold>]| -> Bold {
            panic!("composer must not run")
        }));
        assert_eq!(out, Some(Translation::Text("static text".to_string())));

        let out = sub.render(None::<fn(&[Segment<'_, Bold>]) -> Bold>);
        assert_eq!(out, Some(Translation::Text("static text".to_string())));
    }

    #[test]
    fn test_render_rich_without_composer() {
        let values = vec![Arg::rich(Bold("x"))];
        let out = substitute("{0}", &values).render(None::<fn(&[Segment<'_, Bold>]) -> Bold>);
        assert_eq!(out, None);
    }

    #[test]
    fn test_segment_as_rich() {
        let values = vec![Arg::rich(Bold("b")), Arg::from("s")];
        let sub = substitute("{0}{1}", &values);
        let rich: Vec<_> = sub.segments().iter().filter_map(Segment::as_rich).collect();
        assert_eq!(rich, vec![&Bold("b")]);
    }

    #[test]
    fn test_translation_helpers() {
        let text: Translation<Bold> = Translation::Text("t".into());
        assert_eq!(text.as_text(), Some("t"));
        assert!(!text.is_rich());
        assert_eq!(Translation::<Bold>::default().into_text(), Some(String::new()));
        assert_eq!(Translation::Rich(Bold("r")).into_rich(), Some(Bold("r")));
    }
}
