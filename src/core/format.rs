// blazestd - core/format.rs
//
// printf-style formatting engine behind `print` and `println`.
//
// A format string is parsed into literal runs and conversion directives,
// then each directive renders one typed runtime `Value`. Directive grammar:
//
//   %[flags][width][.precision][length]conversion
//
//   flags       - + space # 0
//   width       digits or '*'
//   precision   '.' digits or '.*'
//   length      hh h l ll z j t L (accepted and ignored: values are 64-bit)
//   conversion  d i u x X o f F e E g G c s
//
// Padding and float precision are each bounded by MAX_FORMAT_PADDING per
// directive.

use crate::util::constants;
use crate::util::error::FormatError;
use std::fmt;

// ---------------------------------------------------------------------------
// Runtime values
// ---------------------------------------------------------------------------

/// A Blaze runtime value passed to the formatting helpers.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Char(char),
    Str(String),
    Bool(bool),
}

impl Value {
    /// Name of the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

// ---------------------------------------------------------------------------
// Format spec types
// ---------------------------------------------------------------------------

/// Flags parsed from a format directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags {
    pub left_justify: bool, // '-'
    pub force_sign: bool,   // '+'
    pub space_sign: bool,   // ' '
    pub alt_form: bool,     // '#'
    pub zero_pad: bool,     // '0'
}

/// Width specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    None,
    Fixed(usize),
    FromArg, // '*'
}

/// Precision specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    None,
    Fixed(usize),
    FromArg, // '.*'
}

/// A parsed conversion directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pub flags: FormatFlags,
    pub width: Width,
    pub precision: Precision,
    pub conversion: char,
}

/// A piece of a parsed format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text emitted verbatim.
    Literal(&'a str),
    /// A `%%` escape.
    Percent,
    /// A directive consuming one argument (plus any `*` arguments).
    Spec(FormatSpec),
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse one directive starting just after its '%'.
///
/// Returns the spec and the number of bytes consumed, or `None` if the
/// directive is malformed or truncated.
pub fn parse_spec(fmt: &str) -> Option<(FormatSpec, usize)> {
    let bytes = fmt.as_bytes();
    let len = bytes.len();
    let mut pos = 0;

    let mut flags = FormatFlags::default();
    while pos < len {
        match bytes[pos] {
            b'-' => flags.left_justify = true,
            b'+' => flags.force_sign = true,
            b' ' => flags.space_sign = true,
            b'#' => flags.alt_form = true,
            b'0' => flags.zero_pad = true,
            _ => break,
        }
        pos += 1;
    }
    // '+' overrides ' '; '-' overrides '0'.
    if flags.force_sign {
        flags.space_sign = false;
    }
    if flags.left_justify {
        flags.zero_pad = false;
    }

    let width = if pos < len && bytes[pos] == b'*' {
        pos += 1;
        Width::FromArg
    } else {
        let start = pos;
        while pos < len && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos > start {
            Width::Fixed(parse_decimal(&bytes[start..pos]))
        } else {
            Width::None
        }
    };

    let precision = if pos < len && bytes[pos] == b'.' {
        pos += 1;
        if pos < len && bytes[pos] == b'*' {
            pos += 1;
            Precision::FromArg
        } else {
            let start = pos;
            while pos < len && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            Precision::Fixed(parse_decimal(&bytes[start..pos]))
        }
    } else {
        Precision::None
    };

    // Length modifiers are accepted for C compatibility and otherwise ignored.
    while pos < len && matches!(bytes[pos], b'h' | b'l' | b'z' | b'j' | b't' | b'L') {
        pos += 1;
    }

    let conversion = *bytes.get(pos)?;
    match conversion {
        b'd' | b'i' | b'u' | b'x' | b'X' | b'o' | b'f' | b'F' | b'e' | b'E' | b'g' | b'G'
        | b'c' | b's' => {}
        _ => return None,
    }

    Some((
        FormatSpec {
            flags,
            width,
            precision,
            conversion: conversion as char,
        },
        pos + 1,
    ))
}

/// Split a format string into literal runs, `%%` escapes, and directives.
///
/// A trailing lone '%' or a malformed directive is kept as a literal '%'
/// and scanning resumes right after it.
pub fn parse_format(fmt: &str) -> Vec<Segment<'_>> {
    let bytes = fmt.as_bytes();
    let len = bytes.len();
    let mut segments = Vec::new();
    let mut pos = 0;

    while pos < len {
        let start = pos;
        while pos < len && bytes[pos] != b'%' {
            pos += 1;
        }
        if pos > start {
            segments.push(Segment::Literal(&fmt[start..pos]));
        }
        if pos >= len {
            break;
        }
        // Skip the '%'.
        pos += 1;
        if pos < len && bytes[pos] == b'%' {
            segments.push(Segment::Percent);
            pos += 1;
            continue;
        }
        match parse_spec(&fmt[pos..]) {
            Some((spec, consumed)) => {
                segments.push(Segment::Spec(spec));
                pos += consumed;
            }
            None => segments.push(Segment::Literal(&fmt[pos - 1..pos])),
        }
    }
    segments
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render `fmt` with `args`.
///
/// Arguments are consumed left to right; `*` width and precision each
/// take an `Int` before the directive's own argument. Surplus arguments
/// are ignored.
pub fn format(fmt: &str, args: &[Value]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(fmt.len());
    let mut next = 0;

    for segment in parse_format(fmt) {
        match segment {
            Segment::Literal(s) => out.push_str(s),
            Segment::Percent => out.push('%'),
            Segment::Spec(mut spec) => {
                if spec.width == Width::FromArg {
                    let w = take_int(args, &mut next)?;
                    if w < 0 {
                        spec.flags.left_justify = true;
                        spec.flags.zero_pad = false;
                    }
                    spec.width = Width::Fixed(usize::try_from(w.unsigned_abs()).unwrap_or(usize::MAX));
                }
                if spec.precision == Precision::FromArg {
                    let p = take_int(args, &mut next)?;
                    // A negative precision is taken as if it were omitted.
                    spec.precision = match usize::try_from(p) {
                        Ok(p) => Precision::Fixed(p),
                        Err(_) => Precision::None,
                    };
                }
                let index = next;
                let arg = args
                    .get(index)
                    .ok_or(FormatError::MissingArgument { index })?;
                next += 1;
                render(&spec, index, arg, &mut out)?;
            }
        }
    }
    Ok(out)
}

fn take_int(args: &[Value], next: &mut usize) -> Result<i64, FormatError> {
    let index = *next;
    *next += 1;
    match args.get(index) {
        Some(Value::Int(v)) => Ok(*v),
        Some(other) => Err(FormatError::TypeMismatch {
            index,
            conversion: '*',
            found: other.type_name(),
        }),
        None => Err(FormatError::MissingArgument { index }),
    }
}

fn render(spec: &FormatSpec, index: usize, arg: &Value, out: &mut String) -> Result<(), FormatError> {
    let mismatch = || FormatError::TypeMismatch {
        index,
        conversion: spec.conversion,
        found: arg.type_name(),
    };

    match spec.conversion {
        'd' | 'i' => {
            let v = match arg {
                Value::Int(v) => *v,
                Value::Char(c) => i64::from(u32::from(*c)),
                Value::Bool(b) => i64::from(*b),
                _ => return Err(mismatch()),
            };
            format_signed(v, spec, out);
        }
        'u' | 'x' | 'X' | 'o' => {
            let v = match arg {
                // Negative values are reinterpreted as 64-bit two's complement.
                Value::Int(v) => *v as u64,
                Value::Char(c) => u64::from(u32::from(*c)),
                Value::Bool(b) => u64::from(*b),
                _ => return Err(mismatch()),
            };
            format_unsigned(v, spec, out);
        }
        'f' | 'F' | 'e' | 'E' | 'g' | 'G' => {
            let v = match arg {
                Value::Float(v) => *v,
                Value::Int(v) => *v as f64,
                _ => return Err(mismatch()),
            };
            format_float(v, spec, out);
        }
        'c' => {
            let c = match arg {
                Value::Char(c) => *c,
                Value::Int(v) => u32::try_from(*v)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(mismatch)?,
                _ => return Err(mismatch()),
            };
            format_char(c, spec, out);
        }
        's' => match arg {
            Value::Str(s) => format_str(s, spec, out),
            other => format_str(&other.to_string(), spec, out),
        },
        // parse_spec only admits the conversions above.
        _ => return Err(mismatch()),
    }
    Ok(())
}

/// Render a signed integer according to `spec`.
pub fn format_signed(value: i64, spec: &FormatSpec, out: &mut String) {
    let digits = value.unsigned_abs().to_string();
    let sign = if value < 0 { Some('-') } else { sign_for(spec) };
    emit_integer(spec, sign, "", &digits, out);
}

/// Render an unsigned integer in the base selected by the conversion.
pub fn format_unsigned(value: u64, spec: &FormatSpec, out: &mut String) {
    let digits = match spec.conversion {
        'x' => format!("{value:x}"),
        'X' => format!("{value:X}"),
        'o' => format!("{value:o}"),
        _ => value.to_string(),
    };
    let prefix = match spec.conversion {
        'x' if spec.flags.alt_form && value != 0 => "0x",
        'X' if spec.flags.alt_form && value != 0 => "0X",
        _ => "",
    };
    emit_integer(spec, None, prefix, &digits, out);
}

/// Render a float for `%f`, `%e` and `%g` (and their uppercase forms).
pub fn format_float(value: f64, spec: &FormatSpec, out: &mut String) {
    let upper = spec.conversion.is_ascii_uppercase();
    let precision = match spec.precision {
        Precision::Fixed(p) => p.min(constants::MAX_FORMAT_PADDING),
        _ => constants::DEFAULT_FLOAT_PRECISION,
    };
    let sign = if value.is_sign_negative() {
        Some('-')
    } else {
        sign_for(spec)
    };

    if value.is_nan() {
        let body = if upper { "NAN" } else { "nan" };
        emit(spec, sign, "", body, false, out);
        return;
    }

    let abs = value.abs();

    if abs.is_infinite() {
        let body = if upper { "INF" } else { "inf" };
        emit(spec, sign, "", body, false, out);
        return;
    }

    let alt = spec.flags.alt_form;
    let body = match spec.conversion.to_ascii_lowercase() {
        'e' => format_e(abs, precision, upper, alt),
        'g' => format_g(abs, precision, upper, alt),
        _ => format_f(abs, precision, alt),
    };
    let zero_pad = spec.flags.zero_pad && !spec.flags.left_justify;
    emit(spec, sign, "", &body, zero_pad, out);
}

/// Render a string; precision truncates to that many characters.
pub fn format_str(s: &str, spec: &FormatSpec, out: &mut String) {
    let body = match spec.precision {
        Precision::Fixed(p) => match s.char_indices().nth(p) {
            Some((cut, _)) => &s[..cut],
            None => s,
        },
        _ => s,
    };
    emit(spec, None, "", body, false, out);
}

/// Render a single character.
pub fn format_char(c: char, spec: &FormatSpec, out: &mut String) {
    let mut buf = [0u8; 4];
    emit(spec, None, "", c.encode_utf8(&mut buf), false, out);
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn parse_decimal(digits: &[u8]) -> usize {
    digits.iter().fold(0_usize, |acc, d| {
        acc.saturating_mul(10).saturating_add(usize::from(d - b'0'))
    })
}

fn sign_for(spec: &FormatSpec) -> Option<char> {
    if spec.flags.force_sign {
        Some('+')
    } else if spec.flags.space_sign {
        Some(' ')
    } else {
        None
    }
}

/// Apply integer precision (minimum digit count) and the octal `#` rule.
fn emit_integer(spec: &FormatSpec, sign: Option<char>, prefix: &str, digits: &str, out: &mut String) {
    let precision = match spec.precision {
        Precision::Fixed(p) => Some(p),
        _ => None,
    };
    // Precision 0 with value 0 prints no digits at all.
    let digits = if digits == "0" && precision == Some(0) {
        ""
    } else {
        digits
    };
    let mut zeros = precision.unwrap_or(1).saturating_sub(digits.len());
    if spec.conversion == 'o' && spec.flags.alt_form && zeros == 0 && !digits.starts_with('0') {
        zeros = 1;
    }

    let mut body = String::with_capacity(zeros + digits.len());
    push_repeated(&mut body, '0', zeros);
    body.push_str(digits);

    // An explicit precision disables the '0' flag for integers.
    let zero_pad = spec.flags.zero_pad && !spec.flags.left_justify && precision.is_none();
    emit(spec, sign, prefix, &body, zero_pad, out);
}

/// Lay out `sign prefix body` inside the field width.
fn emit(
    spec: &FormatSpec,
    sign: Option<char>,
    prefix: &str,
    body: &str,
    zero_pad: bool,
    out: &mut String,
) {
    let width = match spec.width {
        Width::Fixed(w) => w,
        _ => 0,
    };
    let content = usize::from(sign.is_some()) + prefix.chars().count() + body.chars().count();
    let pad = width.saturating_sub(content);

    if !spec.flags.left_justify && !zero_pad {
        push_repeated(out, ' ', pad);
    }
    if let Some(s) = sign {
        out.push(s);
    }
    out.push_str(prefix);
    if zero_pad {
        push_repeated(out, '0', pad);
    }
    out.push_str(body);
    if spec.flags.left_justify {
        push_repeated(out, ' ', pad);
    }
}

fn push_repeated(out: &mut String, c: char, count: usize) {
    out.extend(std::iter::repeat(c).take(count.min(constants::MAX_FORMAT_PADDING)));
}

/// `%f`: fixed-point decimal.
fn format_f(value: f64, precision: usize, alt_form: bool) -> String {
    let mut s = format!("{value:.precision$}");
    if alt_form && precision == 0 {
        s.push('.');
    }
    s
}

/// `%e`: scientific notation with a signed, at-least-two-digit exponent.
fn format_e(value: f64, precision: usize, uppercase: bool, alt_form: bool) -> String {
    let (mut mantissa, exp) = split_exp(value, precision);
    if alt_form && precision == 0 {
        mantissa.push('.');
    }
    let e_char = if uppercase { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}{e_char}{sign}{:02}", exp.unsigned_abs())
}

/// `%g`: `%e` when the exponent is below -4 or at least the precision,
/// `%f` otherwise; trailing zeros are removed unless `#` is set.
fn format_g(value: f64, precision: usize, uppercase: bool, alt_form: bool) -> String {
    let p = precision.max(1);
    let (_, exp) = split_exp(value, p - 1);

    if exp >= -4 && exp < p as i32 {
        let frac_digits = usize::try_from(p as i32 - 1 - exp).unwrap_or(0);
        let mut s = format_f(value, frac_digits, alt_form);
        if !alt_form {
            strip_trailing_zeros(&mut s);
        }
        s
    } else {
        let s = format_e(value, p - 1, uppercase, alt_form);
        if alt_form {
            return s;
        }
        match s.find(['e', 'E']) {
            Some(e_pos) => {
                let mut mantissa = s[..e_pos].to_string();
                strip_trailing_zeros(&mut mantissa);
                format!("{mantissa}{}", &s[e_pos..])
            }
            None => s,
        }
    }
}

/// Mantissa text and decimal exponent of `value` rounded to `precision`
/// fractional mantissa digits.
fn split_exp(value: f64, precision: usize) -> (String, i32) {
    let s = format!("{value:.precision$e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => (mantissa.to_string(), exp.parse().unwrap_or(0)),
        None => (s, 0),
    }
}

/// Remove trailing zeros after the decimal point, and the point itself.
fn strip_trailing_zeros(s: &mut String) {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(f: &str, args: &[Value]) -> String {
        format(f, args).unwrap()
    }

    #[test]
    fn test_parse_simple_int() {
        let (spec, consumed) = parse_spec("d").unwrap();
        assert_eq!(consumed, 1);
        assert_eq!(spec.conversion, 'd');
        assert_eq!(spec.width, Width::None);
        assert_eq!(spec.precision, Precision::None);
    }

    #[test]
    fn test_parse_width_precision_length() {
        let (spec, consumed) = parse_spec("10.5lf").unwrap();
        assert_eq!(consumed, 6);
        assert_eq!(spec.conversion, 'f');
        assert_eq!(spec.width, Width::Fixed(10));
        assert_eq!(spec.precision, Precision::Fixed(5));
    }

    #[test]
    fn test_parse_flags_overrides() {
        let (spec, _) = parse_spec("-+ #010d").unwrap();
        assert!(spec.flags.left_justify);
        assert!(spec.flags.force_sign);
        assert!(spec.flags.alt_form);
        assert!(!spec.flags.space_sign);
        assert!(!spec.flags.zero_pad);
    }

    #[test]
    fn test_parse_rejects_unknown_conversion() {
        assert!(parse_spec("q").is_none());
        assert!(parse_spec("5").is_none());
    }

    #[test]
    fn test_parse_format_segments() {
        let segments = parse_format("hello %d world %s!");
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0], Segment::Literal("hello "));
        assert!(matches!(&segments[1], Segment::Spec(s) if s.conversion == 'd'));
        assert_eq!(segments[2], Segment::Literal(" world "));
        assert!(matches!(&segments[3], Segment::Spec(s) if s.conversion == 's'));
        assert_eq!(segments[4], Segment::Literal("!"));
    }

    #[test]
    fn test_percent_escape_and_stray_percent() {
        assert_eq!(fmt("100%%", &[]), "100%");
        assert_eq!(fmt("50%", &[]), "50%");
        assert_eq!(fmt("%q", &[]), "%q");
    }

    #[test]
    fn test_integers() {
        assert_eq!(fmt("%d apples", &[Value::Int(3)]), "3 apples");
        assert_eq!(
            fmt("%5d|%-5d|%05d", &[Value::Int(42), Value::Int(42), Value::Int(42)]),
            "   42|42   |00042"
        );
        assert_eq!(fmt("%+d|% d", &[Value::Int(5), Value::Int(5)]), "+5| 5");
        assert_eq!(fmt("%.3d|%08.3d", &[Value::Int(7), Value::Int(7)]), "007|     007");
        assert_eq!(fmt("%-08d|", &[Value::Int(42)]), "42      |");
        assert_eq!(fmt("%05d", &[Value::Int(-42)]), "-0042");
        assert_eq!(fmt("[%.0d]", &[Value::Int(0)]), "[]");
        assert_eq!(fmt("%ld %lld %hhd", &[Value::Int(1), Value::Int(2), Value::Int(3)]), "1 2 3");
    }

    #[test]
    fn test_unsigned_bases() {
        assert_eq!(
            fmt(
                "%x %X %#x %o %#o %#x",
                &[Value::Int(255), Value::Int(255), Value::Int(255), Value::Int(8), Value::Int(8), Value::Int(0)]
            ),
            "ff FF 0xff 10 010 0"
        );
        assert_eq!(fmt("%u", &[Value::Int(-1)]), "18446744073709551615");
        assert_eq!(fmt("%#06x", &[Value::Int(255)]), "0x00ff");
    }

    #[test]
    fn test_fixed_floats() {
        assert_eq!(fmt("%f", &[Value::Float(1.5)]), "1.500000");
        assert_eq!(fmt("%.2f", &[Value::Float(3.14159)]), "3.14");
        assert_eq!(fmt("%8.3f", &[Value::Float(-2.5)]), "  -2.500");
        assert_eq!(fmt("%08.2f", &[Value::Float(-2.5)]), "-0002.50");
        assert_eq!(fmt("%#.0f", &[Value::Float(3.0)]), "3.");
        assert_eq!(fmt("%.1f", &[Value::Int(4)]), "4.0");
    }

    #[test]
    fn test_exponent_floats() {
        assert_eq!(fmt("%e", &[Value::Float(12345.678)]), "1.234568e+04");
        assert_eq!(fmt("%E", &[Value::Float(0.00012)]), "1.200000E-04");
        assert_eq!(fmt("%+.1e", &[Value::Float(0.0)]), "+0.0e+00");
    }

    #[test]
    fn test_general_floats() {
        assert_eq!(fmt("%g", &[Value::Float(100000.0)]), "100000");
        assert_eq!(fmt("%g", &[Value::Float(1000000.0)]), "1e+06");
        assert_eq!(fmt("%g", &[Value::Float(0.0001)]), "0.0001");
        assert_eq!(fmt("%g", &[Value::Float(0.00001)]), "1e-05");
        assert_eq!(fmt("%.3g", &[Value::Float(3.14159)]), "3.14");
        assert_eq!(fmt("%g", &[Value::Float(0.0)]), "0");
    }

    #[test]
    fn test_special_floats() {
        assert_eq!(fmt("%f", &[f64::INFINITY.into()]), "inf");
        assert_eq!(fmt("%F", &[f64::NEG_INFINITY.into()]), "-INF");
        assert_eq!(fmt("%5.1f", &[f64::NAN.into()]), "  nan");
        assert_eq!(fmt("%05f", &[f64::INFINITY.into()]), "  inf");
    }

    #[test]
    fn test_chars_and_strings() {
        assert_eq!(fmt("%c%c", &['h'.into(), Value::Int(105)]), "hi");
        assert_eq!(
            fmt(
                "%s|%5s|%-5s|%.2s",
                &["abc".into(), "ab".into(), "ab".into(), "abcdef".into()]
            ),
            "abc|   ab|ab   |ab"
        );
        assert_eq!(fmt("%.2s", &["héllo".into()]), "hé");
        assert_eq!(fmt("%3c|", &['é'.into()]), "  é|");
    }

    #[test]
    fn test_string_conversion_accepts_any_value() {
        assert_eq!(
            fmt("%s %s %s", &[true.into(), Value::Float(2.5), Value::Int(7)]),
            "true 2.5 7"
        );
    }

    #[test]
    fn test_star_width_and_precision() {
        assert_eq!(fmt("%*d", &[Value::Int(4), Value::Int(7)]), "   7");
        assert_eq!(fmt("%*d|", &[Value::Int(-4), Value::Int(7)]), "7   |");
        assert_eq!(fmt("%.*f", &[Value::Int(1), Value::Float(3.14159)]), "3.1");
    }

    #[test]
    fn test_extra_arguments_ignored() {
        assert_eq!(fmt("%d", &[Value::Int(1), Value::Int(2)]), "1");
    }

    #[test]
    fn test_missing_argument() {
        assert_eq!(
            format("%d and %d", &[Value::Int(1)]),
            Err(FormatError::MissingArgument { index: 1 })
        );
    }

    #[test]
    fn test_type_mismatch() {
        assert_eq!(
            format("%d", &["seven".into()]),
            Err(FormatError::TypeMismatch {
                index: 0,
                conversion: 'd',
                found: "string",
            })
        );
        assert!(format("%c", &[Value::Int(-1)]).is_err());
        assert!(format("%*d", &["x".into(), Value::Int(1)]).is_err());
    }

    #[test]
    fn test_padding_is_bounded() {
        let s = fmt("%999999d", &[Value::Int(1)]);
        assert_eq!(s.len(), constants::MAX_FORMAT_PADDING + 1);
    }

    #[test]
    fn test_float_precision_is_bounded() {
        let cap = constants::MAX_FORMAT_PADDING;
        assert_eq!(fmt("%.70000f", &[Value::Float(1.0)]).len(), cap + 2);
        assert_eq!(fmt("%.99999999999999999999g", &[Value::Float(1.0)]), "1");

        let e = fmt("%.*e", &[Value::Int(1_000_000), Value::Float(2.5)]);
        assert_eq!(e.len(), cap + 6);
        assert!(e.starts_with("2.5000"));
        assert!(e.ends_with("e+00"));
    }

    #[test]
    fn test_negative_nan_keeps_sign() {
        let neg_nan = f64::from_bits(0xfff8_0000_0000_0000);
        let pos_nan = f64::from_bits(0x7ff8_0000_0000_0000);
        assert_eq!(fmt("%f", &[Value::Float(neg_nan)]), "-nan");
        assert_eq!(fmt("%E", &[Value::Float(neg_nan)]), "-NAN");
        assert_eq!(fmt("%+f", &[Value::Float(pos_nan)]), "+nan");
    }
}
