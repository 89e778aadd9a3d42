/*!

Canonical string conversion, `Debug`, and the format-specifier grammar
(§6): `[[fill]align][sign][0][min_width][,][.precision][type]`,
`type ∈ {f,F,n,%}`.

Rust's own `{:...}` mini-language (accessible on a [`core::fmt::Formatter`]
via `.fill()`/`.align()`/`.width()`/`.precision()`/`.sign_plus()`) already
covers fill/align/sign/width/precision, so [`Decimal`]'s [`core::fmt::Display`]
impl is built directly on those — no parsing needed for ordinary
`format!("{d:>10.2}")` usage. What Rust's mini-language does *not* have is
this spec's thousands-group flag (`,`) or its locale (`n`) / percent (`%`)
type characters, so [`Decimal::format`] additionally accepts the literal
textual grammar above as a standalone method, the way the C original's
`format_spec_t` parser does.

*/

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::decimal::Decimal;
use crate::error::{Error, Result};
use crate::rounding;

/// Abstracts the locale-specific parts of `type='n'` formatting (§9 design
/// note: "Locale dependence in formatting... factor the locale lookup
/// behind an abstract `Locale` interface that the test suite can stub").
pub trait Locale {
    /// The character (or short string) placed between digit groups.
    fn thousands_sep(&self) -> &str;
    /// Group sizes, applied right-to-left; an empty slice disables
    /// grouping. `[3]` repeats every three digits (the common case).
    fn grouping(&self) -> &[u8];
    /// The character that separates the integer and fractional parts.
    fn decimal_point(&self) -> char;
}

/// The POSIX/"C" locale: comma-grouped by three, `.` as decimal point —
/// the engine's built-in default, matching the C original's `DFLT_FORMAT`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Posix;

impl Locale for Posix {
    fn thousands_sep(&self) -> &str {
        ","
    }
    fn grouping(&self) -> &[u8] {
        &[3]
    }
    fn decimal_point(&self) -> char {
        '.'
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
    AfterSign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Plain,
    Locale,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignMode {
    OnlyNegative,
    Always,
    SpaceForPositive,
}

struct Spec {
    fill: char,
    align: Align,
    sign: SignMode,
    min_width: usize,
    grouped: bool,
    precision: Option<u32>,
    kind: Kind,
}

impl Default for Spec {
    fn default() -> Self {
        Spec {
            fill: ' ',
            align: Align::Right,
            sign: SignMode::OnlyNegative,
            min_width: 0,
            grouped: false,
            precision: None,
            kind: Kind::Plain,
        }
    }
}

fn parse_spec(fmt: &str) -> Result<Spec> {
    let mut chars: Vec<char> = fmt.chars().collect();
    let mut spec = Spec::default();
    let mut pos = 0usize;
    let mut got_fill = false;

    if chars.len() >= 2 && is_align_char(chars[1]) {
        spec.fill = chars[0];
        spec.align = align_of(chars[1]);
        pos = 2;
        got_fill = true;
    } else if !chars.is_empty() && is_align_char(chars[0]) {
        spec.align = align_of(chars[0]);
        pos = 1;
    }

    if pos < chars.len() {
        match chars[pos] {
            '-' => {
                spec.sign = SignMode::OnlyNegative;
                pos += 1;
            }
            '+' => {
                spec.sign = SignMode::Always;
                pos += 1;
            }
            ' ' => {
                spec.sign = SignMode::SpaceForPositive;
                pos += 1;
            }
            _ => {}
        }
    }

    if pos < chars.len() && chars[pos] == '0' {
        if !got_fill {
            spec.fill = '0';
            spec.align = Align::AfterSign;
        }
        pos += 1;
    }

    if pos < chars.len() && chars[pos].is_ascii_digit() {
        if chars[pos] == '0' {
            return Err(Error::InvalidFormat);
        }
        let start = pos;
        while pos < chars.len() && chars[pos].is_ascii_digit() {
            pos += 1;
        }
        let width_str: String = chars[start..pos].iter().collect();
        spec.min_width = width_str.parse().map_err(|_| Error::InvalidFormat)?;
    }

    if pos < chars.len() && chars[pos] == ',' {
        spec.grouped = true;
        pos += 1;
    }

    if pos < chars.len() && chars[pos] == '.' {
        pos += 1;
        let start = pos;
        if pos >= chars.len() || !chars[pos].is_ascii_digit() {
            return Err(Error::InvalidFormat);
        }
        while pos < chars.len() && chars[pos].is_ascii_digit() {
            pos += 1;
        }
        let prec_str: String = chars[start..pos].iter().collect();
        spec.precision = Some(prec_str.parse().map_err(|_| Error::InvalidFormat)?);
    }

    if pos < chars.len() {
        spec.kind = match chars[pos] {
            'f' | 'F' => Kind::Plain,
            'n' => Kind::Locale,
            '%' => Kind::Percent,
            _ => return Err(Error::InvalidFormat),
        };
        pos += 1;
    }

    if pos != chars.len() {
        return Err(Error::InvalidFormat);
    }

    // no explicit alignment/fill requested and no padding needed.
    if spec.min_width == 0 {
        spec.fill = ' ';
        spec.align = Align::Left;
    }

    chars.clear();
    Ok(spec)
}

fn is_align_char(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '^')
}

fn align_of(c: char) -> Align {
    match c {
        '<' => Align::Left,
        '>' => Align::Right,
        '=' => Align::AfterSign,
        '^' => Align::Center,
        _ => unreachable!(),
    }
}

/// Splits a coefficient's plain decimal digit string into `(int_part,
/// frac_part)` given a declared precision, padding the fractional part
/// with leading zeros when the coefficient has fewer digits than `prec`.
fn split_digits(digits: &str, prec: u32) -> (String, String) {
    let prec = prec as usize;
    if digits.len() > prec {
        let split_at = digits.len() - prec;
        (digits[..split_at].into(), digits[split_at..].into())
    } else {
        let mut frac = String::with_capacity(prec);
        for _ in 0..(prec - digits.len()) {
            frac.push('0');
        }
        frac.push_str(digits);
        (String::from("0"), frac)
    }
}

fn group(int_part: &str, locale: &dyn Locale) -> String {
    let sizes = locale.grouping();
    if sizes.is_empty() || int_part.len() <= sizes[0] as usize {
        return int_part.into();
    }
    let chars: Vec<char> = int_part.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut end = chars.len();
    let mut size_i = 0usize;
    while end > 0 {
        let size = sizes[size_i.min(sizes.len() - 1)] as usize;
        let start = end.saturating_sub(size);
        groups.push(chars[start..end].iter().collect());
        end = start;
        if size_i + 1 < sizes.len() {
            size_i += 1;
        }
    }
    groups.reverse();
    groups.join(locale.thousands_sep())
}

impl Decimal {
    /// The canonical decimal string (§6 "Canonical string"): optional `-`,
    /// digits, optional `.` and exactly `precision()` fractional digits
    /// (trailing zeros preserved), never exponent notation.
    pub fn to_canonical_string(&self) -> String {
        let digits = self.coefficient().to_decimal_digits();
        let (int_part, frac_part) = split_digits(&digits, self.precision());
        let mut s = String::with_capacity(int_part.len() + frac_part.len() + 2);
        if self.signum() < 0 {
            s.push('-');
        }
        s.push_str(&int_part);
        if self.precision() > 0 {
            s.push('.');
            s.push_str(&frac_part);
        }
        s
    }

    /// Formats `self` per the spec's format-specifier grammar (§6), using
    /// the POSIX locale for `type='n'`. See [`Decimal::format_with_locale`]
    /// to supply a different [`Locale`].
    pub fn format(&self, spec: &str) -> Result<String> {
        self.format_with_locale(spec, &Posix)
    }

    /// As [`Decimal::format`], with an explicit [`Locale`] for `type='n'`.
    pub fn format_with_locale(&self, fmt: &str, locale: &dyn Locale) -> Result<String> {
        let spec = parse_spec(fmt)?;

        let value = match spec.kind {
            Kind::Percent => self.checked_mul(&Decimal::from_small(1, 100, 0)?)?,
            _ => self.clone(),
        };
        let value = match spec.precision {
            Some(p) => value.adjust(p, rounding::get_default_rounding())?,
            None => value,
        };

        let digits = value.coefficient().to_decimal_digits();
        let (int_part, frac_part) = split_digits(&digits, value.precision());
        let int_part = if spec.grouped || spec.kind == Kind::Locale {
            group(&int_part, locale)
        } else {
            int_part
        };

        let sign_str = if value.signum() < 0 {
            "-"
        } else {
            match spec.sign {
                SignMode::OnlyNegative => "",
                SignMode::Always => "+",
                SignMode::SpaceForPositive => " ",
            }
        };

        let decimal_point = if spec.kind == Kind::Locale { locale.decimal_point() } else { '.' };

        let mut digits_part = String::new();
        digits_part.push_str(&int_part);
        if value.precision() > 0 {
            digits_part.push(decimal_point);
            digits_part.push_str(&frac_part);
        }
        if spec.kind == Kind::Percent {
            digits_part.push('%');
        }

        Ok(pad(sign_str, &digits_part, &spec))
    }
}

fn pad(sign_str: &str, digits_part: &str, spec: &Spec) -> String {
    let content_len = sign_str.chars().count() + digits_part.chars().count();
    if content_len >= spec.min_width {
        let mut s = String::with_capacity(content_len);
        s.push_str(sign_str);
        s.push_str(digits_part);
        return s;
    }
    let pad_len = spec.min_width - content_len;
    let mut s = String::with_capacity(spec.min_width);
    match spec.align {
        Align::Left => {
            s.push_str(sign_str);
            s.push_str(digits_part);
            for _ in 0..pad_len {
                s.push(spec.fill);
            }
        }
        Align::Right => {
            for _ in 0..pad_len {
                s.push(spec.fill);
            }
            s.push_str(sign_str);
            s.push_str(digits_part);
        }
        Align::AfterSign => {
            s.push_str(sign_str);
            for _ in 0..pad_len {
                s.push(spec.fill);
            }
            s.push_str(digits_part);
        }
        Align::Center => {
            let left = pad_len / 2;
            let right = pad_len - left;
            for _ in 0..left {
                s.push(spec.fill);
            }
            s.push_str(sign_str);
            s.push_str(digits_part);
            for _ in 0..right {
                s.push(spec.fill);
            }
        }
    }
    s
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().map(|p| p as u32).unwrap_or(self.precision());
        let rounded = self.adjust(prec, rounding::get_default_rounding()).map_err(|_| fmt::Error)?;
        let digits = rounded.coefficient().to_decimal_digits();
        let (int_part, frac_part) = split_digits(&digits, rounded.precision());

        let sign_str = if rounded.signum() < 0 {
            "-"
        } else if f.sign_plus() {
            "+"
        } else {
            ""
        };

        let mut body = String::new();
        body.push_str(&int_part);
        if prec > 0 {
            body.push('.');
            body.push_str(&frac_part);
        }

        let content_len = sign_str.len() + body.len();
        match f.width() {
            Some(width) if width > content_len => {
                let pad_len = width - content_len;
                let fill = f.fill();
                match f.align() {
                    Some(fmt::Alignment::Right) | None => {
                        for _ in 0..pad_len {
                            write!(f, "{fill}")?;
                        }
                        write!(f, "{sign_str}{body}")
                    }
                    Some(fmt::Alignment::Left) => {
                        write!(f, "{sign_str}{body}")?;
                        for _ in 0..pad_len {
                            write!(f, "{fill}")?;
                        }
                        Ok(())
                    }
                    Some(fmt::Alignment::Center) => {
                        let left = pad_len / 2;
                        let right = pad_len - left;
                        for _ in 0..left {
                            write!(f, "{fill}")?;
                        }
                        write!(f, "{sign_str}{body}")?;
                        for _ in 0..right {
                            write!(f, "{fill}")?;
                        }
                        Ok(())
                    }
                }
            }
            _ => write!(f, "{sign_str}{body}"),
        }
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.to_canonical_string();
        write!(f, "Decimal({s:?})")
    }
}

#[cfg(test)]
mod tests {
    use crate::parse::parse;
    use alloc::string::ToString;

    #[test]
    fn canonical_string_preserves_trailing_zeros() {
        assert_eq!(parse("1.50").unwrap().to_canonical_string(), "1.50");
        assert_eq!(parse("-0.5").unwrap().to_canonical_string(), "-0.5");
        assert_eq!(parse("7").unwrap().to_canonical_string(), "7");
    }

    #[test]
    fn display_matches_canonical_string() {
        assert_eq!(parse("1.50").unwrap().to_string(), "1.50");
        assert_eq!(parse("-0.5").unwrap().to_string(), "-0.5");
    }

    #[test]
    fn display_honors_rust_width_and_precision() {
        let x = parse("3.1").unwrap();
        assert_eq!(alloc::format!("{x:>8.2}"), "    3.10");
        assert_eq!(alloc::format!("{x:<8.2}"), "3.10    ");
        assert_eq!(alloc::format!("{x:+.2}"), "+3.10");
    }

    #[test]
    fn debug_wraps_constructor_call() {
        assert_eq!(alloc::format!("{:?}", parse("1.50").unwrap()), "Decimal(\"1.50\")");
    }

    #[test]
    fn format_plain_and_width() {
        let x = parse("1234.5").unwrap();
        assert_eq!(x.format("").unwrap(), "1234.5");
        assert_eq!(x.format(".2f").unwrap(), "1234.50");
        assert_eq!(x.format("012.2f").unwrap(), "000001234.50");
        assert_eq!(x.format(">12.2f").unwrap(), "     1234.50");
    }

    #[test]
    fn format_grouping_and_locale() {
        let x = parse("1234567.5").unwrap();
        assert_eq!(x.format(",.2f").unwrap(), "1,234,567.50");
        assert_eq!(x.format("n").unwrap(), "1,234,567.5");
    }

    #[test]
    fn format_percent() {
        let x = parse("0.255").unwrap();
        assert_eq!(x.format("%").unwrap(), "25.500%");
        assert_eq!(x.format(".1%").unwrap(), "25.5%");
    }

    #[test]
    fn format_rejects_malformed_spec() {
        for bad in ["q", ".x", "00", "..2f", "5q"] {
            assert!(parse("1").unwrap().format(bad).is_err(), "expected {bad:?} to fail");
        }
    }

    #[test]
    fn format_accepts_bare_width() {
        assert_eq!(parse("5").unwrap().format("5").unwrap(), "    5");
        assert_eq!(parse("5").unwrap().format("08").unwrap(), "00000005");
    }
}
