//! Mixed-fraction arithmetic.
//!
//! A [`MixedFraction`] is the triple `(int, num, den)` denoting the value
//! `int + num/den`. The integer part carries the sign; the fractional part
//! is added algebraically, so `(-1, 1, 2)` is `-1/2`. The reduced canonical
//! form has `den >= 1`, `0 <= num < den` and `gcd(num, den) = 1`; the
//! improper form has `int = 0` with the whole value folded into the
//! numerator.
//!
//! All reduction goes through the [`PrimeCache`] GCD so the prime list is
//! shared across every operation of a session.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use crate::error::MathError;
use crate::primes::PrimeCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MixedFraction {
    int: i64,
    num: i64,
    den: i64,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Digits, optionally preceded by a single `-`. The input surface grammar
/// has no unary minus, but evaluation results round-trip through their
/// stringified form and subtraction can go negative.
fn parse_signed(s: &str) -> Option<i64> {
    let body = s.strip_prefix('-').unwrap_or(s);
    if body.is_empty() || !body.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl MixedFraction {
    pub fn new(int: i64, num: i64, den: i64) -> Self {
        debug_assert!(den != 0, "denominator must be non-zero");
        Self { int, num, den }
    }

    pub fn from_integer(int: i64) -> Self {
        Self { int, num: 0, den: 1 }
    }

    pub fn int_part(&self) -> i64 {
        self.int
    }

    pub fn numer(&self) -> i64 {
        self.num
    }

    pub fn denom(&self) -> i64 {
        self.den
    }

    pub fn is_integer(&self) -> bool {
        self.num == 0
    }

    /// Parse the LaTeX mixed-fraction lexeme `integer?\frac{num}{den}`.
    ///
    /// Each of the three groups is a run of word characters that must also
    /// be a machine integer; `\frac{a}{b}` tokenizes as a fraction but has
    /// no value, and fails here.
    pub fn parse_latex(s: &str) -> Option<Self> {
        let frac_at = s.find("\\frac")?;
        let (prefix, rest) = s.split_at(frac_at);
        let rest = &rest["\\frac".len()..];

        let sign_free = prefix.strip_prefix('-').unwrap_or(prefix);
        if !sign_free.chars().all(is_word_char) {
            return None;
        }
        let (num_group, rest) = take_group(rest)?;
        let (den_group, rest) = take_group(rest)?;
        if !rest.is_empty() {
            return None;
        }

        let int = if prefix.is_empty() {
            0
        } else {
            parse_signed(prefix)?
        };
        let num: i64 = if num_group.chars().all(|c| c.is_ascii_digit()) {
            num_group.parse().ok()?
        } else {
            return None;
        };
        let den: i64 = if den_group.chars().all(|c| c.is_ascii_digit()) {
            den_group.parse().ok()?
        } else {
            return None;
        };
        if den == 0 {
            return None;
        }
        Some(Self { int, num, den })
    }

    /// Parse a decimal literal (`digits` or `digits.digits`, optional
    /// leading `-`) into a fraction over a power of ten, reduced.
    pub fn parse_decimal(s: &str, primes: &mut PrimeCache) -> Option<Self> {
        let body = s.strip_prefix('-').unwrap_or(s);
        let (whole, frac) = match body.split_once('.') {
            Some((w, f)) => (w, f),
            None => (body, ""),
        };
        if whole.is_empty()
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }
        if frac.len() > 15 {
            return None;
        }

        let v: f64 = s.parse().ok()?;
        let int = v.floor() as i64;
        let den = 10i64.checked_pow(frac.len() as u32)?;
        let num = ((v - int as f64) * den as f64).round() as i64;
        Some(Self { int, num, den }.reduce(primes))
    }

    /// `parse_latex` with a decimal fallback, the shape every evaluated
    /// literal goes through.
    pub fn parse(s: &str, primes: &mut PrimeCache) -> Option<Self> {
        Self::parse_latex(s).or_else(|| Self::parse_decimal(s, primes))
    }

    /// Canonicalize: fold whole multiples of the denominator into the
    /// integer part (floor semantics, so negative numerators migrate too),
    /// then divide numerator and denominator by their GCD.
    pub fn reduce(self, primes: &mut PrimeCache) -> Self {
        let Self {
            mut int,
            mut num,
            mut den,
        } = self;
        if den < 0 {
            num = -num;
            den = -den;
        }
        if num == 0 {
            return Self { int, num: 0, den: 1 };
        }
        if num >= den || num < 0 {
            let whole = num.div_euclid(den);
            int += whole;
            num -= den * whole;
        }
        if num == 0 {
            return Self { int, num: 0, den: 1 };
        }
        let g = primes.gcd(num, den);
        Self {
            int,
            num: num / g,
            den: den / g,
        }
    }

    /// Fold the integer part into the numerator: `(0, num + int*den, den)`.
    pub fn to_improper(self) -> Self {
        Self {
            int: 0,
            num: self.num + self.int * self.den,
            den: self.den,
        }
    }

    /// Rewrite every fraction over the LCM of all denominators.
    pub fn common_denominator(fracs: &[Self], primes: &mut PrimeCache) -> Vec<Self> {
        let dens: Vec<i64> = fracs.iter().map(|f| f.den).collect();
        let l = primes.lcm_all(&dens);
        fracs
            .iter()
            .map(|f| Self {
                int: f.int,
                num: f.num * (l / f.den),
                den: l,
            })
            .collect()
    }

    /// Addition: common denominator, integer parts and numerators add
    /// pairwise.
    pub fn add(self, other: Self, primes: &mut PrimeCache) -> Self {
        let cd = Self::common_denominator(&[self, other], primes);
        Self {
            int: cd[0].int + cd[1].int,
            num: cd[0].num + cd[1].num,
            den: cd[0].den,
        }
        .reduce(primes)
    }

    /// Subtraction: common denominator, then improper numerators subtract.
    pub fn sub(self, other: Self, primes: &mut PrimeCache) -> Self {
        let cd = Self::common_denominator(&[self, other], primes);
        let a = cd[0].to_improper();
        let b = cd[1].to_improper();
        Self {
            int: 0,
            num: a.num - b.num,
            den: a.den,
        }
        .reduce(primes)
    }

    /// Multiplication on improper forms.
    pub fn mul(self, other: Self, primes: &mut PrimeCache) -> Self {
        let a = self.to_improper();
        let b = other.to_improper();
        Self {
            int: 0,
            num: a.num * b.num,
            den: a.den * b.den,
        }
        .reduce(primes)
    }

    /// Division by cross-multiplication on improper forms.
    pub fn div(self, other: Self, primes: &mut PrimeCache) -> Result<Self, MathError> {
        let a = self.to_improper();
        let b = other.to_improper();
        if b.num == 0 {
            return Err(MathError::DivisionByZero);
        }
        Ok(Self {
            int: 0,
            num: a.num * b.den,
            den: a.den * b.num,
        }
        .reduce(primes))
    }

    /// The exact value `int + num/den` as a [`BigRational`], the
    /// overflow-free domain for value comparison.
    pub fn to_rational(&self) -> BigRational {
        if self.num.is_zero() {
            return BigRational::from_integer(BigInt::from(self.int));
        }
        BigRational::from_integer(BigInt::from(self.int))
            + BigRational::new(BigInt::from(self.num), BigInt::from(self.den))
    }

    /// Terminating decimal rendering of the value, allowing at most
    /// `max_digits` fractional digits; `None` when the expansion does not
    /// terminate within that budget.
    pub fn to_decimal_string(&self, max_digits: u32) -> Option<String> {
        let improper = self.to_improper();
        let (sign, mut num) = if improper.num < 0 {
            ("-", -improper.num)
        } else {
            ("", improper.num)
        };
        let den = improper.den;
        for digits in 0..=max_digits {
            if num % den == 0 {
                let scaled = num / den;
                if digits == 0 {
                    return Some(format!("{sign}{scaled}"));
                }
                let mut text = scaled.to_string();
                let min_len = digits as usize + 1;
                while text.len() < min_len {
                    text.insert(0, '0');
                }
                let split = text.len() - digits as usize;
                return Some(format!("{sign}{}.{}", &text[..split], &text[split..]));
            }
            num = num.checked_mul(10)?;
        }
        None
    }
}

/// Take one `{word}` group off the front of `s`.
fn take_group(s: &str) -> Option<(&str, &str)> {
    let rest = s.strip_prefix('{')?;
    let end = rest.find('}')?;
    let group = &rest[..end];
    if group.is_empty() || !group.chars().all(is_word_char) {
        return None;
    }
    Some((group, &rest[end + 1..]))
}

impl fmt::Display for MixedFraction {
    /// Emits the canonical lexeme: a bare integer when the fractional part
    /// is zero, otherwise `int\frac{num}{den}` with the integer prefix
    /// elided at zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.num == 0 {
            write!(f, "{}", self.int)
        } else if self.int == 0 {
            write!(f, "\\frac{{{}}}{{{}}}", self.num, self.den)
        } else {
            write!(f, "{}\\frac{{{}}}{{{}}}", self.int, self.num, self.den)
        }
    }
}
