//! Relational dependencies (`name [op evr]`) and RPM-style version ordering.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Less,
    LessOrEqual,
    Equal,
    GreaterOrEqual,
    Greater,
}

impl Comparison {
    fn parse(op: &str) -> Option<Self> {
        match op {
            "<" => Some(Self::Less),
            "<=" => Some(Self::LessOrEqual),
            "=" | "==" => Some(Self::Equal),
            ">=" => Some(Self::GreaterOrEqual),
            ">" => Some(Self::Greater),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Equal => "=",
            Self::GreaterOrEqual => ">=",
            Self::Greater => ">",
        }
    }

    /// Whether `ordering` (candidate compared to the bound) satisfies the operator
    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Less => ordering == Ordering::Less,
            Self::LessOrEqual => ordering != Ordering::Greater,
            Self::Equal => ordering == Ordering::Equal,
            Self::GreaterOrEqual => ordering != Ordering::Less,
            Self::Greater => ordering == Ordering::Greater,
        }
    }
}

/// A relational dependency such as `python3.9dist(numpy) >= 1.14.5`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reldep {
    name: String,
    constraint: Option<(Comparison, String)>,
}

impl Reldep {
    /// Parses `name`, or `name op evr` separated by whitespace.
    ///
    /// Anything that does not look like a comparison is kept verbatim as the
    /// name, so rich dependencies degrade to plain names instead of failing.
    pub fn parse(text: &str) -> Self {
        let parts: Vec<&str> = text.split_whitespace().collect();
        if let [name, op, evr] = parts.as_slice() {
            if let Some(cmp) = Comparison::parse(op) {
                return Self {
                    name: name.to_string(),
                    constraint: Some((cmp, evr.to_string())),
                };
            }
        }
        Self {
            name: text.trim().to_string(),
            constraint: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraint(&self) -> Option<(Comparison, &str)> {
        self.constraint.as_ref().map(|(cmp, evr)| (*cmp, evr.as_str()))
    }

    /// Whether a provide (`self` is the requirement) satisfies this requirement.
    ///
    /// An unversioned provide satisfies every version of the name, as RPM does.
    pub fn is_satisfied_by(&self, provide: &Reldep) -> bool {
        if self.name != provide.name {
            return false;
        }
        match (&self.constraint, &provide.constraint) {
            (None, _) | (_, None) => true,
            (Some((cmp, wanted)), Some((_, offered))) => {
                cmp.accepts(compare_evr(offered, wanted))
            }
        }
    }

    /// Whether a concrete `evr` satisfies this requirement's constraint
    pub fn accepts_evr(&self, evr: &str) -> bool {
        match &self.constraint {
            None => true,
            Some((cmp, wanted)) => cmp.accepts(compare_evr(evr, wanted)),
        }
    }
}

impl fmt::Display for Reldep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.constraint {
            Some((cmp, evr)) => write!(f, "{} {} {}", self.name, cmp.as_str(), evr),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Splits `[epoch:]version[-release]` into its parts
fn split_evr(evr: &str) -> (u64, &str, Option<&str>) {
    let (epoch, rest) = match evr.split_once(':') {
        Some((e, rest)) => (e.parse().unwrap_or(0), rest),
        None => (0, evr),
    };
    match rest.rsplit_once('-') {
        Some((version, release)) => (epoch, version, Some(release)),
        None => (epoch, rest, None),
    }
}

/// Compares two `[epoch:]version[-release]` strings.
///
/// A missing release on either side compares equal on the release part, so
/// `= 1.0` matches `1.0-3.fc33`.
pub fn compare_evr(left: &str, right: &str) -> Ordering {
    let (le, lv, lr) = split_evr(left);
    let (re, rv, rr) = split_evr(right);
    le.cmp(&re)
        .then_with(|| compare_version(lv, rv))
        .then_with(|| match (lr, rr) {
            (Some(l), Some(r)) => compare_version(l, r),
            _ => Ordering::Equal,
        })
}

/// Segment-wise version comparison in the style of `rpmvercmp`.
///
/// Numeric segments compare numerically and sort after alphabetic ones;
/// a tilde sorts before everything, including the end of the string.
pub fn compare_version(left: &str, right: &str) -> Ordering {
    let mut l = left.chars().peekable();
    let mut r = right.chars().peekable();

    loop {
        while l.peek().is_some_and(|c| !c.is_ascii_alphanumeric() && *c != '~') {
            l.next();
        }
        while r.peek().is_some_and(|c| !c.is_ascii_alphanumeric() && *c != '~') {
            r.next();
        }

        match (l.peek() == Some(&'~'), r.peek() == Some(&'~')) {
            (true, true) => {
                l.next();
                r.next();
                continue;
            }
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        let (lc, rc) = match (l.peek(), r.peek()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(lc), Some(rc)) => (*lc, *rc),
        };

        let numeric = lc.is_ascii_digit();
        if numeric != rc.is_ascii_digit() {
            return if numeric {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let ls = take_segment(&mut l, numeric);
        let rs = take_segment(&mut r, numeric);

        let ordering = if numeric {
            let lt = ls.trim_start_matches('0');
            let rt = rs.trim_start_matches('0');
            lt.len().cmp(&rt.len()).then_with(|| lt.cmp(rt))
        } else {
            ls.cmp(&rs)
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

fn take_segment(it: &mut Peekable<Chars<'_>>, numeric: bool) -> String {
    let mut segment = String::new();
    while let Some(c) = it.peek() {
        if c.is_ascii_alphanumeric() && c.is_ascii_digit() == numeric {
            segment.push(*c);
            it.next();
        } else {
            break;
        }
    }
    segment
}
