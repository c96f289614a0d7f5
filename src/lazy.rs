//! Lazily translated strings.
//!
//! A [`LazyString`] stores what to translate, never the translation. Every
//! read (formatting, comparing, measuring, case conversion, splitting, ...)
//! translates again against the translator's active locale at that moment,
//! then applies the matching `str` operation to the fresh text. Operations
//! that borrow from the string on `str` return owned values here.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Add;
use std::slice::SliceIndex;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::interpolate::Params;
use crate::translator::Translator;

/// What a [`LazyString`] searches for: the pattern kinds `str` methods accept.
pub enum StrPattern<'p> {
    Str(&'p str),
    Char(char),
    Chars(Vec<char>),
    Fn(Box<dyn FnMut(char) -> bool + 'p>),
}

/// Anything usable as a search pattern on [`LazyString`]: `&str`, `&String`,
/// `char`, a slice or array of chars, or a `FnMut(char) -> bool`.
///
/// Closures need their argument type spelled out (`|c: char| c == 'o'`);
/// function paths such as `char::is_whitespace` work as they are.
pub trait IntoStrPattern<'p> {
    fn into_pattern(self) -> StrPattern<'p>;
}

impl<'p> IntoStrPattern<'p> for &'p str {
    fn into_pattern(self) -> StrPattern<'p> {
        StrPattern::Str(self)
    }
}

impl<'p> IntoStrPattern<'p> for &'p String {
    fn into_pattern(self) -> StrPattern<'p> {
        StrPattern::Str(self.as_str())
    }
}

impl<'p> IntoStrPattern<'p> for char {
    fn into_pattern(self) -> StrPattern<'p> {
        StrPattern::Char(self)
    }
}

impl<'p> IntoStrPattern<'p> for &'p [char] {
    fn into_pattern(self) -> StrPattern<'p> {
        StrPattern::Chars(self.to_vec())
    }
}

impl<'p, const N: usize> IntoStrPattern<'p> for [char; N] {
    fn into_pattern(self) -> StrPattern<'p> {
        StrPattern::Chars(self.to_vec())
    }
}

impl<'p, const N: usize> IntoStrPattern<'p> for &'p [char; N] {
    fn into_pattern(self) -> StrPattern<'p> {
        StrPattern::Chars(self.to_vec())
    }
}

impl<'p, F> IntoStrPattern<'p> for F
where
    F: FnMut(char) -> bool + 'p,
{
    fn into_pattern(self) -> StrPattern<'p> {
        StrPattern::Fn(Box::new(self))
    }
}

// Runs `$body` with `$p` bound to a concrete `str` pattern
macro_rules! with_pattern {
    ($pattern:expr, $p:ident => $body:expr) => {
        match $pattern.into_pattern() {
            StrPattern::Str($p) => $body,
            StrPattern::Char($p) => $body,
            StrPattern::Chars(chars) => {
                let $p = chars.as_slice();
                $body
            }
            StrPattern::Fn($p) => $body,
        }
    };
}

#[derive(Clone)]
struct PluralSource {
    plural: String,
    n: u64,
}

#[derive(Clone)]
pub struct LazyString {
    translator: Translator,
    message: String,
    plural: Option<PluralSource>,
    params: Params,
}

impl LazyString {
    pub fn new(translator: &Translator, message: &str) -> Self {
        LazyString::with_params(translator, message, Params::new())
    }

    pub fn with_params(translator: &Translator, message: &str, params: Params) -> Self {
        LazyString {
            translator: translator.clone(),
            message: message.to_string(),
            plural: None,
            params,
        }
    }

    pub fn plural(
        translator: &Translator,
        singular: &str,
        plural: &str,
        n: u64,
        params: Params,
    ) -> Self {
        LazyString {
            translator: translator.clone(),
            message: singular.to_string(),
            plural: Some(PluralSource {
                plural: plural.to_string(),
                n,
            }),
            params,
        }
    }

    /// The source message this string translates.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Translate now.
    pub fn resolve(&self) -> String {
        match &self.plural {
            Some(source) => self.translator.ngettext_with(
                &self.message,
                &source.plural,
                source.n,
                &self.params,
            ),
            None => self.translator.gettext_with(&self.message, &self.params),
        }
    }

    /// Translate now and hand the text to `f`.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(&self.resolve())
    }

    /// Length in bytes of the current translation.
    pub fn len(&self) -> usize {
        self.with_str(str::len)
    }

    pub fn is_empty(&self) -> bool {
        self.with_str(str::is_empty)
    }

    pub fn is_ascii(&self) -> bool {
        self.with_str(str::is_ascii)
    }

    pub fn is_char_boundary(&self, index: usize) -> bool {
        self.with_str(|s| s.is_char_boundary(index))
    }

    /// Number of chars of the current translation.
    pub fn chars_count(&self) -> usize {
        self.with_str(|s| s.chars().count())
    }

    pub fn chars(&self) -> Vec<char> {
        self.with_str(|s| s.chars().collect())
    }

    pub fn char_indices(&self) -> Vec<(usize, char)> {
        self.with_str(|s| s.char_indices().collect())
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.resolve().into_bytes()
    }

    pub fn encode_utf16(&self) -> Vec<u16> {
        self.with_str(|s| s.encode_utf16().collect())
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.with_str(|s| s.chars().nth(index))
    }

    /// Chars `start..end` of the current translation, clamped to its length.
    pub fn substring(&self, start: usize, end: usize) -> String {
        self.with_str(|s| {
            s.chars()
                .skip(start)
                .take(end.saturating_sub(start))
                .collect()
        })
    }

    /// Byte range of the current translation, `None` off a char boundary.
    pub fn get<I>(&self, index: I) -> Option<String>
    where
        I: SliceIndex<str, Output = str>,
    {
        self.with_str(|s| s.get(index).map(str::to_string))
    }

    pub fn split_at_checked(&self, mid: usize) -> Option<(String, String)> {
        self.with_str(|s| {
            s.split_at_checked(mid)
                .map(|(head, tail)| (head.to_string(), tail.to_string()))
        })
    }

    pub fn parse<F: FromStr>(&self) -> Result<F, F::Err> {
        self.resolve().parse()
    }

    pub fn to_lowercase(&self) -> String {
        self.with_str(str::to_lowercase)
    }

    pub fn to_uppercase(&self) -> String {
        self.with_str(str::to_uppercase)
    }

    pub fn to_ascii_lowercase(&self) -> String {
        self.with_str(str::to_ascii_lowercase)
    }

    pub fn to_ascii_uppercase(&self) -> String {
        self.with_str(str::to_ascii_uppercase)
    }

    pub fn escape_debug(&self) -> String {
        self.with_str(|s| s.escape_debug().to_string())
    }

    pub fn escape_default(&self) -> String {
        self.with_str(|s| s.escape_default().to_string())
    }

    pub fn escape_unicode(&self) -> String {
        self.with_str(|s| s.escape_unicode().to_string())
    }

    pub fn trim(&self) -> String {
        self.with_str(|s| s.trim().to_string())
    }

    pub fn trim_start(&self) -> String {
        self.with_str(|s| s.trim_start().to_string())
    }

    pub fn trim_end(&self) -> String {
        self.with_str(|s| s.trim_end().to_string())
    }

    pub fn trim_ascii(&self) -> String {
        self.with_str(|s| s.trim_ascii().to_string())
    }

    pub fn trim_matches<'p>(&self, pattern: impl IntoStrPattern<'p>) -> String {
        let text = self.resolve();
        match pattern.into_pattern() {
            // Substring search only runs one direction at a time
            StrPattern::Str(p) => text.trim_start_matches(p).trim_end_matches(p).to_string(),
            StrPattern::Char(p) => text.trim_matches(p).to_string(),
            StrPattern::Chars(chars) => text.trim_matches(chars.as_slice()).to_string(),
            StrPattern::Fn(p) => text.trim_matches(p).to_string(),
        }
    }

    pub fn trim_start_matches<'p>(&self, pattern: impl IntoStrPattern<'p>) -> String {
        let text = self.resolve();
        with_pattern!(pattern, p => text.trim_start_matches(p).to_string())
    }

    pub fn trim_end_matches<'p>(&self, pattern: impl IntoStrPattern<'p>) -> String {
        let text = self.resolve();
        with_pattern!(pattern, p => text.trim_end_matches(p).to_string())
    }

    pub fn strip_prefix<'p>(&self, prefix: impl IntoStrPattern<'p>) -> Option<String> {
        let text = self.resolve();
        with_pattern!(prefix, p => text.strip_prefix(p).map(str::to_string))
    }

    pub fn strip_suffix<'p>(&self, suffix: impl IntoStrPattern<'p>) -> Option<String> {
        let text = self.resolve();
        with_pattern!(suffix, p => text.strip_suffix(p).map(str::to_string))
    }

    pub fn split<'p>(&self, pattern: impl IntoStrPattern<'p>) -> Vec<String> {
        let text = self.resolve();
        with_pattern!(pattern, p => text.split(p).map(str::to_string).collect())
    }

    pub fn rsplit<'p>(&self, pattern: impl IntoStrPattern<'p>) -> Vec<String> {
        let text = self.resolve();
        with_pattern!(pattern, p => text.rsplit(p).map(str::to_string).collect())
    }

    pub fn splitn<'p>(&self, n: usize, pattern: impl IntoStrPattern<'p>) -> Vec<String> {
        let text = self.resolve();
        with_pattern!(pattern, p => text.splitn(n, p).map(str::to_string).collect())
    }

    pub fn rsplitn<'p>(&self, n: usize, pattern: impl IntoStrPattern<'p>) -> Vec<String> {
        let text = self.resolve();
        with_pattern!(pattern, p => text.rsplitn(n, p).map(str::to_string).collect())
    }

    pub fn split_terminator<'p>(&self, pattern: impl IntoStrPattern<'p>) -> Vec<String> {
        let text = self.resolve();
        with_pattern!(pattern, p => text.split_terminator(p).map(str::to_string).collect())
    }

    pub fn rsplit_terminator<'p>(&self, pattern: impl IntoStrPattern<'p>) -> Vec<String> {
        let text = self.resolve();
        with_pattern!(pattern, p => text.rsplit_terminator(p).map(str::to_string).collect())
    }

    pub fn split_inclusive<'p>(&self, pattern: impl IntoStrPattern<'p>) -> Vec<String> {
        let text = self.resolve();
        with_pattern!(pattern, p => text.split_inclusive(p).map(str::to_string).collect())
    }

    pub fn split_once<'p>(&self, delimiter: impl IntoStrPattern<'p>) -> Option<(String, String)> {
        let text = self.resolve();
        with_pattern!(delimiter, p => text
            .split_once(p)
            .map(|(head, tail)| (head.to_string(), tail.to_string())))
    }

    pub fn rsplit_once<'p>(&self, delimiter: impl IntoStrPattern<'p>) -> Option<(String, String)> {
        let text = self.resolve();
        with_pattern!(delimiter, p => text
            .rsplit_once(p)
            .map(|(head, tail)| (head.to_string(), tail.to_string())))
    }

    pub fn split_whitespace(&self) -> Vec<String> {
        self.with_str(|s| s.split_whitespace().map(str::to_string).collect())
    }

    pub fn split_ascii_whitespace(&self) -> Vec<String> {
        self.with_str(|s| s.split_ascii_whitespace().map(str::to_string).collect())
    }

    pub fn lines(&self) -> Vec<String> {
        self.with_str(|s| s.lines().map(str::to_string).collect())
    }

    pub fn matches<'p>(&self, pattern: impl IntoStrPattern<'p>) -> Vec<String> {
        let text = self.resolve();
        with_pattern!(pattern, p => text.matches(p).map(str::to_string).collect())
    }

    pub fn rmatches<'p>(&self, pattern: impl IntoStrPattern<'p>) -> Vec<String> {
        let text = self.resolve();
        with_pattern!(pattern, p => text.rmatches(p).map(str::to_string).collect())
    }

    pub fn match_indices<'p>(&self, pattern: impl IntoStrPattern<'p>) -> Vec<(usize, String)> {
        let text = self.resolve();
        with_pattern!(pattern, p => text
            .match_indices(p)
            .map(|(index, found)| (index, found.to_string()))
            .collect())
    }

    pub fn rmatch_indices<'p>(&self, pattern: impl IntoStrPattern<'p>) -> Vec<(usize, String)> {
        let text = self.resolve();
        with_pattern!(pattern, p => text
            .rmatch_indices(p)
            .map(|(index, found)| (index, found.to_string()))
            .collect())
    }

    pub fn contains<'p>(&self, pattern: impl IntoStrPattern<'p>) -> bool {
        let text = self.resolve();
        with_pattern!(pattern, p => text.contains(p))
    }

    pub fn starts_with<'p>(&self, prefix: impl IntoStrPattern<'p>) -> bool {
        let text = self.resolve();
        with_pattern!(prefix, p => text.starts_with(p))
    }

    pub fn ends_with<'p>(&self, suffix: impl IntoStrPattern<'p>) -> bool {
        let text = self.resolve();
        with_pattern!(suffix, p => text.ends_with(p))
    }

    /// Byte index of the first match of `pattern`.
    pub fn find<'p>(&self, pattern: impl IntoStrPattern<'p>) -> Option<usize> {
        let text = self.resolve();
        with_pattern!(pattern, p => text.find(p))
    }

    /// Byte index of the last match of `pattern`.
    pub fn rfind<'p>(&self, pattern: impl IntoStrPattern<'p>) -> Option<usize> {
        let text = self.resolve();
        with_pattern!(pattern, p => text.rfind(p))
    }

    pub fn replace<'p>(&self, from: impl IntoStrPattern<'p>, to: &str) -> String {
        let text = self.resolve();
        with_pattern!(from, p => text.replace(p, to))
    }

    pub fn replacen<'p>(&self, from: impl IntoStrPattern<'p>, to: &str, count: usize) -> String {
        let text = self.resolve();
        with_pattern!(from, p => text.replacen(p, to, count))
    }

    pub fn repeat(&self, n: usize) -> String {
        self.with_str(|s| s.repeat(n))
    }

    pub fn eq_ignore_ascii_case(&self, other: &str) -> bool {
        self.with_str(|s| s.eq_ignore_ascii_case(other))
    }
}

impl fmt::Display for LazyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Delegate so width/fill/precision flags apply to the translation
        fmt::Display::fmt(self.resolve().as_str(), f)
    }
}

impl fmt::Debug for LazyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyString")
            .field("message", &self.message)
            .field("params", &self.params)
            .finish()
    }
}

impl From<LazyString> for String {
    fn from(lazy: LazyString) -> String {
        lazy.resolve()
    }
}

impl From<&LazyString> for String {
    fn from(lazy: &LazyString) -> String {
        lazy.resolve()
    }
}

impl PartialEq for LazyString {
    fn eq(&self, other: &Self) -> bool {
        self.resolve() == other.resolve()
    }
}

impl PartialEq<str> for LazyString {
    fn eq(&self, other: &str) -> bool {
        self.resolve() == other
    }
}

impl PartialEq<&str> for LazyString {
    fn eq(&self, other: &&str) -> bool {
        self.resolve() == *other
    }
}

impl PartialEq<String> for LazyString {
    fn eq(&self, other: &String) -> bool {
        self.resolve() == *other
    }
}

impl PartialEq<LazyString> for str {
    fn eq(&self, other: &LazyString) -> bool {
        other == self
    }
}

impl PartialEq<LazyString> for &str {
    fn eq(&self, other: &LazyString) -> bool {
        other == self
    }
}

impl PartialEq<LazyString> for String {
    fn eq(&self, other: &LazyString) -> bool {
        other == self
    }
}

impl Eq for LazyString {}

impl Ord for LazyString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.resolve().cmp(&other.resolve())
    }
}

impl PartialOrd for LazyString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialOrd<str> for LazyString {
    fn partial_cmp(&self, other: &str) -> Option<Ordering> {
        Some(self.resolve().as_str().cmp(other))
    }
}

impl PartialOrd<&str> for LazyString {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        Some(self.resolve().as_str().cmp(*other))
    }
}

impl PartialOrd<String> for LazyString {
    fn partial_cmp(&self, other: &String) -> Option<Ordering> {
        Some(self.resolve().cmp(other))
    }
}

impl PartialOrd<LazyString> for str {
    fn partial_cmp(&self, other: &LazyString) -> Option<Ordering> {
        Some(self.cmp(other.resolve().as_str()))
    }
}

impl PartialOrd<LazyString> for &str {
    fn partial_cmp(&self, other: &LazyString) -> Option<Ordering> {
        Some((*self).cmp(other.resolve().as_str()))
    }
}

impl PartialOrd<LazyString> for String {
    fn partial_cmp(&self, other: &LazyString) -> Option<Ordering> {
        Some(self.cmp(&other.resolve()))
    }
}

// Hashes the current translation, so a locale change moves it in a hash map
impl Hash for LazyString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.resolve().hash(state);
    }
}

impl Add<&str> for LazyString {
    type Output = String;

    fn add(self, rhs: &str) -> String {
        self.resolve() + rhs
    }
}

impl Add<&str> for &LazyString {
    type Output = String;

    fn add(self, rhs: &str) -> String {
        self.resolve() + rhs
    }
}

impl Add<&LazyString> for String {
    type Output = String;

    fn add(self, rhs: &LazyString) -> String {
        self + rhs.resolve().as_str()
    }
}

impl Serialize for LazyString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.resolve())
    }
}
