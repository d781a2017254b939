use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Class membership for one ASCII byte, ORed from the GS1 character
    /// sets and the URI alphabets.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct CharClass: u8 {
        const CSET82 = 1 << 0;
        const CSET39 = 1 << 1;
        const CSET64 = 1 << 2;
        const URI = 1 << 3;
        const DOMAIN_BAD = 1 << 4;
    }
}

const CSET82_CHARS: &[u8] =
    b"!\"%&'()*+,-./0123456789:;<=>?ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";
const CSET39_CHARS: &[u8] = b"#-/0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const CSET64_CHARS: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
const URI_CHARS: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~:/?#[]@!$&'()*+,;=%";
const DOMAIN_BAD_CHARS: &[u8] = b"_~?#@!$&'()*+,;=%";

/// Check-pair alphabet of GenSpecs 7.9.6 (alphanumeric, I and O removed).
const CSET32_CHARS: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

static CHAR_CLASS: [CharClass; 128] = char_class_table();

const fn in_set(set: &[u8], b: u8) -> bool {
    let mut i = 0;
    while i < set.len() {
        if set[i] == b {
            return true;
        }
        i += 1;
    }
    false
}

const fn char_class_table() -> [CharClass; 128] {
    let mut table = [CharClass::empty(); 128];
    let mut b = 0u8;
    while (b as usize) < 128 {
        let mut bits = 0u8;
        if in_set(CSET82_CHARS, b) {
            bits |= CharClass::CSET82.bits();
        }
        if in_set(CSET39_CHARS, b) {
            bits |= CharClass::CSET39.bits();
        }
        if in_set(CSET64_CHARS, b) {
            bits |= CharClass::CSET64.bits();
        }
        if in_set(URI_CHARS, b) {
            bits |= CharClass::URI.bits();
        }
        if in_set(DOMAIN_BAD_CHARS, b) {
            bits |= CharClass::DOMAIN_BAD.bits();
        }
        table[b as usize] = CharClass::from_bits_retain(bits);
        b += 1;
    }
    table
}

#[inline]
pub(crate) fn classes(b: u8) -> CharClass {
    if b < 128 {
        CHAR_CLASS[b as usize]
    } else {
        CharClass::empty()
    }
}

#[inline]
pub(crate) fn is_uri_char(b: u8) -> bool {
    classes(b).contains(CharClass::URI)
}

#[inline]
pub(crate) fn is_bad_domain_char(b: u8) -> bool {
    classes(b).contains(CharClass::DOMAIN_BAD)
}

/// GS1 component character sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cset {
    /// Numeric
    N,
    /// CSET 82
    X,
    /// CSET 39
    Y,
    /// File-safe base64 (CSET 64)
    Z,
}

impl Cset {
    pub(crate) fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'N' => Some(Self::N),
            b'X' => Some(Self::X),
            b'Y' => Some(Self::Y),
            b'Z' => Some(Self::Z),
            _ => None,
        }
    }

    /// Character-set lint; runs before any additional linters.
    pub(crate) fn check(self, bytes: &[u8]) -> Result<(), LintFailure> {
        match self {
            Self::N => match bytes.iter().position(|b| !b.is_ascii_digit()) {
                Some(pos) => Err(LintFailure::at(LintError::NonDigitCharacter, pos)),
                None => Ok(()),
            },
            Self::X => check_class(bytes, CharClass::CSET82, LintError::InvalidCset82Character),
            Self::Y => check_class(bytes, CharClass::CSET39, LintError::InvalidCset39Character),
            Self::Z => check_cset64(bytes),
        }
    }
}

fn check_class(bytes: &[u8], class: CharClass, err: LintError) -> Result<(), LintFailure> {
    match bytes.iter().position(|&b| !classes(b).contains(class)) {
        Some(pos) => Err(LintFailure::at(err, pos)),
        None => Ok(()),
    }
}

/// CSET 64 permits up to two `=` padding characters, trailing only.
fn check_cset64(bytes: &[u8]) -> Result<(), LintFailure> {
    let body_end = bytes.len() - bytes.iter().rev().take_while(|&&b| b == b'=').count();
    if bytes.len() - body_end > 2 {
        return Err(LintFailure::at(LintError::InvalidCset64Padding, body_end));
    }
    check_class(
        &bytes[..body_end],
        CharClass::CSET64,
        LintError::InvalidCset64Character,
    )
}

/// Granular failure codes reported by the component linters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintError {
    NonDigitCharacter,
    InvalidCset82Character,
    InvalidCset39Character,
    InvalidCset64Character,
    InvalidCset64Padding,
    TooShortForCheckDigit,
    IncorrectCheckDigit,
    TooShortForCheckPair,
    IncorrectCheckPair,
    TooShortForKey,
    InvalidGcpPrefix,
    IncorrectDateLength,
    IllegalMonth,
    IllegalDay,
    IllegalHour,
    IllegalMinute,
    InvalidIso3166Territory,
    InvalidIso3166TerritoryList,
    InvalidIso4217Currency,
    IllegalZeroValue,
    NotZero,
    IllegalWindingDirection,
    ZeroPieceNumber,
    ZeroTotalPieces,
    PieceExceedsTotal,
    IllegalZeroPrefix,
    InvalidPercentSequence,
    IbanTooShort,
    InvalidIbanCharacter,
    IncorrectIbanChecksum,
}

impl fmt::Display for LintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NonDigitCharacter => "non-digit character",
            Self::InvalidCset82Character => "invalid CSET 82 character",
            Self::InvalidCset39Character => "invalid CSET 39 character",
            Self::InvalidCset64Character => "invalid CSET 64 character",
            Self::InvalidCset64Padding => "invalid CSET 64 padding",
            Self::TooShortForCheckDigit => "too short for a check digit",
            Self::IncorrectCheckDigit => "incorrect check digit",
            Self::TooShortForCheckPair => "too short for a check character pair",
            Self::IncorrectCheckPair => "incorrect check character pair",
            Self::TooShortForKey => "too short for a GS1 key",
            Self::InvalidGcpPrefix => "invalid GS1 Company Prefix",
            Self::IncorrectDateLength => "incorrect date length",
            Self::IllegalMonth => "illegal month",
            Self::IllegalDay => "illegal day",
            Self::IllegalHour => "illegal hour",
            Self::IllegalMinute => "illegal minute",
            Self::InvalidIso3166Territory => "not an ISO 3166 territory code",
            Self::InvalidIso3166TerritoryList => "not a list of ISO 3166 territory codes",
            Self::InvalidIso4217Currency => "not an ISO 4217 currency code",
            Self::IllegalZeroValue => "zero value is not permitted",
            Self::NotZero => "value must be zero",
            Self::IllegalWindingDirection => "illegal winding direction",
            Self::ZeroPieceNumber => "piece number must not be zero",
            Self::ZeroTotalPieces => "total piece count must not be zero",
            Self::PieceExceedsTotal => "piece number exceeds total piece count",
            Self::IllegalZeroPrefix => "zero prefix is not permitted",
            Self::InvalidPercentSequence => "invalid percent escape sequence",
            Self::IbanTooShort => "too short for an IBAN",
            Self::InvalidIbanCharacter => "invalid IBAN character",
            Self::IncorrectIbanChecksum => "incorrect IBAN checksum",
        })
    }
}

/// A linter rejection: error code plus the offending span within the
/// component's slice of the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LintFailure {
    pub code: LintError,
    pub pos: usize,
    pub len: usize,
}

impl LintFailure {
    fn at(code: LintError, pos: usize) -> Self {
        Self { code, pos, len: 1 }
    }

    fn span(code: LintError, pos: usize, len: usize) -> Self {
        Self { code, pos, len }
    }
}

/// Additional (post character-set) linters a component may carry.
///
/// Each is a pure function of the component's bytes; none touches engine
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linter {
    Csum,
    CsumAlpha,
    Key,
    KeyOff1,
    YymmD0,
    Yymmdd,
    Yymmddhh,
    Yymmddhhmm,
    Hhmm,
    Iso3166,
    Iso3166List,
    Iso4217,
    Nonzero,
    Zero,
    Winding,
    PieceOfTotal,
    NoZeroPrefix,
    PcEnc,
    Iban,
}

impl Linter {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "csum" => Self::Csum,
            "csumalpha" => Self::CsumAlpha,
            "key" => Self::Key,
            "keyoff1" => Self::KeyOff1,
            "yymmd0" => Self::YymmD0,
            "yymmdd" => Self::Yymmdd,
            "yymmddhh" => Self::Yymmddhh,
            "yymmddhhmm" => Self::Yymmddhhmm,
            "hhmm" => Self::Hhmm,
            "iso3166" => Self::Iso3166,
            "iso3166list" => Self::Iso3166List,
            "iso4217" => Self::Iso4217,
            "nonzero" => Self::Nonzero,
            "zero" => Self::Zero,
            "winding" => Self::Winding,
            "pieceoftotal" => Self::PieceOfTotal,
            "nozeroprefix" => Self::NoZeroPrefix,
            "pcenc" => Self::PcEnc,
            "iban" => Self::Iban,
            _ => return None,
        })
    }

    pub(crate) fn check(self, bytes: &[u8]) -> Result<(), LintFailure> {
        match self {
            Self::Csum => lint_csum(bytes),
            Self::CsumAlpha => lint_csumalpha(bytes),
            Self::Key => lint_key(bytes, 0),
            Self::KeyOff1 => lint_key(bytes, 1),
            Self::YymmD0 => lint_dates(bytes, true),
            Self::Yymmdd => lint_dates(bytes, false),
            Self::Yymmddhh => lint_date_time(bytes, 8),
            Self::Yymmddhhmm => lint_date_time(bytes, 10),
            Self::Hhmm => lint_hhmm(bytes, 0),
            Self::Iso3166 => lint_iso3166(bytes),
            Self::Iso3166List => lint_iso3166_list(bytes),
            Self::Iso4217 => lint_iso4217(bytes),
            Self::Nonzero => lint_nonzero(bytes),
            Self::Zero => lint_zero(bytes),
            Self::Winding => lint_winding(bytes),
            Self::PieceOfTotal => lint_piece_of_total(bytes),
            Self::NoZeroPrefix => lint_no_zero_prefix(bytes),
            Self::PcEnc => lint_pcenc(bytes),
            Self::Iban => lint_iban(bytes),
        }
    }
}

/// Standard GS1 mod-10 check digit over the final position.
fn lint_csum(bytes: &[u8]) -> Result<(), LintFailure> {
    if bytes.len() < 2 {
        return Err(LintFailure::span(
            LintError::TooShortForCheckDigit,
            0,
            bytes.len(),
        ));
    }
    if let Some(pos) = bytes.iter().position(|b| !b.is_ascii_digit()) {
        return Err(LintFailure::at(LintError::NonDigitCharacter, pos));
    }
    let data = &bytes[..bytes.len() - 1];
    let sum: u32 = data
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &b)| u32::from(b - b'0') * if i % 2 == 0 { 3 } else { 1 })
        .sum();
    let check = ((10 - sum % 10) % 10) as u8 + b'0';
    if bytes[bytes.len() - 1] != check {
        return Err(LintFailure::at(LintError::IncorrectCheckDigit, bytes.len() - 1));
    }
    Ok(())
}

/// Alphanumeric check character pair of GenSpecs 7.9.6 (GMN): CSET 82
/// character values weighted by doubling powers of two from the right,
/// summed modulo 1021, emitted as two CSET 32 characters.
fn lint_csumalpha(bytes: &[u8]) -> Result<(), LintFailure> {
    if bytes.len() < 2 {
        return Err(LintFailure::span(
            LintError::TooShortForCheckPair,
            0,
            bytes.len(),
        ));
    }
    let data = &bytes[..bytes.len() - 2];
    let mut sum: u32 = 0;
    let mut weight: u32 = 2;
    for (i, &b) in data.iter().enumerate().rev() {
        let Some(v) = CSET82_CHARS.iter().position(|&c| c == b) else {
            return Err(LintFailure::at(LintError::InvalidCset82Character, i));
        };
        sum = (sum + v as u32 * weight) % 1021;
        weight = weight * 2 % 1021;
    }
    let pair = [CSET32_CHARS[(sum / 32) as usize], CSET32_CHARS[(sum % 32) as usize]];
    if bytes[bytes.len() - 2..] != pair {
        return Err(LintFailure::span(
            LintError::IncorrectCheckPair,
            bytes.len() - 2,
            2,
        ));
    }
    Ok(())
}

/// A GS1 key must open with a plausible GS1 Company Prefix; `offset`
/// skips leading non-GCP positions (the SSCC extension digit).
fn lint_key(bytes: &[u8], offset: usize) -> Result<(), LintFailure> {
    if bytes.len() < offset + 4 {
        return Err(LintFailure::span(LintError::TooShortForKey, 0, bytes.len()));
    }
    match bytes[offset..offset + 4].iter().position(|b| !b.is_ascii_digit()) {
        Some(pos) => Err(LintFailure::at(LintError::InvalidGcpPrefix, offset + pos)),
        None => Ok(()),
    }
}

fn pair(bytes: &[u8], pos: usize) -> u32 {
    u32::from(bytes[pos] - b'0') * 10 + u32::from(bytes[pos + 1] - b'0')
}

fn days_in_month(yy: u32, mm: u32) -> u32 {
    match mm {
        4 | 6 | 9 | 11 => 30,
        2 => {
            if yy % 4 == 0 {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

/// One or more concatenated YYMMDD dates; `day_zero` admits DD = 00
/// (meaning end of month).
fn lint_dates(bytes: &[u8], day_zero: bool) -> Result<(), LintFailure> {
    if bytes.is_empty() || bytes.len() % 6 != 0 {
        return Err(LintFailure::span(
            LintError::IncorrectDateLength,
            0,
            bytes.len(),
        ));
    }
    for start in (0..bytes.len()).step_by(6) {
        lint_yymmdd_at(bytes, start, day_zero)?;
    }
    Ok(())
}

fn lint_yymmdd_at(bytes: &[u8], start: usize, day_zero: bool) -> Result<(), LintFailure> {
    if let Some(pos) = bytes[start..start + 6].iter().position(|b| !b.is_ascii_digit()) {
        return Err(LintFailure::at(LintError::NonDigitCharacter, start + pos));
    }
    let yy = pair(bytes, start);
    let mm = pair(bytes, start + 2);
    let dd = pair(bytes, start + 4);
    if !(1..=12).contains(&mm) {
        return Err(LintFailure::span(LintError::IllegalMonth, start + 2, 2));
    }
    let min_day = if day_zero { 0 } else { 1 };
    if dd < min_day || dd > days_in_month(yy, mm) {
        return Err(LintFailure::span(LintError::IllegalDay, start + 4, 2));
    }
    Ok(())
}

/// YYMMDD followed by HH (`len` 8) or HHMM (`len` 10).
fn lint_date_time(bytes: &[u8], len: usize) -> Result<(), LintFailure> {
    if bytes.len() != len {
        return Err(LintFailure::span(
            LintError::IncorrectDateLength,
            0,
            bytes.len(),
        ));
    }
    lint_yymmdd_at(bytes, 0, false)?;
    lint_hhmm(&bytes[6..], 6)
}

/// HH or HHMM; `base` offsets reported positions into the full value.
fn lint_hhmm(bytes: &[u8], base: usize) -> Result<(), LintFailure> {
    if let Some(pos) = bytes.iter().position(|b| !b.is_ascii_digit()) {
        return Err(LintFailure::at(LintError::NonDigitCharacter, base + pos));
    }
    if bytes.len() < 2 {
        return Err(LintFailure::span(LintError::IllegalHour, base, bytes.len()));
    }
    if pair(bytes, 0) > 23 {
        return Err(LintFailure::span(LintError::IllegalHour, base, 2));
    }
    if bytes.len() >= 4 && pair(bytes, 2) > 59 {
        return Err(LintFailure::span(LintError::IllegalMinute, base + 2, 2));
    }
    Ok(())
}

fn numeric_code(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 3 || bytes.iter().any(|b| !b.is_ascii_digit()) {
        return None;
    }
    Some(bytes.iter().fold(0u16, |n, &b| n * 10 + u16::from(b - b'0')))
}

fn lint_iso3166(bytes: &[u8]) -> Result<(), LintFailure> {
    match numeric_code(bytes) {
        Some(code) if ISO3166_NUMERIC.binary_search(&code).is_ok() => Ok(()),
        _ => Err(LintFailure::span(
            LintError::InvalidIso3166Territory,
            0,
            bytes.len(),
        )),
    }
}

fn lint_iso3166_list(bytes: &[u8]) -> Result<(), LintFailure> {
    if bytes.is_empty() || bytes.len() % 3 != 0 {
        return Err(LintFailure::span(
            LintError::InvalidIso3166TerritoryList,
            0,
            bytes.len(),
        ));
    }
    for start in (0..bytes.len()).step_by(3) {
        if lint_iso3166(&bytes[start..start + 3]).is_err() {
            return Err(LintFailure::span(
                LintError::InvalidIso3166Territory,
                start,
                3,
            ));
        }
    }
    Ok(())
}

fn lint_iso4217(bytes: &[u8]) -> Result<(), LintFailure> {
    match numeric_code(bytes) {
        Some(code) if ISO4217_NUMERIC.binary_search(&code).is_ok() => Ok(()),
        _ => Err(LintFailure::span(
            LintError::InvalidIso4217Currency,
            0,
            bytes.len(),
        )),
    }
}

fn lint_nonzero(bytes: &[u8]) -> Result<(), LintFailure> {
    if bytes.iter().all(|&b| b == b'0') {
        return Err(LintFailure::span(LintError::IllegalZeroValue, 0, bytes.len()));
    }
    Ok(())
}

fn lint_zero(bytes: &[u8]) -> Result<(), LintFailure> {
    if bytes.iter().any(|&b| b != b'0') {
        return Err(LintFailure::span(LintError::NotZero, 0, bytes.len()));
    }
    Ok(())
}

fn lint_winding(bytes: &[u8]) -> Result<(), LintFailure> {
    if bytes != b"0" && bytes != b"1" && bytes != b"9" {
        return Err(LintFailure::span(
            LintError::IllegalWindingDirection,
            0,
            bytes.len(),
        ));
    }
    Ok(())
}

/// PPTT piece-of-total pair: neither half zero, piece no greater than total.
fn lint_piece_of_total(bytes: &[u8]) -> Result<(), LintFailure> {
    let half = bytes.len() / 2;
    if half == 0 || bytes.len() % 2 != 0 || bytes.iter().any(|b| !b.is_ascii_digit()) {
        return Ok(());
    }
    let piece = &bytes[..half];
    let total = &bytes[half..];
    if piece.iter().all(|&b| b == b'0') {
        return Err(LintFailure::span(LintError::ZeroPieceNumber, 0, half));
    }
    if total.iter().all(|&b| b == b'0') {
        return Err(LintFailure::span(LintError::ZeroTotalPieces, half, half));
    }
    if piece > total {
        return Err(LintFailure::span(LintError::PieceExceedsTotal, 0, bytes.len()));
    }
    Ok(())
}

fn lint_no_zero_prefix(bytes: &[u8]) -> Result<(), LintFailure> {
    if bytes.len() > 1 && bytes[0] == b'0' {
        return Err(LintFailure::at(LintError::IllegalZeroPrefix, 0));
    }
    Ok(())
}

fn lint_pcenc(bytes: &[u8]) -> Result<(), LintFailure> {
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len()
                || !bytes[i + 1].is_ascii_hexdigit()
                || !bytes[i + 2].is_ascii_hexdigit()
            {
                return Err(LintFailure::at(LintError::InvalidPercentSequence, i));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

/// ISO 13616 check: move the first four characters to the end, map
/// letters to 10..35 and verify the decimal value mod 97 equals 1.
fn lint_iban(bytes: &[u8]) -> Result<(), LintFailure> {
    if bytes.len() < 5 {
        return Err(LintFailure::span(LintError::IbanTooShort, 0, bytes.len()));
    }
    for (i, &b) in bytes.iter().enumerate() {
        let ok = match i {
            0 | 1 => b.is_ascii_uppercase(),
            2 | 3 => b.is_ascii_digit(),
            _ => b.is_ascii_uppercase() || b.is_ascii_digit(),
        };
        if !ok {
            return Err(LintFailure::at(LintError::InvalidIbanCharacter, i));
        }
    }
    let mut rem: u32 = 0;
    for &b in bytes[4..].iter().chain(&bytes[..4]) {
        if b.is_ascii_digit() {
            rem = (rem * 10 + u32::from(b - b'0')) % 97;
        } else {
            rem = (rem * 100 + u32::from(b - b'A') + 10) % 97;
        }
    }
    if rem != 1 {
        return Err(LintFailure::span(
            LintError::IncorrectIbanChecksum,
            0,
            bytes.len(),
        ));
    }
    Ok(())
}

/// Renders a lint failure as `(AI)prefix|bad|suffix`.
pub(crate) fn markup(ai: &str, value: &str, pos: usize, len: usize) -> String {
    let bytes = value.as_bytes();
    let pos = pos.min(bytes.len());
    let end = (pos + len).min(bytes.len());
    format!(
        "({ai}){}|{}|{}",
        String::from_utf8_lossy(&bytes[..pos]),
        String::from_utf8_lossy(&bytes[pos..end]),
        String::from_utf8_lossy(&bytes[end..]),
    )
}

/// ISO 3166-1 numeric territory codes, sorted.
static ISO3166_NUMERIC: [u16; 249] = [
    4, 8, 10, 12, 16, 20, 24, 28, 31, 32, 36, 40, 44, 48, 50, 51, 52, 56, 60, 64, 68, 70, 72, 74,
    76, 84, 86, 90, 92, 96, 100, 104, 108, 112, 116, 120, 124, 132, 136, 140, 144, 148, 152, 156,
    158, 162, 166, 170, 174, 175, 178, 180, 184, 188, 191, 192, 196, 203, 204, 208, 212, 214, 218,
    222, 226, 231, 232, 233, 234, 238, 239, 242, 246, 248, 250, 254, 258, 260, 262, 266, 268, 270,
    275, 276, 288, 292, 296, 300, 304, 308, 312, 316, 320, 324, 328, 332, 334, 336, 340, 344, 348,
    352, 356, 360, 364, 368, 372, 376, 380, 384, 388, 392, 398, 400, 404, 408, 410, 414, 417, 418,
    422, 426, 428, 430, 434, 438, 440, 442, 446, 450, 454, 458, 462, 466, 470, 474, 478, 480, 484,
    492, 496, 498, 499, 500, 504, 508, 512, 516, 520, 524, 528, 531, 533, 534, 535, 540, 548, 554,
    558, 562, 566, 570, 574, 578, 580, 581, 583, 584, 585, 586, 591, 598, 600, 604, 608, 612, 616,
    620, 624, 626, 630, 634, 638, 642, 643, 646, 652, 654, 659, 660, 662, 663, 666, 670, 674, 678,
    682, 686, 688, 690, 694, 702, 703, 704, 705, 706, 710, 716, 724, 728, 729, 732, 740, 744, 748,
    752, 756, 760, 762, 764, 768, 772, 776, 780, 784, 788, 792, 795, 796, 798, 800, 804, 807, 818,
    826, 831, 832, 833, 834, 840, 850, 854, 858, 860, 862, 876, 882, 887, 894,
];

/// ISO 4217 numeric currency codes, sorted.
static ISO4217_NUMERIC: [u16; 166] = [
    8, 12, 32, 36, 44, 48, 50, 51, 52, 60, 64, 68, 72, 84, 90, 96, 104, 108, 116, 124, 132, 136,
    144, 152, 156, 170, 174, 188, 191, 192, 203, 208, 214, 222, 230, 232, 238, 242, 262, 270, 292,
    320, 324, 328, 332, 340, 344, 348, 352, 356, 360, 364, 368, 376, 388, 392, 398, 400, 404, 408,
    410, 414, 417, 418, 422, 426, 430, 434, 446, 454, 458, 462, 478, 480, 484, 496, 498, 504, 512,
    516, 524, 528, 532, 533, 548, 554, 558, 566, 578, 586, 590, 598, 600, 604, 608, 634, 643, 646,
    654, 682, 690, 694, 702, 703, 704, 706, 710, 728, 748, 752, 756, 760, 764, 776, 780, 784, 788,
    800, 807, 818, 826, 834, 840, 858, 860, 882, 886, 901, 924, 925, 926, 927, 928, 929, 930, 931,
    932, 933, 934, 936, 938, 941, 943, 944, 946, 947, 948, 949, 950, 951, 952, 953, 967, 968, 969,
    971, 972, 973, 975, 976, 977, 978, 980, 981, 985, 986,
];

#[test]
fn test_char_classes() {
    assert!(classes(b'(').contains(CharClass::CSET82));
    assert!(classes(b'z').contains(CharClass::CSET82));
    assert!(!classes(b' ').contains(CharClass::CSET82));
    assert!(!classes(b'#').contains(CharClass::CSET82));
    assert!(classes(b'#').contains(CharClass::CSET39));
    assert!(!classes(b'a').contains(CharClass::CSET39));
    assert!(is_uri_char(b'%'));
    assert!(is_uri_char(b'/'));
    assert!(!is_uri_char(b' '));
    assert!(!is_uri_char(b'"'));
    assert!(is_bad_domain_char(b'_'));
    assert!(!is_bad_domain_char(b'-'));
}

#[test]
fn test_cset_checks() {
    assert!(Cset::N.check(b"0123456789").is_ok());
    assert_eq!(
        Cset::N.check(b"12a4").unwrap_err(),
        LintFailure::at(LintError::NonDigitCharacter, 2)
    );
    assert!(Cset::X.check(b"ABC+123(x)").is_ok());
    assert_eq!(
        Cset::X.check(b"AB C").unwrap_err(),
        LintFailure::at(LintError::InvalidCset82Character, 2)
    );
    assert!(Cset::Y.check(b"#-/09AZ").is_ok());
    assert!(Cset::Z.check(b"Ab0-_c==").is_ok());
    assert_eq!(
        Cset::Z.check(b"A====").unwrap_err(),
        LintFailure::at(LintError::InvalidCset64Padding, 1)
    );
    assert_eq!(
        Cset::Z.check(b"A+B=").unwrap_err(),
        LintFailure::at(LintError::InvalidCset64Character, 1)
    );
}

#[test]
fn test_check_digit() {
    assert!(lint_csum(b"006141411234567890").is_ok());
    assert!(lint_csum(b"12312312312326").is_ok());
    assert_eq!(
        lint_csum(b"12345678901234").unwrap_err(),
        LintFailure::at(LintError::IncorrectCheckDigit, 13)
    );
}

#[test]
fn test_check_pair() {
    assert!(lint_csumalpha(b"0000E8").is_ok());
    assert_eq!(
        lint_csumalpha(b"0000E9").unwrap_err(),
        LintFailure::span(LintError::IncorrectCheckPair, 4, 2)
    );
    assert_eq!(
        lint_csumalpha(b"x").unwrap_err().code,
        LintError::TooShortForCheckPair
    );
}

#[test]
fn test_dates() {
    assert!(lint_dates(b"991225", false).is_ok());
    assert!(lint_dates(b"260200", true).is_ok());
    assert_eq!(
        lint_dates(b"260200", false).unwrap_err().code,
        LintError::IllegalDay
    );
    assert_eq!(
        lint_dates(b"991325", false).unwrap_err(),
        LintFailure::span(LintError::IllegalMonth, 2, 2)
    );
    assert!(lint_dates(b"240229", false).is_ok());
    assert_eq!(
        lint_dates(b"230229", false).unwrap_err().code,
        LintError::IllegalDay
    );
    // start/end date pair
    assert!(lint_dates(b"260101260331", false).is_ok());
    assert_eq!(
        lint_dates(b"2601012", false).unwrap_err().code,
        LintError::IncorrectDateLength
    );
    assert!(lint_date_time(b"26010123", 8).is_ok());
    assert_eq!(
        lint_date_time(b"26010124", 8).unwrap_err().code,
        LintError::IllegalHour
    );
    assert_eq!(
        lint_date_time(b"2601012360", 10).unwrap_err().code,
        LintError::IllegalMinute
    );
}

#[test]
fn test_domain_linters() {
    assert!(lint_winding(b"9").is_ok());
    assert_eq!(
        lint_winding(b"2").unwrap_err().code,
        LintError::IllegalWindingDirection
    );
    assert!(lint_piece_of_total(b"0102").is_ok());
    assert_eq!(
        lint_piece_of_total(b"0201").unwrap_err().code,
        LintError::PieceExceedsTotal
    );
    assert_eq!(
        lint_piece_of_total(b"0002").unwrap_err().code,
        LintError::ZeroPieceNumber
    );
    assert_eq!(
        lint_piece_of_total(b"0100").unwrap_err().code,
        LintError::ZeroTotalPieces
    );
    assert!(lint_nonzero(b"0010").is_ok());
    assert_eq!(lint_nonzero(b"000").unwrap_err().code, LintError::IllegalZeroValue);
    assert!(lint_zero(b"0").is_ok());
    assert_eq!(lint_zero(b"1").unwrap_err().code, LintError::NotZero);
    assert!(lint_no_zero_prefix(b"0").is_ok());
    assert_eq!(
        lint_no_zero_prefix(b"01").unwrap_err().code,
        LintError::IllegalZeroPrefix
    );
    assert!(lint_key(b"1234AB", 0).is_ok());
    assert_eq!(lint_key(b"12x4AB", 0).unwrap_err().code, LintError::InvalidGcpPrefix);
    assert!(lint_key(b"006141411234567890", 1).is_ok());
    assert!(lint_iso3166(b"840").is_ok());
    assert_eq!(
        lint_iso3166(b"999").unwrap_err().code,
        LintError::InvalidIso3166Territory
    );
    assert!(lint_iso3166_list(b"276756").is_ok());
    assert_eq!(
        lint_iso3166_list(b"2767").unwrap_err().code,
        LintError::InvalidIso3166TerritoryList
    );
    assert!(lint_iso4217(b"978").is_ok());
    assert!(lint_pcenc(b"A%20B").is_ok());
    assert_eq!(
        lint_pcenc(b"A%2").unwrap_err().code,
        LintError::InvalidPercentSequence
    );
    assert!(lint_iban(b"GB82WEST12345698765432").is_ok());
    assert_eq!(
        lint_iban(b"GB83WEST12345698765432").unwrap_err().code,
        LintError::IncorrectIbanChecksum
    );
}

#[test]
fn test_markup() {
    assert_eq!(markup("11", "991325", 2, 2), "(11)99|13|25");
    assert_eq!(markup("10", "ABC", 0, 3), "(10)|ABC|");
}
