//! Decimal text encoding and decoding of integers.
//!
//! Encoding has two paths. When the write cursor's current chunk has room for
//! the widest possible value ([`MAX_INT_WIDTH`] bytes), digits are produced in
//! place two at a time from a digit-pair table. Otherwise (or for zero) they
//! are formatted into a small stack buffer and copied through
//! [`WriteCursor::write`], which may flush mid-value.

#[cfg(test)]
mod tests;

use crate::{
    error::{ParseError, Result},
    read_cursor::ReadCursor,
    sink::ByteSink,
    source::Source,
    write_cursor::WriteCursor,
};

/// Most decimal digits any supported integer needs (`u64::MAX` has 20).
pub const MAX_INT_WIDTH: usize = 20;

static DIGIT_PAIRS: &[u8; 200] = b"\
    0001020304050607080910111213141516171819\
    2021222324252627282930313233343536373839\
    4041424344454647484950515253545556575859\
    6061626364656667686970717273747576777879\
    8081828384858687888990919293949596979899";

/// Number of decimal digits in `x`.
///
/// Resolved by comparisons against powers of ten; only values of 10^12 and
/// above pay for a division. Zero has one digit.
#[must_use]
pub fn digit_count(x: u64) -> u32 {
    if x < 10 {
        return 1;
    }
    if x < 100 {
        return 2;
    }
    if x < 1_000 {
        return 3;
    }

    if x < 1_000_000_000_000 {
        if x < 100_000_000 {
            if x < 1_000_000 {
                if x < 10_000 {
                    return 4;
                }
                return 5 + u32::from(x >= 100_000);
            }
            return 7 + u32::from(x >= 10_000_000);
        }
        if x < 10_000_000_000 {
            return 9 + u32::from(x >= 1_000_000_000);
        }
        return 11 + u32::from(x >= 100_000_000_000);
    }
    12 + digit_count(x / 1_000_000_000_000)
}

/// Writes the decimal digits of `x` to the start of `dst`, most significant
/// first, and returns how many were written.
///
/// # Panics
///
/// Panics if `dst` is shorter than [`digit_count`]`(x)`.
pub fn write_unsigned_digits(mut x: u64, dst: &mut [u8]) -> usize {
    let len = digit_count(x) as usize;
    let dst = &mut dst[..len];
    let mut next = len;

    while x >= 100 {
        let i = (x % 100) as usize * 2;
        x /= 100;
        dst[next - 1] = DIGIT_PAIRS[i + 1];
        dst[next - 2] = DIGIT_PAIRS[i];
        next -= 2;
    }
    if x < 10 {
        dst[next - 1] = b'0' + x as u8;
    } else {
        let i = x as usize * 2;
        dst[next - 1] = DIGIT_PAIRS[i + 1];
        dst[next - 2] = DIGIT_PAIRS[i];
    }
    len
}

fn write_unsigned_text_fallback<S: ByteSink>(mut x: u64, cursor: &mut WriteCursor<S>) {
    if x == 0 {
        cursor.write_byte(b'0');
        return;
    }
    let mut tmp = [0u8; MAX_INT_WIDTH];
    let mut pos = MAX_INT_WIDTH;
    while x != 0 {
        pos -= 1;
        tmp[pos] = b'0' + (x % 10) as u8;
        x /= 10;
    }
    cursor.write(&tmp[pos..]);
}

/// Writes `x` as decimal text.
pub fn write_unsigned_text<T: UnsignedInt, S: ByteSink>(x: T, cursor: &mut WriteCursor<S>) {
    let x = x.to_u64();
    if x != 0 && cursor.available() >= MAX_INT_WIDTH {
        let n = write_unsigned_digits(x, cursor.spare_mut());
        cursor.advance(n);
    } else {
        write_unsigned_text_fallback(x, cursor);
    }
}

/// Writes `x` as decimal text with a leading `-` when negative.
pub fn write_signed_text<T: SignedInt, S: ByteSink>(x: T, cursor: &mut WriteCursor<S>) {
    // The magnitude of MIN does not fit the signed type.
    if x.is_min() {
        cursor.write(T::MIN_TEXT);
        return;
    }
    let x = if x.is_negative() {
        cursor.write_byte(b'-');
        x.negate()
    } else {
        x
    };
    write_unsigned_text(x.reinterpret_unsigned(), cursor);
}

/// Reads one or more ASCII digits, stopping at the first non-digit or at end
/// of stream.
fn read_magnitude<S: Source>(cursor: &mut ReadCursor<S>) -> Result<u64> {
    let mut value: u64 = 0;
    let mut digits = 0usize;
    let mut overflow = false;

    while !cursor.at_end()? {
        let pending = cursor.pending();
        let run = pending
            .iter()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(pending.len());
        for &b in &pending[..run] {
            match value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(b - b'0')))
            {
                Some(v) => value = v,
                None => overflow = true,
            }
        }
        digits += run;
        cursor.consume(run);
        if cursor.has_pending_data() {
            break;
        }
    }

    if digits == 0 {
        return Err(cursor.error(ParseError::ExpectedDigit));
    }
    if overflow {
        return Err(cursor.error(ParseError::IntegerOverflow));
    }
    Ok(value)
}

/// Parses an unsigned decimal integer.
///
/// # Errors
///
/// [`ParseError::ExpectedDigit`] if no digit is found,
/// [`ParseError::IntegerOverflow`] if the value does not fit `T`. All digits
/// are consumed either way.
pub fn read_unsigned_text<T: UnsignedInt, S: Source>(cursor: &mut ReadCursor<S>) -> Result<T> {
    let magnitude = read_magnitude(cursor)?;
    T::from_u64(magnitude).ok_or_else(|| cursor.error(ParseError::IntegerOverflow))
}

/// Parses a signed decimal integer with an optional `-` or `+` sign.
///
/// # Errors
///
/// Same as [`read_unsigned_text`].
pub fn read_signed_text<T: SignedInt, S: Source>(cursor: &mut ReadCursor<S>) -> Result<T> {
    let negative = match cursor.peek()? {
        Some(b'-') => {
            cursor.consume(1);
            true
        }
        Some(b'+') => {
            cursor.consume(1);
            false
        }
        _ => false,
    };
    let magnitude = read_magnitude(cursor)?;
    T::from_magnitude(negative, magnitude).ok_or_else(|| cursor.error(ParseError::IntegerOverflow))
}

/// Writes any supported integer as decimal text.
pub fn write_int_text<T: IntText, S: ByteSink>(x: T, cursor: &mut WriteCursor<S>) {
    x.write_text(cursor);
}

/// Parses any supported integer from decimal text.
///
/// # Errors
///
/// See [`read_unsigned_text`] and [`read_signed_text`].
pub fn read_int_text<T: IntText, S: Source>(cursor: &mut ReadCursor<S>) -> Result<T> {
    T::read_text(cursor)
}

/// Unsigned integer widths handled by the codec.
pub trait UnsignedInt: Copy {
    /// Widens to `u64`.
    fn to_u64(self) -> u64;
    /// Narrows from `u64`, or `None` if out of range.
    fn from_u64(value: u64) -> Option<Self>;
}

/// Signed integer widths handled by the codec.
pub trait SignedInt: Copy {
    /// The unsigned type of the same width.
    type Unsigned: UnsignedInt;
    /// Decimal text of the type's minimum value.
    const MIN_TEXT: &'static [u8];

    /// `self == Self::MIN`.
    fn is_min(self) -> bool;
    /// `self < 0`.
    fn is_negative(self) -> bool;
    /// `-self`; never called with `Self::MIN`.
    fn negate(self) -> Self;
    /// Bit-for-bit reinterpretation as the unsigned counterpart.
    fn reinterpret_unsigned(self) -> Self::Unsigned;
    /// Builds a value from sign and magnitude, or `None` if out of range.
    fn from_magnitude(negative: bool, magnitude: u64) -> Option<Self>;
}

/// Integers that can be written and read as decimal text.
pub trait IntText: Copy {
    /// Writes `self` into `cursor`.
    fn write_text<S: ByteSink>(self, cursor: &mut WriteCursor<S>);

    /// Parses a value from `cursor`.
    ///
    /// # Errors
    ///
    /// Malformed or out-of-range text, or source failures.
    fn read_text<S: Source>(cursor: &mut ReadCursor<S>) -> Result<Self>;
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl UnsignedInt for $t {
            #[inline]
            fn to_u64(self) -> u64 {
                self as u64
            }

            #[inline]
            fn from_u64(value: u64) -> Option<Self> {
                <$t>::try_from(value).ok()
            }
        }

        impl IntText for $t {
            #[inline]
            fn write_text<S: ByteSink>(self, cursor: &mut WriteCursor<S>) {
                write_unsigned_text(self, cursor);
            }

            #[inline]
            fn read_text<S: Source>(cursor: &mut ReadCursor<S>) -> Result<Self> {
                read_unsigned_text(cursor)
            }
        }
    )*};
}

macro_rules! impl_signed {
    ($($t:ty => $u:ty, $min:literal;)*) => {$(
        impl SignedInt for $t {
            type Unsigned = $u;
            const MIN_TEXT: &'static [u8] = $min;

            #[inline]
            fn is_min(self) -> bool {
                self == <$t>::MIN
            }

            #[inline]
            fn is_negative(self) -> bool {
                self < 0
            }

            #[inline]
            fn negate(self) -> Self {
                -self
            }

            #[inline]
            fn reinterpret_unsigned(self) -> $u {
                self as $u
            }

            #[inline]
            fn from_magnitude(negative: bool, magnitude: u64) -> Option<Self> {
                let value = if negative {
                    -i128::from(magnitude)
                } else {
                    i128::from(magnitude)
                };
                <$t>::try_from(value).ok()
            }
        }

        impl IntText for $t {
            #[inline]
            fn write_text<S: ByteSink>(self, cursor: &mut WriteCursor<S>) {
                write_signed_text(self, cursor);
            }

            #[inline]
            fn read_text<S: Source>(cursor: &mut ReadCursor<S>) -> Result<Self> {
                read_signed_text(cursor)
            }
        }
    )*};
}

impl_unsigned!(u8, u16, u32, u64, usize);

impl_signed! {
    i8 => u8, b"-128";
    i16 => u16, b"-32768";
    i32 => u32, b"-2147483648";
    i64 => u64, b"-9223372036854775808";
}

#[cfg(target_pointer_width = "64")]
impl_signed! {
    isize => usize, b"-9223372036854775808";
}

#[cfg(target_pointer_width = "32")]
impl_signed! {
    isize => usize, b"-2147483648";
}

#[cfg(target_pointer_width = "16")]
impl_signed! {
    isize => usize, b"-32768";
}
