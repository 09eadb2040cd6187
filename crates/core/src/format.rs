//! Number formatting for the column labels and the sum equation.

use crate::snapshot::GroupCounts;
use crate::types::Place;

const DIGIT_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

const TEEN_WORDS: [&str; 10] = [
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS_WORDS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// English words for `0..=99`; larger numbers fall back to digits.
///
/// ```
/// use base_ten_core::format::digit_to_word;
///
/// assert_eq!(digit_to_word(7), "seven");
/// assert_eq!(digit_to_word(13), "thirteen");
/// assert_eq!(digit_to_word(40), "forty");
/// assert_eq!(digit_to_word(42), "forty-two");
/// assert_eq!(digit_to_word(123), "123");
/// ```
pub fn digit_to_word(n: u32) -> String {
    match n {
        0..=9 => DIGIT_WORDS[n as usize].to_string(),
        10..=19 => TEEN_WORDS[(n - 10) as usize].to_string(),
        20..=99 => {
            let tens = TENS_WORDS[(n / 10) as usize];
            match n % 10 {
                0 => tens.to_string(),
                ones => format!("{}-{}", tens, DIGIT_WORDS[ones as usize]),
            }
        }
        _ => n.to_string(),
    }
}

/// Value of `count` groups in `place`.
pub fn expanded_value(count: u32, place: Place) -> u32 {
    count * place.multiplier()
}

/// "zero tens", "one hundred", "three ones".
pub fn digit_phrase(count: u32, place: Place) -> String {
    match count {
        1 => format!("{} {}", digit_to_word(count), place.singular()),
        _ => format!("{} {}", digit_to_word(count), place.name()),
    }
}

/// First label line of a column.
///
/// Hundreds are spelled out ("two hundreds"); tens and ones keep digits
/// ("3 tens", "1 one").
pub fn count_label(count: u32, place: Place) -> String {
    let noun = if count == 1 {
        place.singular()
    } else {
        place.name()
    };
    match place {
        Place::Hundreds if count <= 9 => format!("{} {}", digit_to_word(count), noun),
        _ => format!("{} {}", count, noun),
    }
}

/// Second label line of a column: "= 200 squares".
pub fn squares_label(count: u32, place: Place) -> String {
    let value = expanded_value(count, place);
    let plural = if value == 1 { "" } else { "s" };
    format!("= {} square{}", value, plural)
}

/// "100 + 20 + 3 = 123".
pub fn sum_equation(counts: GroupCounts, total: u32) -> String {
    format!(
        "{} + {} + {} = {}",
        expanded_value(counts.flats, Place::Hundreds),
        expanded_value(counts.rods, Place::Tens),
        expanded_value(counts.units, Place::Ones),
        total
    )
}

/// Count of groups drawn in a column.
pub fn column_count(counts: GroupCounts, place: Place) -> u32 {
    match place {
        Place::Hundreds => counts.flats,
        Place::Tens => counts.rods,
        Place::Ones => counts.units,
    }
}
