//! Form-input validation: CPF masking and birth-date sanity checks.

use chrono::{Local, NaiveDate};
use thiserror::Error;

const CPF_DIGITS: usize = 11;

/// Client-side validation failures. `Display` is the alert text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Nome e CPF são obrigatórios!")]
    MissingNameOrCpf,

    #[error("CPF inválido. Deve ter o formato 123.456.789-00.")]
    InvalidCpf,

    #[error("Data de Nascimento inválida!")]
    InvalidBirthDate,

    #[error("Tipo e Valor são obrigatórios!")]
    MissingContactFields,
}

/// Apply the CPF display mask to whatever the user typed so far.
///
/// Non-digits are dropped, input is capped at 11 digits, and separators are
/// inserted only once the digit after them exists, so partial input masks
/// incrementally: `1234` becomes `123.4`.
pub fn mask_cpf(raw: &str) -> String {
    let mut masked = String::with_capacity(14);
    for (i, digit) in raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(CPF_DIGITS)
        .enumerate()
    {
        match i {
            3 | 6 => masked.push('.'),
            9 => masked.push('-'),
            _ => {}
        }
        masked.push(digit);
    }
    masked
}

/// True when `cpf` is exactly in the `###.###.###-##` form.
pub fn is_cpf_masked(cpf: &str) -> bool {
    let bytes = cpf.as_bytes();
    bytes.len() == 14
        && bytes.iter().enumerate().all(|(i, b)| match i {
            3 | 7 => *b == b'.',
            11 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Digits of a CPF (or of a search term), separators removed.
pub fn cpf_digits(cpf: &str) -> String {
    cpf.chars().filter(char::is_ascii_digit).collect()
}

/// Two-digit years are not representable as birth dates.
const MIN_YEAR: i32 = 100;

/// Parse a `YYYY-MM-DD` birth date, rejecting impossible calendar days,
/// years before 100, and dates after `today`.
pub fn parse_birth_date_on(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let mut parts = input.split('-');
    let (year, month, day) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || !is_digits(year, 4) || !is_digits(month, 2) || !is_digits(day, 2) {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    if year < MIN_YEAR {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)?;
    (date <= today).then_some(date)
}

pub fn is_valid_date_on(input: &str, today: NaiveDate) -> bool {
    parse_birth_date_on(input, today).is_some()
}

/// [`is_valid_date_on`] against the local calendar date.
pub fn is_valid_date(input: &str) -> bool {
    is_valid_date_on(input, Local::now().date_naive())
}

/// `DD/MM/YYYY`, as shown in the customer table.
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn is_digits(part: &str, len: usize) -> bool {
    part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn mask_full_cpf() {
        assert_eq!(mask_cpf("12345678900"), "123.456.789-00");
    }

    #[test]
    fn mask_is_incremental() {
        assert_eq!(mask_cpf("123"), "123");
        assert_eq!(mask_cpf("1234"), "123.4");
        assert_eq!(mask_cpf("1234567"), "123.456.7");
        assert_eq!(mask_cpf("1234567890"), "123.456.789-0");
    }

    #[test]
    fn mask_strips_non_digits_and_truncates() {
        assert_eq!(mask_cpf("123.456.789-00999"), "123.456.789-00");
        assert_eq!(mask_cpf("ab1c2-3 4"), "123.4");
        assert_eq!(mask_cpf(""), "");
    }

    #[test]
    fn mask_of_any_eleven_digits_has_canonical_shape() {
        for seed in 0..200u64 {
            let digits = format!("{:011}", seed.wrapping_mul(48_271_129) % 100_000_000_000);
            let masked = mask_cpf(&digits);
            assert!(is_cpf_masked(&masked), "{digits} -> {masked}");
            assert_eq!(cpf_digits(&masked), digits);
        }
    }

    #[test]
    fn remasking_is_stable() {
        let masked = mask_cpf("98765432100");
        assert_eq!(mask_cpf(&masked), masked);
    }

    #[test]
    fn masked_format_check() {
        assert!(is_cpf_masked("123.456.789-00"));
        assert!(!is_cpf_masked("12345678900"));
        assert!(!is_cpf_masked("123.456.789-0"));
        assert!(!is_cpf_masked("123-456-789.00"));
        assert!(!is_cpf_masked("abc.def.ghi-jk"));
    }

    #[test]
    fn invalid_calendar_day_is_rejected() {
        assert!(!is_valid_date_on("2024-02-30", today()));
        assert!(!is_valid_date_on("2023-02-29", today()));
        assert!(!is_valid_date_on("2024-04-31", today()));
        assert!(!is_valid_date_on("2024-13-01", today()));
    }

    #[test]
    fn leap_day_is_accepted() {
        assert!(is_valid_date_on("2024-02-29", today()));
    }

    #[test]
    fn future_dates_are_rejected_and_today_is_not() {
        assert!(!is_valid_date_on("2025-06-16", today()));
        assert!(is_valid_date_on("2025-06-15", today()));
        assert!(!is_valid_date("9999-12-31"));
    }

    #[test]
    fn years_below_one_hundred_are_rejected() {
        assert!(!is_valid_date_on("0050-01-01", today()));
        assert!(!is_valid_date_on("0000-01-01", today()));
        assert!(is_valid_date_on("0100-01-01", today()));
    }

    #[test]
    fn malformed_dates_are_rejected() {
        assert!(!is_valid_date_on("", today()));
        assert!(!is_valid_date_on("2024-2-5", today()));
        assert!(!is_valid_date_on("2024-02-05-01", today()));
        assert!(!is_valid_date_on("17/05/1990", today()));
    }

    #[test]
    fn brazilian_date_format() {
        let date = NaiveDate::from_ymd_opt(1990, 5, 7).unwrap();
        assert_eq!(format_date_br(date), "07/05/1990");
    }
}
