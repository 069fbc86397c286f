//! Amounts in words (valor por extenso), Portuguese as used in Angola.

use rust_decimal::Decimal;

/// Currency name appended to every spelled-out amount.
pub const CURRENCY_NAME: &str = "KWANZAS";

const UNITS: [&str; 10] = [
    "", "UM", "DOIS", "TRÊS", "QUATRO", "CINCO", "SEIS", "SETE", "OITO", "NOVE",
];
const TEENS: [&str; 10] = [
    "DEZ",
    "ONZE",
    "DOZE",
    "TREZE",
    "CATORZE",
    "QUINZE",
    "DEZASSEIS",
    "DEZASSETE",
    "DEZOITO",
    "DEZANOVE",
];
const TENS: [&str; 10] = [
    "",
    "DEZ",
    "VINTE",
    "TRINTA",
    "QUARENTA",
    "CINQUENTA",
    "SESSENTA",
    "SETENTA",
    "OITENTA",
    "NOVENTA",
];
const HUNDREDS: [&str; 10] = [
    "",
    "CENTO",
    "DUZENTOS",
    "TREZENTOS",
    "QUATROCENTOS",
    "QUINHENTOS",
    "SEISCENTOS",
    "SETECENTOS",
    "OITOCENTOS",
    "NOVECENTOS",
];

/// Spell out the integer part of `amount` followed by [`CURRENCY_NAME`].
///
/// The fractional part is discarded. Zero yields `"ZERO KWANZAS"`.
///
/// ```
/// use factura_ao::core::amount_to_words;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(amount_to_words(dec!(150)), "CENTO E CINQUENTA KWANZAS");
/// assert_eq!(amount_to_words(dec!(2000000.75)), "DOIS MILHÕES KWANZAS");
/// ```
pub fn amount_to_words(amount: Decimal) -> String {
    let mut integer = amount.trunc();
    integer.rescale(0);
    let n = integer.mantissa().unsigned_abs();

    if n == 0 {
        return format!("ZERO {CURRENCY_NAME}");
    }

    let words = spell(n);
    if integer.is_sign_negative() {
        format!("MENOS {words} {CURRENCY_NAME}")
    } else {
        format!("{words} {CURRENCY_NAME}")
    }
}

/// Spell a positive integer as millions / thousands / remainder groups.
fn spell(n: u128) -> String {
    let millions = n / 1_000_000;
    let thousands = ((n % 1_000_000) / 1000) as u16;
    let rest = (n % 1000) as u16;

    let mut parts = Vec::with_capacity(3);
    if millions > 0 {
        let label = if millions > 1 { "MILHÕES" } else { "MILHÃO" };
        let count = if millions < 1000 {
            spell_group(millions as u16)
        } else {
            spell(millions)
        };
        parts.push(format!("{count} {label}"));
    }
    if thousands > 0 {
        parts.push(format!("{} MIL", spell_group(thousands)));
    }
    if rest > 0 {
        parts.push(spell_group(rest));
    }
    parts.join(" E ")
}

/// Spell a group in 1..=999.
fn spell_group(n: u16) -> String {
    if n == 100 {
        return "CEM".to_string();
    }

    let mut out = String::new();
    let mut n = n as usize;
    if n >= 100 {
        out.push_str(HUNDREDS[n / 100]);
        n %= 100;
        if n > 0 {
            out.push_str(" E ");
        }
    }
    if n >= 20 {
        out.push_str(TENS[n / 10]);
        n %= 10;
        if n > 0 {
            out.push_str(" E ");
            out.push_str(UNITS[n]);
        }
    } else if n >= 10 {
        out.push_str(TEENS[n - 10]);
    } else if n > 0 {
        out.push_str(UNITS[n]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn zero() {
        assert_eq!(amount_to_words(Decimal::ZERO), "ZERO KWANZAS");
        assert_eq!(amount_to_words(dec!(0.99)), "ZERO KWANZAS");
    }

    #[test]
    fn hundreds() {
        assert_eq!(amount_to_words(dec!(100)), "CEM KWANZAS");
        assert_eq!(amount_to_words(dec!(101)), "CENTO E UM KWANZAS");
        assert_eq!(amount_to_words(dec!(150)), "CENTO E CINQUENTA KWANZAS");
        assert_eq!(amount_to_words(dec!(999)), "NOVECENTOS E NOVENTA E NOVE KWANZAS");
    }

    #[test]
    fn teens() {
        assert_eq!(amount_to_words(dec!(10)), "DEZ KWANZAS");
        assert_eq!(amount_to_words(dec!(14)), "CATORZE KWANZAS");
        assert_eq!(amount_to_words(dec!(19)), "DEZANOVE KWANZAS");
        assert_eq!(amount_to_words(dec!(216)), "DUZENTOS E DEZASSEIS KWANZAS");
    }

    #[test]
    fn thousands() {
        assert_eq!(amount_to_words(dec!(1000)), "UM MIL KWANZAS");
        assert_eq!(amount_to_words(dec!(100000)), "CEM MIL KWANZAS");
        assert_eq!(
            amount_to_words(dec!(107500)),
            "CENTO E SETE MIL E QUINHENTOS KWANZAS"
        );
    }

    #[test]
    fn millions() {
        assert_eq!(amount_to_words(dec!(1000000)), "UM MILHÃO KWANZAS");
        assert_eq!(amount_to_words(dec!(2000000)), "DOIS MILHÕES KWANZAS");
        assert_eq!(
            amount_to_words(dec!(1234567)),
            "UM MILHÃO E DUZENTOS E TRINTA E QUATRO MIL E QUINHENTOS E SESSENTA E SETE KWANZAS"
        );
    }

    #[test]
    fn millions_without_thousands_omit_the_thousands_clause() {
        assert_eq!(amount_to_words(dec!(2000005)), "DOIS MILHÕES E CINCO KWANZAS");
        assert!(!amount_to_words(dec!(3000100)).contains("MIL "));
    }

    #[test]
    fn thousand_millions() {
        assert_eq!(amount_to_words(dec!(1000000000)), "UM MIL MILHÕES KWANZAS");
    }

    #[test]
    fn negative() {
        assert_eq!(amount_to_words(dec!(-150)), "MENOS CENTO E CINQUENTA KWANZAS");
    }
}
