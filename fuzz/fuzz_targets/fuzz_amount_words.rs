#![no_main]

use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fuzz_target!(|data: (i64, u32)| {
    let (mantissa, scale) = data;
    if let Ok(amount) = Decimal::try_from_i128_with_scale(i128::from(mantissa), scale % 29) {
        let words = factura_ao::amount_to_words(amount);
        assert!(words.ends_with(factura_ao::CURRENCY_NAME));
        let _ = factura_ao::template::format_amount(amount);
    }
});
