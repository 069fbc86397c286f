#![no_main]

use chrono::NaiveDate;
use factura_ao::saft::{SaftConfig, to_saft_xml};
use factura_ao::{ClientBuilder, CompanyBuilder, CompanyStatus, InvoiceBuilder, LineItemBuilder, ReportingPeriod};
use libfuzzer_sys::fuzz_target;
use quick_xml::Reader;
use quick_xml::events::Event;
use rust_decimal::Decimal;

fuzz_target!(|data: (String, String, String, String, u32, i64)| {
    let (company_name, address, client_name, number, qty, price) = data;
    let Some(issued) = NaiveDate::from_ymd_opt(2025, 1, 15) else {
        return;
    };
    let Ok(period) = ReportingPeriod::new(2025, 1) else {
        return;
    };

    let company = CompanyBuilder::new("c1", company_name, "5000000000")
        .address(address)
        .status(CompanyStatus::Active)
        .build();
    let Ok(invoice) = InvoiceBuilder::new(number, issued)
        .company(company.clone())
        .client(ClientBuilder::new(client_name, "").build())
        .add_item(LineItemBuilder::new("1", "x", Decimal::from(qty), Decimal::new(price, 2)).build())
        .build_unchecked()
    else {
        return;
    };

    let Ok(xml) = to_saft_xml(&company, period, &[invoice], &SaftConfig::default(), issued) else {
        return;
    };

    // Whatever the text content, the output must stay well-formed.
    let mut reader = Reader::from_str(&xml);
    let mut depth = 0i64;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("malformed SAF-T output: {e}"),
        }
    }
    assert_eq!(depth, 0);
});
