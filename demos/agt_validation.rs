use chrono::NaiveDate;
use factura_ao::agt::*;
use factura_ao::core::*;
use rust_decimal_macros::dec;

fn main() {
    let date = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
    let period = ReportingPeriod::new(2025, 1).unwrap();

    let company = CompanyBuilder::new("c1", "Tech Solutions Lda", "5000000000")
        .status(CompanyStatus::Active)
        .build();

    let invoices = vec![
        InvoiceBuilder::new("FT 2025/001", date(5))
            .company(company.clone())
            .client(ClientBuilder::new("Cliente Exemplo SA", "123456789").build())
            .add_item(LineItemBuilder::new("1", "Consultoria", dec!(1), dec!(100000)).build())
            .build()
            .unwrap(),
        InvoiceBuilder::new("FT-002", date(12))
            .company(company.clone())
            .client(ClientBuilder::new("Consumidor Final", "").build())
            .add_item(LineItemBuilder::new("1", "Material", dec!(4), dec!(2500)).build())
            .vat_rate(dec!(7))
            .build()
            .unwrap(),
    ];

    for (label, validator) in [("default", AgtValidator::default()), ("strict", AgtValidator::strict())] {
        let report = validator.validate(Some(&company), period, &invoices);
        println!(
            "{label}: {} invoice(s), {} error(s), {} warning(s), passed = {}",
            report.invoices_checked,
            report.errors().count(),
            report.warnings().count(),
            report.passed()
        );
        for finding in &report.findings {
            println!("  {finding}");
        }
    }
}
