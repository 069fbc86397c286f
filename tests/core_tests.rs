use chrono::{NaiveDate, TimeZone, Utc};
use factura_ao::core::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn company() -> Company {
    CompanyBuilder::new("c1", "Tech Solutions Lda", "5000000000")
        .address("Rua Direita 12, Luanda")
        .phone("+244 923 000 000")
        .email("geral@techsolutions.ao")
        .bank("BAI", "AO06 0040 0000 1234 5678 1012 3")
        .status(CompanyStatus::Active)
        .build()
}

fn client() -> Client {
    ClientBuilder::new("Cliente Exemplo", "123456789")
        .address("Av. 4 de Fevereiro, Luanda")
        .build()
}

// --- Amounts in words ---

#[test]
fn words_irregular_hundred() {
    assert_eq!(amount_to_words(dec!(100)), "CEM KWANZAS");
    assert_eq!(amount_to_words(dec!(150)), "CENTO E CINQUENTA KWANZAS");
    assert_eq!(amount_to_words(dec!(101)), "CENTO E UM KWANZAS");
}

#[test]
fn words_million_singular_and_plural() {
    assert_eq!(amount_to_words(dec!(1000000)), "UM MILHÃO KWANZAS");
    assert_eq!(amount_to_words(dec!(2000000)), "DOIS MILHÕES KWANZAS");
    assert!(amount_to_words(dec!(1000001)).contains("MILHÃO"));
    assert!(amount_to_words(dec!(3500000)).contains("MILHÕES"));
}

#[test]
fn words_full_example() {
    assert_eq!(
        amount_to_words(dec!(1234567)),
        "UM MILHÃO E DUZENTOS E TRINTA E QUATRO MIL E QUINHENTOS E SESSENTA E SETE KWANZAS"
    );
    assert_eq!(amount_to_words(dec!(1000)), "UM MIL KWANZAS");
    assert_eq!(amount_to_words(dec!(16)), "DEZASSEIS KWANZAS");
    assert_eq!(amount_to_words(dec!(114000)), "CENTO E CATORZE MIL KWANZAS");
}

#[test]
fn words_drop_fraction() {
    assert_eq!(amount_to_words(dec!(99.99)), "NOVENTA E NOVE KWANZAS");
}

#[test]
fn words_negative() {
    assert_eq!(amount_to_words(dec!(-25)), "MENOS VINTE E CINCO KWANZAS");
}

// --- Totals ---

#[test]
fn totals_general_regime_with_withholding() {
    let items = vec![LineItemBuilder::new("1", "Consultoria", dec!(1), dec!(100000)).build()];
    let t = calculate_totals(&items, dec!(14), dec!(6.5));
    assert_eq!(t.subtotal, dec!(100000));
    assert_eq!(t.tax, dec!(14000));
    assert_eq!(t.withholding, dec!(6500));
    assert_eq!(t.total, dec!(107500));
}

#[test]
fn totals_fractional_quantities_are_exact() {
    let items = vec![
        LineItemBuilder::new("1", "Cabo", dec!(2.5), dec!(1200.40)).build(),
        LineItemBuilder::new("2", "Ficha", dec!(3), dec!(0.333)).build(),
    ];
    let t = calculate_totals(&items, dec!(14), dec!(0));
    assert_eq!(t.subtotal, dec!(3001.999));
    assert_eq!(t.tax, dec!(420.27986));
    assert_eq!(t.total, t.subtotal + t.tax);
}

#[test]
fn totals_empty_items() {
    let t = calculate_totals(&[], dec!(14), dec!(6.5));
    assert_eq!(t.total, dec!(0));
}

// --- Invoice builder ---

#[test]
fn builder_defaults() {
    let inv = InvoiceBuilder::new("FT 2025/001", date(2025, 1, 10))
        .company(company())
        .client(client())
        .add_item(LineItemBuilder::new("1", "Serviço", dec!(1), dec!(5000)).build())
        .build()
        .unwrap();
    assert_eq!(inv.id, "FT 2025/001");
    assert_eq!(inv.due_date, date(2025, 1, 25));
    assert_eq!(inv.vat_rate, dec!(14));
    assert_eq!(inv.template, TemplateId::Classic);
}

#[test]
fn builder_exclusion_regime_defaults_to_zero_vat() {
    let mut c = company();
    c.fiscal_regime = FiscalRegime::Exclusion;
    let inv = InvoiceBuilder::new("FT 2025/002", date(2025, 1, 10))
        .company(c)
        .client(client())
        .add_item(LineItemBuilder::new("1", "Serviço", dec!(1), dec!(5000)).build())
        .build()
        .unwrap();
    assert_eq!(inv.vat_rate, dec!(0));
    assert_eq!(inv.totals().total, dec!(5000));
}

#[test]
fn builder_requires_company() {
    let err = InvoiceBuilder::new("FT 2025/001", date(2025, 1, 10))
        .add_item(LineItemBuilder::new("1", "Serviço", dec!(1), dec!(5000)).build())
        .build()
        .unwrap_err();
    assert!(matches!(err, FacturaError::Builder(_)));
}

#[test]
fn builder_collects_all_errors() {
    let err = InvoiceBuilder::new("", date(2025, 1, 10))
        .due_date(date(2025, 1, 1))
        .company(company())
        .vat_rate(dec!(-1))
        .build()
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("INV-01"));
    assert!(msg.contains("INV-02"));
    assert!(msg.contains("INV-03"));
    assert!(msg.contains("INV-06"));
}

#[test]
fn build_unchecked_keeps_invalid_data() {
    let inv = InvoiceBuilder::new("FT1", date(2025, 1, 10))
        .company(company())
        .add_item(LineItemBuilder::new("1", "Devolução", dec!(-1), dec!(100)).build())
        .build_unchecked()
        .unwrap();
    assert!(!validate_invoice(&inv).is_empty());
}

// --- Company lifecycle ---

#[test]
fn company_starts_pending_and_approval_activates() {
    let mut c = CompanyBuilder::new("c2", "Nova Empresa", "5417000000").build();
    assert_eq!(c.status, CompanyStatus::Pending);
    assert!(!c.can_issue());

    let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
    c.approve("admin", at);
    assert!(c.can_issue());
    assert_eq!(c.activated_by.as_deref(), Some("admin"));
    assert_eq!(c.activated_at, Some(at));

    c.deactivate();
    assert_eq!(c.status, CompanyStatus::Inactive);
    assert!(!c.can_issue());
}

#[test]
fn client_nif_format() {
    assert!(client().has_valid_tax_id());
    assert!(!ClientBuilder::new("X", "12345678A").build().has_valid_tax_id());
    assert!(!ClientBuilder::new("X", "").build().has_valid_tax_id());
}

// --- Numbering ---

#[test]
fn numbering_sequence() {
    let mut seq = InvoiceNumberSequence::new("FT", 2025);
    assert_eq!(seq.next_number().unwrap(), "FT 2025/001");
    assert_eq!(seq.next_number().unwrap(), "FT 2025/002");
    assert_eq!(seq.peek(), "FT 2025/003");

    assert!(seq.auto_advance(date(2026, 1, 2)));
    assert_eq!(seq.next_number().unwrap(), "FT 2026/001");
    assert!(seq.advance_year(2025).is_err());
}

#[test]
fn numbering_resume_and_parse() {
    let mut seq = InvoiceNumberSequence::resume_after("FT 2025/041").unwrap();
    assert_eq!(seq.next_number().unwrap(), "FT 2025/042");

    let parsed = DocumentNumber::parse("FR 2024/7").unwrap();
    assert_eq!(parsed.prefix, "FR");
    assert_eq!(parsed.year, 2024);
    assert_eq!(parsed.sequence, 7);

    assert!(matches!(
        DocumentNumber::parse("FT2025-001"),
        Err(FacturaError::Numbering(_))
    ));
}

// --- Periods ---

#[test]
fn period_bounds() {
    let feb = ReportingPeriod::new(2025, 2).unwrap();
    assert_eq!(feb.start_date(), date(2025, 2, 1));
    assert_eq!(feb.end_date(), date(2025, 2, 28));
    assert!(feb.contains(date(2025, 2, 28)));
    assert!(!feb.contains(date(2025, 3, 1)));
    assert_eq!(feb.label(), "02/2025");
    assert_eq!(ReportingPeriod::of(date(2024, 12, 31)).end_date(), date(2024, 12, 31));
    assert!(matches!(ReportingPeriod::new(2025, 13), Err(FacturaError::Period(_))));
    assert!(ReportingPeriod::new(2025, 0).is_err());
}

// --- Repositories ---

#[test]
fn repository_filter_by_company_and_period() {
    let other = CompanyBuilder::new("c9", "Outra Lda", "5999999999")
        .status(CompanyStatus::Active)
        .build();
    let mk = |number: &str, c: Company, d: NaiveDate| {
        InvoiceBuilder::new(number, d)
            .company(c)
            .client(client())
            .add_item(LineItemBuilder::new("1", "Serviço", dec!(1), dec!(10)).build())
            .build()
            .unwrap()
    };

    let mut repo = InMemoryRepository::new();
    repo.save(mk("FT 2025/002", company(), date(2025, 1, 20))).unwrap();
    repo.save(mk("FT 2025/001", company(), date(2025, 1, 5))).unwrap();
    repo.save(mk("FT 2025/003", company(), date(2025, 2, 1))).unwrap();
    repo.save(mk("FT 2025/900", other, date(2025, 1, 7))).unwrap();

    let jan = ReportingPeriod::new(2025, 1).unwrap();
    let found = InvoiceFilter::new("c1", jan).load(&repo).unwrap();
    let numbers: Vec<_> = found.iter().map(|i| i.number.as_str()).collect();
    assert_eq!(numbers, vec!["FT 2025/001", "FT 2025/002"]);

    repo.delete("FT 2025/001").unwrap();
    assert!(matches!(repo.delete("FT 2025/001"), Err(FacturaError::NotFound(_))));
    assert_eq!(repo.len(), 3);
}
