use chrono::NaiveDate;
use factura_ao::core::*;
use factura_ao::template::*;
use rust_decimal_macros::dec;

fn main() {
    let company = CompanyBuilder::new("c1", "Tech Solutions Lda", "5000000000")
        .address("Rua Direita 12, Ingombota, Luanda")
        .phone("+244 923 000 000")
        .email("geral@techsolutions.ao")
        .bank("BAI", "AO06 0040 0000 1234 5678 1012 3")
        .status(CompanyStatus::Active)
        .build();

    let mut numbers = InvoiceNumberSequence::new("FT", 2025);

    let invoice = InvoiceBuilder::new(numbers.next_number().expect("sequence exhausted"), NaiveDate::from_ymd_opt(2025, 1, 10).unwrap())
        .company(company)
        .client(
            ClientBuilder::new("Cliente Exemplo SA", "123456789")
                .address("Av. 4 de Fevereiro, Luanda")
                .build(),
        )
        .add_item(LineItemBuilder::new("1", "Consultoria informática", dec!(8), dec!(10000)).build())
        .add_item(LineItemBuilder::new("2", "Licença anual", dec!(1), dec!(20000)).build())
        .withholding_rate(dec!(6.5))
        .template(TemplateId::Corporate)
        .build()
        .expect("invoice should be valid");

    let contract = map_invoice(&invoice, &TemplateConfig::default()).expect("mapping failed");

    println!("{} {}", contract.document.document_type, contract.document.number);
    println!("{} ({})", contract.company.name, contract.company.tax_id);
    println!("Regime: {}", contract.document.fiscal_regime);
    println!("Cliente: {} NIF {}", contract.client.name, contract.client.tax_id);
    println!();
    for line in &contract.line_items {
        println!(
            "  {:<28} {:>6} x {:>12} = {:>14}",
            line.description,
            line.quantity,
            format_amount(line.unit_price),
            format_amount(line.extension)
        );
    }
    println!();
    println!("Subtotal:  {:>14}", format_amount(contract.totals.subtotal));
    println!("IVA:       {:>14}", format_amount(contract.totals.tax));
    println!("Retenção:  {:>14}", format_amount(contract.totals.withholding));
    println!("Total:     {:>14} Kz", format_amount(contract.totals.total));
    println!("Por extenso: {}", contract.totals.total_in_words);
    println!("Banco: {} {}", contract.bank.name, contract.bank.iban);

    println!();
    println!("{}", serde_json::to_string_pretty(&contract).unwrap());
}
