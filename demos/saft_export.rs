use chrono::{NaiveDate, Utc};
use factura_ao::core::*;
use factura_ao::saft::*;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let company = CompanyBuilder::new("c1", "Tech Solutions Lda", "5000000000")
        .address("Rua Direita 12, Ingombota, Luanda")
        .status(CompanyStatus::Active)
        .build();

    let mut numbers = InvoiceNumberSequence::new("FT", 2025);
    let mut invoices = InMemoryRepository::new();
    for (day, client, nif, amount) in [
        (6, "Cliente Exemplo SA", "123456789", dec!(100000)),
        (14, "Kianda & Filhos Lda", "987654321", dec!(45500.75)),
        (27, "Cliente Exemplo SA", "123456789", dec!(12000)),
    ] {
        let invoice = InvoiceBuilder::new(numbers.next_number()?, NaiveDate::from_ymd_opt(2025, 1, day).unwrap())
            .company(company.clone())
            .client(ClientBuilder::new(client, nif).address("Luanda").build())
            .add_item(LineItemBuilder::new("1", "Prestação de serviços", dec!(1), amount).build())
            .withholding_rate(dec!(6.5))
            .build()?;
        invoices.save(invoice)?;
    }
    let companies: InMemoryRepository<Company> = [company].into_iter().collect();

    let out_dir = std::env::temp_dir().join("factura-ao-demo");
    std::fs::create_dir_all(&out_dir)?;
    let mut ledger = SubmissionLedger::new(JsonFileSubmissionStore::new(out_dir.join("saft_history.json")));

    let generator = SaftGenerator::new(&companies, &invoices);
    let request = GenerationRequest::new("c1", ReportingPeriod::new(2025, 1)?);

    match generator.generate(&mut ledger, &request, Utc::now())? {
        GenerationOutcome::Generated { submission, file, .. } => {
            let path = out_dir.join(&file.file_name);
            std::fs::write(&path, &file.content)?;
            println!("submission {} written to {}", submission.id, path.display());
        }
        GenerationOutcome::Rejected(report) => {
            for finding in &report.findings {
                println!("{finding}");
            }
            return Ok(());
        }
    }

    let archive = ledger.consolidated_export(Utc::now(), generator.config())?;
    std::fs::write(out_dir.join(&archive.file_name), &archive.content)?;
    println!("{} ledger entries archived to {}", ledger.len()?, archive.file_name);
    Ok(())
}
