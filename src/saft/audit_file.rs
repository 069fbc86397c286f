//! SAF-T AO audit file assembly.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SaftConfig;
use super::xml_utils::XmlWriter;
use crate::core::{Client, Company, FacturaError, Invoice, ReportingPeriod};

/// Namespace of the Angolan SAF-T schema.
pub const SAFT_AO_NAMESPACE: &str = "urn:OECD:StandardAuditFile-Tax:AO_1.0";
pub const AUDIT_FILE_VERSION: &str = "1.0";
pub const SAFT_MIME_TYPE: &str = "text/xml";

/// A rendered XML document ready for download or archival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaftFile {
    pub file_name: String,
    pub mime_type: String,
    pub content: String,
}

impl SaftFile {
    pub fn xml(file_name: impl Into<String>, content: String) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: SAFT_MIME_TYPE.into(),
            content,
        }
    }
}

/// `SAFT_AO_<NIF>_<YYYY>_<MM>.xml`
pub fn saft_file_name(tax_id: &str, period: ReportingPeriod) -> String {
    format!(
        "SAFT_AO_{}_{}_{:02}.xml",
        tax_id.trim(),
        period.year(),
        period.month()
    )
}

/// Assemble the SAF-T AO document for `company` and `period`.
///
/// Every invoice must belong to `company` and be dated within `period`;
/// anything else is a [`FacturaError::Generation`]. `generated_on` becomes
/// the header `DateCreated`.
pub fn to_saft_xml(
    company: &Company,
    period: ReportingPeriod,
    invoices: &[Invoice],
    config: &SaftConfig,
    generated_on: NaiveDate,
) -> Result<String, FacturaError> {
    if let Some(stray) = invoices
        .iter()
        .find(|inv| !inv.is_issued_by(&company.id) || !period.contains(inv.issue_date))
    {
        return Err(FacturaError::Generation(format!(
            "invoice {} does not belong to company {} in period {}",
            stray.number, company.id, period
        )));
    }

    let mut w = XmlWriter::new()?;
    w.start_element_with_attrs("AuditFile", &[("xmlns", SAFT_AO_NAMESPACE)])?;
    write_header(&mut w, company, period, config, generated_on)?;
    write_master_files(&mut w, invoices, config)?;
    write_source_documents(&mut w, invoices, config)?;
    w.end_element("AuditFile")?;
    w.into_string()
}

/// Assemble the document and wrap it with its conventional file name.
pub fn render_saft_file(
    company: &Company,
    period: ReportingPeriod,
    invoices: &[Invoice],
    config: &SaftConfig,
    generated_on: NaiveDate,
) -> Result<SaftFile, FacturaError> {
    let content = to_saft_xml(company, period, invoices, config, generated_on)?;
    Ok(SaftFile::xml(saft_file_name(&company.tax_id, period), content))
}

fn write_header(
    w: &mut XmlWriter,
    company: &Company,
    period: ReportingPeriod,
    config: &SaftConfig,
    generated_on: NaiveDate,
) -> Result<(), FacturaError> {
    w.start_element("Header")?;
    w.text_element("AuditFileVersion", AUDIT_FILE_VERSION)?;
    w.text_element("CompanyID", &company.tax_id)?;
    w.text_element("TaxRegistrationNumber", &company.tax_id)?;
    w.text_element("CompanyName", &company.name)?;
    w.text_element("BusinessName", &company.name)?;

    w.start_element("CompanyAddress")?;
    w.text_element("AddressDetail", &company.address)?;
    w.text_element("City", &config.city)?;
    w.text_element("Country", &config.country)?;
    w.end_element("CompanyAddress")?;

    w.text_element("FiscalYear", &period.year().to_string())?;
    w.text_element(
        "StartDate",
        &period.start_date().format("%Y-%m-%d").to_string(),
    )?;
    w.text_element("EndDate", &config.end_date_policy.render(period))?;
    w.text_element("CurrencyCode", &config.currency)?;
    w.text_element("DateCreated", &generated_on.format("%Y-%m-%d").to_string())?;
    w.text_element("TaxEntity", &config.tax_entity)?;
    w.text_element(
        "ProductCompanyTaxID",
        config
            .product_company_tax_id
            .as_deref()
            .unwrap_or(&company.tax_id),
    )?;
    w.text_element(
        "SoftwareCertificateNumber",
        &config.software_certificate_number,
    )?;
    w.text_element("ProductID", &config.product_id)?;
    w.text_element("ProductVersion", &config.product_version)?;
    w.end_element("Header")?;
    Ok(())
}

fn customer_id<'a>(client: &'a Client, config: &'a SaftConfig) -> &'a str {
    let nif = client.tax_id.trim();
    if nif.is_empty() {
        &config.placeholder_customer_id
    } else {
        nif
    }
}

/// One `Customer` per distinct customer id, in first-seen order.
fn write_master_files(
    w: &mut XmlWriter,
    invoices: &[Invoice],
    config: &SaftConfig,
) -> Result<(), FacturaError> {
    let mut seen: Vec<&str> = Vec::new();

    w.start_element("MasterFiles")?;
    for invoice in invoices {
        let client = &invoice.client;
        let id = customer_id(client, config);
        if seen.contains(&id) {
            continue;
        }
        seen.push(id);

        w.start_element("Customer")?;
        w.text_element("CustomerID", id)?;
        w.text_element("CustomerTaxID", client.tax_id.trim())?;
        w.text_element("CompanyName", &client.name)?;
        w.start_element("BillingAddress")?;
        w.text_element("AddressDetail", &client.address)?;
        w.text_element("Country", &config.country)?;
        w.end_element("BillingAddress")?;
        w.end_element("Customer")?;
    }
    w.end_element("MasterFiles")?;
    Ok(())
}

fn write_source_documents(
    w: &mut XmlWriter,
    invoices: &[Invoice],
    config: &SaftConfig,
) -> Result<(), FacturaError> {
    w.start_element("SourceDocuments")?;
    w.start_element("SalesInvoices")?;
    for invoice in invoices {
        let (tax, net, gross) = document_totals(invoice);

        w.start_element("Invoice")?;
        w.text_element("InvoiceNo", &invoice.number)?;
        w.text_element(
            "InvoiceDate",
            &invoice.issue_date.format("%Y-%m-%d").to_string(),
        )?;
        w.text_element("CustomerID", customer_id(&invoice.client, config))?;
        w.start_element("DocumentTotals")?;
        w.amount_element("TaxPayable", tax)?;
        w.amount_element("NetTotal", net)?;
        w.amount_element("GrossTotal", gross)?;
        w.end_element("DocumentTotals")?;
        w.end_element("Invoice")?;
    }
    w.end_element("SalesInvoices")?;
    w.end_element("SourceDocuments")?;
    Ok(())
}

/// `(TaxPayable, NetTotal, GrossTotal)` of one invoice, unrounded.
///
/// Gross is subtotal plus VAT; withholding is not deducted.
pub fn document_totals(invoice: &Invoice) -> (Decimal, Decimal, Decimal) {
    let totals = invoice.totals();
    (totals.tax, totals.subtotal, totals.subtotal + totals.tax)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ClientBuilder, CompanyBuilder, CompanyStatus, InvoiceBuilder, LineItemBuilder};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn company() -> Company {
        CompanyBuilder::new("c1", "Tech Solutions Lda", "5000000000")
            .address("Rua Direita 12")
            .status(CompanyStatus::Active)
            .build()
    }

    fn invoice(number: &str, issued: NaiveDate, client: Client) -> Invoice {
        InvoiceBuilder::new(number, issued)
            .company(company())
            .client(client)
            .add_item(LineItemBuilder::new("1", "Consultoria", dec!(2), dec!(50000)).build())
            .vat_rate(dec!(14))
            .withholding_rate(dec!(6.5))
            .build()
            .unwrap()
    }

    #[test]
    fn file_name_pads_month() {
        let p = ReportingPeriod::new(2025, 3).unwrap();
        assert_eq!(saft_file_name("5000000000", p), "SAFT_AO_5000000000_2025_03.xml");
    }

    #[test]
    fn gross_excludes_withholding() {
        let inv = invoice(
            "FT 2025/001",
            date(2025, 1, 5),
            ClientBuilder::new("Cliente", "123456789").build(),
        );
        assert_eq!(
            document_totals(&inv),
            (dec!(14000), dec!(100000), dec!(114000))
        );
    }

    #[test]
    fn customers_deduplicated() {
        let a = ClientBuilder::new("Cliente A", "123456789").build();
        let invoices = vec![
            invoice("FT 2025/001", date(2025, 1, 5), a.clone()),
            invoice("FT 2025/002", date(2025, 1, 6), a),
            invoice("FT 2025/003", date(2025, 1, 7), ClientBuilder::new("Sem NIF", "").build()),
        ];
        let p = ReportingPeriod::new(2025, 1).unwrap();
        let xml = to_saft_xml(&company(), p, &invoices, &SaftConfig::default(), date(2025, 2, 1)).unwrap();
        assert_eq!(xml.matches("<Customer>").count(), 2);
        assert_eq!(xml.matches("<CustomerID>C-MOCK</CustomerID>").count(), 2);
        assert_eq!(xml.matches("<Invoice>").count(), 3);
    }

    #[test]
    fn rejects_invoice_outside_period() {
        let inv = invoice(
            "FT 2025/010",
            date(2025, 2, 1),
            ClientBuilder::new("Cliente", "123456789").build(),
        );
        let p = ReportingPeriod::new(2025, 1).unwrap();
        let err = to_saft_xml(&company(), p, &[inv], &SaftConfig::default(), date(2025, 2, 1));
        assert!(matches!(err, Err(FacturaError::Generation(_))));
    }
}
