use chrono::{Datelike, NaiveDate};

use super::error::FacturaError;

/// Sequential document number generator.
///
/// Generates numbers in the format `{prefix} {year}/{sequential}`,
/// e.g. "FT 2025/001", "FT 2025/002". The `/` separator is mandatory for
/// AGT-compliant numbering.
#[derive(Debug, Clone)]
pub struct InvoiceNumberSequence {
    prefix: String,
    year: i32,
    next_number: u64,
    zero_pad: usize,
}

impl InvoiceNumberSequence {
    /// Create a new sequence starting at 1.
    pub fn new(prefix: impl Into<String>, year: i32) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            next_number: 1,
            zero_pad: 3,
        }
    }

    /// Create a sequence continuing from a given number.
    pub fn starting_at(prefix: impl Into<String>, year: i32, next_number: u64) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            next_number,
            zero_pad: 3,
        }
    }

    /// Resume after the last issued number, e.g. "FT 2025/041" → next is 42.
    pub fn resume_after(last: &str) -> Result<Self, FacturaError> {
        let parsed = DocumentNumber::parse(last)?;
        let next_number = parsed
            .sequence
            .checked_add(1)
            .ok_or_else(|| FacturaError::Numbering(format!("'{last}': sequence exhausted")))?;
        Ok(Self {
            prefix: parsed.prefix,
            year: parsed.year,
            next_number,
            zero_pad: 3,
        })
    }

    /// Set zero-padding width (default: 3, so "001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    /// Generate the next document number.
    ///
    /// Fails once the counter is exhausted for the current year.
    pub fn next_number(&mut self) -> Result<String, FacturaError> {
        let num = self.next_number;
        self.next_number = num.checked_add(1).ok_or_else(|| {
            FacturaError::Numbering(format!(
                "{} {}: sequence exhausted",
                self.prefix, self.year
            ))
        })?;
        Ok(self.format(num))
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        self.format(self.next_number)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Get the next number that will be issued (without prefix/formatting).
    pub fn next_raw(&self) -> u64 {
        self.next_number
    }

    /// Advance to a new year, resetting the counter to 1.
    pub fn advance_year(&mut self, new_year: i32) -> Result<(), FacturaError> {
        if new_year <= self.year {
            return Err(FacturaError::Numbering(format!(
                "new year {new_year} must be greater than current year {}",
                self.year
            )));
        }
        self.year = new_year;
        self.next_number = 1;
        Ok(())
    }

    /// Auto-advance year if the given date is in a new year.
    /// Returns true if the year was advanced.
    pub fn auto_advance(&mut self, date: NaiveDate) -> bool {
        let date_year = date.year();
        if date_year > self.year {
            self.year = date_year;
            self.next_number = 1;
            true
        } else {
            false
        }
    }

    fn format(&self, num: u64) -> String {
        format!(
            "{} {}/{:0>width$}",
            self.prefix,
            self.year,
            num,
            width = self.zero_pad
        )
    }
}

/// A parsed `<prefix> <year>/<sequence>` document number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNumber {
    /// Document type prefix, e.g. "FT".
    pub prefix: String,
    pub year: i32,
    pub sequence: u64,
}

impl DocumentNumber {
    pub fn parse(number: &str) -> Result<Self, FacturaError> {
        let err = |reason: &str| FacturaError::Numbering(format!("'{number}': {reason}"));

        let (head, seq) = number
            .trim()
            .rsplit_once('/')
            .ok_or_else(|| err("missing '/' separator"))?;
        let (prefix, year) = head
            .rsplit_once(' ')
            .ok_or_else(|| err("missing space between prefix and year"))?;

        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(err("empty prefix"));
        }
        let year = year.parse::<i32>().map_err(|_| err("year is not a number"))?;
        let sequence = seq
            .parse::<u64>()
            .map_err(|_| err("sequence is not a number"))?;

        Ok(Self {
            prefix: prefix.to_string(),
            year,
            sequence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_numbering() {
        let mut seq = InvoiceNumberSequence::new("FT", 2025);
        assert_eq!(seq.next_number().unwrap(), "FT 2025/001");
        assert_eq!(seq.next_number().unwrap(), "FT 2025/002");
        assert_eq!(seq.next_number().unwrap(), "FT 2025/003");
    }

    #[test]
    fn peek_does_not_consume() {
        let mut seq = InvoiceNumberSequence::new("FT", 2025);
        assert_eq!(seq.peek(), "FT 2025/001");
        assert_eq!(seq.peek(), "FT 2025/001");
        assert_eq!(seq.next_number().unwrap(), "FT 2025/001");
        assert_eq!(seq.peek(), "FT 2025/002");
    }

    #[test]
    fn custom_padding() {
        let mut seq = InvoiceNumberSequence::starting_at("FR", 2025, 7).with_padding(5);
        assert_eq!(seq.next_number().unwrap(), "FR 2025/00007");
    }

    #[test]
    fn year_advance() {
        let mut seq = InvoiceNumberSequence::new("FT", 2024);
        seq.next_number().unwrap();
        seq.advance_year(2025).unwrap();
        assert_eq!(seq.next_number().unwrap(), "FT 2025/001");
        assert!(seq.advance_year(2025).is_err());
    }

    #[test]
    fn auto_advance_year() {
        let mut seq = InvoiceNumberSequence::new("FT", 2024);
        seq.next_number().unwrap();
        assert!(seq.auto_advance(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()));
        assert!(!seq.auto_advance(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()));
        assert_eq!(seq.next_number().unwrap(), "FT 2025/001");
    }

    #[test]
    fn resume_after_last_issued() {
        let mut seq = InvoiceNumberSequence::resume_after("FT 2025/041").unwrap();
        assert_eq!(seq.next_number().unwrap(), "FT 2025/042");
    }

    #[test]
    fn resume_after_max_sequence_is_an_error() {
        let err = InvoiceNumberSequence::resume_after("FT 2025/18446744073709551615").unwrap_err();
        assert!(matches!(err, FacturaError::Numbering(_)));
    }

    #[test]
    fn exhausted_sequence_does_not_wrap() {
        let mut seq = InvoiceNumberSequence::starting_at("FT", 2025, u64::MAX);
        assert!(matches!(seq.next_number(), Err(FacturaError::Numbering(_))));
        assert_eq!(seq.next_raw(), u64::MAX);

        let mut seq = InvoiceNumberSequence::resume_after("FT 2025/18446744073709551614").unwrap();
        assert!(seq.next_number().is_err());
    }

    #[test]
    fn parse_document_number() {
        let n = DocumentNumber::parse("FT 2025/001").unwrap();
        assert_eq!(n.prefix, "FT");
        assert_eq!(n.year, 2025);
        assert_eq!(n.sequence, 1);

        assert!(DocumentNumber::parse("FT-2025-001").is_err());
        assert!(DocumentNumber::parse(" 2025/1").is_err());
        assert!(DocumentNumber::parse("FT 20x5/1").is_err());
    }
}
