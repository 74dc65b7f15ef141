use crate::domain::model::{Contact, ContactField};
use crate::utils::error::{AddressBookError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
        }
    }

    fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            other => Err(format!("unsupported export format '{}', expected csv or tsv", other)),
        }
    }
}

/// 匯出聯絡人為 CSV/TSV，第一列為欄位名稱
pub fn export_delimited(contacts: &[&Contact], format: ExportFormat) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(ContactField::ALL.iter().map(|field| field.key()))?;
    for contact in contacts {
        writer.write_record(ContactField::ALL.iter().map(|field| contact.field(*field)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AddressBookError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        AddressBookError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_csv_quotes_when_needed() {
        let amy = Contact::new("Amy", "0912-345", "amy@mail.com", "No. 1, Sec. 2, Taipei");
        let output = export_delimited(&[&amy], ExportFormat::Csv).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "name,phone,email,address");
        assert_eq!(lines[1], "Amy,0912-345,amy@mail.com,\"No. 1, Sec. 2, Taipei\"");
    }

    #[test]
    fn test_export_tsv_keeps_non_ascii() {
        let wang = Contact::new("王小明", "0912", "wang@mail.com", "台北市");
        let output = export_delimited(&[&wang], ExportFormat::Tsv).unwrap();
        assert_eq!(
            output,
            "name\tphone\temail\taddress\n王小明\t0912\twang@mail.com\t台北市\n"
        );
    }

    #[test]
    fn test_export_empty_list_still_has_header() {
        let output = export_delimited(&[], ExportFormat::Csv).unwrap();
        assert_eq!(output, "name,phone,email,address\n");
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("tsv".parse::<ExportFormat>().unwrap(), ExportFormat::Tsv);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }
}
