use std::fmt;

use crate::model::MonetaryDocument;

const TAX_INDENT: &str = "\n       ";

impl fmt::Display for MonetaryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let taxes: Vec<String> = self.taxes.iter().map(|t| t.to_string()).collect();

        let checklist = if self.checklist.is_empty() {
            "not run"
        } else if self.checklist.check_all() {
            "PASS"
        } else {
            "FAIL"
        };

        let mut lines = vec![
            format!("Reference: {}", self.reference),
            format!("Date: {}", self.date),
            format!("Total amount including taxes: {}", self.total_incl),
            format!("Total amount excluding taxes: {}", self.total_excl),
            format!("Total taxes: {}", self.total_tax),
            format!("Taxes: {}", taxes.join(TAX_INDENT)),
            format!("Checklist: {checklist}"),
        ];
        for (name, passed) in self.checklist.iter() {
            lines.push(format!("  {name}: {passed}"));
        }

        let lines: Vec<&str> = lines.iter().map(|l| l.trim_end()).collect();
        write!(f, "{}", lines.join("\n"))
    }
}
