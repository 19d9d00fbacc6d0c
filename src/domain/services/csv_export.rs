use crate::error::AppError;

pub struct AttendeeCsvRow {
    pub name: String,
    pub email: String,
    pub ticket_type: String,
    pub registered_at: String,
}

/// Builds the attendee export in memory. Columns match the admin UI:
/// Name, Email, Ticket Type, Registered At (RFC3339).
pub fn attendee_csv(rows: &[AttendeeCsvRow]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(["Name", "Email", "Ticket Type", "Registered At"])
        .map_err(|e| AppError::InternalWithMsg(format!("CSV write error: {}", e)))?;

    for row in rows {
        writer.write_record([&row.name, &row.email, &row.ticket_type, &row.registered_at])
            .map_err(|e| AppError::InternalWithMsg(format!("CSV write error: {}", e)))?;
    }

    writer.into_inner()
        .map_err(|e| AppError::InternalWithMsg(format!("CSV flush error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_has_header_and_rows() {
        let rows = vec![
            AttendeeCsvRow {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                ticket_type: "VIP".to_string(),
                registered_at: "2025-06-01T10:00:00+00:00".to_string(),
            },
            AttendeeCsvRow {
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
                ticket_type: "Standard".to_string(),
                registered_at: "2025-06-02T11:30:00+00:00".to_string(),
            },
        ];

        let bytes = attendee_csv(&rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Name,Email,Ticket Type,Registered At");
        assert!(lines[1].starts_with("Alice,alice@example.com,VIP,"));
        assert!(lines[2].contains("Standard"));
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let bytes = attendee_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.trim(), "Name,Email,Ticket Type,Registered At");
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let rows = vec![AttendeeCsvRow {
            name: "Doe, Jane".to_string(),
            email: "jane@example.com".to_string(),
            ticket_type: "Early Bird".to_string(),
            registered_at: "2025-06-03T09:00:00+00:00".to_string(),
        }];

        let bytes = attendee_csv(&rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"Doe, Jane\""));
    }
}
