use std::fmt;

/// One client/phone pair produced by a keyword search.
///
/// Clients without phones appear once with `phone_number` set to `None`.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct SearchRow {
    pub client_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl SearchRow {
    /// Whether any searchable field contains `needle`, which must already be lowercased
    pub fn matches(&self, needle: &str) -> bool {
        [
            Some(self.first_name.as_str()),
            Some(self.last_name.as_str()),
            self.email.as_deref(),
            self.phone_number.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

impl fmt::Display for SearchRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {} {}, Email: {}, Phone: {}",
            self.client_id,
            self.first_name,
            self.last_name,
            self.email.as_deref().unwrap_or(""),
            self.phone_number.as_deref().unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_all_fields() {
        let row = SearchRow {
            client_id: 1,
            first_name: "Ivan".to_string(),
            last_name: "Petrov".to_string(),
            email: Some("ivan.petrov@example.com".to_string()),
            phone_number: Some("+123456789".to_string()),
        };
        assert_eq!(
            row.to_string(),
            "ID: 1, Name: Ivan Petrov, Email: ivan.petrov@example.com, Phone: +123456789"
        );
    }

    #[test]
    fn test_matches_folds_unicode_case() {
        let row = SearchRow {
            client_id: 2,
            first_name: "Иван".to_string(),
            last_name: "Иванов".to_string(),
            email: None,
            phone_number: Some("+79990001122".to_string()),
        };
        assert!(row.matches("иван"));
        assert!(row.matches("ванов"));
        assert!(row.matches("0001"));
        assert!(row.matches(""));
        assert!(!row.matches("петров"));
    }

    #[test]
    fn test_display_missing_email_and_phone() {
        let row = SearchRow {
            client_id: 7,
            first_name: "Anna".to_string(),
            last_name: "Smirnova".to_string(),
            email: None,
            phone_number: None,
        };
        assert_eq!(row.to_string(), "ID: 7, Name: Anna Smirnova, Email: , Phone: ");
    }
}
