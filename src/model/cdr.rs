use serde::Serialize;

use super::ActorId;

/// A single emitted Call Detail Record.
///
/// `dialed_number` is whatever the caller's phonebook held for the callee when the call was
/// placed. After churn it can differ from the callee's live number; consumers that need the
/// ground truth use `callee_id` together with the run's number history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cdr {
    pub sequence: u64,
    pub caller_name: String,
    pub callee_name: String,
    pub caller_number: String,
    pub dialed_number: String,
    pub caller_id: ActorId,
    pub callee_id: ActorId,
    pub epoch: u32,
}

/// Column order of [`Cdr::to_csv_line`].
pub const CSV_HEADER: &str = "sequence,caller_name,callee_name,caller_number,dialed_number";

impl Cdr {
    /// Renders the record as one comma separated line, without a trailing newline.
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.sequence,
            csv_field(&self.caller_name),
            csv_field(&self.callee_name),
            csv_field(&self.caller_number),
            csv_field(&self.dialed_number),
        )
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(caller_name: &str) -> Cdr {
        Cdr {
            sequence: 7,
            caller_name: caller_name.to_string(),
            callee_name: "Bob Stone".to_string(),
            caller_number: "+3161234567".to_string(),
            dialed_number: "+3167654321".to_string(),
            caller_id: 0,
            callee_id: 1,
            epoch: 0,
        }
    }

    #[test]
    fn test_csv_line_keeps_original_column_order() {
        assert_eq!(
            record("Alice Stone").to_csv_line(),
            "7,Alice Stone,Bob Stone,+3161234567,+3167654321"
        );
    }

    #[test]
    fn test_csv_line_quotes_awkward_names() {
        let line = record("Stone, \"Al\"").to_csv_line();
        assert!(line.starts_with("7,\"Stone, \"\"Al\"\"\",Bob Stone"));
    }
}
