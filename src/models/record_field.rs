use std::fmt;

/// Editable columns of the records table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    StartTime,
    EndTime,
}

impl RecordField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::StartTime => "start_time",
            RecordField::EndTime => "end_time",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
