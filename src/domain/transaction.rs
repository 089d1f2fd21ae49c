use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transaction direction as understood by the host application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Receita,
    Despesa,
}

impl TransactionKind {
    /// Accepts only the exact lowercase wire values.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "receita" => Some(TransactionKind::Receita),
            "despesa" => Some(TransactionKind::Despesa),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Receita => "receita",
            TransactionKind::Despesa => "despesa",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file picked in the form that has not been encoded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAttachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl PendingAttachment {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Attachment held by the form: either a fresh file or an already embedded data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    Pending(PendingAttachment),
    Encoded(String),
}

/// Finalized transaction handed to the host. Field names follow the host contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub valor: String,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub categoria: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_exact_wire_values_only() {
        assert_eq!(TransactionKind::parse("receita"), Some(TransactionKind::Receita));
        assert_eq!(TransactionKind::parse("despesa"), Some(TransactionKind::Despesa));
        assert_eq!(TransactionKind::parse("Receita"), None);
        assert_eq!(TransactionKind::parse(" despesa"), None);
        assert_eq!(TransactionKind::parse("transfer"), None);
    }

    #[test]
    fn payload_omits_id_on_create() {
        let payload = TransactionPayload {
            id: None,
            nome: "Mercado".into(),
            valor: "10,50".into(),
            tipo: "despesa".into(),
            categoria: "Mercado".into(),
            data: None,
            attachment: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["categoria"], "Mercado");
    }

    #[test]
    fn payload_reads_host_detail() {
        let detail = r#"{"id":7,"nome":"Aluguel","valor":"1200","tipo":"Despesa","categoria":"Casa","data":"2024-03-05T12:00:00Z"}"#;
        let payload: TransactionPayload = serde_json::from_str(detail).unwrap();
        assert_eq!(payload.id, Some(7));
        assert_eq!(payload.tipo, "Despesa");
        assert!(payload.data.is_some());
        assert!(payload.attachment.is_none());
    }
}
