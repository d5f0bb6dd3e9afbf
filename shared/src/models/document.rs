//! Document Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec;

/// Stored document; `document_file` is raw bytes, base64 on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub emp_id: i64,
    #[serde(with = "codec::base64_opt", default)]
    pub document_file: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Drop the bookkeeping timestamps (list-all replies omit them)
    pub fn without_timestamps(self) -> Self {
        Self {
            created_at: None,
            updated_at: None,
            ..self
        }
    }
}

/// Create document payload; `document_file` is base64 text
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCreate {
    pub emp_id: i64,
    #[serde(default)]
    pub document_file: Option<String>,
}

/// Update document payload; the target id travels in the body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpdate {
    pub id: i64,
    #[serde(default)]
    pub emp_id: Option<i64>,
    #[serde(default)]
    pub document_file: Option<String>,
}

/// `POST /documents/bulk` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentBulkCreate {
    pub data: Vec<DocumentCreate>,
}

/// Decoded write ready for storage
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub emp_id: i64,
    pub document_file: Option<Vec<u8>>,
}

impl TryFrom<&DocumentCreate> for NewDocument {
    type Error = codec::BlobDecodeError;

    fn try_from(value: &DocumentCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            emp_id: value.emp_id,
            document_file: codec::decode_opt(value.document_file.as_deref())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_wire_shape() {
        let doc = Document {
            id: 4,
            emp_id: 9,
            document_file: Some(b"PDF".to_vec()),
            created_at: None,
            updated_at: None,
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["empId"], 9);
        assert_eq!(json["documentFile"], "UERG");
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn test_new_document_decodes_base64() {
        let create = DocumentCreate {
            emp_id: 1,
            document_file: Some("UERG".into()),
        };
        let new_doc = NewDocument::try_from(&create).unwrap();
        assert_eq!(new_doc.document_file.as_deref(), Some(&b"PDF"[..]));

        let bad = DocumentCreate {
            emp_id: 1,
            document_file: Some("%%%".into()),
        };
        assert!(NewDocument::try_from(&bad).is_err());
    }
}
