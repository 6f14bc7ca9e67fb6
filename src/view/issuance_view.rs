use serde::Serialize;

use crate::entity::MintRecord;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadView {
    pub image_url: String,
}

/// Unsigned fee transaction, base64 encoded.
#[derive(Debug, Serialize)]
pub struct TransactionView {
    pub transaction: String,
}

#[derive(Debug, Serialize)]
pub struct MintRecordView {
    pub success: bool,
    #[serde(flatten)]
    pub record: MintRecord,
}

impl From<MintRecord> for MintRecordView {
    fn from(record: MintRecord) -> Self {
        Self {
            success: true,
            record,
        }
    }
}
