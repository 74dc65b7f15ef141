use crate::domain::model::Contact;
use crate::utils::error::Result;

/// 序列化為縮排 2 格的 JSON 陣列，非 ASCII 字元原樣保留
pub fn encode_contacts(contacts: &[Contact]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(contacts)?)
}

pub fn decode_contacts(data: &[u8]) -> Result<Vec<Contact>> {
    Ok(serde_json::from_slice(data)?)
}
