use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_NAME_LENGTH: usize = 10;
pub const MAX_PHONE_LENGTH: usize = 15;
pub const MAX_EMAIL_LENGTH: usize = 20;
pub const MAX_ADDRESS_LENGTH: usize = 50;

/// 聯絡人的四個欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Phone,
    Email,
    Address,
}

impl ContactField {
    /// 標準欄位順序，回報空白欄位時也依此順序
    pub const ALL: [ContactField; 4] = [
        ContactField::Name,
        ContactField::Phone,
        ContactField::Email,
        ContactField::Address,
    ];

    pub fn max_length(self) -> usize {
        match self {
            Self::Name => MAX_NAME_LENGTH,
            Self::Phone => MAX_PHONE_LENGTH,
            Self::Email => MAX_EMAIL_LENGTH,
            Self::Address => MAX_ADDRESS_LENGTH,
        }
    }

    /// 檔案中使用的鍵名
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Address => "address",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::Address => "Address",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContactField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" | "姓名" => Ok(Self::Name),
            "phone" | "電話" => Ok(Self::Phone),
            "email" | "電子郵件" => Ok(Self::Email),
            "address" | "地址" => Ok(Self::Address),
            other => Err(format!(
                "unknown field '{}', expected one of: name, phone, email, address",
                other
            )),
        }
    }
}

/// 搜尋範圍：單一欄位或全欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    Field(ContactField),
    #[default]
    All,
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => f.write_str(field.key()),
            Self::All => f.write_str("all"),
        }
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "全欄位" => Ok(Self::All),
            other => other.parse::<ContactField>().map(Self::Field).map_err(|_| {
                format!(
                    "unknown search field '{}', expected one of: name, phone, email, address, all",
                    other
                )
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// 檔案中的原始格式，經由 [`Contact::new`] 轉換，手動編輯造成的超長欄位會在載入時截斷
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ContactRecord {
    name: String,
    phone: String,
    email: String,
    address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl<'de> Deserialize<'de> for Contact {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = ContactRecord::deserialize(deserializer)?;
        Ok(Contact::new(
            record.name,
            record.phone,
            record.email,
            record.address,
        ))
    }
}

impl Contact {
    /// 建立聯絡人，各欄位超過上限時直接截斷，不回報錯誤
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: truncate_chars(name.into(), MAX_NAME_LENGTH),
            phone: truncate_chars(phone.into(), MAX_PHONE_LENGTH),
            email: truncate_chars(email.into(), MAX_EMAIL_LENGTH),
            address: truncate_chars(address.into(), MAX_ADDRESS_LENGTH),
        }
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Phone => &self.phone,
            ContactField::Email => &self.email,
            ContactField::Address => &self.address,
        }
    }

    /// 覆寫姓名以外的欄位並截斷至上限；姓名是查詢鍵，不能以此修改
    pub(crate) fn set_field(&mut self, field: ContactField, value: &str) {
        let value = truncate_chars(value.to_string(), field.max_length());
        match field {
            ContactField::Name => {}
            ContactField::Phone => self.phone = value,
            ContactField::Email => self.email = value,
            ContactField::Address => self.address = value,
        }
    }

    /// 不分大小寫的子字串比對
    pub fn matches(&self, needle_lowercase: &str, scope: SearchField) -> bool {
        let contains = |field: ContactField| {
            self.field(field).to_lowercase().contains(needle_lowercase)
        };
        match scope {
            SearchField::Field(field) => contains(field),
            SearchField::All => ContactField::ALL.into_iter().any(contains),
        }
    }
}

pub(crate) fn truncate_chars(mut value: String, max: usize) -> String {
    if let Some((byte_index, _)) = value.char_indices().nth(max) {
        value.truncate(byte_index);
    }
    value
}
