use crate::core::codec::{decode_contacts, encode_contacts};
use crate::domain::model::{Contact, ContactField, SearchField, SortOrder};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use thiserror::Error;

/// 操作被拒絕的原因，`Display` 內容即顯示給使用者的訊息
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("The following fields are required: {}", join_labels(.0))]
    EmptyFields(Vec<ContactField>),

    #[error("A contact named '{0}' already exists")]
    DuplicateName(String),

    #[error("{field} cannot be longer than {max} characters")]
    TooLong { field: ContactField, max: usize },

    #[error("No contact named '{0}' was found")]
    NotFound(String),
}

fn join_labels(fields: &[ContactField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 新增/更新/刪除的結果，交由介面層顯示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub ok: bool,
    pub message: String,
    pub rejection: Option<Rejection>,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            rejection: None,
        }
    }

    pub fn rejected(rejection: Rejection) -> Self {
        Self {
            ok: false,
            message: rejection.to_string(),
            rejection: Some(rejection),
        }
    }
}

/// 以單一 [`Storage`] 保存的聯絡人列表
///
/// 新增順序即顯示順序；每次成功異動都會在返回前重寫整個檔案。
pub struct AddressBook<S: Storage> {
    storage: S,
    contacts: Vec<Contact>,
}

impl<S: Storage> AddressBook<S> {
    /// 建立通訊錄並載入儲存中現有的資料
    pub fn open(storage: S) -> Result<Self> {
        let mut book = Self {
            storage,
            contacts: Vec::new(),
        };
        book.load()?;
        Ok(book)
    }

    /// 從儲存載入全部聯絡人，檔案不存在時保持空列表
    pub fn load(&mut self) -> Result<()> {
        match self.storage.read()? {
            Some(data) => {
                self.contacts = decode_contacts(&data)?;
                tracing::debug!(
                    "Loaded {} contacts from {}",
                    self.contacts.len(),
                    self.storage.location()
                );
            }
            None => {
                tracing::debug!(
                    "No contacts file at {}, starting empty",
                    self.storage.location()
                );
            }
        }
        Ok(())
    }

    /// 覆寫整個檔案
    pub fn save(&self) -> Result<()> {
        let data = encode_contacts(&self.contacts)?;
        self.storage.write(&data)?;
        tracing::debug!(
            "Saved {} contacts ({} bytes) to {}",
            self.contacts.len(),
            data.len(),
            self.storage.location()
        );
        Ok(())
    }

    pub fn add(&mut self, name: &str, phone: &str, email: &str, address: &str) -> Result<Outcome> {
        let values = [name, phone, email, address];

        let empty_fields: Vec<ContactField> = ContactField::ALL
            .into_iter()
            .zip(values)
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
            .collect();
        if !empty_fields.is_empty() {
            return Ok(self.reject(Rejection::EmptyFields(empty_fields)));
        }

        if self.contacts.iter().any(|contact| contact.name == name) {
            return Ok(self.reject(Rejection::DuplicateName(name.to_string())));
        }

        // 以未截斷的輸入長度檢查，超過上限直接拒絕
        if let Some(field) = ContactField::ALL
            .into_iter()
            .zip(values)
            .find(|(field, value)| value.chars().count() > field.max_length())
            .map(|(field, _)| field)
        {
            return Ok(self.reject(Rejection::TooLong {
                field,
                max: field.max_length(),
            }));
        }

        self.contacts.push(Contact::new(name, phone, email, address));
        self.save()?;
        tracing::info!("Added contact '{}'", name);
        Ok(Outcome::success("Contact added successfully"))
    }

    /// 依姓名完全比對，只更新有提供的欄位 (超過上限會截斷)，姓名不可修改
    pub fn update(
        &mut self,
        name: &str,
        phone: Option<&str>,
        email: Option<&str>,
        address: Option<&str>,
    ) -> Result<Outcome> {
        let Some(index) = self.contacts.iter().position(|contact| contact.name == name) else {
            return Ok(self.reject(Rejection::NotFound(name.to_string())));
        };

        let contact = &mut self.contacts[index];
        let changes = [
            (ContactField::Phone, phone),
            (ContactField::Email, email),
            (ContactField::Address, address),
        ];
        for (field, value) in changes {
            if let Some(value) = value {
                contact.set_field(field, value);
            }
        }

        self.save()?;
        tracing::info!("Updated contact '{}'", name);
        Ok(Outcome::success("Contact updated successfully"))
    }

    /// 去除前後空白後比對姓名，刪除第一筆符合的聯絡人
    pub fn delete(&mut self, name: &str) -> Result<Outcome> {
        let name = name.trim();
        let Some(index) = self
            .contacts
            .iter()
            .position(|contact| contact.name.trim() == name)
        else {
            return Ok(self.reject(Rejection::NotFound(name.to_string())));
        };

        self.contacts.remove(index);
        self.save()?;
        tracing::info!("Deleted contact '{}'", name);
        Ok(Outcome::success("Contact deleted successfully"))
    }

    /// 不分大小寫的子字串搜尋，依儲存順序回傳；空字串不回傳任何結果
    pub fn search(&self, query: &str, field: SearchField) -> Vec<&Contact> {
        if query.is_empty() {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        self.contacts
            .iter()
            .filter(|contact| contact.matches(&needle, field))
            .collect()
    }

    /// 依欄位排序的檢視，不改變儲存順序
    pub fn sorted(&self, field: ContactField, order: SortOrder) -> Vec<&Contact> {
        let mut view: Vec<&Contact> = self.contacts.iter().collect();
        match order {
            SortOrder::Ascending => view.sort_by(|a, b| a.field(field).cmp(b.field(field))),
            SortOrder::Descending => view.sort_by(|a, b| b.field(field).cmp(a.field(field))),
        }
        view
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, name: &str) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.name == name)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn reject(&self, rejection: Rejection) -> Outcome {
        tracing::warn!("Operation rejected: {}", rejection);
        Outcome::rejected(rejection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;

    fn book() -> AddressBook<MemoryStorage> {
        AddressBook::open(MemoryStorage::new()).unwrap()
    }

    #[test]
    fn test_add_lists_every_empty_field_in_order() {
        let mut book = book();
        let outcome = book.add("", "0912", "  ", "\t").unwrap();

        assert!(!outcome.ok);
        assert_eq!(
            outcome.rejection,
            Some(Rejection::EmptyFields(vec![
                ContactField::Name,
                ContactField::Email,
                ContactField::Address,
            ]))
        );
        assert_eq!(
            outcome.message,
            "The following fields are required: Name, Email, Address"
        );
        assert!(book.is_empty());
        assert!(book.storage().contents().is_none());
    }

    #[test]
    fn test_add_rejects_exact_duplicate_names_only() {
        let mut book = book();
        assert!(book.add("Amy", "1", "a@b.c", "here").unwrap().ok);

        let duplicate = book.add("Amy", "2", "x@y.z", "there").unwrap();
        assert_eq!(
            duplicate.rejection,
            Some(Rejection::DuplicateName("Amy".to_string()))
        );

        assert!(book.add("amy", "2", "x@y.z", "there").unwrap().ok);
        assert!(book.add("Amy ", "3", "x@y.z", "there").unwrap().ok);
        assert_eq!(book.len(), 3);
    }

    #[test]
    fn test_add_rejects_oversized_input_instead_of_truncating() {
        let mut book = book();
        let outcome = book
            .add("ABCDEFGHIJK", "0912", "a@b.c", "here")
            .unwrap();
        assert_eq!(
            outcome.rejection,
            Some(Rejection::TooLong {
                field: ContactField::Name,
                max: 10
            })
        );

        let outcome = book
            .add("Amy", "0912", "a@b.c", &"路".repeat(51))
            .unwrap();
        assert_eq!(outcome.message, "Address cannot be longer than 50 characters");
        assert!(book.is_empty());
    }

    #[test]
    fn test_add_accepts_values_at_the_cap() {
        let mut book = book();
        let outcome = book
            .add(
                "一二三四五六七八九十",
                "0912-345-678-00",
                "abcdefghij@klmno.com",
                &"x".repeat(50),
            )
            .unwrap();
        assert!(outcome.ok, "{}", outcome.message);
        assert_eq!(book.contacts()[0].name, "一二三四五六七八九十");
    }

    #[test]
    fn test_update_only_touches_supplied_fields() {
        let mut book = book();
        book.add("Amy", "0912", "amy@mail.com", "Taipei").unwrap();

        let outcome = book.update("Amy", Some("0987-654-321"), None, None).unwrap();
        assert!(outcome.ok);

        let amy = book.get("Amy").unwrap();
        assert_eq!(amy.phone, "0987-654-321");
        assert_eq!(amy.email, "amy@mail.com");
        assert_eq!(amy.address, "Taipei");
    }

    #[test]
    fn test_update_truncates_and_requires_exact_name() {
        let mut book = book();
        book.add("Amy", "0912", "amy@mail.com", "Taipei").unwrap();

        let missing = book.update("amy", Some("1"), None, None).unwrap();
        assert_eq!(missing.rejection, Some(Rejection::NotFound("amy".to_string())));

        book.update("Amy", None, Some("a-very-long-address@example.com"), None)
            .unwrap();
        assert_eq!(book.get("Amy").unwrap().email, "a-very-long-address@");
    }

    #[test]
    fn test_delete_trims_and_removes_first_match() {
        let mut book = book();
        book.add("Amy", "1", "a@b.c", "here").unwrap();
        book.add("Bob", "2", "b@b.c", "there").unwrap();

        let missing = book.delete("Carl").unwrap();
        assert!(!missing.ok);
        assert_eq!(book.len(), 2);

        let outcome = book.delete("  Amy ").unwrap();
        assert!(outcome.ok);
        assert_eq!(book.len(), 1);
        assert_eq!(book.contacts()[0].name, "Bob");
    }

    #[test]
    fn test_delete_removes_only_first_of_forced_duplicates() {
        let storage = MemoryStorage::with_contents(
            br#"[
  {"name": "Amy", "phone": "1", "email": "a", "address": "x"},
  {"name": "Amy", "phone": "2", "email": "b", "address": "y"}
]"#
            .to_vec(),
        );
        let mut book = AddressBook::open(storage).unwrap();

        book.delete("Amy").unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book.contacts()[0].phone, "2");
    }

    #[test]
    fn test_blank_names_are_lookup_failures() {
        let mut book = book();
        book.add("Amy", "1", "a@b.c", "here").unwrap();

        let delete = book.delete("   ").unwrap();
        assert_eq!(delete.rejection, Some(Rejection::NotFound(String::new())));

        let update = book.update(" ", Some("2"), None, None).unwrap();
        assert_eq!(update.rejection, Some(Rejection::NotFound(" ".to_string())));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_update_without_fields_still_rewrites_file() {
        let storage = MemoryStorage::with_contents(
            br#"[{"name": "Amy", "phone": "1", "email": "a", "address": "x"}]"#.to_vec(),
        );
        let mut book = AddressBook::open(storage).unwrap();

        let outcome = book.update("Amy", None, None, None).unwrap();
        assert!(outcome.ok);
        assert_eq!(book.get("Amy").unwrap(), &Contact::new("Amy", "1", "a", "x"));

        // 重寫後為縮排格式，與原本的單行內容不同
        let rewritten = String::from_utf8(book.storage().contents().unwrap()).unwrap();
        assert!(rewritten.starts_with("[\n  {"));
    }

    #[test]
    fn test_search_scopes_and_empty_query() {
        let mut book = book();
        book.add("Alice", "0912-111", "alice@mail.com", "Taipei").unwrap();
        book.add("Bob", "0922-222", "bob@work.com", "Tainan").unwrap();

        assert!(book.search("", SearchField::All).is_empty());

        let names = |hits: Vec<&Contact>| hits.iter().map(|c| c.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(book.search("TAI", SearchField::All)), vec!["Alice", "Bob"]);
        assert_eq!(
            names(book.search("work", SearchField::Field(ContactField::Email))),
            vec!["Bob"]
        );
        assert!(book
            .search("alice", SearchField::Field(ContactField::Phone))
            .is_empty());
    }

    #[test]
    fn test_sorted_is_a_view() {
        let mut book = book();
        book.add("Carl", "3", "c@c.c", "z").unwrap();
        book.add("Amy", "1", "a@a.a", "y").unwrap();
        book.add("Bob", "2", "b@b.b", "x").unwrap();

        let asc: Vec<&str> = book
            .sorted(ContactField::Name, SortOrder::Ascending)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(asc, vec!["Amy", "Bob", "Carl"]);

        let desc: Vec<&str> = book
            .sorted(ContactField::Address, SortOrder::Descending)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(desc, vec!["Carl", "Amy", "Bob"]);

        let stored: Vec<&str> = book.contacts().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(stored, vec!["Carl", "Amy", "Bob"]);
    }

    #[test]
    fn test_sorted_keeps_store_order_for_equal_keys() {
        let mut book = book();
        book.add("Carl", "0911", "c@c.c", "Taipei").unwrap();
        book.add("Amy", "0922", "a@a.a", "Tainan").unwrap();
        book.add("Bob", "0933", "b@b.b", "Taipei").unwrap();
        book.add("Dan", "0944", "d@d.d", "Tainan").unwrap();

        let phones = |order| {
            book.sorted(ContactField::Address, order)
                .iter()
                .map(|c| c.phone.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(phones(SortOrder::Ascending), vec!["0922", "0944", "0911", "0933"]);
        assert_eq!(phones(SortOrder::Descending), vec!["0911", "0933", "0922", "0944"]);
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut book = book();
        book.add("Amy", "1", "a@b.c", "here").unwrap();
        let after_add = book.storage().contents().unwrap();
        assert!(String::from_utf8(after_add).unwrap().contains("Amy"));

        book.delete("Amy").unwrap();
        let after_delete = String::from_utf8(book.storage().contents().unwrap()).unwrap();
        assert_eq!(after_delete, "[]");
    }
}
