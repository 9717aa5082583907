//! In-memory fixtures for the list-pattern tests

use super::editor::DraftMode;
use super::error::ApiError;
use super::record::{DraftForm, Grouping, ListRecord};
use super::remote::RemoteCollection;
use async_trait::async_trait;
use contracts::domain::common::AggregateRoot;
use contracts::shared::validation::{validate_fields, FieldCheck, ValidationRules};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub email: Option<String>,
    pub category: Option<String>,
    pub is_active: bool,
    pub online: Option<bool>,
}

pub fn item(id: &str, name: &str) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        contact: String::new(),
        email: None,
        category: None,
        is_active: true,
        online: None,
    }
}

impl AggregateRoot for Item {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn aggregate_index() -> &'static str {
        "t000"
    }

    fn collection_name() -> &'static str {
        "items"
    }

    fn element_name() -> &'static str {
        "Item"
    }

    fn list_name() -> &'static str {
        "Items"
    }
}

impl ListRecord for Item {
    const GROUPING: Grouping = Grouping::Alphabetical;

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.contact.as_str()];
        if let Some(email) = &self.email {
            fields.push(email);
        }
        fields
    }

    fn online_flag(&self) -> Option<bool> {
        self.online
    }

    fn category_key(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn group_key(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ItemDraft {
    pub name: String,
    pub contact: String,
    pub share: f64,
}

impl DraftForm for ItemDraft {
    type Record = Item;

    fn from_record(record: &Item) -> Self {
        Self {
            name: record.name.clone(),
            contact: record.contact.clone(),
            share: 0.0,
        }
    }

    fn into_record(self, id: String, is_active: bool) -> Item {
        Item {
            contact: self.contact,
            is_active,
            ..item(&id, &self.name)
        }
    }

    fn validate(&self, _mode: &DraftMode) -> Result<(), String> {
        validate_fields(&[
            FieldCheck::text("Name", &self.name, ValidationRules::required()),
            FieldCheck::number("Share", self.share, ValidationRules::range(0.0, 100.0)),
        ])
    }
}

/// Backend stand-in: keeps records, logs calls, fails on demand
pub struct FakeCollection<D: DraftForm> {
    pub records: RefCell<Vec<D::Record>>,
    calls: RefCell<Vec<String>>,
    failures: RefCell<HashMap<&'static str, ApiError>>,
    next_id: Cell<u32>,
}

impl<D: DraftForm> FakeCollection<D> {
    pub fn new(records: Vec<D::Record>) -> Self {
        Self {
            records: RefCell::new(records),
            calls: RefCell::new(Vec::new()),
            failures: RefCell::new(HashMap::new()),
            next_id: Cell::new(100),
        }
    }

    /// The next call of `op` ("list", "create", ...) fails with `err`
    pub fn fail_next(&self, op: &'static str, err: ApiError) {
        self.failures.borrow_mut().insert(op, err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record_call(&self, op: &'static str, arg: &str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(format!("{}:{}", op, arg));
        match self.failures.borrow_mut().remove(op) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn position(&self, id: &str) -> Result<usize, ApiError> {
        self.records
            .borrow()
            .iter()
            .position(|r| r.id() == id)
            .ok_or(ApiError::NotFound)
    }
}

#[async_trait(?Send)]
impl<D: DraftForm> RemoteCollection for FakeCollection<D> {
    type Draft = D;

    async fn list(&self) -> Result<Vec<D::Record>, ApiError> {
        self.record_call("list", "")?;
        Ok(self.records.borrow().clone())
    }

    async fn create(&self, draft: &D) -> Result<D::Record, ApiError> {
        self.record_call("create", "")?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let record = draft.clone().into_record(id.to_string(), true);
        self.records.borrow_mut().push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, draft: &D) -> Result<(), ApiError> {
        self.record_call("update", id)?;
        let idx = self.position(id)?;
        let is_active = self.records.borrow()[idx].is_active();
        self.records.borrow_mut()[idx] = draft.clone().into_record(id.to_string(), is_active);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.record_call("delete", id)?;
        let idx = self.position(id)?;
        self.records.borrow_mut().remove(idx);
        Ok(())
    }

    async fn set_active(&self, id: &str, active: bool) -> Result<(), ApiError> {
        self.record_call(if active { "activate" } else { "deactivate" }, id)?;
        let idx = self.position(id)?;
        self.records.borrow_mut()[idx].set_active(active);
        Ok(())
    }
}
