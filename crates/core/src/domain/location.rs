// State & Address records

use super::entity::{Column, Draft, Entity, EntityKind};
use super::error::{require_text, DomainError, Result};
use super::value::FieldValue;
use serde::{Deserialize, Serialize};

/// Two-letter postal code (e.g. "NE")
pub type StateCode = String;

pub type AddressId = i64;

/// Reference list of states; keyed by postal code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: StateCode,
    pub name: String,
}

impl State {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateField {
    Id,
    Name,
}

impl Column for StateField {
    fn column(self) -> &'static str {
        match self {
            StateField::Id => "ID",
            StateField::Name => "Name",
        }
    }
}

impl Draft for State {
    fn validate(&self) -> Result<()> {
        require_text("State.ID", &self.id)?;
        if self.id.chars().count() != 2 {
            return Err(DomainError::InvalidValue {
                field: "State.ID",
                reason: format!("'{}' is not a two-letter code", self.id),
            });
        }
        require_text("State.Name", &self.name)
    }

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("ID", self.id.clone().into()),
            ("Name", self.name.clone().into()),
        ]
    }
}

impl Entity for State {
    type Id = StateCode;
    type Draft = State;
    type Field = StateField;

    const KIND: EntityKind = EntityKind::State;

    fn id(&self) -> &StateCode {
        &self.id
    }
}

/// Postal address shared by students, guardians, staff and substitutes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub street: String,
    pub city: String,
    pub state_id: StateCode,
    pub zip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAddress {
    pub street: String,
    pub city: String,
    pub state_id: StateCode,
    pub zip: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    Id,
    Street,
    City,
    StateId,
    Zip,
}

impl Column for AddressField {
    fn column(self) -> &'static str {
        match self {
            AddressField::Id => "ID",
            AddressField::Street => "Street",
            AddressField::City => "City",
            AddressField::StateId => "StateID",
            AddressField::Zip => "Zip",
        }
    }
}

impl Draft for NewAddress {
    fn validate(&self) -> Result<()> {
        require_text("Address.Street", &self.street)?;
        require_text("Address.City", &self.city)?;
        require_text("Address.StateID", &self.state_id)?;
        require_text("Address.Zip", &self.zip)?;
        if !self.zip.chars().all(|c| c.is_ascii_digit() || c == '-') {
            return Err(DomainError::InvalidValue {
                field: "Address.Zip",
                reason: format!("'{}' is not a ZIP code", self.zip),
            });
        }
        Ok(())
    }

    fn values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("Street", self.street.clone().into()),
            ("City", self.city.clone().into()),
            ("StateID", self.state_id.clone().into()),
            ("Zip", self.zip.clone().into()),
        ]
    }
}

impl Entity for Address {
    type Id = AddressId;
    type Draft = NewAddress;
    type Field = AddressField;

    const KIND: EntityKind = EntityKind::Address;

    fn id(&self) -> &AddressId {
        &self.id
    }
}
