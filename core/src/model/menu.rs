// carta/src/model/menu.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Record;
use crate::validation::{validate_menu, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
  pub id: u64,
  pub name: String,
  #[serde(default)]
  pub description: String,
  pub active: bool,
  pub categories: Vec<String>,
  pub created_at: DateTime<Utc>,
  /// Subdomain of the establishment that owns the menu.
  pub establishment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMenu {
  pub name: String,
  pub description: String,
  pub active: bool,
  pub categories: Vec<String>,
  pub establishment: String,
}

/// Menu editor form contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuDraft {
  pub name: String,
  pub description: String,
  pub active: bool,
  pub categories: Vec<String>,
}

impl Default for MenuDraft {
  fn default() -> Self {
    MenuDraft {
      name: String::new(),
      description: String::new(),
      active: true,
      categories: Vec::new(),
    }
  }
}

impl MenuDraft {
  /// Trimmed categories, blanks and repeats dropped, first occurrence kept.
  pub fn clean_categories(&self) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for category in self.categories.iter().map(|c| c.trim()) {
      if !category.is_empty() && !cleaned.iter().any(|c| c == category) {
        cleaned.push(category.to_string());
      }
    }
    cleaned
  }
}

impl NewMenu {
  pub fn from_draft(draft: &MenuDraft, establishment: impl Into<String>) -> Result<Self, ValidationError> {
    validate_menu(draft)?;
    Ok(NewMenu {
      name: draft.name.trim().to_string(),
      description: draft.description.trim().to_string(),
      active: draft.active,
      categories: draft.clean_categories(),
      establishment: establishment.into(),
    })
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuPatch {
  pub name: Option<String>,
  pub description: Option<String>,
  pub active: Option<bool>,
  pub categories: Option<Vec<String>>,
}

impl TryFrom<&MenuDraft> for MenuPatch {
  type Error = ValidationError;

  /// Full replacement of the editable fields.
  fn try_from(draft: &MenuDraft) -> Result<Self, Self::Error> {
    validate_menu(draft)?;
    Ok(MenuPatch {
      name: Some(draft.name.trim().to_string()),
      description: Some(draft.description.trim().to_string()),
      active: Some(draft.active),
      categories: Some(draft.clean_categories()),
    })
  }
}

impl Record for Menu {
  type New = NewMenu;
  type Patch = MenuPatch;
  const ENTITY: &'static str = "Menú";

  fn id(&self) -> u64 {
    self.id
  }

  fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  fn from_new(id: u64, new: NewMenu, now: DateTime<Utc>) -> Self {
    Menu {
      id,
      name: new.name,
      description: new.description,
      active: new.active,
      categories: new.categories,
      created_at: now,
      establishment: new.establishment,
    }
  }

  fn apply_patch(&mut self, patch: MenuPatch) {
    if let Some(name) = patch.name {
      self.name = name;
    }
    if let Some(description) = patch.description {
      self.description = description;
    }
    if let Some(active) = patch.active {
      self.active = active;
    }
    if let Some(categories) = patch.categories {
      self.categories = categories;
    }
  }
}
