// carta/src/model/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::store::Record;
use crate::validation::ValidationError;

/// Star rating, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
  pub const MIN: u8 = 1;
  pub const MAX: u8 = 5;

  /// Clamps `value` into 1..=5.
  pub fn saturating(value: u8) -> Self {
    Rating(value.clamp(Rating::MIN, Rating::MAX))
  }

  pub fn get(self) -> u8 {
    self.0
  }
}

impl TryFrom<u8> for Rating {
  type Error = ValidationError;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    if (Rating::MIN..=Rating::MAX).contains(&value) {
      Ok(Rating(value))
    } else {
      Err(ValidationError::InvalidRating { value })
    }
  }
}

impl From<Rating> for u8 {
  fn from(r: Rating) -> u8 {
    r.0
  }
}

impl fmt::Display for Rating {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/5", self.0)
  }
}

/// A customer review (reseña) with an optional owner response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
  pub id: u64,
  pub customer: String,
  pub rating: Rating,
  pub comment: String,
  /// Empty until the owner answers.
  #[serde(default)]
  pub response: String,
  pub created_at: DateTime<Utc>,
}

impl Review {
  pub fn is_answered(&self) -> bool {
    !self.response.is_empty()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
  pub customer: String,
  pub rating: Rating,
  pub comment: String,
}

/// Reviews are only ever updated to attach a response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPatch {
  pub response: Option<String>,
}

impl Record for Review {
  type New = NewReview;
  type Patch = ReviewPatch;
  const ENTITY: &'static str = "Reseña";

  fn id(&self) -> u64 {
    self.id
  }

  fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  fn from_new(id: u64, new: NewReview, now: DateTime<Utc>) -> Self {
    Review {
      id,
      customer: new.customer,
      rating: new.rating,
      comment: new.comment,
      response: String::new(),
      created_at: now,
    }
  }

  fn apply_patch(&mut self, patch: ReviewPatch) {
    if let Some(response) = patch.response {
      self.response = response;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rating_bounds() {
    assert!(Rating::try_from(0).is_err());
    assert_eq!(Rating::try_from(1).map(Rating::get), Ok(1));
    assert_eq!(Rating::try_from(5).map(Rating::get), Ok(5));
    assert_eq!(
      Rating::try_from(6),
      Err(ValidationError::InvalidRating { value: 6 })
    );
    assert_eq!(Rating::saturating(0).get(), 1);
    assert_eq!(Rating::saturating(9).get(), 5);
  }

  #[test]
  fn new_review_is_unanswered() {
    let review = Review::from_new(
      9,
      NewReview {
        customer: "Laura González".to_string(),
        rating: Rating::try_from(2).unwrap(),
        comment: "Llegó fría".to_string(),
      },
      Utc::now(),
    );
    assert!(!review.is_answered());
    assert_eq!(review.id, 9);
  }
}
