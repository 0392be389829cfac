// carta/src/reviews.rs
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{event, instrument, Level};

use crate::error::{CartaError, CartaResult};
use crate::model::{Review, ReviewPatch};
use crate::notify::Notifier;
use crate::shared::KeyedLocks;
use crate::store::ReviewStore;
use crate::validation::validate_response;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReviewFilter {
  /// Case-insensitive match on customer or comment.
  #[serde(default, alias = "q")]
  pub search: Option<String>,
  #[serde(default)]
  pub rating: Option<u8>,
}

/// Matching reviews, newest first.
pub fn filter_reviews(reviews: &[Review], filter: &ReviewFilter) -> Vec<Review> {
  let search = filter
    .search
    .as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_lowercase);

  let mut matched: Vec<Review> = reviews
    .iter()
    .filter(|r| match &search {
      Some(s) => r.customer.to_lowercase().contains(s.as_str()) || r.comment.to_lowercase().contains(s.as_str()),
      None => true,
    })
    .filter(|r| filter.rating.map_or(true, |stars| r.rating.get() == stars))
    .cloned()
    .collect();
  matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
  matched
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewStats {
  pub total: usize,
  /// Mean rating rounded to one decimal; 0.0 without reviews.
  pub average: f64,
  /// Count per rating, index 0 is one star.
  pub distribution: [usize; 5],
  pub unanswered: usize,
}

impl ReviewStats {
  pub fn from_reviews(reviews: &[Review]) -> Self {
    let mut distribution = [0usize; 5];
    let mut sum = 0u64;
    for review in reviews {
      distribution[usize::from(review.rating.get() - 1)] += 1;
      sum += u64::from(review.rating.get());
    }
    let average = if reviews.is_empty() {
      0.0
    } else {
      (sum as f64 / reviews.len() as f64 * 10.0).round() / 10.0
    };
    ReviewStats {
      total: reviews.len(),
      average,
      distribution,
      unanswered: reviews.iter().filter(|r| !r.is_answered()).count(),
    }
  }
}

/// Owner-side handling of reviews.
///
/// Responses to the same review are checked and written one at a time, so
/// only the first of two racing replies is stored.
pub struct ReviewDesk {
  reviews: Arc<dyn ReviewStore>,
  notifier: Arc<dyn Notifier>,
  answering: KeyedLocks<u64>,
}

impl ReviewDesk {
  pub fn new(reviews: Arc<dyn ReviewStore>, notifier: Arc<dyn Notifier>) -> Self {
    ReviewDesk {
      reviews,
      notifier,
      answering: KeyedLocks::new(),
    }
  }

  pub async fn list(&self, filter: &ReviewFilter) -> CartaResult<Vec<Review>> {
    Ok(filter_reviews(&self.reviews.get_all().await?, filter))
  }

  pub async fn stats(&self) -> CartaResult<ReviewStats> {
    Ok(ReviewStats::from_reviews(&self.reviews.get_all().await?))
  }

  /// Attaches the owner's response. A review is answered at most once.
  #[instrument(name = "ReviewDesk::respond", skip(self, response))]
  pub async fn respond(&self, id: u64, response: &str) -> CartaResult<Review> {
    let result = self.answering.serialize(id, self.write_response(id, response)).await;
    match &result {
      Ok(_) => {
        event!(Level::INFO, review_id = id, "Review answered.");
        self.notifier.success("Respuesta enviada exitosamente");
      }
      Err(CartaError::Validation(v)) => self.notifier.error(v.user_message()),
      Err(e) => {
        event!(Level::WARN, review_id = id, error = %e, "Review response rejected.");
        self.notifier.error("Error al enviar la respuesta");
      }
    }
    result
  }

  async fn write_response(&self, id: u64, response: &str) -> CartaResult<Review> {
    validate_response(response)?;
    let review = self.reviews.get_by_id(id).await?;
    if review.is_answered() {
      return Err(CartaError::AlreadyResponded { review_id: id });
    }
    let patch = ReviewPatch {
      response: Some(response.trim().to_string()),
    };
    self.reviews.update(id, patch).await
  }
}

impl std::fmt::Debug for ReviewDesk {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ReviewDesk")
      .field("answering", &self.answering)
      .finish_non_exhaustive()
  }
}
