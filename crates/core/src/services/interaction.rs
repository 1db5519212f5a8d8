//! Interaction service: reaction toggling and like/dislike aggregation.

use std::collections::HashMap;

use blognest_common::{AppResult, IdGenerator};
use blognest_db::{
    entities::blog_interaction::InteractionKind,
    repositories::{BlogInteractionRepository, BlogRepository, ToggleWrite},
};
use serde::Serialize;

/// The reaction a user ends up holding after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppliedKind {
    Like,
    Dislike,
    /// The toggle removed the prior reaction (untoggle).
    None,
}

impl From<InteractionKind> for AppliedKind {
    fn from(kind: InteractionKind) -> Self {
        match kind {
            InteractionKind::Like => Self::Like,
            InteractionKind::Dislike => Self::Dislike,
        }
    }
}

/// Result of a toggle call.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleOutcome {
    /// The reaction now in effect for the (user, blog) pair.
    pub applied: AppliedKind,
    /// Human-readable description of what changed.
    pub message: String,
}

/// Like/dislike counts for one blog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReactionCounts {
    pub likes: i64,
    pub dislikes: i64,
}

/// Interaction service for business logic.
#[derive(Clone)]
pub struct InteractionService {
    interaction_repo: BlogInteractionRepository,
    blog_repo: BlogRepository,
    id_gen: IdGenerator,
}

impl InteractionService {
    /// Create a new interaction service.
    #[must_use]
    pub fn new(interaction_repo: BlogInteractionRepository, blog_repo: BlogRepository) -> Self {
        Self {
            interaction_repo,
            blog_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Toggle a user's reaction to a blog.
    ///
    /// State machine per (user, blog) pair with states none/liked/disliked:
    /// no prior reaction inserts one, a repeated identical reaction removes
    /// it, and a different reaction flips the kind in place.
    pub async fn toggle(
        &self,
        blog_id: &str,
        user_id: &str,
        kind: InteractionKind,
    ) -> AppResult<ToggleOutcome> {
        // Reacting to a missing blog is NotFound, not a silent no-op
        self.blog_repo.get_by_id(blog_id).await?;

        let write = self
            .interaction_repo
            .toggle(&self.id_gen.generate(), user_id, blog_id, kind)
            .await?;

        let outcome = match write {
            ToggleWrite::Inserted => ToggleOutcome {
                applied: kind.into(),
                message: format!("Added {kind}"),
            },
            ToggleWrite::Switched => ToggleOutcome {
                applied: kind.into(),
                message: format!("Changed interaction to {kind}"),
            },
            ToggleWrite::Removed => ToggleOutcome {
                applied: AppliedKind::None,
                message: format!("Removed {kind}"),
            },
        };

        tracing::debug!(
            blog_id = %blog_id,
            user_id = %user_id,
            applied = ?outcome.applied,
            "Toggled reaction"
        );

        Ok(outcome)
    }

    /// Like/dislike counts for a single blog.
    pub async fn counts(&self, blog_id: &str) -> AppResult<ReactionCounts> {
        let likes = self
            .interaction_repo
            .count_by_blog(blog_id, InteractionKind::Like)
            .await?;
        let dislikes = self
            .interaction_repo
            .count_by_blog(blog_id, InteractionKind::Dislike)
            .await?;

        Ok(ReactionCounts {
            likes: i64::try_from(likes).unwrap_or(i64::MAX),
            dislikes: i64::try_from(dislikes).unwrap_or(i64::MAX),
        })
    }

    /// Like/dislike counts for many blogs, one grouped query per kind.
    ///
    /// Every requested blog ID is present in the result, defaulting to
    /// zero counts when it has no interactions.
    pub async fn counts_for(
        &self,
        blog_ids: &[String],
    ) -> AppResult<HashMap<String, ReactionCounts>> {
        let mut counts: HashMap<String, ReactionCounts> = blog_ids
            .iter()
            .map(|id| (id.clone(), ReactionCounts::default()))
            .collect();

        for (blog_id, likes) in self
            .interaction_repo
            .count_by_blogs(blog_ids, InteractionKind::Like)
            .await?
        {
            if let Some(entry) = counts.get_mut(&blog_id) {
                entry.likes = likes;
            }
        }

        for (blog_id, dislikes) in self
            .interaction_repo
            .count_by_blogs(blog_ids, InteractionKind::Dislike)
            .await?
        {
            if let Some(entry) = counts.get_mut(&blog_id) {
                entry.dislikes = dislikes;
            }
        }

        Ok(counts)
    }

    /// IDs of blogs a user currently likes, in no particular order.
    pub async fn liked_blog_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        self.interaction_repo
            .find_blog_ids_by_user(user_id, InteractionKind::Like)
            .await
    }
}
