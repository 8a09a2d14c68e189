use uuid::Uuid;

use crate::domain::Post;

/// The visible feed - posts ordered by `created_at` descending, unique by id.
///
/// Ordering holds as long as the initial load arrives sorted and the push
/// channel reports insertions in non-decreasing submission order. Pushed
/// posts go in at the head.
#[derive(Debug, Default)]
pub struct Feed {
    posts: Vec<Post>,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole feed with a freshly loaded page.
    pub fn replace(&mut self, posts: Vec<Post>) {
        self.posts = posts;
    }

    /// Insert a pushed post at the head.
    ///
    /// Returns `false` and leaves the feed untouched when a post with the
    /// same id is already present, so at-least-once delivery cannot
    /// duplicate entries. Existing entries are never removed or reordered.
    pub fn upsert_front(&mut self, post: Post) -> bool {
        if self.contains(post.id) {
            return false;
        }
        self.posts.insert(0, post);
        true
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.posts.iter().any(|p| p.id == id)
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
