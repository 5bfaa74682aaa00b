//! Local snapshot of the clips on screen.

use crate::backend::ClipScope;
use clipshelf_core::models::{Clip, ClipId};

/// Clips currently displayed, exactly as the backend returned them.
///
/// The cache is only ever replaced wholesale; its order is the backend's
/// order. The one in-place edit is [`ClipCache::apply_saved`], which mirrors a
/// confirmed content save until the next reload lands.
#[derive(Debug, Default, Clone)]
pub struct ClipCache {
    clips: Vec<Clip>,
    source: Option<(ClipScope, u64)>,
    generation: u64,
}

impl ClipCache {
    /// Swap in a fresh snapshot.
    pub fn replace(&mut self, clips: Vec<Clip>) {
        self.clips = clips;
        self.source = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Swap in a snapshot fetched for `scope` at backend `revision`.
    pub(super) fn replace_from(&mut self, scope: ClipScope, revision: u64, clips: Vec<Clip>) {
        self.replace(clips);
        self.source = Some((scope, revision));
    }

    /// Every cached clip, in backend order.
    pub fn current_view(&self) -> &[Clip] {
        &self.clips
    }

    pub fn get(&self, id: ClipId) -> Option<&Clip> {
        self.clips.iter().find(|clip| clip.id == id)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Bumped on every replace; lets drivers skip redundant redraws.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Backend revision of the snapshot when it was fetched for `scope`.
    pub(super) fn revision_for(&self, scope: &ClipScope) -> Option<u64> {
        match &self.source {
            Some((cached_scope, revision)) if cached_scope == scope => Some(*revision),
            _ => None,
        }
    }

    /// Mirror a saved clip into the snapshot.
    ///
    /// The snapshot revision is forgotten so the next poll refetches.
    pub(super) fn apply_saved(&mut self, saved: &Clip) -> bool {
        let Some(slot) = self.clips.iter_mut().find(|clip| clip.id == saved.id) else {
            return false;
        };
        *slot = saved.clone();
        self.source = None;
        self.generation = self.generation.wrapping_add(1);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipshelf_core::models::Category;

    #[test]
    fn replace_keeps_backend_order_and_bumps_generation() {
        let mut cache = ClipCache::default();
        let clips = vec![
            Clip::new(3, "c", Category::Text),
            Clip::new(1, "a", Category::Url),
            Clip::new(2, "b", Category::Code),
        ];
        cache.replace_from(ClipScope::all(), 7, clips);
        let ids: Vec<ClipId> = cache.current_view().iter().map(|clip| clip.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(cache.generation(), 1);
        assert_eq!(cache.revision_for(&ClipScope::all()), Some(7));
        assert_eq!(
            cache.revision_for(&ClipScope::Search("a".to_string())),
            None
        );

        cache.replace(Vec::new());
        assert!(cache.is_empty());
        assert_eq!(cache.generation(), 2);
        assert_eq!(cache.revision_for(&ClipScope::all()), None);
    }

    #[test]
    fn apply_saved_updates_one_entry_and_forgets_revision() {
        let mut cache = ClipCache::default();
        cache.replace_from(
            ClipScope::all(),
            4,
            vec![
                Clip::new(1, "one", Category::Text),
                Clip::new(2, "two", Category::Text),
            ],
        );
        let mut saved = Clip::new(2, "TWO", Category::Text);
        saved.revision = 1;
        assert!(cache.apply_saved(&saved));
        assert_eq!(cache.get(2).map(|clip| clip.content.as_str()), Some("TWO"));
        assert_eq!(cache.get(1).map(|clip| clip.content.as_str()), Some("one"));
        assert_eq!(cache.revision_for(&ClipScope::all()), None);

        assert!(!cache.apply_saved(&Clip::new(9, "ghost", Category::Text)));
    }
}
