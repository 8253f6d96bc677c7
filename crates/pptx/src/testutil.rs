//! In-memory fakes shared by the engine unit tests.

use crate::package::{RelatedPart, RelatedParts, TargetRef};
use std::collections::HashMap;

/// A [`RelatedParts`] resolver backed by plain maps.
///
/// Every contained part shares the same relationship namespace, so
/// `view_of` can simply hand out a clone.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeParts {
    parts: HashMap<String, (Vec<u8>, String)>,
    targets: HashMap<String, (String, bool)>,
}

impl FakeParts {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_part(mut self, rel_id: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.parts
            .insert(rel_id.to_string(), (bytes.to_vec(), content_type.to_string()));
        self
    }

    pub(crate) fn with_external(mut self, rel_id: &str, target: &str) -> Self {
        self.targets
            .insert(rel_id.to_string(), (target.to_string(), true));
        self
    }
}

impl RelatedParts for FakeParts {
    fn related_part(&self, rel_id: &str) -> Option<RelatedPart<'_>> {
        self.parts.get(rel_id).map(|(bytes, content_type)| RelatedPart {
            bytes,
            content_type: content_type.clone(),
        })
    }

    fn target_ref(&self, rel_id: &str) -> Option<TargetRef<'_>> {
        self.targets
            .get(rel_id)
            .map(|(target, external)| TargetRef {
                target,
                external: *external,
            })
    }

    fn view_of(&self, rel_id: &str) -> Option<Box<dyn RelatedParts + '_>> {
        self.parts
            .contains_key(rel_id)
            .then(|| Box::new(self.clone()) as Box<dyn RelatedParts>)
    }
}
