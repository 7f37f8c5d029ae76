//! Difference-test forge for module-level targets

use crate::context::GenerationContext;
use crate::render::header_comment;
use crate::{Forge, ForgeDescriptor, ForgeKind};
use carron_core::{generated_test_filename, GeneratedArtifact, GenerationResult};

inventory::submit! {
    ForgeDescriptor {
        kind: ForgeKind::Diff,
        factory: create_diff_forge,
    }
}

fn create_diff_forge() -> Box<dyn Forge> {
    Box::new(DiffForge)
}

/// Emits a placeholder difference test
#[derive(Debug, Default, Clone, Copy)]
pub struct DiffForge;

impl Forge for DiffForge {
    fn kind(&self) -> ForgeKind {
        ForgeKind::Diff
    }

    fn generate(&self, context: &GenerationContext) -> GenerationResult {
        let filename = generated_test_filename(context.target.as_str());
        let mut content = header_comment(self.kind().as_ref(), context);
        content.push_str("\n\ndef test_diff_placeholder():\n    assert True\n");

        GenerationResult::new(vec![GeneratedArtifact::new(filename, content)])
    }
}
