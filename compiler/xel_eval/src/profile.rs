//! Per-node runtime type observations.
//!
//! Interpreted evaluations record the descriptor of every value each node
//! produces. The compiler backend only specialises nodes whose profile is
//! [`ProfileSlot::Stable`].

use xel_ir::{ExprId, TypeDesc};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ProfileSlot {
    #[default]
    Unseen,
    /// Every observation so far had this descriptor.
    Stable(TypeDesc),
    /// Two different descriptors were observed; never becomes stable again.
    Unstable,
}

/// One slot per AST node, indexed by [`ExprId`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeProfile {
    slots: Vec<ProfileSlot>,
    evaluations: u64,
}

impl TypeProfile {
    pub fn new(node_count: usize) -> Self {
        TypeProfile {
            slots: vec![ProfileSlot::Unseen; node_count],
            evaluations: 0,
        }
    }

    pub fn record(&mut self, id: ExprId, desc: &TypeDesc) {
        let Some(slot) = self.slots.get_mut(id.index()) else {
            return;
        };
        match slot {
            ProfileSlot::Unseen => *slot = ProfileSlot::Stable(desc.clone()),
            ProfileSlot::Stable(seen) if seen != desc => *slot = ProfileSlot::Unstable,
            ProfileSlot::Stable(_) | ProfileSlot::Unstable => {}
        }
    }

    pub fn slot(&self, id: ExprId) -> &ProfileSlot {
        self.slots.get(id.index()).unwrap_or(&ProfileSlot::Unseen)
    }

    /// Descriptor of a node seen with exactly one descriptor.
    pub fn stable(&self, id: ExprId) -> Option<&TypeDesc> {
        match self.slot(id) {
            ProfileSlot::Stable(desc) => Some(desc),
            ProfileSlot::Unseen | ProfileSlot::Unstable => None,
        }
    }

    /// Count one completed interpreted evaluation.
    pub fn finish_evaluation(&mut self) {
        self.evaluations += 1;
    }

    /// Completed interpreted evaluations recorded into this profile.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Forget every observation, as after a deoptimisation.
    pub fn reset(&mut self) {
        self.slots.fill(ProfileSlot::Unseen);
        self.evaluations = 0;
    }
}
