//! The rule library: an ordered collection of reusable text fragments.
//!
//! Category A items ("axioms", [`RuleCategory::Constitution`]) form the
//! persistent system framing sent with every generative call. Category B
//! items ([`RuleCategory::Workflow`]) are reusable prompt templates selected
//! per operation through an explicit [`WorkflowSlot`] key.

mod defaults;

pub use defaults::{default_library, fallback_rooms};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether an item frames every call or is selected per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Constitution,
    Workflow,
}

/// Stable keys workflow templates are resolved by. Selection is exact-key;
/// among duplicate slots the first item in library order wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowSlot {
    AxiomAudit,
    ScoringRubric,
    ExteriorMassing,
    FlatElevation,
    TopDownPlan,
    InteriorRoom,
}

/// One reusable text fragment. The category is fixed at creation; title and
/// content are user-editable, and activation toggles inclusion in the
/// assembled system framing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleItem {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: RuleCategory,
    #[serde(default)]
    pub slot: Option<WorkflowSlot>,
    pub is_active: bool,
}

/// Ordered, editable collection of rule items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleLibrary {
    items: Vec<RuleItem>,
}

impl RuleLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a constitution (axiom) item, active by default.
    pub fn add_constitution(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Uuid {
        self.push_item(title, content, RuleCategory::Constitution, None)
    }

    /// Adds a workflow template bound to `slot`, active by default.
    pub fn add_workflow(
        &mut self,
        title: impl Into<String>,
        slot: WorkflowSlot,
        content: impl Into<String>,
    ) -> Uuid {
        self.push_item(title, content, RuleCategory::Workflow, Some(slot))
    }

    fn push_item(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        category: RuleCategory,
        slot: Option<WorkflowSlot>,
    ) -> Uuid {
        let item = RuleItem {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            category,
            slot,
            is_active: true,
        };
        let id = item.id;
        self.items.push(item);
        id
    }

    pub fn items(&self) -> &[RuleItem] {
        &self.items
    }

    pub fn get(&self, id: Uuid) -> Option<&RuleItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn set_active(&mut self, id: Uuid, active: bool) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.is_active = active;
                true
            }
            None => false,
        }
    }

    pub fn set_title(&mut self, id: Uuid, title: impl Into<String>) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.title = title.into();
                true
            }
            None => false,
        }
    }

    pub fn set_content(&mut self, id: Uuid, content: impl Into<String>) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.content = content.into();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: Uuid) -> Option<RuleItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Active constitution items in library order.
    pub fn active_constitution(&self) -> impl Iterator<Item = &RuleItem> {
        self.items
            .iter()
            .filter(|item| item.category == RuleCategory::Constitution && item.is_active)
    }

    /// First workflow template bound to `slot`, in library order.
    pub fn workflow_for_slot(&self, slot: WorkflowSlot) -> Option<&RuleItem> {
        self.items
            .iter()
            .find(|item| item.category == RuleCategory::Workflow && item.slot == Some(slot))
    }
}
