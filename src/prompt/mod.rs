//! Prompt assembly: persistent system framing from the active axioms, and
//! per-operation instruction text built from workflow templates.
//!
//! Template content is trusted user input; no escaping or validation is
//! performed on it.

use crate::library::{RuleLibrary, WorkflowSlot};
use crate::models::{RenderKind, RenderRequest, Room};

/// Token replaced by the request's viewpoint string.
pub const DIRECTION_PLACEHOLDER: &str = "{DIRECTION}";
/// Token replaced by the resolved room's name.
pub const ROOM_NAME_PLACEHOLDER: &str = "{ROOM_NAME}";
/// Substituted when no target room resolves.
pub const ROOM_NAME_FALLBACK: &str = "Target Space";

const SECTION_SEPARATOR: &str = "\n\n---\n\n";

const GENERIC_FRAMING: &str =
    "You are a precise architectural visualization engine. Adhere to all cardinal axioms.";

/// Persistent system framing: every active constitution item, prefixed by
/// its title as a heading, joined with a visible separator, in library
/// order. Falls back to a fixed generic instruction when none is active.
pub fn system_framing(library: &RuleLibrary) -> String {
    let sections: Vec<String> = library
        .active_constitution()
        .map(|item| format!("## {}\n{}", item.title, item.content))
        .collect();
    if sections.is_empty() {
        GENERIC_FRAMING.to_string()
    } else {
        sections.join(SECTION_SEPARATOR)
    }
}

/// Content of the workflow template bound to `slot`, or an empty string
/// when the library carries none.
pub fn workflow_body(library: &RuleLibrary, slot: WorkflowSlot) -> String {
    library
        .workflow_for_slot(slot)
        .map(|item| item.content.clone())
        .unwrap_or_default()
}

/// Replaces every placeholder occurrence with request-specific values.
pub fn substitute(template: &str, viewpoint: &str, room: Option<&Room>) -> String {
    let room_name = room.map(|room| room.name.as_str()).unwrap_or(ROOM_NAME_FALLBACK);
    template
        .replace(DIRECTION_PLACEHOLDER, viewpoint)
        .replace(ROOM_NAME_PLACEHOLDER, room_name)
}

fn slot_for_kind(kind: RenderKind) -> WorkflowSlot {
    match kind {
        RenderKind::ExteriorIsometric => WorkflowSlot::ExteriorMassing,
        RenderKind::ExteriorElevation => WorkflowSlot::FlatElevation,
        RenderKind::InteriorPlan => WorkflowSlot::TopDownPlan,
        RenderKind::InteriorPerspective => WorkflowSlot::InteriorRoom,
    }
}

/// Fixed style directive appended for each render kind.
fn style_directive(kind: RenderKind) -> &'static str {
    match kind {
        RenderKind::ExteriorIsometric => {
            "Style: white clay massing model, soft studio lighting, \
             three-quarter aerial isometric camera."
        }
        RenderKind::ExteriorElevation => {
            "Style: flat orthographic elevation, zero perspective \
             convergence, drafting-sheet neutrality."
        }
        RenderKind::InteriorPlan => {
            "Style: top-down orthographic plan, walls poche'd solid, \
             uniform sheet lighting."
        }
        RenderKind::InteriorPerspective => {
            "Style: eye-level interior perspective, physically plausible \
             daylight, photoreal finishes."
        }
    }
}

/// Full generate-stage instruction: the substituted workflow body for the
/// request's kind, the kind's style directive, and the scoring rubric.
pub fn render_prompt(library: &RuleLibrary, request: &RenderRequest, room: Option<&Room>) -> String {
    let body = workflow_body(library, slot_for_kind(request.kind));
    let body = substitute(&body, &request.viewpoint, room);
    let rubric = workflow_body(library, WorkflowSlot::ScoringRubric);
    [body, style_directive(request.kind).to_string(), rubric]
        .into_iter()
        .filter(|section| !section.is_empty())
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}
