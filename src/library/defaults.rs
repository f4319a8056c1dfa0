//! Seed content for a fresh studio: the shipped constitution documents,
//! the workflow template set, and the fixed room roster used before a
//! building map exists.

use super::{RuleLibrary, WorkflowSlot};
use crate::models::Room;

const CORE_CONSTITUTION: &str = "\
# CORE CONSTITUTION — Carriage House Rendering Engine

## ROLE
You are a precision architectural visualization agent. Every image you
produce must comply with the cardinal-wall axioms below.

## BUILDING IDENTITY
- 2-story detached accessory structure (garage + carriage house apartment)
- Footprint: 30'-0\" (E-W) x 34'-8\" (N-S) = 1,040 SF
- Roof: 3:12 pitch gable, ridge running EAST-WEST; gable ends face N and S

## CARDINAL WALL AXIOMS
- EAST WALL: three 9'x9' overhead garage doors, four second-floor windows.
  The ONLY wall with three garage doors.
- WEST WALL: one single shop door at the south end; second-floor entry and
  sliding door opening onto the DECK. No staircase on this facade.
- NORTH WALL: one entry door at the northwest corner; gable triangle at the
  peak; ZERO garage doors.
- SOUTH WALL: the EXTERIOR STAIRCASE climbs along this wall from WEST
  (ground) up to EAST (deck). Solid lap-sided enclosure under the stairs.
  No garage doors, no ground-level openings.

## DECK GEOMETRY
L-shaped open-air platform on the SOUTH and WEST sides only, legs meeting
at the southwest corner. The deck is NOT enclosed living space; the
second-floor walls step inward on those two sides. NORTH and EAST walls
are flush with no offset or added structure.

## STAIRCASE DIRECTION
Bottom = WEST end at ground level; top = EAST end at second-floor deck
level. A person walks EASTWARD while climbing. A staircase descending
toward the east is an error.

## ROOF FORM
A SIMPLE GABLE: two planes meeting at an E-W ridge. Not a hip, gambrel,
shed, or mansard. Pitch 3:12 — a low slope; a steep roof is an error.
";

const FAILURE_CATALOG: &str = "\
# FAILURE CATALOG
Recurring hallucinations to actively avoid:
- Drive-through garage configurations (doors on two opposing walls).
- Hip roofs, or any roof without gable triangles on the N and S ends.
- Staircase rendered on the wrong wall, or descending toward the east.
- Deck wrapped onto the north or east sides, or enclosed as living space.
- Garage doors on any wall other than the east wall.
";

const EXTERIOR_MASSING: &str = "\
Generate a white-clay exterior isometric view of the building from the
{DIRECTION} corner. Neutral studio backdrop, soft shadows, no entourage.
Show massing, roof form, deck, and staircase exactly per the axioms.";

const FLAT_ELEVATION: &str = "\
Generate a flat orthographic elevation of the {DIRECTION} wall. True
front-on projection with no perspective. Show every door, window, and the
roofline for that wall exactly per the axioms.";

const AXIOM_AUDIT: &str = "\
Audit the supplied material against the cardinal wall axioms. Walk each
wall in turn, enumerate what is visible, and compare it with the rules.
Be extremely critical; list every discrepancy. Return PASS or FAIL.";

const TOP_DOWN_PLAN: &str = "\
Generate a top-down floor plan view with walls poche'd solid. Label rooms
and keep the footprint, staircase position, and deck outline per the
axioms.";

const INTERIOR_ROOM: &str = "\
Generate an interior perspective of {ROOM_NAME}. Eye-level camera,
physically plausible daylight, finishes per the plan. Ceiling treatment
and openings must match the room's recorded features.";

const SCORING_RUBRIC: &str = "\
Score the output 0-10 on each axis: structural accuracy, spatial
geometry, staircase fidelity, deck accuracy, south wall solidity, render
quality. Sum the axes into a total out of 60.";

/// The library a fresh studio starts with: the shipped constitution
/// documents plus one workflow template per slot.
pub fn default_library() -> RuleLibrary {
    let mut library = RuleLibrary::new();
    library.add_constitution("System-Prompt.md", CORE_CONSTITUTION);
    library.add_constitution("Known-Hallucinations.md", FAILURE_CATALOG);
    library.add_workflow("01: Exterior Massing", WorkflowSlot::ExteriorMassing, EXTERIOR_MASSING);
    library.add_workflow("02: Axiom Audit", WorkflowSlot::AxiomAudit, AXIOM_AUDIT);
    library.add_workflow("03: Plan View", WorkflowSlot::TopDownPlan, TOP_DOWN_PLAN);
    library.add_workflow("04: Interior Room", WorkflowSlot::InteriorRoom, INTERIOR_ROOM);
    library.add_workflow("05: Flat Elevation", WorkflowSlot::FlatElevation, FLAT_ELEVATION);
    library.add_workflow("07: Scoring Rubric", WorkflowSlot::ScoringRubric, SCORING_RUBRIC);
    library
}

/// Fixed room roster used for target-room resolution before any building
/// map has been rationalized.
pub fn fallback_rooms() -> Vec<Room> {
    vec![
        Room::stub("200", "Living Room 200 (Hero Space — Vaulted)", 2),
        Room::stub("201", "Kitchenette 201", 2),
        Room::stub("202", "Bedroom 202 (East)", 2),
        Room::stub("206", "Bedroom 206 (Northeast)", 2),
        Room::stub("204", "Bathroom 204", 2),
        Room::stub("208", "Utility / Entry 208", 2),
        Room::stub("G1", "Garage Bay (3-Car)", 1),
        Room::stub("G2", "Workshop / Shop Bay", 1),
    ]
}
