//! The studio façade: the upward interface UI and CLI callers drive.
//!
//! Owns the injected generative service, the rule library, the current
//! building map, and the append-only list of render results. Every
//! operation takes `&mut self`, so a second operation cannot start while
//! one is in flight. Results are never mutated after insertion.

use uuid::Uuid;

use crate::config::StudioConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::ingest::DocumentSource;
use crate::library::{self, RuleLibrary};
use crate::models::{BuildingMap, MaterialItem, RenderRequest, RenderResult, Room};
use crate::pipeline::{self, RenderObserver, RenderPipeline};
use crate::rationalize::SpatialRationalizer;
use crate::service::GenerativeService;

pub struct Studio {
    service: Box<dyn GenerativeService>,
    config: StudioConfig,
    library: RuleLibrary,
    building_map: Option<BuildingMap>,
    inventory: Vec<MaterialItem>,
    renders: Vec<RenderResult>,
}

impl Studio {
    /// Creates a studio seeded with the default rule library.
    pub fn new(service: Box<dyn GenerativeService>, config: StudioConfig) -> Self {
        Self {
            service,
            config,
            library: library::default_library(),
            building_map: None,
            inventory: Vec::new(),
            renders: Vec::new(),
        }
    }

    pub fn with_library(mut self, library: RuleLibrary) -> Self {
        self.library = library;
        self
    }

    pub fn library(&self) -> &RuleLibrary {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut RuleLibrary {
        &mut self.library
    }

    pub fn building_map(&self) -> Option<&BuildingMap> {
        self.building_map.as_ref()
    }

    pub fn inventory(&self) -> &[MaterialItem] {
        &self.inventory
    }

    /// All results so far, oldest first.
    pub fn renders(&self) -> &[RenderResult] {
        &self.renders
    }

    /// Rationalizes the documents into a new building map, replacing any
    /// prior map wholesale.
    pub fn rationalize(&mut self, documents: &[DocumentSource]) -> PipelineResult<&BuildingMap> {
        let plan = SpatialRationalizer::new(self.service.as_ref(), &self.config)
            .rationalize(documents, &self.library)?;
        self.inventory = plan.inventory;
        Ok(self.building_map.insert(plan.map))
    }

    /// Runs the generate → audit pipeline for `request` and appends the
    /// result.
    pub fn render(
        &mut self,
        request: RenderRequest,
        observer: &mut dyn RenderObserver,
    ) -> PipelineResult<&RenderResult> {
        let room = self.resolve_room(request.target_room_id.as_deref());
        let result = RenderPipeline::new(self.service.as_ref(), &self.config).execute(
            &request,
            &self.library,
            room.as_ref(),
            observer,
        )?;
        let slot = self.renders.len();
        self.renders.push(result);
        Ok(&self.renders[slot])
    }

    /// Runs one bounded refinement pass against a held result and appends
    /// the outcome. The referenced result is retained unchanged.
    pub fn refine(
        &mut self,
        result_id: Uuid,
        observer: &mut dyn RenderObserver,
    ) -> PipelineResult<&RenderResult> {
        let previous = self
            .renders
            .iter()
            .find(|result| result.id == result_id)
            .cloned()
            .ok_or(PipelineError::UnknownResult(result_id))?;
        let room = self.resolve_room(previous.request.target_room_id.as_deref());
        let refined = pipeline::refine(
            self.service.as_ref(),
            &self.config,
            &self.library,
            &previous,
            &previous.request,
            room.as_ref(),
            observer,
        )?;
        let slot = self.renders.len();
        self.renders.push(refined);
        Ok(&self.renders[slot])
    }

    /// Resolves a target room against the current map, falling back to
    /// the fixed roster when no map has been rationalized yet.
    fn resolve_room(&self, target_room_id: Option<&str>) -> Option<Room> {
        let room_id = target_room_id?;
        match &self.building_map {
            Some(map) => map.room_by_id(room_id).cloned(),
            None => library::fallback_rooms()
                .into_iter()
                .find(|room| room.id == room_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::models::{RenderKind, RenderStatus};
    use crate::service::testing::ScriptedService;
    use crate::service::PromptPart;

    fn studio_with_script() -> (Rc<ScriptedService>, Studio) {
        let service = Rc::new(ScriptedService::new());
        let studio = Studio::new(Box::new(service.clone()), StudioConfig::default());
        (service, studio)
    }

    fn failing_audit_json() -> String {
        serde_json::json!({
            "narrative": "Staircase descends east.",
            "verdict": "FAIL",
            "failures": [{
                "category": "STAIRCASE",
                "description": "Staircase descends toward the east",
                "axiom_correction": "Stairs climb from west to east"
            }],
            "score": {
                "structural_accuracy": 5, "spatial_geometry": 5,
                "staircase_fidelity": 2, "deck_accuracy": 6,
                "south_wall_solidity": 6, "render_quality": 8,
                "total": 32
            }
        })
        .to_string()
    }

    fn passing_audit_json() -> String {
        serde_json::json!({
            "narrative": "Conforms.",
            "verdict": "PASS",
            "failures": [],
            "score": {
                "structural_accuracy": 8, "spatial_geometry": 7,
                "staircase_fidelity": 7, "deck_accuracy": 7,
                "south_wall_solidity": 7, "render_quality": 8,
                "total": 44
            }
        })
        .to_string()
    }

    fn plan_json() -> String {
        serde_json::json!({
            "map": {
                "totalLevels": 2,
                "globalFootprint": "30' x 34'-8\"",
                "exteriorFeatures": [],
                "rooms": [{
                    "id": "201", "name": "Kitchenette 201 (Mapped)", "level": 2,
                    "dimensions": "8' x 10'", "sqFt": 80.0,
                    "structuralFeatures": [], "adjacencies": []
                }]
            },
            "inventory": [{
                "room": "201", "category": "Finishes", "type": "tile",
                "quantity": "80 sf", "notes": ""
            }]
        })
        .to_string()
    }

    #[test]
    fn rationalize_replaces_the_map_and_inventory_wholesale() {
        let (service, mut studio) = studio_with_script();
        service.push_structured(Ok(plan_json()));

        let documents = vec![DocumentSource {
            name: "a101.png".into(),
            media_type: "image/png".into(),
            bytes: b"sheet".to_vec(),
            fingerprint: "a".repeat(64),
        }];
        studio.rationalize(&documents).unwrap();
        assert_eq!(studio.building_map().unwrap().rooms.len(), 1);
        assert_eq!(studio.inventory().len(), 1);

        // A second rationalization replaces, never merges.
        service.push_structured(Ok(serde_json::json!({
            "map": {
                "totalLevels": 1, "globalFootprint": "", "exteriorFeatures": [],
                "rooms": []
            },
            "inventory": []
        })
        .to_string()));
        studio.rationalize(&documents).unwrap();
        assert_eq!(studio.building_map().unwrap().rooms.len(), 0);
        assert_eq!(studio.inventory().len(), 0);
    }

    #[test]
    fn render_before_rationalize_resolves_rooms_from_the_fallback_roster() {
        let (service, mut studio) = studio_with_script();
        service.push_image_ok(b"png", "");
        service.push_structured(Ok(passing_audit_json()));

        studio
            .render(
                RenderRequest::new(RenderKind::InteriorPerspective, "eye-level")
                    .with_target_room("201"),
                &mut |_: &str| {},
            )
            .unwrap();

        let requests = service.image_requests.borrow();
        assert!(matches!(&requests[0].parts[0], PromptPart::Text(text)
            if text.contains("Kitchenette 201")));
    }

    #[test]
    fn mapped_rooms_take_precedence_over_the_roster() {
        let (service, mut studio) = studio_with_script();
        service.push_structured(Ok(plan_json()));
        studio
            .rationalize(&[DocumentSource {
                name: "a101.png".into(),
                media_type: "image/png".into(),
                bytes: b"sheet".to_vec(),
                fingerprint: "b".repeat(64),
            }])
            .unwrap();

        service.push_image_ok(b"png", "");
        service.push_structured(Ok(passing_audit_json()));
        studio
            .render(
                RenderRequest::new(RenderKind::InteriorPerspective, "eye-level")
                    .with_target_room("201"),
                &mut |_: &str| {},
            )
            .unwrap();

        let requests = service.image_requests.borrow();
        assert!(matches!(&requests[0].parts[0], PromptPart::Text(text)
            if text.contains("Kitchenette 201 (Mapped)")));
    }

    #[test]
    fn refine_appends_a_new_result_and_keeps_the_previous_one() {
        let (service, mut studio) = studio_with_script();
        service.push_image_ok(b"first-render", "");
        service.push_structured(Ok(failing_audit_json()));

        let first_id = studio
            .render(
                RenderRequest::new(RenderKind::ExteriorIsometric, "SE"),
                &mut |_: &str| {},
            )
            .unwrap()
            .id;
        assert_eq!(studio.renders()[0].status, RenderStatus::Violation);

        service.push_image_ok(b"second-render", "");
        service.push_structured(Ok(passing_audit_json()));
        let refined_id = studio.refine(first_id, &mut |_: &str| {}).unwrap().id;

        assert_eq!(studio.renders().len(), 2);
        assert_ne!(refined_id, first_id);
        assert_eq!(studio.renders()[0].id, first_id, "original retained in order");
        assert_eq!(studio.renders()[1].refinement_pass, 1);
        assert_eq!(studio.renders()[1].status, RenderStatus::Verified);
    }

    #[test]
    fn refining_an_unknown_result_is_an_error() {
        let (_service, mut studio) = studio_with_script();
        let err = studio.refine(Uuid::new_v4(), &mut |_: &str| {}).unwrap_err();
        assert!(matches!(err, PipelineError::UnknownResult(_)));
    }
}
